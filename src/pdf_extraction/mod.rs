// PDF extraction module
pub mod document_processor;
pub mod extraction_router;
#[cfg(feature = "lopdf")]
pub mod lopdf_helper;
pub mod pdftotext;

pub use document_processor::{analyze_with, PdfBackend};
pub use extraction_router::{Availability, ExtractionMethod, Extractor};
#[cfg(feature = "lopdf")]
pub use lopdf_helper::LopdfBackend;
pub use pdftotext::PopplerBackend;
