//! Scan a directory of PDFs and summarize each one as JSON: page count,
//! document metadata, how much text can be extracted and a preview of it.

pub mod config;
pub mod discovery;
pub mod pdf_extraction;
pub mod report;
pub mod types;

pub use config::{AnalyzerConfig, BackendPreference};
pub use report::{Analyzer, Summary};
pub use types::{AnalysisRecord, ExtractionError};
