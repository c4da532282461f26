// Backend selection, resolved once per run
//
// Preference order: Poppler (pdfinfo + pdftotext on PATH), then the
// built-in lopdf parser, then a degraded extractor that only records
// that nothing could parse the file.
use std::fmt;
use std::path::Path;
use tracing::{info, warn};

use super::document_processor::{analyze_with, file_name};
#[cfg(feature = "lopdf")]
use super::lopdf_helper::LopdfBackend;
use super::pdftotext::PopplerBackend;
use crate::config::BackendPreference;
use crate::types::{AnalysisRecord, ExtractionError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    Poppler,
    Lopdf,
    Unavailable,
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Poppler => "poppler",
            Self::Lopdf => "lopdf",
            Self::Unavailable => "none",
        })
    }
}

/// The extractor chosen for this run.
#[derive(Debug, Clone)]
pub enum Extractor {
    Poppler(PopplerBackend),
    #[cfg(feature = "lopdf")]
    Lopdf(LopdfBackend),
    Unavailable,
}

/// Which backends exist on this machine.
#[derive(Debug, Clone, Default)]
pub struct Availability {
    pub poppler: Option<PopplerBackend>,
    pub lopdf: bool,
}

impl Availability {
    pub fn detect() -> Self {
        Self {
            poppler: PopplerBackend::detect(),
            lopdf: cfg!(feature = "lopdf"),
        }
    }
}

impl Extractor {
    /// Detect what is installed and pick a backend.
    pub fn select(preference: BackendPreference) -> Self {
        let extractor = Self::choose(preference, Availability::detect());
        info!("extraction backend: {}", extractor.method());
        extractor
    }

    pub fn choose(preference: BackendPreference, available: Availability) -> Self {
        let poppler = available.poppler.map(Extractor::Poppler);
        let lopdf = if available.lopdf { Self::lopdf() } else { None };

        match preference {
            BackendPreference::Auto => poppler.or(lopdf).unwrap_or(Extractor::Unavailable),
            BackendPreference::Poppler => poppler.unwrap_or_else(|| {
                warn!("poppler requested but pdfinfo/pdftotext not found on PATH");
                Extractor::Unavailable
            }),
            BackendPreference::Lopdf => lopdf.unwrap_or_else(|| {
                warn!("lopdf requested but this build has no lopdf support");
                Extractor::Unavailable
            }),
            BackendPreference::None => Extractor::Unavailable,
        }
    }

    #[cfg(feature = "lopdf")]
    fn lopdf() -> Option<Self> {
        Some(Extractor::Lopdf(LopdfBackend))
    }

    #[cfg(not(feature = "lopdf"))]
    fn lopdf() -> Option<Self> {
        None
    }

    pub fn method(&self) -> ExtractionMethod {
        match self {
            Extractor::Poppler(_) => ExtractionMethod::Poppler,
            #[cfg(feature = "lopdf")]
            Extractor::Lopdf(_) => ExtractionMethod::Lopdf,
            Extractor::Unavailable => ExtractionMethod::Unavailable,
        }
    }

    /// Build the record for one file (size is attached by the caller).
    pub fn extract(&self, path: &Path, preview_page_cap: usize) -> AnalysisRecord {
        match self {
            Extractor::Poppler(backend) => analyze_with(backend, path, preview_page_cap),
            #[cfg(feature = "lopdf")]
            Extractor::Lopdf(backend) => analyze_with(backend, path, preview_page_cap),
            Extractor::Unavailable => unavailable_record(path),
        }
    }
}

fn unavailable_record(path: &Path) -> AnalysisRecord {
    AnalysisRecord::degraded(file_name(path), &ExtractionError::Unavailable)
}
