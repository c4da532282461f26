// Core types for pdf-analysis
use serde::ser::{SerializeStruct, Serializer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of the JSON report, produced for every discovered file.
///
/// A degraded record (no parser was available) serializes as
/// `filename`, `size`, `extractable` and `error` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AnalysisRecord {
    pub filename: String,
    #[serde(default)]
    pub pages: usize,
    #[serde(default)]
    pub text_length: usize,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
    pub extractable: bool,
    pub error: Option<String>,
    // Absent when the file could not be opened as a PDF
    #[serde(default)]
    pub preview: Option<String>,
    pub size: u64,
    #[serde(skip)]
    pub degraded: bool,
}

impl Serialize for AnalysisRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.degraded {
            let mut state = serializer.serialize_struct("AnalysisRecord", 4)?;
            state.serialize_field("filename", &self.filename)?;
            state.serialize_field("size", &self.size)?;
            state.serialize_field("extractable", &self.extractable)?;
            state.serialize_field("error", &self.error)?;
            return state.end();
        }

        let len = if self.preview.is_some() { 8 } else { 7 };
        let mut state = serializer.serialize_struct("AnalysisRecord", len)?;
        state.serialize_field("filename", &self.filename)?;
        state.serialize_field("pages", &self.pages)?;
        state.serialize_field("text_length", &self.text_length)?;
        state.serialize_field("metadata", &self.metadata)?;
        state.serialize_field("extractable", &self.extractable)?;
        state.serialize_field("error", &self.error)?;
        match &self.preview {
            Some(preview) => state.serialize_field("preview", preview)?,
            None => state.skip_field("preview")?,
        }
        state.serialize_field("size", &self.size)?;
        state.end()
    }
}

impl AnalysisRecord {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }

    /// Record for a file that could not be opened at all.
    pub fn failed(filename: impl Into<String>, error: &ExtractionError) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::new(filename)
        }
    }

    /// Record written when no backend can parse PDFs at all.
    pub fn degraded(filename: impl Into<String>, error: &ExtractionError) -> Self {
        Self {
            degraded: true,
            ..Self::failed(filename, error)
        }
    }
}

// Error types
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("cannot open PDF: {0}")]
    Open(String),

    #[error("page {page}: {reason}")]
    Page { page: usize, reason: String },

    #[error("no PDF parser available")]
    Unavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractionError>;
