// Turns one PDF into an AnalysisRecord using any backend
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

use crate::types::{AnalysisRecord, Result};

/// Capabilities an extraction backend has to provide.
///
/// Pages are numbered from 1. A backend owns whatever handle `open` returns;
/// it is dropped when the document has been processed, whichever way that goes.
pub trait PdfBackend {
    type Document;

    fn open(&self, path: &Path) -> Result<Self::Document>;

    fn page_count(&self, document: &Self::Document) -> usize;

    /// Raw info dictionary entries; `None` marks a null value.
    fn metadata(&self, document: &Self::Document) -> Vec<(String, Option<String>)>;

    /// Text of one page. `Ok(None)` means the page has no text layer.
    fn page_text(&self, document: &Self::Document, page: usize) -> Result<Option<String>>;
}

/// Per-page texts collected in page order.
#[derive(Debug, Default)]
pub struct PageTexts {
    texts: Vec<String>,
    text_length: usize,
}

impl PageTexts {
    pub fn push(&mut self, page: usize, result: Result<Option<String>>) {
        match result {
            Ok(Some(text)) if !text.is_empty() => {
                self.text_length += text.chars().count();
                self.texts.push(text);
            }
            Ok(_) => {}
            Err(e) => debug!("skipping page {}: {}", page, e),
        }
    }

    pub fn text_length(&self) -> usize {
        self.text_length
    }

    /// First `cap` page texts joined by a single space.
    pub fn preview(&self, cap: usize) -> String {
        self.texts
            .iter()
            .take(cap)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn apply(&self, record: &mut AnalysisRecord, preview_page_cap: usize) {
        record.text_length = self.text_length;
        record.extractable = self.text_length > 0;
        record.preview = Some(self.preview(preview_page_cap));
    }
}

/// Null values become empty strings.
pub fn coerce_metadata<I>(entries: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (String, Option<String>)>,
{
    entries
        .into_iter()
        .map(|(key, value)| (key, value.unwrap_or_default()))
        .collect()
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Run every capability of `backend` over one file. Never fails: an open
/// failure is recorded in `error`, a page failure contributes no text.
pub fn analyze_with<B: PdfBackend>(backend: &B, path: &Path, preview_page_cap: usize) -> AnalysisRecord {
    let filename = file_name(path);

    let document = match backend.open(path) {
        Ok(document) => document,
        Err(e) => {
            warn!("{}: {}", filename, e);
            return AnalysisRecord::failed(filename, &e);
        }
    };

    let mut record = AnalysisRecord::new(filename);
    record.pages = backend.page_count(&document);
    record.metadata = coerce_metadata(backend.metadata(&document));

    let mut texts = PageTexts::default();
    for page in 1..=record.pages {
        texts.push(page, backend.page_text(&document, page));
    }
    texts.apply(&mut record, preview_page_cap);

    debug!(
        "{}: {} pages, {} chars",
        record.filename, record.pages, record.text_length
    );
    record
}
