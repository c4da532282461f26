// lopdf backend - Pure Rust PDF operations
use lopdf::{Dictionary, Document, Object};
use std::path::Path;

use super::document_processor::PdfBackend;
use crate::types::{ExtractionError, Result};

#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfBackend;

/// A loaded document plus its page numbers in order.
pub struct LoadedPdf {
    document: Document,
    page_numbers: Vec<u32>,
}

/// Load a PDF document using lopdf
pub fn load_pdf(path: &Path) -> Result<Document> {
    Document::load(path).map_err(|e| ExtractionError::Open(e.to_string()))
}

impl PdfBackend for LopdfBackend {
    type Document = LoadedPdf;

    fn open(&self, path: &Path) -> Result<LoadedPdf> {
        let document = load_pdf(path)?;
        let page_numbers = document.get_pages().into_keys().collect();
        Ok(LoadedPdf { document, page_numbers })
    }

    fn page_count(&self, pdf: &LoadedPdf) -> usize {
        pdf.page_numbers.len()
    }

    fn metadata(&self, pdf: &LoadedPdf) -> Vec<(String, Option<String>)> {
        let Some(info) = info_dictionary(&pdf.document) else {
            return Vec::new();
        };

        info.iter()
            .map(|(key, value)| {
                let key = String::from_utf8_lossy(key).into_owned();
                (key, object_to_string(&pdf.document, value))
            })
            .collect()
    }

    fn page_text(&self, pdf: &LoadedPdf, page: usize) -> Result<Option<String>> {
        let number = *pdf
            .page_numbers
            .get(page.wrapping_sub(1))
            .ok_or_else(|| ExtractionError::Page { page, reason: "no such page".into() })?;

        let text = pdf
            .document
            .extract_text(&[number])
            .map_err(|e| ExtractionError::Page { page, reason: e.to_string() })?;

        Ok(if text.is_empty() { None } else { Some(text) })
    }
}

fn resolve<'a>(document: &'a Document, object: &'a Object) -> Option<&'a Object> {
    match object {
        Object::Reference(id) => document.get_object(*id).ok(),
        other => Some(other),
    }
}

// Trailer /Info, possibly behind a reference
fn info_dictionary(document: &Document) -> Option<&Dictionary> {
    let info = document.trailer.get(b"Info").ok()?;
    resolve(document, info)?.as_dict().ok()
}

fn object_to_string(document: &Document, object: &Object) -> Option<String> {
    match resolve(document, object)? {
        Object::Null => None,
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        Object::Integer(i) => Some(i.to_string()),
        Object::Real(r) => Some(r.to_string()),
        Object::Boolean(b) => Some(b.to_string()),
        other => Some(format!("{:?}", other)),
    }
}

const UTF16_BOM: &[u8] = &[0xFE, 0xFF];
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Decode a PDF text string: UTF-16BE or UTF-8 when a BOM says so,
/// PDFDocEncoding (treated as Latin-1) otherwise.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(UTF16_BOM) {
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
        return char::decode_utf16(units)
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
            .collect();
    }
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        return String::from_utf8_lossy(rest).into_owned();
    }
    bytes.iter().map(|&b| b as char).collect()
}
