// Poppler backend; skipped when pdfinfo/pdftotext are not installed
mod common;

use lopdf::{dictionary, Object};
use pdf_analysis::pdf_extraction::{Extractor, PopplerBackend};
use pdf_analysis::report::build_record;

fn poppler() -> Option<Extractor> {
    match PopplerBackend::detect() {
        Some(backend) => Some(Extractor::Poppler(backend)),
        None => {
            println!("Skipping: pdfinfo/pdftotext not found");
            None
        }
    }
}

#[test]
fn test_poppler_pages_and_text() {
    let Some(extractor) = poppler() else { return };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("three.pdf");
    common::write_text_pdf(&path, &["Alpha", "Bravo", "Charlie"], None);

    let record = build_record(&extractor, &path, 500).unwrap();

    assert_eq!(record.pages, 3);
    assert!(record.error.is_none());
    assert!(record.extractable);
    let preview = record.preview.unwrap();
    assert!(preview.contains("Alpha"));
    assert!(preview.contains("Charlie"));
    assert!(!preview.contains('\u{c}'));
}

#[test]
fn test_poppler_metadata() {
    let Some(extractor) = poppler() else { return };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meta.pdf");
    let info = dictionary! {
        "Title" => Object::string_literal("Budget 2024"),
        "Author" => Object::string_literal("Finance Team"),
    };
    common::write_text_pdf(&path, &["body"], Some(info));

    let record = build_record(&extractor, &path, 500).unwrap();
    assert_eq!(record.metadata.get("Title").map(String::as_str), Some("Budget 2024"));
    assert_eq!(record.metadata.get("Author").map(String::as_str), Some("Finance Team"));
}

#[test]
fn test_poppler_custom_keys_and_raw_dates() {
    let Some(extractor) = poppler() else { return };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.pdf");
    let info = dictionary! {
        "Title" => Object::string_literal("Budget 2024"),
        "Department" => Object::string_literal("Finance"),
        "CreationDate" => Object::string_literal("D:20240301120000Z"),
    };
    common::write_text_pdf(&path, &["body"], Some(info));

    let record = build_record(&extractor, &path, 500).unwrap();
    assert_eq!(record.metadata.get("Department").map(String::as_str), Some("Finance"));
    assert_eq!(
        record.metadata.get("CreationDate").map(String::as_str),
        Some("D:20240301120000Z")
    );

    #[cfg(feature = "lopdf")]
    {
        let lopdf = Extractor::Lopdf(pdf_analysis::pdf_extraction::LopdfBackend);
        let expected = build_record(&lopdf, &path, 500).unwrap();
        assert_eq!(record.metadata, expected.metadata);
    }
}

#[test]
fn test_poppler_corrupt_file() {
    let Some(extractor) = poppler() else { return };
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    common::write_corrupt_pdf(&path);

    let record = build_record(&extractor, &path, 500).unwrap();
    assert!(record.error.is_some());
    assert_eq!(record.pages, 0);
    assert!(!record.extractable);
}
