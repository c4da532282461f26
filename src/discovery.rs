// Finds the PDFs to analyze: direct children of one directory, no recursion
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PDF_EXTENSION;

/// Case-sensitive match on the `.pdf` suffix, like the `*.pdf` glob.
pub fn is_pdf_name(name: &str) -> bool {
    name.ends_with(PDF_EXTENSION)
}

/// Every `*.pdf` file in `dir`, sorted by file name.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let name = entry.file_name();
        if !is_pdf_name(&name.to_string_lossy()) {
            continue;
        }

        let path = entry.path();
        // Follows symlinks; skips directories named *.pdf
        if path.is_dir() {
            continue;
        }
        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
