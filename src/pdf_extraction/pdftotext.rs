// Poppler backend: pdfinfo for structure, pdftotext for page text
//
// Pages are extracted one at a time with the -layout flag:
// pdftotext -f [page] -l [page] -layout -enc UTF-8 [pdf_path] -
//
// pdfinfo runs with -rawdates -custom so metadata matches the raw /Info
// entries the lopdf backend reports.
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tracing::debug;

use super::document_processor::PdfBackend;
use crate::types::{ExtractionError, Result};

/// Labels pdfinfo prints after the info dictionary entries.
pub const STRUCTURE_KEYS: &[&str] = &[
    "Custom Metadata",
    "Metadata Stream",
    "Tagged",
    "UserProperties",
    "Suspects",
    "Form",
    "JavaScript",
];

static INFO_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\S[^:]*?):\s*(.*)$").expect("valid regex"));

#[derive(Debug, Clone)]
pub struct PopplerBackend {
    pdfinfo: PathBuf,
    pdftotext: PathBuf,
}

/// What pdfinfo reported about one file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfInfo {
    pub path: PathBuf,
    pub pages: usize,
    pub metadata: Vec<(String, Option<String>)>,
}

impl PopplerBackend {
    /// Locate both binaries on PATH; `None` if either is missing.
    pub fn detect() -> Option<Self> {
        let pdfinfo = which::which("pdfinfo").ok()?;
        let pdftotext = which::which("pdftotext").ok()?;
        debug!("poppler found: {} / {}", pdfinfo.display(), pdftotext.display());
        Some(Self { pdfinfo, pdftotext })
    }

    pub fn with_binaries(pdfinfo: impl Into<PathBuf>, pdftotext: impl Into<PathBuf>) -> Self {
        Self {
            pdfinfo: pdfinfo.into(),
            pdftotext: pdftotext.into(),
        }
    }
}

fn stderr_message(output: &Output, tool: &str) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("{} exited with {}", tool, output.status)
    } else {
        stderr.to_string()
    }
}

/// Parse pdfinfo's "Key:   value" listing.
///
/// With `-custom`, every info dictionary entry comes first, followed by
/// the document structure lines (`Tagged`, `Pages`, `Page size`, ...).
pub fn parse_pdfinfo(path: &Path, stdout: &str) -> PdfInfo {
    let mut info = PdfInfo {
        path: path.to_path_buf(),
        ..PdfInfo::default()
    };
    let mut in_info_dict = true;

    for line in stdout.lines() {
        let Some(caps) = INFO_LINE.captures(line) else {
            continue;
        };
        let key = &caps[1];
        let value = caps[2].trim();

        if in_info_dict && STRUCTURE_KEYS.contains(&key) {
            in_info_dict = false;
        }

        if in_info_dict {
            let value = if value.is_empty() { None } else { Some(value.to_string()) };
            info.metadata.push((key.to_string(), value));
        } else if key == "Pages" {
            info.pages = value.parse().unwrap_or(0);
        }
    }

    info
}

impl PdfBackend for PopplerBackend {
    type Document = PdfInfo;

    fn open(&self, path: &Path) -> Result<PdfInfo> {
        let output = Command::new(&self.pdfinfo)
            .args(["-enc", "UTF-8", "-rawdates", "-custom"])
            .arg(path)
            .output()?;

        if !output.status.success() {
            return Err(ExtractionError::Open(stderr_message(&output, "pdfinfo")));
        }

        Ok(parse_pdfinfo(path, &String::from_utf8_lossy(&output.stdout)))
    }

    fn page_count(&self, info: &PdfInfo) -> usize {
        info.pages
    }

    fn metadata(&self, info: &PdfInfo) -> Vec<(String, Option<String>)> {
        info.metadata.clone()
    }

    fn page_text(&self, info: &PdfInfo, page: usize) -> Result<Option<String>> {
        let page_arg = page.to_string();
        let output = Command::new(&self.pdftotext)
            .args(["-f", page_arg.as_str(), "-l", page_arg.as_str(), "-layout", "-enc", "UTF-8"])
            .arg(&info.path)
            .arg("-")
            .output()?;

        if !output.status.success() {
            return Err(ExtractionError::Page {
                page,
                reason: stderr_message(&output, "pdftotext"),
            });
        }

        // pdftotext ends every page with a form feed
        let text = String::from_utf8_lossy(&output.stdout);
        let text = text.trim_end_matches('\u{c}');
        Ok(if text.is_empty() { None } else { Some(text.to_string()) })
    }
}
