// Record building, the JSON report and the console summary
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::AnalyzerConfig;
use crate::discovery::discover_pdfs;
use crate::pdf_extraction::Extractor;
use crate::types::AnalysisRecord;

/// Counts printed at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub extractable: usize,
}

impl Summary {
    pub fn from_records(records: &[AnalysisRecord]) -> Self {
        Self {
            total: records.len(),
            extractable: records.iter().filter(|r| r.extractable).count(),
        }
    }
}

/// Extract one file and attach its size, whatever the extraction outcome.
pub fn build_record(
    extractor: &Extractor,
    path: &Path,
    preview_page_cap: usize,
) -> Result<AnalysisRecord> {
    let mut record = extractor.extract(path, preview_page_cap);
    record.size = fs::metadata(path)
        .with_context(|| format!("reading size of {}", path.display()))?
        .len();
    Ok(record)
}

/// Pretty JSON array, two-space indent, UTF-8 written as is.
pub fn write_report(path: &Path, records: &[AnalysisRecord]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("writing {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

/// Everything one invocation does.
pub struct Analyzer {
    pub dir: PathBuf,
    pub config: AnalyzerConfig,
    pub extractor: Extractor,
}

impl Analyzer {
    pub fn new(dir: impl Into<PathBuf>, config: AnalyzerConfig) -> Self {
        let extractor = Extractor::select(config.backend);
        Self::with_extractor(dir, config, extractor)
    }

    pub fn with_extractor(
        dir: impl Into<PathBuf>,
        config: AnalyzerConfig,
        extractor: Extractor,
    ) -> Self {
        Self {
            dir: dir.into(),
            config,
            extractor,
        }
    }

    /// `None` means no PDFs were found and nothing was written.
    pub fn run(&self) -> Result<Option<Summary>> {
        let files = discover_pdfs(&self.dir)?;
        if files.is_empty() {
            println!("No PDF files found");
            return Ok(None);
        }
        println!("Found {} PDF files", files.len());

        let records = self.analyze_files(&files)?;
        write_report(&self.config.output_file, &records)?;

        let summary = Summary::from_records(&records);
        println!(
            "\nAnalysis complete! Results saved to {}",
            self.config.output_file.display()
        );
        println!("PDFs with extractable text: {}/{}", summary.extractable, summary.total);
        info!(
            "{} of {} files extractable via {}",
            summary.extractable,
            summary.total,
            self.extractor.method()
        );
        Ok(Some(summary))
    }

    pub fn analyze_files(&self, files: &[PathBuf]) -> Result<Vec<AnalysisRecord>> {
        let mut records = Vec::with_capacity(files.len());
        for path in files {
            let name = path.file_name().unwrap_or(path.as_os_str()).to_string_lossy();
            println!("Processing: {}", name);
            records.push(build_record(&self.extractor, path, self.config.preview_page_cap)?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, text_length: usize) -> AnalysisRecord {
        AnalysisRecord {
            text_length,
            extractable: text_length > 0,
            ..AnalysisRecord::new(name)
        }
    }

    #[test]
    fn test_summary_counts() {
        let records = vec![record("a.pdf", 10), record("b.pdf", 0), record("c.pdf", 3)];
        assert_eq!(Summary::from_records(&records), Summary { total: 3, extractable: 2 });
        assert_eq!(Summary::from_records(&[]), Summary { total: 0, extractable: 0 });
    }

    #[test]
    fn test_report_is_indented_and_keeps_unicode() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let mut rec = record("報告.pdf", 2);
        rec.preview = Some("日本".into());
        write_report(&out, &[rec]).unwrap();

        let content = fs::read_to_string(&out).unwrap();
        assert!(content.starts_with("[\n  {\n    \"filename\": \"報告.pdf\""));
        assert!(content.contains("\"preview\": \"日本\""));
        assert!(!content.contains("\\u"));
        assert!(content.ends_with("]\n"));
    }

    #[test]
    fn test_size_attached_for_unavailable_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.pdf");
        fs::write(&path, vec![0u8; 1234]).unwrap();

        let rec = build_record(&Extractor::Unavailable, &path, 500).unwrap();
        assert_eq!(rec.size, 1234);
        assert!(rec.error.is_some());
        assert!(rec.degraded);
    }

    #[test]
    fn test_no_files_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = AnalyzerConfig {
            output_file: dir.path().join("pdf_analysis.json"),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::with_extractor(dir.path(), config.clone(), Extractor::Unavailable);

        assert_eq!(analyzer.run().unwrap(), None);
        assert!(!config.output_file.exists());
    }

    #[test]
    fn test_run_records_every_file_in_order() {
        let dir = tempfile::tempdir().unwrap();
        for (name, len) in [("b.pdf", 5), ("a.pdf", 7)] {
            fs::write(dir.path().join(name), vec![b'x'; len]).unwrap();
        }
        let output = dir.path().join("out.json");
        let config = AnalyzerConfig {
            output_file: output.clone(),
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::with_extractor(dir.path(), config, Extractor::Unavailable);

        let summary = analyzer.run().unwrap().unwrap();
        assert_eq!(summary, Summary { total: 2, extractable: 0 });

        let records: Vec<AnalysisRecord> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        let names: Vec<_> = records.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(names, vec!["a.pdf", "b.pdf"]);
        assert_eq!(records[0].size, 7);
        assert_eq!(records[1].size, 5);
    }
}
