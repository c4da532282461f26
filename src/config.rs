// Configuration for pdf-analysis
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

// Report defaults
pub const OUTPUT_FILE: &str = "pdf_analysis.json";
pub const PREVIEW_PAGE_CAP: usize = 500;
pub const PDF_EXTENSION: &str = ".pdf";

// Config file lookup
pub const LOCAL_CONFIG_FILE: &str = "pdf_analysis.toml";
pub const APP_DIR: &str = "pdf-analysis";

// Environment overrides
pub const ENV_BACKEND: &str = "PDF_ANALYSIS_BACKEND";
pub const ENV_OUTPUT: &str = "PDF_ANALYSIS_OUTPUT";

/// Which extraction backend a run should use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendPreference {
    /// Poppler if installed, then lopdf, then nothing
    #[default]
    Auto,
    Poppler,
    Lopdf,
    None,
}

impl FromStr for BackendPreference {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "poppler" | "pdftotext" => Ok(Self::Poppler),
            "lopdf" => Ok(Self::Lopdf),
            "none" => Ok(Self::None),
            other => bail!("unknown backend '{}' (expected auto, poppler, lopdf or none)", other),
        }
    }
}

impl fmt::Display for BackendPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Auto => "auto",
            Self::Poppler => "poppler",
            Self::Lopdf => "lopdf",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default = "default_output_file")]
    pub output_file: PathBuf,
    #[serde(default = "default_preview_page_cap")]
    pub preview_page_cap: usize,
    #[serde(default)]
    pub backend: BackendPreference,
}

fn default_output_file() -> PathBuf {
    PathBuf::from(OUTPUT_FILE)
}

fn default_preview_page_cap() -> usize {
    PREVIEW_PAGE_CAP
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
            preview_page_cap: default_preview_page_cap(),
            backend: BackendPreference::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Load from an explicit file, or from the first default location that exists.
    /// No file at all means defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        for candidate in default_config_paths() {
            if candidate.is_file() {
                return Self::from_file(&candidate);
            }
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        debug!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply PDF_ANALYSIS_* environment variables on top of file values.
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(env::var(ENV_BACKEND).ok(), env::var(ENV_OUTPUT).ok())
    }

    fn apply_overrides(&mut self, backend: Option<String>, output: Option<String>) -> Result<()> {
        if let Some(backend) = backend.filter(|v| !v.trim().is_empty()) {
            self.backend = backend
                .parse()
                .with_context(|| format!("invalid {}", ENV_BACKEND))?;
        }
        if let Some(output) = output.filter(|v| !v.trim().is_empty()) {
            self.output_file = PathBuf::from(output);
        }
        Ok(())
    }
}

fn default_config_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join(APP_DIR).join("config.toml"));
    }
    paths
}
