// pdf-analysis - summarize every PDF in a directory into pdf_analysis.json
use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use pdf_analysis::{Analyzer, AnalyzerConfig, BackendPreference};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Directory to scan for *.pdf files
    #[arg(default_value = ".")]
    dir: PathBuf,
    /// Where to write the JSON report
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// auto, poppler, lopdf or none
    #[arg(short, long)]
    backend: Option<BackendPreference>,
    /// How many page texts go into each preview
    #[arg(long)]
    preview_pages: Option<usize>,
    /// Config file (default: ./pdf_analysis.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = AnalyzerConfig::load(args.config.as_deref())?;
    config.apply_env()?;
    if let Some(output) = args.output {
        config.output_file = output;
    }
    if let Some(backend) = args.backend {
        config.backend = backend;
    }
    if let Some(pages) = args.preview_pages {
        config.preview_page_cap = pages;
    }

    Analyzer::new(args.dir, config).run()?;
    Ok(())
}
