//! measure-agreement - inter-annotator agreement of an MMAX corpus
//!
//! Compares the markables of two annotators document by document and
//! prints Cohen's Kappa per document and pooled over the corpus.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use mmax_agreement::ComparisonMode;
use mmax_agreement_corpus::{format_json, format_report, run_corpus, AgreementConfig, CorpusLayout};
use tracing::{info, Level};

/// Command-line arguments for measure-agreement
#[derive(Parser, Debug)]
#[command(name = "measure-agreement")]
#[command(about = "Measure inter-annotator agreement of MMAX annotations using Cohen's Kappa")]
#[command(version)]
struct Args {
    /// Directory with basedata (`*.words.xml`) files
    basedata_dir: PathBuf,

    /// Markables directory of the first annotator
    directory1: PathBuf,

    /// Markables directory of the second annotator
    directory2: PathBuf,

    /// Count a markable as matched if any of its tokens is covered (default)
    #[arg(short = 'b', long, group = "mode")]
    binary_overlap: bool,

    /// Count matched tokens instead of matched markables
    #[arg(short = 'p', long, group = "mode")]
    proportional_overlap: bool,

    /// Count a markable as matched only if its span is identical
    #[arg(short = 'x', long, group = "mode")]
    exact_match: bool,

    /// Shell pattern selecting markable files in the first directory
    #[arg(long)]
    pattern: Option<String>,

    /// Markable level to compare
    #[arg(long)]
    level: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "MMAX_AGREEMENT_CONFIG")]
    config: Option<PathBuf>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn mode(&self) -> Option<ComparisonMode> {
        if self.exact_match {
            Some(ComparisonMode::Exact)
        } else if self.proportional_overlap {
            Some(ComparisonMode::Proportional)
        } else if self.binary_overlap {
            Some(ComparisonMode::Binary)
        } else {
            None
        }
    }

    /// Configuration file settings overridden by explicit flags.
    fn config(&self) -> Result<AgreementConfig> {
        let mut config = match &self.config {
            Some(path) => AgreementConfig::load(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => AgreementConfig::default(),
        };
        if let Some(mode) = self.mode() {
            config.mode = mode;
        }
        if let Some(pattern) = &self.pattern {
            config.pattern = pattern.clone();
        }
        if let Some(level) = &self.level {
            config.level = level.clone();
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.config()?;
    info!(
        "Comparing {} against {} ({} mode)",
        args.directory1.display(),
        args.directory2.display(),
        config.mode
    );

    let layout = CorpusLayout::new(&args.basedata_dir, &args.directory1, &args.directory2);
    let run = run_corpus(&layout, &config).context("Agreement run failed")?;
    if !run.summary.skipped.is_empty() {
        info!("{} documents skipped", run.summary.skipped.len());
    }

    let report = run
        .statistics
        .report(config.mode)
        .context("Failed to compute agreement statistics")?;
    if args.json {
        println!("{}", format_json(&report).context("Failed to serialize report")?);
    } else {
        print!("{}", format_report(&report));
    }

    Ok(())
}
