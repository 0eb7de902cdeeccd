//! oped - consolidate editorial and opinion pages from newspaper PDFs.
//!
//! Scans a directory of PDF files, classifies every page with the Gemini
//! API (falling back to section keywords when the model is unavailable or
//! the page is nearly empty) and writes the selected pages into a single
//! consolidated PDF.
//!
//! # Configuration
//!
//! Set these environment variables before running:
//!
//! - `GEMINI_API_KEY` - Required for remote page classification
//! - `OPED_INPUT_DIR` - Input directory, if not passed as `--input-dir`
//! - `OPED_BASE_URL` / `OPED_TIMEOUT_SECS` - Optional API endpoint tuning
//!
//! Every flag below also has an `OPED_*` environment counterpart; flags
//! win over the environment, the environment wins over built-in defaults.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use glob::MatchOptions;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use oped_core::classify::{KeywordMatcher, PagePolicy, DEFAULT_KEYWORDS};
use oped_core::config::{RunConfig, DEFAULT_OUTPUT, DEFAULT_SPARSE_THRESHOLD};
use oped_core::error::OpedError;
use oped_core::pipeline::Consolidator;
use oped_core::retry::RetryPolicy;
use oped_core::traits::{ClassifierConfig, PageSink};
use oped_llm::ClassifierFactory;
use oped_pdf::{LopdfSink, LopdfSource};

/// Consolidate editorial and opinion pages from a directory of newspaper PDFs
#[derive(Parser)]
#[command(name = "oped")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory scanned for PDF documents
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Path of the consolidated output PDF
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Model identifier for the remote classifier
    #[arg(short, long)]
    model: Option<String>,

    /// Stripped-text length below which the remote classifier is skipped
    #[arg(long)]
    sparse_threshold: Option<usize>,

    /// Drop pages with less stripped text than this outright
    #[arg(long)]
    min_text_length: Option<usize>,

    /// Maximum page-text characters embedded in the classification prompt
    #[arg(long)]
    prompt_budget: Option<usize>,

    /// Attempts per page before the keyword fallback takes over
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Initial retry backoff in milliseconds
    #[arg(long)]
    backoff_ms: Option<u64>,

    /// Retry backoff multiplier
    #[arg(long)]
    backoff_factor: Option<f32>,

    /// Comma-separated keyword list for the fallback classifier
    #[arg(long)]
    keywords: Option<String>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Set up logging; progress lines are INFO, RUST_LOG still wins
    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    let config = build_config(cli)?;
    run(config).await
}

/// Merge flags, environment variables and defaults into one [`RunConfig`].
fn build_config(cli: Cli) -> anyhow::Result<RunConfig> {
    let input_dir: PathBuf = resolve(cli.input_dir, "OPED_INPUT_DIR")?.ok_or_else(|| {
        anyhow::anyhow!("No input directory given (set --input-dir or OPED_INPUT_DIR)")
    })?;
    let output = resolve(cli.output, "OPED_OUTPUT")?.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let classifier_defaults = ClassifierConfig::default();
    let retry_defaults = RetryPolicy::default();
    let classifier = ClassifierConfig {
        model: resolve(cli.model, "OPED_MODEL")?.unwrap_or_default(),
        api_key: None,
        base_url: resolve(None, "OPED_BASE_URL")?,
        prompt_budget: resolve(cli.prompt_budget, "OPED_PROMPT_BUDGET")?
            .unwrap_or(classifier_defaults.prompt_budget),
        timeout_secs: resolve(None, "OPED_TIMEOUT_SECS")?
            .unwrap_or(classifier_defaults.timeout_secs),
        retry: RetryPolicy {
            max_attempts: resolve(cli.max_attempts, "OPED_MAX_ATTEMPTS")?
                .unwrap_or(retry_defaults.max_attempts),
            initial_delay_ms: resolve(cli.backoff_ms, "OPED_BACKOFF_MS")?
                .unwrap_or(retry_defaults.initial_delay_ms),
            max_delay_ms: retry_defaults.max_delay_ms,
            multiplier: resolve(cli.backoff_factor, "OPED_BACKOFF_FACTOR")?
                .unwrap_or(retry_defaults.multiplier),
        },
    };

    let keywords = match resolve(cli.keywords, "OPED_KEYWORDS")? {
        Some(raw) => parse_keyword_list(&raw),
        None => DEFAULT_KEYWORDS.iter().map(|s| s.to_string()).collect(),
    };

    Ok(RunConfig {
        input_dir,
        output,
        classifier,
        sparse_threshold: resolve(cli.sparse_threshold, "OPED_SPARSE_THRESHOLD")?
            .unwrap_or(DEFAULT_SPARSE_THRESHOLD),
        min_text_length: resolve(cli.min_text_length, "OPED_MIN_TEXT_LENGTH")?,
        keywords,
    })
}

async fn run(config: RunConfig) -> anyhow::Result<()> {
    if !config.input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", config.input_dir.display());
    }

    // Build the classifier first so a missing credential fails before any
    // document is touched.
    let classifier = ClassifierFactory::create(config.classifier.clone())?;
    info!("Using model {}", classifier.model_name());

    let inputs = scan_for_pdfs(&config.input_dir)?;
    info!(
        "Found {} PDF documents in {}",
        inputs.len(),
        config.input_dir.display()
    );

    let keywords = KeywordMatcher::new(config.keywords.iter());
    let policy = PagePolicy::new(classifier, keywords)
        .with_sparse_threshold(config.sparse_threshold)
        .with_min_text_length(config.min_text_length);

    let mut consolidator = Consolidator::new(LopdfSource::new(), LopdfSink::new(), policy);
    let summary = consolidator.run(&inputs, &config.output).await?;

    if summary.documents_skipped() > 0 {
        warn!("{} documents could not be read", summary.documents_skipped());
    }
    info!(
        "{} editorial and {} opinion pages out of {} scanned",
        summary.editorial, summary.opinion, summary.pages_seen
    );

    let written = consolidator.sink().page_count();
    if written > 0 {
        println!(
            "\nSUCCESS: Extracted {} pages into '{}'",
            written,
            config.output.display()
        );
    } else {
        println!("\nNo editorial/opinion pages found.");
    }
    Ok(())
}

/// Find every PDF directly under `dir`, case-insensitive on the extension,
/// in lexicographic order. An empty result is an error: a run with nothing
/// to scan is always a misconfiguration.
fn scan_for_pdfs(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let pattern = dir.join("*.pdf");
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };
    let mut paths: Vec<PathBuf> = glob::glob_with(&pattern.to_string_lossy(), options)?
        .filter_map(Result::ok)
        .collect();
    paths.sort();

    if paths.is_empty() {
        return Err(OpedError::NoDocuments {
            dir: dir.to_path_buf(),
        }
        .into());
    }
    Ok(paths)
}

/// Flag value if present, otherwise the environment variable, parsed.
fn resolve<T>(flag: Option<T>, env_name: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if flag.is_some() {
        return Ok(flag);
    }
    match std::env::var(env_name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| anyhow::anyhow!("Invalid {}: {}", env_name, e)),
        _ => Ok(None),
    }
}

fn parse_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}
