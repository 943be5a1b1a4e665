//! Lineage CLI Library
//!
//! Resolves taxon names into full lineages with the GBIF species API and
//! optionally expands each one into its descendants at lower ranks.
//!
//! # Overview
//!
//! - **Conflict validation**: drop or reject an output rank equal to the input rank
//! - **Resolution**: name-match with retry and rate-limit backoff ([`resolver`])
//! - **Expansion**: paginated descent through children listings ([`expander`])
//! - **Pipeline**: sequential or pooled processing with one shared, locked
//!   output sink ([`pipeline`])
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use lineage_cli::Cli;
//!
//! #[tokio::main]
//! async fn main() -> lineage_cli::Result<()> {
//!     let cli = Cli::parse_from(["lineage", "--in-level", "f", "--out-level", "g"]);
//!     let summary = lineage_cli::run(&cli).await?;
//!     println!("{} resolved, {} failed", summary.success, summary.failure);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod conflict;
pub mod error;
pub mod expander;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod resolver;

// Re-export commonly used types
pub use config::Settings;
pub use error::{CliError, FetchError, Result};
pub use pipeline::{Pipeline, RunState, RunSummary};

use api::GbifClient;
use clap::Parser;
use config::{
    OutputFormat, DEFAULT_API_URL, DEFAULT_INPUT_FILE, DEFAULT_LOG_FILE, DEFAULT_MAX_WORKERS,
    DEFAULT_OUTPUT_FILE, DEFAULT_PAGE_SIZE, DEFAULT_REQUEST_DELAY_SECS, DEFAULT_RETRY_LIMIT,
    DEFAULT_TIMEOUT_SECS,
};
use lineage_common::logging::LogLevel;
use lineage_common::Rank;
use std::path::PathBuf;
use tokio::sync::Mutex;
use tracing::info;

/// Fetch taxonomy information for taxon names from the GBIF API
#[derive(Parser, Debug)]
#[command(name = "lineage")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  lineage --in-level f --out-level g s --input-file families.txt")]
pub struct Cli {
    /// Taxonomic level of the input names (k, p, c, o, f, g, s)
    #[arg(long = "in-level", value_name = "LEVEL")]
    pub in_level: Rank,

    /// Taxonomic levels to include in the output (k, p, c, o, f, g, s)
    #[arg(long = "out-level", value_name = "LEVEL", num_args = 1.., required = true)]
    pub out_level: Vec<Rank>,

    /// File with one taxon name per line
    #[arg(long, default_value = DEFAULT_INPUT_FILE)]
    pub input_file: PathBuf,

    /// File to append results to
    #[arg(long, default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Txt)]
    pub output_format: OutputFormat,

    /// Delay between requests in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEST_DELAY_SECS)]
    pub delay: f64,

    /// Process names concurrently
    #[arg(long)]
    pub parallel: bool,

    /// Maximum concurrent workers with --parallel (also capped by CPU count)
    #[arg(long, default_value_t = DEFAULT_MAX_WORKERS)]
    pub workers: usize,

    /// Maximum attempts per request
    #[arg(long, default_value_t = DEFAULT_RETRY_LIMIT)]
    pub retry_limit: u32,

    /// Page size for children listings
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// GBIF API base URL
    #[arg(long, env = "LINEAGE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Request timeout in seconds
    #[arg(long, env = "LINEAGE_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Log level (trace, debug, info, warning, error, critical) [default: info]
    #[arg(long)]
    pub log_level: Option<LogLevel>,

    /// File warnings and errors are logged to
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Verbose output (debug logging)
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run a full invocation: validate, read names, process them, write rows
///
/// Errors are returned only for configuration and file problems found before
/// processing starts; per-name failures are counted in the summary.
pub async fn run(cli: &Cli) -> Result<RunSummary> {
    let settings = Settings::from_cli(cli)?;
    let names = input::read_names(&settings.input_file)?;
    let sink = output::open_sink(
        &settings.output_file,
        settings.output_format,
        &settings.columns(),
    )?;

    info!(
        names = names.len(),
        input_level = %settings.input_rank,
        mode = ?settings.mode,
        "Starting taxonomy lookup"
    );

    let client = GbifClient::new(settings.api_url.clone(), settings.timeout)?;
    let pipeline = Pipeline::new(
        client,
        settings.input_rank,
        settings.output_ranks.clone(),
        settings.policy,
        settings.mode,
    );

    let state = Mutex::new(RunState::new(sink));
    let progress = progress::create_progress_bar(names.len() as u64, "Processing");

    Ok(pipeline.run(&names, &state, &progress).await)
}
