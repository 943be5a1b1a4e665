//! Run configuration for the lineage CLI
//!
//! [`Settings`] is built once from the parsed command line and validated
//! before any file or network access happens.

use crate::conflict::validate_ranks;
use crate::error::{CliError, Result};
use crate::Cli;
use clap::ValueEnum;
use lineage_common::logging::{LogConfig, LogLevel, LogOutput};
use lineage_common::Rank;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// CLI Configuration Constants
// ============================================================================

/// Base URL of the GBIF API (v1).
pub const DEFAULT_API_URL: &str = "https://api.gbif.org/v1";

/// Default timeout for a single request in seconds.
/// Can be overridden via the LINEAGE_TIMEOUT_SECS environment variable.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default delay between requests in seconds.
pub const DEFAULT_REQUEST_DELAY_SECS: f64 = 1.5;

/// Maximum attempts for one name-match or children request.
pub const DEFAULT_RETRY_LIMIT: u32 = 5;

/// Page size for children listings.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Upper bound on concurrent workers in parallel mode.
pub const DEFAULT_MAX_WORKERS: usize = 10;

pub const DEFAULT_INPUT_FILE: &str = "keywords.txt";

pub const DEFAULT_OUTPUT_FILE: &str = "taxonomy_output.txt";

pub const DEFAULT_LOG_FILE: &str = "error_log.txt";

/// Output serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma-separated values
    Csv,
    /// One JSON object per line
    Json,
    /// Tab-separated values
    #[default]
    Txt,
}

/// Pacing and retry parameters shared by every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Pause between requests and after each failed attempt
    pub request_delay: Duration,
    pub retry_limit: u32,
    pub page_size: u32,
}

impl RetryPolicy {
    /// Extra pause after a rate-limit response on the given (zero-based) attempt
    pub fn rate_limit_backoff(&self, attempt: u32) -> Duration {
        self.request_delay * (attempt + 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            request_delay: Duration::from_secs_f64(DEFAULT_REQUEST_DELAY_SECS),
            retry_limit: DEFAULT_RETRY_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// How names are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One name at a time, pausing after each
    Sequential,
    /// Up to `workers` names in flight
    Pooled { workers: usize },
}

/// Validated configuration for one run
#[derive(Debug, Clone)]
pub struct Settings {
    pub input_rank: Rank,
    /// Output ranks after conflict resolution, in the order requested
    pub output_ranks: Vec<Rank>,
    pub input_file: PathBuf,
    pub output_file: PathBuf,
    pub output_format: OutputFormat,
    pub policy: RetryPolicy,
    pub mode: ExecutionMode,
    pub api_url: String,
    pub timeout: Duration,
}

impl Settings {
    /// Validate the command line and resolve rank conflicts
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let request_delay = Duration::try_from_secs_f64(cli.delay).map_err(|_| {
            CliError::config(format!(
                "Request delay must be a non-negative number of seconds, got {}",
                cli.delay
            ))
        })?;
        if cli.timeout == 0 {
            return Err(CliError::config("Request timeout must be at least 1 second"));
        }
        if cli.retry_limit == 0 {
            return Err(CliError::config("Retry limit must be at least 1"));
        }
        if cli.page_size == 0 {
            return Err(CliError::config("Page size must be at least 1"));
        }
        if cli.workers == 0 {
            return Err(CliError::config("Worker count must be at least 1"));
        }

        let output_ranks = validate_ranks(cli.in_level, &cli.out_level)?;

        let mode = if cli.parallel {
            ExecutionMode::Pooled {
                workers: effective_workers(cli.workers),
            }
        } else {
            ExecutionMode::Sequential
        };

        Ok(Self {
            input_rank: cli.in_level,
            output_ranks,
            input_file: cli.input_file.clone(),
            output_file: cli.output_file.clone(),
            output_format: cli.output_format,
            policy: RetryPolicy {
                request_delay,
                retry_limit: cli.retry_limit,
                page_size: cli.page_size,
            },
            mode,
            api_url: cli.api_url.clone(),
            timeout: Duration::from_secs(cli.timeout),
        })
    }

    /// Column ranks in output order: the input rank, then each output rank
    pub fn columns(&self) -> Vec<Rank> {
        std::iter::once(self.input_rank)
            .chain(self.output_ranks.iter().copied())
            .collect()
    }
}

/// Worker count capped by the available processing units
pub fn effective_workers(cap: usize) -> usize {
    let cpus = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    cap.min(cpus).max(1)
}

/// Logging setup for a run
///
/// Starts from `--log-file`, applies the `LOG_*` environment variables, then
/// `--log-level` and `--verbose` on top.
pub fn log_config(cli: &Cli) -> LogConfig {
    let log_dir = cli
        .log_file
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let log_file = cli
        .log_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let base = LogConfig::builder()
        .level(LogLevel::Info)
        .output(LogOutput::Both)
        .log_dir(log_dir)
        .log_file(log_file)
        .filter_directives("hyper=warn,reqwest=warn")
        .build();
    let merged = base.clone().merge_env().unwrap_or(base);

    apply_log_flags(cli, merged)
}

/// Override the level in `config` with the one given on the command line
pub fn apply_log_flags(cli: &Cli, mut config: LogConfig) -> LogConfig {
    if cli.verbose {
        config.level = LogLevel::Debug;
    } else if let Some(level) = cli.log_level {
        config.level = level;
    }
    config
}
