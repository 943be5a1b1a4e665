//! Lineage CLI - Main entry point

use clap::Parser;
use lineage_cli::Cli;
use lineage_common::logging::init_logging;
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    // Pick up LINEAGE_* and LOG_* settings from a local .env, if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_config = lineage_cli::config::log_config(&cli);

    // The CLI still works without logging
    let guard = init_logging(&log_config).ok().flatten();

    let code = match lineage_cli::run(&cli).await {
        Ok(_) => 0,
        Err(e) => {
            error!(error = %e, "Run aborted");
            eprintln!("Error: {}", e);
            1
        },
    };

    // Flush the log file before exiting
    drop(guard);
    process::exit(code);
}
