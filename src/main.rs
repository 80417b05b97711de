//! SortCopy CLI - sort files into per-extension folders
//!
//! Thin wrapper around the dispatcher: parses arguments, sets up logging,
//! validates paths and runs one dispatch on a tokio runtime.

use clap::Parser;
use sortcopy::config::{CliArgs, LogFormat, OutputFormat, SortConfig};
use sortcopy::core::{DispatchSummary, Dispatcher};
use sortcopy::error::{Result, SortCopyError};
use tracing_subscriber::EnvFilter;

fn main() {
    // Parse CLI arguments
    let args = CliArgs::parse();
    let config = SortConfig::from_cli(&args);

    init_logging(&config);

    match run(config) {
        Ok(code) => std::process::exit(code),
        Err(e) if e.is_source_invalid() => {
            // Rejected before any work started
            tracing::error!(path = ?e.path(), "{}", e);
            eprintln!("Usage: sortcopy <SOURCE> <OUTPUT> [OPTIONS]");
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_logging(config: &SortConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.log_format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn run(mut config: SortConfig) -> Result<i32> {
    config.resolve_paths()?;

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| SortCopyError::Runtime(format!("Failed to create runtime: {}", e)))?;

    let dispatcher = Dispatcher::from_config(&config);
    let summary = runtime.block_on(dispatcher.dispatch(&config.source, &config.destination));

    if config.verbosity >= 0 {
        report(&summary, config.output_format)?;
    }

    if config.strict && !summary.is_success() {
        return Ok(1);
    }

    Ok(0)
}

fn report(summary: &DispatchSummary, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => summary.print_summary(),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(summary)
                .map_err(|e| SortCopyError::config(format!("Failed to render summary: {}", e)))?;
            println!("{}", json);
        }
    }
    Ok(())
}
