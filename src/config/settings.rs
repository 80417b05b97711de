//! Configuration settings for SortCopy
//!
//! Defines CLI arguments, runtime configuration and path validation.

use crate::error::{IoResultExt, Result, SortCopyError};
use crate::fs::absolute_path;
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// SortCopy - sort files into folders by extension, copying concurrently
#[derive(Parser, Debug, Clone)]
#[command(name = "sortcopy")]
#[command(author = "SortCopy Team")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort files by extension asynchronously.")]
#[command(long_about = r#"
SortCopy walks a source folder recursively and copies every regular file into
the output folder, grouped into one subfolder per lowercase extension
(files without an extension go to "unknown"). Copies run concurrently.

Failed copies are logged and do not stop the run. The exit status is 0 once
every copy has finished, unless --strict is given.

Examples:
  sortcopy ~/Downloads ~/Sorted             # Sort everything
  sortcopy ./src ./out -j 64                # At most 64 copies in flight
  sortcopy ./src ./out --strict             # Non-zero exit on any failure
  RUST_LOG=debug sortcopy ./src ./out       # Verbose logging
"#)]
pub struct CliArgs {
    /// Source folder path
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Output folder path (created if missing)
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Maximum copies in flight (0 = unbounded)
    #[arg(short = 'j', long, default_value = "0", value_name = "NUM", env = "SORTCOPY_MAX_CONCURRENCY")]
    pub max_concurrency: usize,

    /// Do not preserve permissions and timestamps
    #[arg(long)]
    pub no_preserve: bool,

    /// Exit with a non-zero status if any file failed to copy
    #[arg(long)]
    pub strict: bool,

    /// Verbose output (can be repeated: -v, -vv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log line format
    #[arg(long, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    /// Output format for the final summary
    #[arg(long, value_enum, default_value = "text")]
    pub output_format: OutputFormat,
}

/// Log line format
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Timestamp, level and message
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Output format for reports
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Runtime configuration derived from CLI args
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortConfig {
    /// Source root
    pub source: PathBuf,
    /// Output root
    pub destination: PathBuf,
    /// Maximum copies in flight (0 = unbounded)
    pub max_concurrency: usize,
    /// Preserve permissions and timestamps
    pub preserve: bool,
    /// Non-zero exit on any failure
    pub strict: bool,
    /// Log verbosity (-1 quiet, 0 info, 1 debug, 2+ trace)
    pub verbosity: i8,
    /// Log line format
    pub log_format: LogFormat,
    /// Summary output format
    pub output_format: OutputFormat,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            destination: PathBuf::new(),
            max_concurrency: 0,
            preserve: true,
            strict: false,
            verbosity: 0,
            log_format: LogFormat::Text,
            output_format: OutputFormat::Text,
        }
    }
}

impl SortConfig {
    /// Create config from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        let verbosity = if args.quiet {
            -1
        } else {
            args.verbose.min(i8::MAX as u8) as i8
        };

        Self {
            source: args.source.clone(),
            destination: args.output.clone(),
            max_concurrency: args.max_concurrency,
            preserve: !args.no_preserve,
            strict: args.strict,
            verbosity,
            log_format: args.log_format,
            output_format: args.output_format,
        }
    }

    /// Default log directive when `RUST_LOG` is unset
    pub fn log_directive(&self) -> &'static str {
        match self.verbosity {
            i8::MIN..=-1 => "error",
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Resolve both roots to absolute paths, validate the source and create
    /// the output folder.
    pub fn resolve_paths(&mut self) -> Result<()> {
        self.source = validate_source(&self.source)?;
        self.destination = prepare_output(&self.destination)?;
        Ok(())
    }
}

/// Source must exist and be a directory; returns its canonical path
pub fn validate_source(source: &Path) -> Result<PathBuf> {
    let absolute = absolute_path(source)?;

    let metadata = match std::fs::metadata(&absolute) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SortCopyError::NotFound(absolute));
        }
        Err(e) => return Err(SortCopyError::io(absolute, e)),
    };

    if !metadata.is_dir() {
        return Err(SortCopyError::NotADirectory(absolute));
    }

    absolute.canonicalize().with_path(&absolute)
}

/// Create the output folder if missing; returns its canonical path
pub fn prepare_output(output: &Path) -> Result<PathBuf> {
    let absolute = absolute_path(output)?;
    std::fs::create_dir_all(&absolute).with_path(&absolute)?;
    absolute.canonicalize().with_path(&absolute)
}
