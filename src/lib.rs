//! # SortCopy - Concurrent Sort-by-Extension Copier
//!
//! SortCopy walks a source directory tree and copies every regular file into
//! an output directory, grouped into one subfolder ("bucket") per lowercase
//! file extension. Files without an extension land in `unknown/`.
//!
//! ## Features
//!
//! - **Concurrent Copies**: one tokio task per file, started while the walk
//!   is still running
//! - **Failure Isolation**: a failed copy is logged and counted; it never
//!   cancels other copies
//! - **Attribute Preservation**: permissions and timestamps follow the copy
//! - **Optional Concurrency Cap**: bound the copies in flight with a semaphore
//!
//! ## Quick Start
//!
//! ```no_run
//! use sortcopy::core::sort_tree;
//! use std::path::Path;
//!
//! # async fn run() {
//! let summary = sort_tree(Path::new("/source"), Path::new("/sorted")).await;
//!
//! println!("Copied {} of {} files", summary.succeeded, summary.discovered);
//! # }
//! ```
//!
//! ## Bounded Fan-out
//!
//! ```no_run
//! use sortcopy::core::Dispatcher;
//! use std::path::Path;
//!
//! # async fn run() {
//! let summary = Dispatcher::new()
//!     .with_max_concurrency(64)
//!     .dispatch(Path::new("/source"), Path::new("/sorted"))
//!     .await;
//!
//! summary.print_summary();
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod error;
pub mod fs;

// Re-export commonly used types
pub use config::SortConfig;
pub use core::{CopyOutcome, DispatchSummary, Dispatcher, FileTask};
pub use error::{Result, SortCopyError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
