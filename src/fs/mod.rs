//! File system operations module
//!
//! Provides tree walking, extension classification and the bucket copier
//! used by the dispatcher.

pub mod classify;
mod operations;
mod scanner;

pub use classify::{bucket_dir, bucket_name, UNKNOWN_BUCKET};
pub use operations::*;
pub use scanner::*;
