//! Configuration module for SortCopy
//!
//! Provides CLI arguments, runtime settings and source/output validation.

mod settings;

pub use settings::*;
