//! Core dispatch module
//!
//! Provides the copy task model and the dispatcher that fans out one
//! concurrent copy per discovered file.

mod dispatcher;
mod task;

pub use dispatcher::*;
pub use task::*;
