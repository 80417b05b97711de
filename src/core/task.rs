//! Units of work and their outcomes

use crate::error::SortCopyError;
use std::path::{Path, PathBuf};

/// A single copy task: one discovered file and the root it is sorted into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    source: PathBuf,
    dest_root: PathBuf,
}

impl FileTask {
    /// Create a new copy task
    pub fn new(source: PathBuf, dest_root: PathBuf) -> Self {
        Self { source, dest_root }
    }

    /// Source file path
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Destination root the bucket is created under
    pub fn dest_root(&self) -> &Path {
        &self.dest_root
    }
}

/// Lifecycle of a task. `Succeeded` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Found by the walker
    Discovered,
    /// Spawned onto the runtime
    Dispatched,
    /// Copied into its bucket
    Succeeded,
    /// Copy failed; the cause was logged
    Failed,
}

impl TaskState {
    /// Whether no further transition can occur
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }
}

/// Result of a completed task
#[derive(Debug)]
pub enum CopyOutcome {
    /// File copied into its bucket
    Succeeded {
        /// Source file
        source: PathBuf,
        /// Path written inside the bucket
        target: PathBuf,
        /// Bytes copied
        bytes: u64,
    },
    /// Copy failed
    Failed {
        /// Source file
        source: PathBuf,
        /// Cause of the failure
        error: SortCopyError,
    },
}

impl CopyOutcome {
    /// Check if the copy succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    /// Source path of the task that produced this outcome
    pub fn source(&self) -> &Path {
        match self {
            Self::Succeeded { source, .. } | Self::Failed { source, .. } => source,
        }
    }

    /// Terminal state this outcome represents
    pub fn state(&self) -> TaskState {
        if self.is_success() {
            TaskState::Succeeded
        } else {
            TaskState::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_state() {
        let ok = CopyOutcome::Succeeded {
            source: PathBuf::from("/src/a.txt"),
            target: PathBuf::from("/out/txt/a.txt"),
            bytes: 1,
        };
        assert_eq!(ok.state(), TaskState::Succeeded);
        assert!(ok.state().is_terminal());
        assert_eq!(ok.source(), Path::new("/src/a.txt"));

        let failed = CopyOutcome::Failed {
            source: PathBuf::from("/src/b.txt"),
            error: SortCopyError::BucketCollision { path: PathBuf::from("/out/txt") },
        };
        assert_eq!(failed.state(), TaskState::Failed);
        assert!(!TaskState::Dispatched.is_terminal());
        assert!(!TaskState::Discovered.is_terminal());
    }
}
