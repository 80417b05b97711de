//! Error types for SortCopy
//!
//! A single error enum covers the three failure classes of a run: an invalid
//! source (fatal, raised before any work), per-file copy failures (recovered
//! inside each task) and walk failures (recovered by the dispatcher).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for SortCopy operations
#[derive(Error, Debug)]
pub enum SortCopyError {
    /// I/O error during file operations
    #[error("I/O error at '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source path does not exist
    #[error("Source folder does not exist: {0}")]
    NotFound(PathBuf),

    /// Source path exists but is not a directory
    #[error("Source is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Bucket path is occupied by something other than a directory
    #[error("Bucket path exists and is not a directory: {path}")]
    BucketCollision { path: PathBuf },

    /// Error while enumerating the source tree
    #[error("Error reading folder '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Async runtime could not be started
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl SortCopyError {
    /// Create an I/O error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a walk error from a walkdir failure
    pub fn walk(root: impl Into<PathBuf>, err: &walkdir::Error) -> Self {
        let path = err.path().map(PathBuf::from).unwrap_or_else(|| root.into());
        Self::Walk {
            path,
            message: err.to_string(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError(message.into())
    }

    /// True for errors that reject the source before any work starts
    pub fn is_source_invalid(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotADirectory(_))
    }

    /// Get the path associated with this error, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. }
            | Self::NotFound(path)
            | Self::NotADirectory(path)
            | Self::BucketCollision { path }
            | Self::Walk { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Result type alias for SortCopy operations
pub type Result<T> = std::result::Result<T, SortCopyError>;

/// Extension trait for adding path context to std::io::Result
pub trait IoResultExt<T> {
    /// Add path context to an I/O error
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|e| SortCopyError::io(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_with_path() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = SortCopyError::io("/test/path", io_err);
        assert_eq!(err.path(), Some(&PathBuf::from("/test/path")));
        assert!(err.to_string().contains("/test/path"));
    }

    #[test]
    fn test_source_invalid_classification() {
        assert!(SortCopyError::NotFound(PathBuf::from("/missing")).is_source_invalid());
        assert!(SortCopyError::NotADirectory(PathBuf::from("/file")).is_source_invalid());
        assert!(!SortCopyError::config("bad").is_source_invalid());
    }

    #[test]
    fn test_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::other("boom"));
        let err = result.with_path("/some/file").unwrap_err();
        assert_eq!(err.path(), Some(&PathBuf::from("/some/file")));
    }
}
