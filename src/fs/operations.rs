//! Bucket copy operations
//!
//! Copies a single file into its extension bucket: ensures the bucket
//! directory exists, copies the bytes, then carries over permissions and
//! timestamps. Failures are logged and folded into a [`CopyOutcome`] so a
//! task never propagates an error to its siblings.

use crate::core::{CopyOutcome, FileTask};
use crate::error::{IoResultExt, Result, SortCopyError};
use crate::fs::classify::bucket_dir;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Options for bucket copies
#[derive(Debug, Clone)]
pub struct CopyOptions {
    /// Preserve Unix permissions
    pub preserve_permissions: bool,
    /// Preserve modification and access times
    pub preserve_mtime: bool,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            preserve_permissions: true,
            preserve_mtime: true,
        }
    }
}

/// Copies files into per-extension buckets
#[derive(Debug, Clone, Default)]
pub struct BucketCopier {
    options: CopyOptions,
}

impl BucketCopier {
    /// Create a new copier with the given options
    pub fn new(options: CopyOptions) -> Self {
        Self { options }
    }

    /// Create a copier that preserves all supported attributes
    pub fn default_copier() -> Self {
        Self::new(CopyOptions::default())
    }

    /// Copy one task into its bucket, converting any failure into an outcome.
    ///
    /// Emits one `info` line on success and one `error` line on failure.
    pub async fn copy_file(&self, task: &FileTask) -> CopyOutcome {
        let start = Instant::now();

        match self.try_copy(task.source(), task.dest_root()).await {
            Ok((target, bytes)) => {
                tracing::info!(
                    bytes,
                    elapsed = ?start.elapsed(),
                    "Copied: {} -> {}",
                    task.source().display(),
                    target.display()
                );
                CopyOutcome::Succeeded {
                    source: task.source().to_path_buf(),
                    target,
                    bytes,
                }
            }
            Err(error) => {
                tracing::error!("Error copying file {}: {}", task.source().display(), error);
                CopyOutcome::Failed {
                    source: task.source().to_path_buf(),
                    error,
                }
            }
        }
    }

    /// Copy `source` into its bucket under `dest_root`, returning the target
    /// path and the number of bytes written.
    pub async fn try_copy(&self, source: &Path, dest_root: &Path) -> Result<(PathBuf, u64)> {
        let bucket = ensure_bucket(source, dest_root).await?;

        let file_name = source
            .file_name()
            .ok_or_else(|| SortCopyError::io(source, std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no file name",
            )))?;
        let target = bucket.join(file_name);

        // Already sorted in place (output root == source root); copying onto
        // itself would truncate the file.
        if target == source {
            let bytes = tokio::fs::metadata(source).await.with_path(source)?.len();
            return Ok((target, bytes));
        }

        // Overwrites an existing file of the same name.
        let bytes = tokio::fs::copy(source, &target).await.with_path(source)?;

        if self.options.preserve_permissions || self.options.preserve_mtime {
            let options = self.options.clone();
            let src = source.to_path_buf();
            let dst = target.clone();
            tokio::task::spawn_blocking(move || preserve_attributes(&options, &src, &dst))
                .await
                .map_err(|e| {
                    SortCopyError::io(&target, std::io::Error::other(e.to_string()))
                })??;
        }

        Ok((target, bytes))
    }
}

/// Create the bucket for `source` under `dest_root` if absent.
///
/// Losing a creation race to another task is not an error; a non-directory
/// occupying the bucket path is.
pub async fn ensure_bucket(source: &Path, dest_root: &Path) -> Result<PathBuf> {
    let bucket = bucket_dir(source, dest_root);

    match tokio::fs::create_dir_all(&bucket).await {
        Ok(()) => Ok(bucket),
        Err(e) => match tokio::fs::metadata(&bucket).await {
            Ok(meta) if meta.is_dir() => Ok(bucket),
            Ok(_) => Err(SortCopyError::BucketCollision { path: bucket }),
            Err(_) => Err(SortCopyError::io(&bucket, e)),
        },
    }
}

/// Preserve file attributes (permissions and times)
pub fn preserve_attributes(options: &CopyOptions, source: &Path, dest: &Path) -> Result<()> {
    let metadata = std::fs::metadata(source).with_path(source)?;

    if options.preserve_permissions {
        std::fs::set_permissions(dest, metadata.permissions()).with_path(dest)?;
    }

    if options.preserve_mtime {
        let atime = filetime::FileTime::from_last_access_time(&metadata);
        let mtime = filetime::FileTime::from_last_modification_time(&metadata);
        filetime::set_file_times(dest, atime, mtime).with_path(dest)?;
    }

    Ok(())
}
