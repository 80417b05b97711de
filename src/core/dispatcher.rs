//! Tree dispatcher
//!
//! Walks the source tree on a blocking thread and spawns one copy task per
//! discovered file as soon as it is reported. Every task runs to a terminal
//! outcome; the dispatcher waits for all of them and folds the outcomes into
//! a [`DispatchSummary`].

use crate::config::SortConfig;
use crate::core::{CopyOutcome, FileTask};
use crate::error::SortCopyError;
use crate::fs::{BucketCopier, CopyOptions, TreeWalker, WalkConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinHandle;

/// Aggregate result of one dispatch run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispatchSummary {
    /// Source root that was walked
    pub source: PathBuf,
    /// Destination root buckets were created under
    pub destination: PathBuf,
    /// Regular files found by the walk
    pub discovered: u64,
    /// Files copied into their bucket
    pub succeeded: u64,
    /// Files whose copy failed
    pub failed: u64,
    /// Total bytes copied
    pub bytes_copied: u64,
    /// Buckets that received at least one file
    pub buckets: BTreeSet<String>,
    /// Failed copies as (path, cause)
    pub failures: Vec<(String, String)>,
    /// Error that ended the walk early, if any
    pub walk_error: Option<String>,
    /// Total duration
    pub duration: Duration,
}

impl DispatchSummary {
    fn new(source: &Path, destination: &Path) -> Self {
        Self {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            ..Default::default()
        }
    }

    /// Fold one task outcome into the summary
    pub fn record(&mut self, outcome: CopyOutcome) {
        match outcome {
            CopyOutcome::Succeeded { target, bytes, .. } => {
                self.succeeded += 1;
                self.bytes_copied += bytes;
                if let Some(bucket) = target
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                {
                    self.buckets.insert(bucket);
                }
            }
            CopyOutcome::Failed { source, error } => {
                self.failed += 1;
                self.failures
                    .push((source.display().to_string(), error.to_string()));
            }
        }
    }

    /// True when every file copied and the walk completed
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.walk_error.is_none()
    }

    /// Every discovered file reached exactly one terminal outcome
    pub fn all_accounted(&self) -> bool {
        self.discovered == self.succeeded + self.failed
    }

    /// Print summary to console
    pub fn print_summary(&self) {
        println!("\n=== Sort Summary ===");
        println!("Source:          {}", self.source.display());
        println!("Output:          {}", self.destination.display());
        println!("Files found:     {}", self.discovered);
        println!("Files copied:    {}", self.succeeded);
        println!("Bytes copied:    {}", humansize::format_size(self.bytes_copied, humansize::BINARY));
        println!("Buckets:         {}", self.buckets.len());
        println!("Duration:        {:.2?}", self.duration);

        if let Some(walk_error) = &self.walk_error {
            println!("\nWalk stopped early: {}", walk_error);
        }

        if !self.failures.is_empty() {
            println!("\nFailures: {}", self.failures.len());
            for (path, error) in &self.failures {
                println!("  {} - {}", path, error);
            }
        }
    }
}

/// Fans out one copy task per discovered file and joins them all
#[derive(Debug, Clone)]
pub struct Dispatcher {
    copier: Arc<BucketCopier>,
    limiter: Option<Arc<Semaphore>>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    /// Unbounded dispatcher that preserves file attributes
    pub fn new() -> Self {
        Self {
            copier: Arc::new(BucketCopier::default_copier()),
            limiter: None,
        }
    }

    /// Build a dispatcher from runtime configuration
    pub fn from_config(config: &SortConfig) -> Self {
        let options = CopyOptions {
            preserve_permissions: config.preserve,
            preserve_mtime: config.preserve,
        };

        Self::new()
            .with_copy_options(options)
            .with_max_concurrency(config.max_concurrency)
    }

    /// Set the options every copy task uses
    pub fn with_copy_options(mut self, options: CopyOptions) -> Self {
        self.copier = Arc::new(BucketCopier::new(options));
        self
    }

    /// Cap the number of copies in flight. 0 leaves fan-out unbounded.
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.limiter = (limit > 0).then(|| Arc::new(Semaphore::new(limit)));
        self
    }

    /// Sort every regular file under `source` into buckets under `dest`.
    ///
    /// Never fails: copy errors and walk errors are logged and counted in the
    /// returned summary.
    pub async fn dispatch(&self, source: &Path, dest: &Path) -> DispatchSummary {
        let start = Instant::now();
        let mut summary = DispatchSummary::new(source, dest);

        tracing::info!("Starting file sorting: {} -> {}", source.display(), dest.display());

        let (tx, mut rx) = mpsc::unbounded_channel::<PathBuf>();
        let walker = TreeWalker::new(WalkConfig {
            exclude_root: nested_destination(source, dest),
        });
        let root = source.to_path_buf();
        let walk = tokio::task::spawn_blocking(move || {
            walker.walk(&root, |path| tx.send(path).is_ok())
        });

        let mut handles = Vec::new();
        while let Some(path) = rx.recv().await {
            let task = FileTask::new(path, dest.to_path_buf());
            tracing::trace!("Dispatching {}", task.source().display());
            handles.push((task.source().to_path_buf(), self.spawn_copy(task)));
        }
        summary.discovered = handles.len() as u64;

        summary.walk_error = match walk.await {
            Ok(Ok(found)) => {
                tracing::debug!("Walk complete: {} files found", found);
                None
            }
            Ok(Err(e)) => {
                tracing::error!("{}", e);
                Some(e.to_string())
            }
            Err(e) => {
                tracing::error!("Walk task aborted: {}", e);
                Some(format!("walk task aborted: {}", e))
            }
        };

        for (source, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::error!("Copy task for {} aborted: {}", source.display(), e);
                    CopyOutcome::Failed {
                        source,
                        error: SortCopyError::Runtime(format!("copy task aborted: {}", e)),
                    }
                }
            };
            summary.record(outcome);
        }

        summary.duration = start.elapsed();

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "File sorting completed."
        );

        summary
    }

    fn spawn_copy(&self, task: FileTask) -> JoinHandle<CopyOutcome> {
        let copier = Arc::clone(&self.copier);
        let limiter = self.limiter.clone();

        tokio::spawn(async move {
            let _permit = match limiter {
                Some(semaphore) => semaphore.acquire_owned().await.ok(),
                None => None,
            };
            copier.copy_file(&task).await
        })
    }
}

/// The destination subtree to prune when it lives inside the source
fn nested_destination(source: &Path, dest: &Path) -> Option<PathBuf> {
    (dest != source && dest.starts_with(source)).then(|| dest.to_path_buf())
}

/// Sort `source` into `dest` with default settings
pub async fn sort_tree(source: &Path, dest: &Path) -> DispatchSummary {
    Dispatcher::new().dispatch(source, dest).await
}
