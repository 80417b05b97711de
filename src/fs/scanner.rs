//! Source tree walker
//!
//! Enumerates every regular file below a root directory with `walkdir`,
//! handing each one to a sink as soon as it is found so copies can start
//! while the walk is still running.

use crate::error::{IoResultExt, Result, SortCopyError};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Configuration for tree walking
#[derive(Debug, Clone, Default)]
pub struct WalkConfig {
    /// Subtree to leave out of the walk (an output directory nested in the source)
    pub exclude_root: Option<PathBuf>,
}

/// Recursive walker that yields regular files only
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    config: WalkConfig,
}

impl TreeWalker {
    /// Create a new walker with the given configuration
    pub fn new(config: WalkConfig) -> Self {
        Self { config }
    }

    /// Walk `root`, calling `sink` for every regular file.
    ///
    /// Stops at the first walk error and returns it; files already handed to
    /// `sink` are unaffected. Returns the number of files reported otherwise.
    /// The sink returns `false` to stop the walk early.
    pub fn walk<F>(&self, root: &Path, mut sink: F) -> Result<usize>
    where
        F: FnMut(PathBuf) -> bool,
    {
        let walker = WalkDir::new(root).follow_links(false);

        let exclude = self.config.exclude_root.as_deref();
        let mut found = 0usize;

        for entry in walker
            .into_iter()
            .filter_entry(|e| !is_excluded(e, exclude))
        {
            let entry = entry.map_err(|e| SortCopyError::walk(root, &e))?;

            if is_regular_file(&entry) {
                found += 1;
                if !sink(entry.into_path()) {
                    break;
                }
            }
        }

        Ok(found)
    }

    /// Collect every regular file under `root` into a sorted list
    pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(root, |path| {
            files.push(path);
            true
        })?;
        files.sort();
        Ok(files)
    }
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    match exclude {
        Some(excluded) => entry.depth() > 0 && entry.file_type().is_dir() && entry.path() == excluded,
        None => false,
    }
}

/// Regular files, plus symlinks that resolve to one. Directory symlinks,
/// dangling links and special files are skipped.
fn is_regular_file(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return std::fs::metadata(entry.path())
            .map(|m| m.is_file())
            .unwrap_or(false);
    }
    false
}

/// Resolve a path to absolute form without requiring it to exist
pub fn absolute_path(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().with_path(path)?;
    Ok(cwd.join(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_tree(dir: &Path) {
        std::fs::create_dir_all(dir.join("a/b/c/d")).unwrap();
        std::fs::create_dir_all(dir.join("empty")).unwrap();
        File::create(dir.join("top.txt")).unwrap().write_all(b"top").unwrap();
        File::create(dir.join("a/one.rs")).unwrap();
        File::create(dir.join("a/b/c/d/deep.bin")).unwrap().write_all(&[0u8; 16]).unwrap();
    }

    #[test]
    fn test_walk_finds_files_at_any_depth() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path());

        let files = TreeWalker::default().collect(dir.path()).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("a/b/c/d/deep.bin")));
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn test_walk_skips_excluded_subtree() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path());

        let config = WalkConfig {
            exclude_root: Some(dir.path().join("a")),
        };
        let files = TreeWalker::new(config).collect(dir.path()).unwrap();

        assert_eq!(files, vec![dir.path().join("top.txt")]);
    }

    #[test]
    fn test_walk_missing_root_is_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let err = TreeWalker::default().collect(&missing).unwrap_err();
        assert!(matches!(err, SortCopyError::Walk { .. }));
    }

    #[test]
    fn test_sink_can_stop_walk() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path());

        let mut seen = 0;
        TreeWalker::default()
            .walk(dir.path(), |_| {
                seen += 1;
                false
            })
            .unwrap();
        assert_eq!(seen, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks() {
        let dir = TempDir::new().unwrap();
        create_tree(dir.path());
        std::os::unix::fs::symlink(dir.path().join("top.txt"), dir.path().join("link.txt")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("a"), dir.path().join("dirlink")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let files = TreeWalker::default().collect(dir.path()).unwrap();

        assert!(files.contains(&dir.path().join("link.txt")));
        assert!(!files.iter().any(|f| f.starts_with(dir.path().join("dirlink"))));
        assert!(!files.contains(&dir.path().join("dangling")));
        assert_eq!(files.len(), 4);
    }

    #[test]
    fn test_absolute_path() {
        let abs = absolute_path(Path::new("relative/dir")).unwrap();
        assert!(abs.is_absolute());
        assert!(abs.ends_with("relative/dir"));
    }
}
