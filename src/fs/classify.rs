//! Extension classification
//!
//! Maps a file path to the name of the bucket it is sorted into.

use std::path::{Path, PathBuf};

/// Bucket used for files without an extension
pub const UNKNOWN_BUCKET: &str = "unknown";

/// Bucket name for a file: its last extension, lowercased, without the dot.
///
/// `archive.tar.gz` maps to `gz`. Names with no extension, including
/// dotfiles such as `.bashrc` and names ending in a bare dot, map to
/// [`UNKNOWN_BUCKET`].
pub fn bucket_name(path: &Path) -> String {
    match path.extension() {
        Some(ext) if !ext.is_empty() => ext.to_string_lossy().to_lowercase(),
        _ => UNKNOWN_BUCKET.to_string(),
    }
}

/// Directory under `dest_root` that holds files of `path`'s extension
pub fn bucket_dir(path: &Path, dest_root: &Path) -> PathBuf {
    dest_root.join(bucket_name(path))
}
