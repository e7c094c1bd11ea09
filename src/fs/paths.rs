//! Path and directory management.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Check whether a directory exists.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Ensure a directory exists, creating it if necessary.
pub async fn ensure_dir(path: &Path) -> Result<()> {
    if !dir_exists(path) {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}

/// Append a suffix to the final component of a path (`a/b` + `.png` -> `a/b.png`).
///
/// Unlike [`Path::with_extension`] this never replaces dots already in the stem.
pub fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(stem.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
