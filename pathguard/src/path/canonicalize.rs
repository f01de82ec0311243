//! Real-path resolution.
//!
//! Thin wrappers around [`std::fs::canonicalize`] that follow symlinks and
//! hand back forward-slash strings, the form every comparison in this crate
//! works on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::path::types::to_forward_slashes;

/// Resolve a path to its real location on disk.
///
/// The path must exist. On Windows the verbatim `\\?\` prefix that
/// `canonicalize` adds is removed so drive paths stay in `C:\...` form.
///
/// # Errors
///
/// Returns the underlying I/O error when the path does not exist or a
/// component cannot be traversed.
///
/// # Examples
///
/// ```no_run
/// use pathguard::path::canonicalize::real_path;
/// use std::path::Path;
///
/// let real = real_path(Path::new("/tmp")).unwrap();
/// assert!(real.is_absolute());
/// ```
pub fn real_path(path: &Path) -> io::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "empty path"));
    }
    fs::canonicalize(path).map(strip_verbatim_prefix)
}

/// Resolve a path to its real location as a forward-slash string.
///
/// Returns `None` when the path cannot be resolved.
#[must_use]
pub fn real_path_string(path: &Path) -> Option<String> {
    real_path(path).ok().map(|p| to_forward_slashes(&p))
}

#[cfg(windows)]
fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    let text = path.to_string_lossy();
    if let Some(rest) = text.strip_prefix(r"\\?\UNC\") {
        return PathBuf::from(format!(r"\\{rest}"));
    }
    if let Some(rest) = text.strip_prefix(r"\\?\") {
        return PathBuf::from(rest);
    }
    path
}

#[cfg(not(windows))]
fn strip_verbatim_prefix(path: PathBuf) -> PathBuf {
    path
}
