//! Path normalization functions.
//!
//! This module turns user-supplied path strings into [`CanonicalPath`]s by:
//! - Converting backslashes to forward slashes
//! - Anchoring relative paths (and the empty path) at the content directory
//! - Real-pathing the longest existing ancestor
//! - Resolving `.` and `..` in the part that does not exist yet
//!
//! Normalization never requires the target itself to exist.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::canonicalize::real_path_string;
use crate::path::types::{to_forward_slashes, trailingslash, CanonicalPath};

/// Returns true for drive-letter absolute paths such as `C:/backups`.
///
/// Only forward slashes are recognized; convert backslashes first.
///
/// # Examples
///
/// ```
/// use pathguard::path::normalize::is_drive_absolute;
///
/// assert!(is_drive_absolute("C:/backups"));
/// assert!(is_drive_absolute("d:/"));
/// assert!(!is_drive_absolute("C:backups"));
/// assert!(!is_drive_absolute("/srv"));
/// ```
#[must_use]
pub fn is_drive_absolute(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Make a raw path absolute without touching the filesystem.
///
/// The empty path and a bare `/` both mean the content directory itself.
/// Anything that is neither rooted at `/` nor drive-absolute is taken
/// relative to the content directory.
///
/// # Examples
///
/// ```
/// use pathguard::path::normalize::to_absolute;
/// use std::path::Path;
///
/// let content = Path::new("/srv/site/wp-content");
/// assert_eq!(to_absolute("", content), "/srv/site/wp-content/");
/// assert_eq!(to_absolute("/", content), "/srv/site/wp-content/");
/// assert_eq!(to_absolute("backups\\daily", content), "/srv/site/wp-content/backups/daily");
/// assert_eq!(to_absolute("/var/backups", content), "/var/backups");
/// ```
#[must_use]
pub fn to_absolute(raw: &str, content_dir: &Path) -> String {
    let path = raw.replace('\\', "/");
    let content = trailingslash(&to_forward_slashes(content_dir));

    if path.is_empty() || path == "/" {
        return content;
    }

    if !path.starts_with('/') && !is_drive_absolute(&path) {
        return format!("{content}{path}");
    }

    path
}

/// Resolve an absolute path against the filesystem.
///
/// The longest prefix of the path that exists is replaced by its real path
/// and the remaining segments are appended in order. A trailing slash on the
/// input is kept on the output.
///
/// # Errors
///
/// Returns [`Error::UnresolvableAncestor`] when not even the root of the path
/// can be resolved, for example an unmapped drive letter.
///
/// # Examples
///
/// ```no_run
/// use pathguard::path::normalize::resolve;
///
/// let resolved = resolve("/tmp/not-yet/../backups/").unwrap();
/// assert!(resolved.as_str().ends_with("/backups/"));
/// ```
pub fn resolve(path: &str) -> Result<CanonicalPath> {
    let path = path.replace('\\', "/");
    let trailing = path.ends_with('/');

    let first = split_at_real_ancestor(&path)?;
    if !first.rewound {
        return Ok(first.into_canonical(trailing));
    }

    // A `..` in the missing tail walked up into real directories; resolve the
    // joined result again so those are real-pathed too. The second pass has
    // no dot segments left in its tail, so it never rewinds.
    let second = split_at_real_ancestor(&first.joined())?;
    Ok(second.into_canonical(trailing))
}

/// Normalize a raw path into canonical absolute form.
///
/// This is the main normalization function:
/// 1. Converts separators and anchors relative paths (see [`to_absolute`])
/// 2. Resolves the result against the filesystem (see [`resolve`])
///
/// The output is a fixed point for every input except one: when the result
/// is the filesystem root itself (for example `"/.."`), feeding `/` back in
/// anchors it at the content directory, since an empty path and a bare `/`
/// both mean "the content directory". Use [`resolve`] directly when a
/// literal `/` must stay `/`.
///
/// # Errors
///
/// Returns [`Error::UnresolvableAncestor`] if no ancestor of the path exists.
///
/// # Examples
///
/// ```no_run
/// use pathguard::path::normalize::normalize;
/// use std::path::Path;
///
/// let content = Path::new("/srv/site/wp-content");
/// let normalized = normalize("backups/", content).unwrap();
/// assert!(normalized.has_trailing_slash());
/// ```
pub fn normalize(raw: &str, content_dir: &Path) -> Result<CanonicalPath> {
    resolve(&to_absolute(raw, content_dir))
}

/// A path split into its real existing ancestor and the missing remainder.
#[derive(Debug)]
struct AncestorSplit {
    base: String,
    tail: Vec<String>,
    rewound: bool,
}

impl AncestorSplit {
    fn joined(&self) -> String {
        if self.tail.is_empty() {
            return self.base.clone();
        }
        let mut joined = self.base.clone();
        if !joined.ends_with('/') {
            joined.push('/');
        }
        joined.push_str(&self.tail.join("/"));
        joined
    }

    fn into_canonical(self, trailing: bool) -> CanonicalPath {
        let mut joined = self.joined();
        if trailing && !joined.ends_with('/') {
            joined.push('/');
        }
        CanonicalPath::from_trusted(joined)
    }
}

/// Split a path into its root (`/`, `X:/`, or nothing) and the rest.
fn split_root(path: &str) -> (&str, &str) {
    if path.starts_with('/') {
        path.split_at(1)
    } else if is_drive_absolute(path) {
        path.split_at(3)
    } else {
        ("", path)
    }
}

fn split_at_real_ancestor(path: &str) -> Result<AncestorSplit> {
    let (root, rest) = split_root(path);
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();

    for keep in (0..=segments.len()).rev() {
        let candidate = format!("{root}{}", segments[..keep].join("/"));
        if let Some(base) = real_path_string(Path::new(&candidate)) {
            return Ok(apply_tail(&base, &segments[keep..]));
        }
    }

    Err(Error::UnresolvableAncestor {
        path: path.to_string(),
    })
}

/// Fold the missing segments onto a real base, resolving dot segments.
fn apply_tail(base: &str, tail: &[&str]) -> AncestorSplit {
    let mut base = PathBuf::from(base);
    let mut kept: Vec<String> = Vec::with_capacity(tail.len());
    let mut rewound = false;

    for segment in tail {
        match *segment {
            "." => {}
            ".." => {
                rewound = true;
                if kept.pop().is_none() {
                    // `..` above the filesystem root stays at the root.
                    base.pop();
                }
            }
            name => kept.push(name.to_string()),
        }
    }

    AncestorSplit {
        base: to_forward_slashes(&base),
        tail: kept,
        rewound,
    }
}
