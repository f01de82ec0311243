//! Path types used throughout pathguard.

use std::fmt;
use std::path::{Path, PathBuf};

/// An absolute, forward-slash path with `.` and `..` resolved.
///
/// A trailing slash is kept when the path it was produced from had one, so
/// `untrailed` is the form used for comparisons.
///
/// # Examples
///
/// ```
/// use pathguard::path::CanonicalPath;
///
/// let path = CanonicalPath::from_trusted("/srv/site/wp-content/");
/// assert!(path.has_trailing_slash());
/// assert_eq!(path.untrailed(), "/srv/site/wp-content");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalPath(String);

impl CanonicalPath {
    /// Wraps a string that is already canonical.
    ///
    /// No filesystem access or validation happens here; callers outside the
    /// normalizer should prefer [`crate::path::normalize`].
    #[must_use]
    pub fn from_trusted(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns whether the path ends with a slash.
    #[must_use]
    pub fn has_trailing_slash(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Returns the path with trailing slashes removed.
    ///
    /// The filesystem root stays `/` rather than becoming empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathguard::path::CanonicalPath;
    ///
    /// assert_eq!(CanonicalPath::from_trusted("/a/b//").untrailed(), "/a/b");
    /// assert_eq!(CanonicalPath::from_trusted("/").untrailed(), "/");
    /// ```
    #[must_use]
    pub fn untrailed(&self) -> &str {
        untrailingslash(&self.0)
    }

    /// Returns a copy with exactly one trailing slash.
    #[must_use]
    pub fn with_trailing_slash(&self) -> Self {
        Self(trailingslash(&self.0))
    }

    /// Returns the path as a platform path.
    #[must_use]
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(self.untrailed())
    }

    /// Joins a file name onto this directory.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        Path::new(self.untrailed()).join(name)
    }
}

impl fmt::Display for CanonicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for CanonicalPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.untrailed())
    }
}

/// Converts a path to a string with forward slashes only.
#[must_use]
pub fn to_forward_slashes(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Removes trailing slashes (either convention), keeping a lone `/`.
#[must_use]
pub fn untrailingslash(path: &str) -> &str {
    let trimmed = path.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else {
        trimmed
    }
}

/// Returns the path with exactly one trailing forward slash.
#[must_use]
pub fn trailingslash(path: &str) -> String {
    let trimmed = path.trim_end_matches(['/', '\\']);
    format!("{trimmed}/")
}
