//! Directory-access allowlist (`open_basedir`-style restriction).

use std::env;
use std::path::{Path, PathBuf};

use crate::config::HostConfig;
use crate::path::canonicalize::real_path_string;
use crate::path::trailingslash;

/// Ordered list of directories a process may access.
///
/// An empty list means no restriction is configured.
///
/// # Examples
///
/// ```
/// use pathguard::policy::AllowedRoots;
///
/// assert!(AllowedRoots::parse("").is_empty());
/// assert_eq!(AllowedRoots::parse("/srv/site").len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowedRoots {
    roots: Vec<PathBuf>,
}

impl AllowedRoots {
    /// Creates an allowlist from explicit directories.
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Parses the raw host setting.
    ///
    /// Entries are separated by the platform's path-list separator (`:` on
    /// Unix, `;` on Windows). Empty entries are kept so the checker can skip
    /// them the same way it skips unresolvable ones.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        Self::new(env::split_paths(raw).collect())
    }

    /// Builds the allowlist configured for the host.
    #[must_use]
    pub fn from_config(host: &HostConfig) -> Self {
        host.open_basedir
            .as_deref()
            .map(Self::parse)
            .unwrap_or_default()
    }

    /// Returns true when no restriction is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Number of configured entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Iterates over the configured entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.roots.iter().map(PathBuf::as_path)
    }

    /// Shorthand for [`is_within_allowed_roots`].
    #[must_use]
    pub fn permits(&self, path: &str) -> bool {
        is_within_allowed_roots(path, self)
    }
}

/// Check whether a path lies under one of the allowed roots.
///
/// Returns true unconditionally for an empty list. Otherwise each entry is
/// real-pathed (entries that are empty or do not exist are skipped), and
/// both sides are lowercased and slash-normalized. The candidate gets a
/// trailing slash and matches when it starts with the entry. The comparison
/// is a plain string prefix, so an entry `/srv/site` also admits
/// `/srv/site2`; configure `/srv/site/` to rule that out.
///
/// # Examples
///
/// ```
/// use pathguard::policy::{is_within_allowed_roots, AllowedRoots};
///
/// assert!(is_within_allowed_roots("/anything", &AllowedRoots::default()));
/// ```
#[must_use]
pub fn is_within_allowed_roots(path: &str, allowed: &AllowedRoots) -> bool {
    if allowed.is_empty() {
        return true;
    }

    let candidate = trailingslash(&path.replace('\\', "/").to_lowercase());

    for root in allowed.iter() {
        if root.as_os_str().is_empty() {
            continue;
        }
        let Some(real) = real_path_string(root) else {
            log::debug!("Skipping unresolvable allowlist entry {}", root.display());
            continue;
        };
        if candidate.starts_with(&real.to_lowercase()) {
            return true;
        }
    }

    false
}
