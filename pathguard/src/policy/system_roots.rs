//! Protected system directories.

use std::path::Path;

use crate::config::HostConfig;
use crate::path::normalize::resolve;
use crate::path::{to_forward_slashes, untrailingslash, CanonicalPath};

/// Ordered set of directories that must never be used as a target.
///
/// Computed fresh for every check from the host configuration: the platform
/// root, its parent, the plugin directory, the content directory and the
/// current upload root. Members are real-pathed where they exist so they
/// compare equal to normalized targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemRootSet {
    roots: Vec<String>,
}

impl SystemRootSet {
    /// Computes the set for a host and its current upload root.
    #[must_use]
    pub fn compute(host: &HostConfig, upload_root: &CanonicalPath) -> Self {
        let parent = host.abspath.parent().unwrap_or(&host.abspath);

        Self::from_paths([
            host.abspath.as_path(),
            parent,
            host.plugin_dir.as_path(),
            host.content_dir.as_path(),
            Path::new(upload_root.untrailed()),
        ])
    }

    /// Builds a set from arbitrary directories, normalizing each.
    pub fn from_paths<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut set = Self::default();
        for path in paths {
            set.insert(&canonical_member(path));
        }
        set
    }

    fn insert(&mut self, root: &str) {
        if !self.roots.iter().any(|existing| existing == root) {
            self.roots.push(root.to_string());
        }
    }

    /// Returns true when `path` (trailing slashes ignored) is a member.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        let candidate = untrailingslash(path);
        self.roots.iter().any(|root| root == candidate)
    }

    /// Iterates over the members in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.roots.iter().map(String::as_str)
    }

    /// Number of distinct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns true when the set has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

fn canonical_member(path: &Path) -> String {
    let text = to_forward_slashes(path);
    match resolve(&text) {
        Ok(resolved) => resolved.untrailed().to_string(),
        Err(_) => untrailingslash(&text).to_string(),
    }
}

/// Check whether a path is a protected system directory.
///
/// True when the path, with trailing slashes stripped, equals a member of
/// `system_roots` or is the filesystem root. Only exact matches count: a
/// subdirectory of a protected directory is allowed.
///
/// # Examples
///
/// ```
/// use pathguard::policy::{is_forbidden, SystemRootSet};
///
/// let roots = SystemRootSet::default();
/// assert!(is_forbidden("/", &roots));
/// assert!(!is_forbidden("/definitely/not/a/system/root", &roots));
/// ```
#[must_use]
pub fn is_forbidden(path: &str, system_roots: &SystemRootSet) -> bool {
    let candidate = untrailingslash(path);
    candidate.is_empty() || candidate == "/" || system_roots.contains(candidate)
}
