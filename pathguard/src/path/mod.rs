//! Path handling for target directories.
//!
//! This module converts arbitrary user-supplied path strings into
//! [`CanonicalPath`]s: absolute, forward-slash paths with `.` and `..`
//! resolved, whether or not the target exists yet.
//!
//! # Key Concepts
//!
//! ## Anchoring
//!
//! Relative paths, the empty path and a bare `/` are all anchored at the
//! content directory. Paths starting with `/` or a drive letter (`C:/`) are
//! taken as they are.
//!
//! ## Ancestor resolution
//!
//! The longest prefix of the path that exists on disk is real-pathed
//! (following symlinks) and the missing segments are appended to it. The
//! search is bounded by the number of segments; if not even the root
//! resolves, normalization fails with
//! [`Error::UnresolvableAncestor`](crate::Error::UnresolvableAncestor).
//!
//! # Examples
//!
//! ```no_run
//! use pathguard::path::normalize;
//! use std::path::Path;
//!
//! let content = Path::new("/srv/site/wp-content");
//! let a = normalize("backups\\daily/", content).unwrap();
//! let b = normalize(a.as_str(), content).unwrap();
//! assert_eq!(a, b);
//! assert!(a.has_trailing_slash());
//! ```

pub mod canonicalize;
pub mod normalize;
mod types;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

// Re-export key types
pub use normalize::normalize;
pub use types::{to_forward_slashes, trailingslash, untrailingslash, CanonicalPath};
