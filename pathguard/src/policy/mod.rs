//! Access policy checks for target directories.
//!
//! Two independent checks guard every target:
//!
//! - [`is_forbidden`] rejects directories that coincide with a protected
//!   system directory (see [`SystemRootSet`]). Exact matches only.
//! - [`is_within_allowed_roots`] enforces the host's directory-access
//!   allowlist (see [`AllowedRoots`]). Prefix matches, case-insensitive.
//!
//! Both are pure queries and never fail.

mod allowlist;
mod system_roots;

#[cfg(all(test, feature = "property-tests"))]
mod proptests;

pub use allowlist::{is_within_allowed_roots, AllowedRoots};
pub use system_roots::{is_forbidden, SystemRootSet};
