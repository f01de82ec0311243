#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # pathguard
//!
//! Safe resolution and hardening of backup target directories on a web
//! host.
//!
//! Given a user-supplied folder path, this library turns it into a
//! canonical absolute path, refuses protected system directories and
//! anything outside the host's directory-access allowlist, creates the
//! directory, verifies it is writable, and drops protective files into it
//! so the web server will not serve or list its contents.
//!
//! ## Core Types
//!
//! - [`HostConfig`] and [`ConfigBuilder`]: Host layout and settings
//! - [`PathGuard`]: Entry point bundling a host with its upload provider
//! - [`CanonicalPath`]: Normalized absolute forward-slash paths
//! - [`HardenOptions`] and [`HardenReport`]: Inputs and outcome of hardening
//! - [`Error`] and [`Result`]: Error handling types
//!
//! ## Examples
//!
//! ```no_run
//! use pathguard::{ConfigBuilder, PathGuard};
//!
//! let host = ConfigBuilder::new().build()?;
//! let guard = PathGuard::new(host);
//!
//! let report = guard.check_folder("backups", false)?;
//! println!("secured {}", report.directory);
//! # Ok::<(), pathguard::Error>(())
//! ```
//!
//! Logging goes through the [`log`] facade; install any backend to see it.

pub mod config;
pub mod error;
pub mod guard;
pub mod harden;
pub mod path;
pub mod policy;
pub mod uploads;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, HostConfig};
pub use error::{Error, ErrorKind, Result};
pub use guard::PathGuard;
pub use harden::{DirectoryHardener, HardenOptions, HardenReport, ServerKind};
pub use path::{normalize, CanonicalPath};
pub use policy::{is_forbidden, is_within_allowed_roots, AllowedRoots, SystemRootSet};
pub use uploads::{resolve_upload_root, DefaultUploadDir, UploadDirProvider};
