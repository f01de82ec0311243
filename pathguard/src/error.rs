//! Error types for the pathguard library.
//!
//! This module provides the error hierarchy for path resolution and
//! directory hardening, using `thiserror` for ergonomic error handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for operations that may fail with a pathguard error.
///
/// # Examples
///
/// ```
/// use pathguard::{Error, Result};
///
/// fn example_operation() -> Result<String> {
///     Ok("/srv/site/wp-content/backups".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the pathguard library.
///
/// The first five variants are the failures of the hardening pipeline. Each
/// carries the computed path so the message can name it.
#[derive(Debug, Error)]
pub enum Error {
    /// The target resolves to a protected system directory.
    #[error("Folder {path} not allowed, please use another folder.")]
    ForbiddenLocation {
        /// The offending directory.
        path: String,
    },

    /// The target lies outside every configured allowlist root.
    #[error("Folder {path} is not in open basedir, please use another folder.")]
    OutsideAllowedRoots {
        /// The offending directory.
        path: String,
    },

    /// The directory was absent and could not be created.
    #[error("Cannot create folder: {path}")]
    CreateFailed {
        /// The directory that could not be created.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The directory exists but cannot be written to.
    #[error("Folder \"{path}\" is not writable")]
    NotWritable {
        /// The directory that is not writable.
        path: String,
        /// The underlying I/O error from the write probe.
        #[source]
        source: std::io::Error,
    },

    /// No ancestor of the path could be resolved on the filesystem.
    #[error("no resolvable ancestor directory for {path}")]
    UnresolvableAncestor {
        /// The path being normalized.
        path: String,
    },

    /// An invalid filesystem path was provided.
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The invalid path.
        path: PathBuf,
        /// The reason the path is invalid.
        reason: String,
    },

    /// A configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Configuration(#[from] serde_yaml::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A validation error occurred.
    #[error("validation error for '{field}': {message}")]
    Validation {
        /// The field that failed validation.
        field: String,
        /// A description of the validation failure.
        message: String,
    },
}

/// Discriminant of an [`Error`], for matching without destructuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// See [`Error::ForbiddenLocation`].
    ForbiddenLocation,
    /// See [`Error::OutsideAllowedRoots`].
    OutsideAllowedRoots,
    /// See [`Error::CreateFailed`].
    CreateFailed,
    /// See [`Error::NotWritable`].
    NotWritable,
    /// See [`Error::UnresolvableAncestor`].
    UnresolvableAncestor,
    /// See [`Error::InvalidPath`].
    InvalidPath,
    /// See [`Error::Configuration`].
    Configuration,
    /// See [`Error::Io`].
    Io,
    /// See [`Error::Validation`].
    Validation,
}

impl Error {
    /// Returns the kind of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathguard::{Error, ErrorKind};
    ///
    /// let err = Error::ForbiddenLocation { path: "/".to_string() };
    /// assert_eq!(err.kind(), ErrorKind::ForbiddenLocation);
    /// ```
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ForbiddenLocation { .. } => ErrorKind::ForbiddenLocation,
            Self::OutsideAllowedRoots { .. } => ErrorKind::OutsideAllowedRoots,
            Self::CreateFailed { .. } => ErrorKind::CreateFailed,
            Self::NotWritable { .. } => ErrorKind::NotWritable,
            Self::UnresolvableAncestor { .. } => ErrorKind::UnresolvableAncestor,
            Self::InvalidPath { .. } => ErrorKind::InvalidPath,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::Io(_) => ErrorKind::Io,
            Self::Validation { .. } => ErrorKind::Validation,
        }
    }

    /// Returns the directory a hardening failure refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::ForbiddenLocation { path }
            | Self::OutsideAllowedRoots { path }
            | Self::CreateFailed { path, .. }
            | Self::NotWritable { path, .. }
            | Self::UnresolvableAncestor { path } => Some(path),
            _ => None,
        }
    }

    /// Check if the error is a policy rejection rather than a filesystem failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathguard::Error;
    ///
    /// let err = Error::OutsideAllowedRoots { path: "/srv/other".to_string() };
    /// assert!(err.is_policy_violation());
    /// ```
    #[must_use]
    pub fn is_policy_violation(&self) -> bool {
        matches!(
            self,
            Self::ForbiddenLocation { .. } | Self::OutsideAllowedRoots { .. }
        )
    }
}
