//! Environment variable handling for configuration overrides.
//!
//! This module provides support for `PATHGUARD_*` environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Every environment variable consulted by [`EnvironmentConfig`].
pub const ENV_VARS: &[&str] = &[
    "PATHGUARD_ABSPATH",
    "PATHGUARD_CONTENT_DIR",
    "PATHGUARD_PLUGIN_DIR",
    "PATHGUARD_MULTISITE",
    "PATHGUARD_UPLOAD_BLOGS_DIR",
    "PATHGUARD_OPEN_BASEDIR",
    "PATHGUARD_PROTECT_FOLDERS",
    "PATHGUARD_SERVER_SOFTWARE",
    "PATHGUARD_DONOTBACKUP_NOTICE",
];

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use pathguard::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// # Errors
    ///
    /// Returns an error if a boolean variable holds an unrecognized value.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(path) = env::var("PATHGUARD_ABSPATH") {
            config.abspath = Some(PathBuf::from(path));
        }

        if let Ok(path) = env::var("PATHGUARD_CONTENT_DIR") {
            config.content_dir = Some(PathBuf::from(path));
        }

        if let Ok(path) = env::var("PATHGUARD_PLUGIN_DIR") {
            config.plugin_dir = Some(PathBuf::from(path));
        }

        Self::apply_multisite_overrides(config)?;

        // An empty value is meaningful here: it lifts the restriction.
        if let Ok(open_basedir) = env::var("PATHGUARD_OPEN_BASEDIR") {
            config.open_basedir = Some(open_basedir);
        }

        if let Ok(val) = env::var("PATHGUARD_PROTECT_FOLDERS") {
            config.protect_folders = Some(Self::parse_bool("PATHGUARD_PROTECT_FOLDERS", &val)?);
        }

        if let Ok(software) = env::var("PATHGUARD_SERVER_SOFTWARE") {
            config.server_software = Some(software);
        }

        if let Ok(notice) = env::var("PATHGUARD_DONOTBACKUP_NOTICE") {
            config.donotbackup_notice = Some(notice);
        }

        Ok(())
    }

    /// Apply multisite-related environment variable overrides.
    fn apply_multisite_overrides(config: &mut Config) -> Result<()> {
        let mut multisite = config.multisite.clone().unwrap_or_default();
        let mut modified = false;

        if let Ok(val) = env::var("PATHGUARD_MULTISITE") {
            multisite.enabled = Some(Self::parse_bool("PATHGUARD_MULTISITE", &val)?);
            modified = true;
        }

        if let Ok(dir) = env::var("PATHGUARD_UPLOAD_BLOGS_DIR") {
            multisite.upload_blogs_dir = Some(dir);
            modified = true;
        }

        if modified {
            config.multisite = Some(multisite);
        }

        Ok(())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }
}
