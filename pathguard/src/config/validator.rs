//! Configuration validation.
//!
//! This module checks that configured directories are usable before they
//! are turned into a [`HostConfig`](crate::HostConfig).

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::normalize::is_drive_absolute;
use std::path::Path;

/// Validates configuration.
///
/// # Examples
///
/// ```
/// use pathguard::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config, false).unwrap();
/// assert!(ConfigValidator::validate(&config, true).is_err());
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration to validate
    /// * `is_final` - Whether this is the fully merged configuration, in which
    ///   case `abspath` is required
    ///
    /// # Errors
    ///
    /// Returns validation errors for invalid configurations.
    pub fn validate(config: &Config, is_final: bool) -> Result<()> {
        match config.abspath {
            Some(ref abspath) => Self::validate_directory("abspath", abspath)?,
            None if is_final => {
                return Err(Error::Validation {
                    field: "abspath".into(),
                    message: "The platform root must be configured".into(),
                });
            }
            None => {}
        }

        if let Some(ref content_dir) = config.content_dir {
            Self::validate_directory("content_dir", content_dir)?;
        }

        if let Some(ref plugin_dir) = config.plugin_dir {
            Self::validate_directory("plugin_dir", plugin_dir)?;
        }

        if let Some(ref multisite) = config.multisite {
            if let Some(ref dir) = multisite.upload_blogs_dir {
                Self::validate_text("multisite.upload_blogs_dir", dir)?;
            }
        }

        if let Some(ref software) = config.server_software {
            if software.contains('\0') {
                return Err(Error::Validation {
                    field: "server_software".into(),
                    message: "Cannot contain null bytes".into(),
                });
            }
        }

        Ok(())
    }

    /// Directories must be non-empty and absolute in either slash convention.
    fn validate_directory(field: &str, path: &Path) -> Result<()> {
        let text = path.to_string_lossy();
        Self::validate_text(field, &text)?;

        let forward = text.replace('\\', "/");
        if !forward.starts_with('/') && !is_drive_absolute(&forward) {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("Must be an absolute path, got '{text}'"),
            });
        }

        Ok(())
    }

    fn validate_text(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }

        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }

        Ok(())
    }
}
