//! Configuration file discovery and loading.
//!
//! This module handles locating and parsing `pathguard.yaml` files.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for during discovery.
pub const CONFIG_FILE_NAME: &str = "pathguard.yaml";

/// Configuration source with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
///
/// # Examples
///
/// ```
/// use pathguard::config::ConfigSource;
/// use std::path::PathBuf;
///
/// let source = ConfigSource {
///     path: PathBuf::from("/srv/site/pathguard.yaml"),
///     precedence: 1,
///     config: Default::default(),
/// };
/// assert_eq!(source.precedence, 1);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration from files.
///
/// # Examples
///
/// ```no_run
/// use pathguard::config::ConfigLoader;
/// use std::path::Path;
///
/// if let Some(source) = ConfigLoader::discover(Path::new(".")).unwrap() {
///     println!("Loaded {}", source.path.display());
/// }
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Find the nearest `pathguard.yaml` walking up from `start_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if a discovered file cannot be read or parsed.
    pub fn discover(start_dir: &Path) -> Result<Option<ConfigSource>> {
        let mut current = start_dir.to_path_buf();

        loop {
            let candidate = current.join(CONFIG_FILE_NAME);
            if candidate.is_file() {
                log::debug!("Using configuration file {}", candidate.display());
                return Self::load_source(&candidate).map(Some);
            }

            if !current.pop() {
                return Ok(None);
            }
        }
    }

    /// Load a configuration file as a source of file precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_source(path: &Path) -> Result<ConfigSource> {
        Ok(ConfigSource {
            path: path.to_path_buf(),
            precedence: 1,
            config: Self::load_file(path)?,
        })
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path).map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Failed to read configuration file: {e}"),
        })?;

        Self::parse(&contents).map_err(|e| Error::Validation {
            field: format!("{}", path.display()),
            message: format!("Invalid YAML: {e}"),
        })
    }

    /// Parse YAML configuration text. An empty document is an empty config.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the YAML is invalid.
    pub fn parse(contents: &str) -> Result<Config> {
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
