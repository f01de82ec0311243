//! Builder for assembling a [`HostConfig`] from every configuration layer.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::{ConfigLoader, ConfigSource};
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, HostConfig};
use crate::config::validator::ConfigValidator;
use crate::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};

/// Assembles configuration from files, environment and overrides.
///
/// # Examples
///
/// ```
/// use pathguard::config::{Config, ConfigBuilder};
/// use std::path::PathBuf;
///
/// let host = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         abspath: Some(PathBuf::from("/srv/site")),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(host.abspath, PathBuf::from("/srv/site"));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Option<Config>,
}

impl ConfigBuilder {
    /// Create a builder that discovers files from the current directory and
    /// reads the environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discover `pathguard.yaml` starting from this directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Load this file instead of discovering one.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Do not read any configuration file.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply `PATHGUARD_*` environment variables.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Apply programmatic overrides with the highest precedence.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides = Some(config);
        self
    }

    /// Build the final host configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be loaded, an environment variable is
    /// malformed, or the merged configuration fails validation.
    pub fn build(self) -> Result<HostConfig> {
        let mut sources: Vec<ConfigSource> = Vec::new();

        if !self.skip_files {
            if let Some(source) = self.load_file_source()? {
                ConfigValidator::validate(&source.config, false)?;
                sources.push(source);
            }
        }

        let mut config = ConfigMerger::merge(sources);

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        if let Some(ref overrides) = self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config, true)?;

        HostConfig::from_config(&config).ok_or_else(|| Error::Validation {
            field: "abspath".into(),
            message: "The platform root must be configured".into(),
        })
    }

    fn load_file_source(&self) -> Result<Option<ConfigSource>> {
        if let Some(ref path) = self.config_file {
            return ConfigLoader::load_source(path).map(Some);
        }

        let start = match self.working_dir {
            Some(ref dir) => dir.clone(),
            None => env::current_dir()?,
        };
        ConfigLoader::discover(&start)
    }
}
