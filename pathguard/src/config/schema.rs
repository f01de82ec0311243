//! Configuration schema definitions.
//!
//! [`Config`] is the layered, partially specified form read from files and
//! the environment. [`HostConfig`] is the fully resolved description of the
//! hosting platform that every operation receives.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Notice written into `.donotbackup` marker files by default.
pub const DEFAULT_DONOTBACKUP_NOTICE: &str =
    "BackWPup will not backup folders and its sub folders when this file is inside.";

/// Name of the content directory under the platform root.
pub const DEFAULT_CONTENT_DIR_NAME: &str = "wp-content";

/// Name of the plugin directory under the content directory.
pub const DEFAULT_PLUGIN_DIR_NAME: &str = "plugins";

/// Layered configuration structure.
///
/// Every field is optional so that files, environment variables and
/// programmatic overrides can each supply a subset.
///
/// # Examples
///
/// ```
/// use pathguard::config::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     abspath: Some(PathBuf::from("/srv/site")),
///     protect_folders: Some(false),
///     ..Default::default()
/// };
/// assert_eq!(config.protect_folders, Some(false));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Platform installation root.
    pub abspath: Option<PathBuf>,

    /// Content-storage root. Defaults to `<abspath>/wp-content`.
    pub content_dir: Option<PathBuf>,

    /// Extension (plugin) storage root. Defaults to `<content_dir>/plugins`.
    pub plugin_dir: Option<PathBuf>,

    /// Multi-site deployment settings.
    pub multisite: Option<MultisiteConfig>,

    /// Raw directory-access allowlist, in the platform's path-list syntax.
    pub open_basedir: Option<String>,

    /// Write protective artifacts into hardened directories.
    pub protect_folders: Option<bool>,

    /// Server software identification string, e.g. `nginx/1.25.3`.
    pub server_software: Option<String>,

    /// Text written into `.donotbackup` marker files.
    pub donotbackup_notice: Option<String>,
}

/// Multi-site deployment settings.
///
/// # Examples
///
/// ```
/// use pathguard::config::MultisiteConfig;
///
/// let multisite = MultisiteConfig {
///     enabled: Some(true),
///     upload_blogs_dir: Some("wp-content/blogs.dir".to_string()),
/// };
/// assert_eq!(multisite.enabled, Some(true));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MultisiteConfig {
    /// Whether the installation serves several sites. Unset means
    /// single-site unless a lower layer says otherwise.
    pub enabled: Option<bool>,

    /// Per-network uploads override, relative to the platform root.
    pub upload_blogs_dir: Option<String>,
}

/// Fully resolved host platform description.
///
/// # Examples
///
/// ```
/// use pathguard::HostConfig;
/// use std::path::Path;
///
/// let host = HostConfig::new("/srv/site");
/// assert_eq!(host.content_dir, Path::new("/srv/site/wp-content"));
/// assert_eq!(host.plugin_dir, Path::new("/srv/site/wp-content/plugins"));
/// assert!(host.protect_folders);
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HostConfig {
    /// Platform installation root.
    pub abspath: PathBuf,
    /// Content-storage root.
    pub content_dir: PathBuf,
    /// Extension (plugin) storage root.
    pub plugin_dir: PathBuf,
    /// Whether this is a multi-site deployment.
    pub multisite: bool,
    /// Per-network uploads override, relative to `abspath`.
    pub upload_blogs_dir: Option<String>,
    /// Raw directory-access allowlist.
    pub open_basedir: Option<String>,
    /// Write protective artifacts into hardened directories.
    pub protect_folders: bool,
    /// Server software identification string.
    pub server_software: Option<String>,
    /// Text written into `.donotbackup` marker files.
    pub donotbackup_notice: String,
}

impl HostConfig {
    /// Creates a single-site host with the platform's default layout.
    #[must_use]
    pub fn new(abspath: impl Into<PathBuf>) -> Self {
        let abspath = abspath.into();
        let content_dir = abspath.join(DEFAULT_CONTENT_DIR_NAME);
        let plugin_dir = content_dir.join(DEFAULT_PLUGIN_DIR_NAME);
        Self {
            abspath,
            content_dir,
            plugin_dir,
            multisite: false,
            upload_blogs_dir: None,
            open_basedir: None,
            protect_folders: true,
            server_software: None,
            donotbackup_notice: DEFAULT_DONOTBACKUP_NOTICE.to_string(),
        }
    }

    /// Resolves a layered configuration, filling in defaults.
    ///
    /// Expects a validated configuration; returns `None` when `abspath` is
    /// missing.
    #[must_use]
    pub fn from_config(config: &Config) -> Option<Self> {
        let abspath = config.abspath.clone()?;
        let mut host = Self::new(abspath);

        if let Some(content_dir) = &config.content_dir {
            host.content_dir.clone_from(content_dir);
            host.plugin_dir = content_dir.join(DEFAULT_PLUGIN_DIR_NAME);
        }
        if let Some(plugin_dir) = &config.plugin_dir {
            host.plugin_dir.clone_from(plugin_dir);
        }
        if let Some(multisite) = &config.multisite {
            host.multisite = multisite.enabled.unwrap_or(false);
            host.upload_blogs_dir.clone_from(&multisite.upload_blogs_dir);
        }
        host.open_basedir.clone_from(&config.open_basedir);
        if let Some(protect) = config.protect_folders {
            host.protect_folders = protect;
        }
        host.server_software.clone_from(&config.server_software);
        if let Some(notice) = &config.donotbackup_notice {
            host.donotbackup_notice.clone_from(notice);
        }

        Some(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_empty() {
        let config = Config::default();
        assert!(config.abspath.is_none());
        assert!(config.multisite.is_none());
    }

    #[test]
    fn test_deserialize_full_config() {
        let yaml = r"
abspath: /srv/site
content_dir: /srv/content
multisite:
  enabled: true
  upload_blogs_dir: wp-content/blogs.dir
open_basedir: /srv:/tmp
protect_folders: false
server_software: nginx/1.25
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.abspath, Some(PathBuf::from("/srv/site")));
        assert_eq!(config.content_dir, Some(PathBuf::from("/srv/content")));
        let multisite = config.multisite.unwrap();
        assert_eq!(multisite.enabled, Some(true));
        assert_eq!(
            multisite.upload_blogs_dir,
            Some("wp-content/blogs.dir".to_string())
        );
        assert_eq!(config.open_basedir, Some("/srv:/tmp".to_string()));
        assert_eq!(config.protect_folders, Some(false));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let result: std::result::Result<Config, _> = serde_yaml::from_str("abspth: /srv\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_multisite_enabled_defaults_unset() {
        let config: Config = serde_yaml::from_str("multisite: {}\n").unwrap();
        assert!(config.multisite.unwrap().enabled.is_none());

        let host = HostConfig::from_config(&Config {
            abspath: Some(PathBuf::from("/srv/site")),
            multisite: Some(MultisiteConfig::default()),
            ..Default::default()
        })
        .unwrap();
        assert!(!host.multisite);
    }

    #[test]
    fn test_host_config_defaults() {
        let host = HostConfig::new("/srv/site");
        assert!(!host.multisite);
        assert!(host.open_basedir.is_none());
        assert_eq!(host.donotbackup_notice, DEFAULT_DONOTBACKUP_NOTICE);
    }

    #[test]
    fn test_from_config_requires_abspath() {
        assert!(HostConfig::from_config(&Config::default()).is_none());
    }

    #[test]
    fn test_from_config_content_dir_moves_plugin_default() {
        let config = Config {
            abspath: Some(PathBuf::from("/srv/site")),
            content_dir: Some(PathBuf::from("/data/content")),
            ..Default::default()
        };
        let host = HostConfig::from_config(&config).unwrap();
        assert_eq!(host.content_dir, PathBuf::from("/data/content"));
        assert_eq!(host.plugin_dir, PathBuf::from("/data/content/plugins"));
    }

    #[test]
    fn test_from_config_explicit_plugin_dir() {
        let config = Config {
            abspath: Some(PathBuf::from("/srv/site")),
            plugin_dir: Some(PathBuf::from("/opt/plugins")),
            multisite: Some(MultisiteConfig {
                enabled: Some(true),
                upload_blogs_dir: None,
            }),
            protect_folders: Some(false),
            ..Default::default()
        };
        let host = HostConfig::from_config(&config).unwrap();
        assert_eq!(host.plugin_dir, PathBuf::from("/opt/plugins"));
        assert!(host.multisite);
        assert!(!host.protect_folders);
    }
}
