//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, MultisiteConfig};

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use pathguard::config::{Config, ConfigMerger};
///
/// let low = Config { server_software: Some("apache".to_string()), ..Default::default() };
/// let high = Config { server_software: Some("nginx".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.server_software, Some("nginx".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into final config.
    ///
    /// Sources are sorted by precedence, lowest first, and applied in turn.
    #[must_use]
    pub fn merge(mut sources: Vec<ConfigSource>) -> Config {
        sources.sort_by_key(|s| s.precedence);

        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge source config into target (source overwrites target).
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Multisite: field-by-field merge
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.abspath.is_some() {
            target.abspath.clone_from(&source.abspath);
        }

        if source.content_dir.is_some() {
            target.content_dir.clone_from(&source.content_dir);
        }

        if source.plugin_dir.is_some() {
            target.plugin_dir.clone_from(&source.plugin_dir);
        }

        if source.open_basedir.is_some() {
            target.open_basedir.clone_from(&source.open_basedir);
        }

        if source.protect_folders.is_some() {
            target.protect_folders = source.protect_folders;
        }

        if source.server_software.is_some() {
            target.server_software.clone_from(&source.server_software);
        }

        if source.donotbackup_notice.is_some() {
            target
                .donotbackup_notice
                .clone_from(&source.donotbackup_notice);
        }

        if let Some(ref source_multisite) = source.multisite {
            target.multisite = Some(match &target.multisite {
                Some(target_multisite) => Self::merge_multisite(target_multisite, source_multisite),
                None => source_multisite.clone(),
            });
        }
    }

    /// Merge multisite configuration.
    ///
    /// Each field follows the simple-field rule: source wins if `Some`.
    fn merge_multisite(target: &MultisiteConfig, source: &MultisiteConfig) -> MultisiteConfig {
        MultisiteConfig {
            enabled: source.enabled.or(target.enabled),
            upload_blogs_dir: source
                .upload_blogs_dir
                .clone()
                .or_else(|| target.upload_blogs_dir.clone()),
        }
    }
}
