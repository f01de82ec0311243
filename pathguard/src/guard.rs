//! High-level entry point bundling a host configuration with its upload
//! directory provider.

use crate::config::HostConfig;
use crate::error::Result;
use crate::harden::{DirectoryHardener, HardenOptions, HardenReport};
use crate::path::{self, CanonicalPath};
use crate::policy::{self, AllowedRoots, SystemRootSet};
use crate::uploads::{self, DefaultUploadDir, UploadDirProvider};

/// Path safety checks and directory hardening for one deployment.
///
/// # Examples
///
/// ```no_run
/// use pathguard::{HostConfig, PathGuard};
///
/// let guard = PathGuard::new(HostConfig::new("/srv/site"));
/// let report = guard.check_folder("backups", true)?;
/// assert!(report.is_complete());
/// # Ok::<(), pathguard::Error>(())
/// ```
pub struct PathGuard {
    host: HostConfig,
    uploads: Box<dyn UploadDirProvider>,
}

impl PathGuard {
    /// Creates a guard using the default upload layout of the host.
    #[must_use]
    pub fn new(host: HostConfig) -> Self {
        let uploads = DefaultUploadDir::new(&host.content_dir);
        Self {
            host,
            uploads: Box::new(uploads),
        }
    }

    /// Replaces the single-site upload directory provider.
    #[must_use]
    pub fn with_upload_provider(mut self, provider: impl UploadDirProvider + 'static) -> Self {
        self.uploads = Box::new(provider);
        self
    }

    /// The host configuration.
    #[must_use]
    pub fn host(&self) -> &HostConfig {
        &self.host
    }

    /// See [`uploads::resolve_upload_root`].
    #[must_use]
    pub fn resolve_upload_root(&self) -> CanonicalPath {
        uploads::resolve_upload_root(&self.host, self.uploads.as_ref())
    }

    /// Normalizes `raw` against the host's content directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnresolvableAncestor`] if no ancestor exists.
    pub fn normalize(&self, raw: &str) -> Result<CanonicalPath> {
        path::normalize(raw, &self.host.content_dir)
    }

    /// The protected directories for the current upload root.
    #[must_use]
    pub fn system_roots(&self) -> SystemRootSet {
        SystemRootSet::compute(&self.host, &self.resolve_upload_root())
    }

    /// The host's allowlist.
    #[must_use]
    pub fn allowed_roots(&self) -> AllowedRoots {
        AllowedRoots::from_config(&self.host)
    }

    /// Whether an already normalized path is a protected directory.
    #[must_use]
    pub fn is_forbidden(&self, path: &CanonicalPath) -> bool {
        policy::is_forbidden(path.as_str(), &self.system_roots())
    }

    /// Whether an already normalized path passes the allowlist.
    #[must_use]
    pub fn is_within_allowed_roots(&self, path: &CanonicalPath) -> bool {
        policy::is_within_allowed_roots(path.as_str(), &self.allowed_roots())
    }

    /// Hardening options derived from the host configuration.
    #[must_use]
    pub fn harden_options(&self) -> HardenOptions {
        HardenOptions::from_config(&self.host)
    }

    /// See [`DirectoryHardener::secure_directory`].
    ///
    /// # Errors
    ///
    /// Propagates every failure of the hardening pipeline.
    pub fn secure_directory(
        &self,
        raw: &str,
        add_opt_out_marker: bool,
        options: &HardenOptions,
    ) -> Result<HardenReport> {
        DirectoryHardener::new(&self.host, self.uploads.as_ref()).secure_directory(
            raw,
            add_opt_out_marker,
            options,
        )
    }

    /// Secures `raw` with the options configured for the host.
    ///
    /// # Errors
    ///
    /// Propagates every failure of the hardening pipeline.
    pub fn check_folder(&self, raw: &str, add_opt_out_marker: bool) -> Result<HardenReport> {
        self.secure_directory(raw, add_opt_out_marker, &self.harden_options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harden::ServerKind;
    use crate::path::canonicalize::real_path_string;
    use crate::uploads::MockUploadDirProvider;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn host_in(root: &std::path::Path) -> HostConfig {
        let host = HostConfig::new(PathBuf::from(real_path_string(root).unwrap()).join("site"));
        fs::create_dir_all(host.content_dir.join("uploads")).unwrap();
        host
    }

    #[test]
    fn test_check_folder_uses_host_options() {
        let dir = tempdir().unwrap();
        let mut host = host_in(dir.path());
        host.server_software = Some("Microsoft-IIS/10.0".into());
        let guard = PathGuard::new(host);

        assert_eq!(guard.harden_options().server_kind, ServerKind::Iis);
        let report = guard.check_folder("backups", false).unwrap();
        let backups = guard.host().content_dir.join("backups");
        assert_eq!(report.written, vec![backups.join("Web.config")]);
        assert!(!backups.join("index.php").exists());
    }

    #[test]
    fn test_custom_upload_provider_is_forbidden() {
        let dir = tempdir().unwrap();
        let host = host_in(dir.path());
        let media = host.abspath.join("media");
        fs::create_dir_all(&media).unwrap();

        let mut provider = MockUploadDirProvider::new();
        let returned = media.clone();
        provider.expect_base_dir().returning(move || returned.clone());

        let guard = PathGuard::new(host).with_upload_provider(provider);
        let normalized = guard.normalize(&media.to_string_lossy()).unwrap();
        assert!(guard.is_forbidden(&normalized));
        assert!(guard.check_folder(&media.to_string_lossy(), false).is_err());
    }

    #[test]
    fn test_policy_queries() {
        let dir = tempdir().unwrap();
        let guard = PathGuard::new(host_in(dir.path()));

        let root = guard.normalize(&guard.host().abspath.to_string_lossy()).unwrap();
        let custom = guard.normalize("../custom").unwrap();
        assert!(guard.is_forbidden(&root));
        assert!(!guard.is_forbidden(&custom));
        assert!(guard.is_within_allowed_roots(&custom));
        assert!(guard.allowed_roots().is_empty());
        assert_eq!(guard.system_roots().len(), 5);
    }
}
