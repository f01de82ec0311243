//! Upload root resolution.
//!
//! Finds the base uploads directory of the deployment. Single-site hosts
//! delegate to the platform's own resolver through [`UploadDirProvider`];
//! multisite hosts walk a fallback chain that always ends at the content
//! directory.

use std::path::{Path, PathBuf};

use crate::config::HostConfig;
use crate::path::{to_forward_slashes, trailingslash, CanonicalPath};

/// Name of the uploads directory under the content directory.
pub const UPLOADS_DIR_NAME: &str = "uploads";

/// The hosting platform's single-site upload directory resolver.
#[cfg_attr(test, mockall::automock)]
pub trait UploadDirProvider {
    /// Returns the base directory of the uploads tree.
    fn base_dir(&self) -> PathBuf;
}

/// Provider for hosts using the platform's default layout,
/// `<content_dir>/uploads`.
///
/// # Examples
///
/// ```
/// use pathguard::uploads::{DefaultUploadDir, UploadDirProvider};
/// use std::path::Path;
///
/// let provider = DefaultUploadDir::new("/srv/site/wp-content");
/// assert_eq!(provider.base_dir(), Path::new("/srv/site/wp-content/uploads"));
/// ```
#[derive(Debug, Clone)]
pub struct DefaultUploadDir {
    content_dir: PathBuf,
}

impl DefaultUploadDir {
    /// Creates a provider rooted at the given content directory.
    #[must_use]
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }
}

impl UploadDirProvider for DefaultUploadDir {
    fn base_dir(&self) -> PathBuf {
        self.content_dir.join(UPLOADS_DIR_NAME)
    }
}

/// Determine the base uploads directory for the deployment.
///
/// Multisite hosts use, in order: the configured `upload_blogs_dir` under
/// the platform root, `<content>/uploads/sites/` if it is a directory,
/// `<content>/uploads/` if it is a directory, and finally the content
/// directory itself. Single-site hosts ask `provider`.
///
/// The result always uses forward slashes and ends with a slash. There is no
/// error path.
///
/// # Examples
///
/// ```
/// use pathguard::uploads::{resolve_upload_root, DefaultUploadDir};
/// use pathguard::HostConfig;
///
/// let host = HostConfig::new("/srv/site");
/// let provider = DefaultUploadDir::new(&host.content_dir);
/// let root = resolve_upload_root(&host, &provider);
/// assert_eq!(root.as_str(), "/srv/site/wp-content/uploads/");
/// ```
pub fn resolve_upload_root(host: &HostConfig, provider: &dyn UploadDirProvider) -> CanonicalPath {
    if !host.multisite {
        return slashed(&provider.base_dir());
    }

    if let Some(ref blogs_dir) = host.upload_blogs_dir {
        let root = trailingslash(&to_forward_slashes(&host.abspath));
        let blogs_dir = blogs_dir.replace('\\', "/");
        return CanonicalPath::from_trusted(trailingslash(&format!(
            "{root}{}",
            blogs_dir.trim_start_matches('/')
        )));
    }

    let uploads = host.content_dir.join(UPLOADS_DIR_NAME);
    let sites = uploads.join("sites");
    if sites.is_dir() {
        return slashed(&sites);
    }
    if uploads.is_dir() {
        return slashed(&uploads);
    }

    log::debug!(
        "No multisite uploads directory under {}; using the content directory",
        host.content_dir.display()
    );
    slashed(&host.content_dir)
}

fn slashed(path: &Path) -> CanonicalPath {
    CanonicalPath::from_trusted(trailingslash(&to_forward_slashes(path)))
}
