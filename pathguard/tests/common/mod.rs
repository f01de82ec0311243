//! Common test utilities for integration tests.
//!
//! Builds throwaway host layouts inside temporary directories so tests can
//! exercise real filesystem behavior.

use std::fs;
use std::path::{Path, PathBuf};

use pathguard::path::canonicalize::real_path_string;
use pathguard::HostConfig;
use tempfile::TempDir;

/// A fabricated single-site installation.
///
/// Layout under a fresh temporary directory:
///
/// ```text
/// <tmp>/site/
/// <tmp>/site/wp-content/
/// <tmp>/site/wp-content/plugins/
/// <tmp>/site/wp-content/uploads/
/// ```
///
/// The temporary directory is removed when the fixture is dropped.
pub struct SiteFixture {
    _dir: TempDir,
    root: PathBuf,
    pub host: HostConfig,
}

#[allow(dead_code)]
impl SiteFixture {
    /// Creates the default layout.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        // Real-path the temporary root so expectations match normalized output
        let root = PathBuf::from(real_path_string(dir.path()).unwrap());
        let host = HostConfig::new(root.join("site"));
        fs::create_dir_all(&host.plugin_dir).unwrap();
        fs::create_dir_all(host.content_dir.join("uploads")).unwrap();
        Self {
            _dir: dir,
            root,
            host,
        }
    }

    /// The real path of the temporary directory holding the installation.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Content directory in forward-slash form.
    pub fn content(&self) -> String {
        pathguard::path::to_forward_slashes(&self.host.content_dir)
    }

    /// A path under the content directory.
    pub fn content_path(&self, relative: &str) -> PathBuf {
        self.host.content_dir.join(relative)
    }

    /// Creates a directory under the content directory.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.content_path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Names of the entries in a directory, sorted.
    pub fn entries(&self, path: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(path)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

/// Whether the current process can write into a directory it made read-only.
///
/// True when running as a privileged user; permission tests skip then.
#[cfg(unix)]
#[allow(dead_code)]
pub fn permissions_are_enforced(dir: &Path) -> bool {
    fs::write(dir.join(".probe"), "").is_err()
}
