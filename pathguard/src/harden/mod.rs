//! Directory hardening.
//!
//! [`DirectoryHardener::secure_directory`] turns a raw path into a safe,
//! writable directory: it normalizes the path, refuses system directories
//! and anything outside the allowlist, creates the directory, probes that it
//! is writable, and finally drops protective artifact files into it so the
//! web server will not serve or list its contents.
//!
//! Artifact and marker writes are best effort. Their failures are logged
//! and collected in the [`HardenReport`] rather than failing the call.

mod artifacts;

pub use artifacts::{write_if_absent, Artifact, ServerKind, WriteOutcome, LINE_ENDING};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::HostConfig;
use crate::error::{Error, Result};
use crate::path::{normalize, CanonicalPath};
use crate::policy::{is_forbidden, is_within_allowed_roots, AllowedRoots, SystemRootSet};
use crate::uploads::{resolve_upload_root, UploadDirProvider};

/// Prefix of the temporary file used to probe writability.
const PROBE_PREFIX: &str = ".pathguard-";

/// Options controlling which files hardening writes.
///
/// # Examples
///
/// ```
/// use pathguard::harden::{HardenOptions, ServerKind};
/// use pathguard::HostConfig;
///
/// let mut host = HostConfig::new("/srv/site");
/// host.server_software = Some("nginx/1.25".to_string());
///
/// let options = HardenOptions::from_config(&host);
/// assert!(options.protect);
/// assert_eq!(options.server_kind, ServerKind::Nginx);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardenOptions {
    /// Write protective artifacts for the server kind.
    pub protect: bool,
    /// The web server family to write artifacts for.
    pub server_kind: ServerKind,
}

impl Default for HardenOptions {
    fn default() -> Self {
        Self {
            protect: true,
            server_kind: ServerKind::Other,
        }
    }
}

impl HardenOptions {
    /// Options configured for the host.
    #[must_use]
    pub fn from_config(host: &HostConfig) -> Self {
        Self {
            protect: host.protect_folders,
            server_kind: ServerKind::detect(host.server_software.as_deref()),
        }
    }
}

/// An artifact that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFailure {
    /// The file that was being written.
    pub path: PathBuf,
    /// Which artifact it was.
    pub artifact: Artifact,
    /// Kind of the I/O error.
    pub kind: io::ErrorKind,
    /// Rendered I/O error.
    pub message: String,
}

/// What a successful [`DirectoryHardener::secure_directory`] call did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HardenReport {
    /// The hardened directory, without trailing slash.
    pub directory: CanonicalPath,
    /// Whether the directory had to be created.
    pub created: bool,
    /// Files written by this call.
    pub written: Vec<PathBuf>,
    /// Files that already existed and were left untouched.
    pub already_present: Vec<PathBuf>,
    /// Files that could not be written.
    pub failed: Vec<ArtifactFailure>,
}

impl HardenReport {
    fn new(directory: CanonicalPath, created: bool) -> Self {
        Self {
            directory,
            created,
            written: Vec::new(),
            already_present: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Returns true when every requested artifact is in place.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    fn place(&mut self, directory: &Path, artifact: Artifact, notice: &str) {
        let path = directory.join(artifact.file_name());
        match write_if_absent(&path, &artifact.render(notice)) {
            Ok(WriteOutcome::Written) => {
                log::debug!("Wrote {}", path.display());
                self.written.push(path);
            }
            Ok(WriteOutcome::AlreadyPresent) => {
                log::debug!("Keeping existing {}", path.display());
                self.already_present.push(path);
            }
            Err(e) => {
                log::warn!("Failed to write {}: {e}", path.display());
                self.failed.push(ArtifactFailure {
                    path,
                    artifact,
                    kind: e.kind(),
                    message: e.to_string(),
                });
            }
        }
    }
}

/// Validates, creates and protects target directories for one host.
pub struct DirectoryHardener<'a> {
    host: &'a HostConfig,
    uploads: &'a dyn UploadDirProvider,
}

impl<'a> DirectoryHardener<'a> {
    /// Creates a hardener for `host`, asking `uploads` for the single-site
    /// upload directory.
    #[must_use]
    pub fn new(host: &'a HostConfig, uploads: &'a dyn UploadDirProvider) -> Self {
        Self { host, uploads }
    }

    /// Make `raw` a safe, writable directory.
    ///
    /// Relative paths are taken from the content directory. The system root
    /// set is recomputed on every call so a changed upload root is honored.
    ///
    /// # Errors
    ///
    /// - [`Error::UnresolvableAncestor`] if the path cannot be normalized
    /// - [`Error::ForbiddenLocation`] for a protected system directory
    /// - [`Error::OutsideAllowedRoots`] when the allowlist excludes it
    /// - [`Error::CreateFailed`] if the directory cannot be created
    /// - [`Error::NotWritable`] if the directory rejects the write probe
    ///
    /// No artifacts are written when any of these occur.
    pub fn secure_directory(
        &self,
        raw: &str,
        add_opt_out_marker: bool,
        options: &HardenOptions,
    ) -> Result<HardenReport> {
        let normalized = normalize(raw, &self.host.content_dir)?;
        let folder = normalized.untrailed().to_string();
        log::debug!("Securing directory {folder} (requested as {raw:?})");

        let upload_root = resolve_upload_root(self.host, self.uploads);
        let system_roots = SystemRootSet::compute(self.host, &upload_root);
        if is_forbidden(&folder, &system_roots) {
            return Err(Error::ForbiddenLocation { path: folder });
        }

        if !is_within_allowed_roots(&folder, &AllowedRoots::from_config(self.host)) {
            return Err(Error::OutsideAllowedRoots { path: folder });
        }

        let directory = Path::new(&folder);
        let created = if directory.is_dir() {
            false
        } else {
            fs::create_dir_all(directory).map_err(|source| Error::CreateFailed {
                path: folder.clone(),
                source,
            })?;
            log::debug!("Created {folder}");
            true
        };

        if let Err(source) = probe_writable(directory) {
            return Err(Error::NotWritable {
                path: folder,
                source,
            });
        }

        let mut report = HardenReport::new(CanonicalPath::from_trusted(folder.clone()), created);
        let notice = &self.host.donotbackup_notice;

        if options.protect {
            for artifact in options.server_kind.artifacts() {
                report.place(directory, *artifact, notice);
            }
        }

        if add_opt_out_marker {
            report.place(directory, Artifact::DoNotBackup, notice);
        }

        Ok(report)
    }
}

/// Create and remove a temporary file in `directory`.
fn probe_writable(directory: &Path) -> io::Result<()> {
    let probe = tempfile::Builder::new()
        .prefix(PROBE_PREFIX)
        .tempfile_in(directory)?;
    probe.close()
}
