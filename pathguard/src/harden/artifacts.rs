//! Protective artifact files and web server detection.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Line ending written between artifact lines.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";

/// Line ending written between artifact lines.
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// Web server family serving the deployment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ServerKind {
    /// Microsoft IIS.
    Iis,
    /// nginx.
    Nginx,
    /// Apache or anything unrecognized.
    #[default]
    Other,
}

impl ServerKind {
    /// Classifies a server software string.
    ///
    /// Matching is case-insensitive on substrings; anything unrecognized,
    /// including no string at all, is [`ServerKind::Other`].
    ///
    /// # Examples
    ///
    /// ```
    /// use pathguard::harden::ServerKind;
    ///
    /// assert_eq!(ServerKind::detect(Some("Microsoft-IIS/10.0")), ServerKind::Iis);
    /// assert_eq!(ServerKind::detect(Some("nginx/1.25.3")), ServerKind::Nginx);
    /// assert_eq!(ServerKind::detect(Some("Apache/2.4")), ServerKind::Other);
    /// assert_eq!(ServerKind::detect(None), ServerKind::Other);
    /// ```
    #[must_use]
    pub fn detect(server_software: Option<&str>) -> Self {
        let Some(software) = server_software else {
            return Self::Other;
        };
        let software = software.to_lowercase();
        if software.contains("microsoft-iis") {
            Self::Iis
        } else if software.contains("nginx") {
            Self::Nginx
        } else {
            Self::Other
        }
    }

    /// Protective artifacts for this server, in write order.
    #[must_use]
    pub fn artifacts(self) -> &'static [Artifact] {
        match self {
            Self::Iis => &[Artifact::WebConfig],
            Self::Nginx => &[Artifact::IndexPhp],
            Self::Other => &[Artifact::Htaccess, Artifact::IndexPhp],
        }
    }
}

/// A file written into a hardened directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// IIS authorization rules denying every user.
    WebConfig,
    /// PHP stub answering 404.
    IndexPhp,
    /// Apache rules denying every request.
    Htaccess,
    /// Opt-out marker excluding the directory from backups.
    DoNotBackup,
}

impl Artifact {
    /// File name inside the directory.
    #[must_use]
    pub fn file_name(self) -> &'static str {
        match self {
            Self::WebConfig => "Web.config",
            Self::IndexPhp => "index.php",
            Self::Htaccess => ".htaccess",
            Self::DoNotBackup => ".donotbackup",
        }
    }

    /// File contents. `notice` is only used by the opt-out marker.
    #[must_use]
    pub fn render(self, notice: &str) -> String {
        match self {
            Self::WebConfig => [
                "<configuration>",
                "\t<system.webServer>",
                "\t\t<authorization>",
                "\t\t\t<deny users=\"*\" />",
                "\t\t</authorization>",
                "\t</system.webServer>",
                "</configuration>",
            ]
            .join(LINE_ENDING),
            Self::IndexPhp => [
                "<?php",
                "header( $_SERVER['SERVER_PROTOCOL'] . ' 404 Not Found' );",
                "header( 'Status: 404 Not Found' );",
                "",
            ]
            .join(LINE_ENDING),
            Self::Htaccess => [
                "<Files \"*\">",
                "<IfModule mod_access.c>",
                "Deny from all",
                "</IfModule>",
                "<IfModule !mod_access_compat>",
                "<IfModule mod_authz_host.c>",
                "Deny from all",
                "</IfModule>",
                "</IfModule>",
                "<IfModule mod_access_compat>",
                "Deny from all",
                "</IfModule>",
                "</Files>",
            ]
            .join(LINE_ENDING),
            Self::DoNotBackup => notice.to_string(),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Result of [`write_if_absent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file did not exist and was written.
    Written,
    /// A file was already there and was left untouched.
    AlreadyPresent,
}

/// Create `path` with `contents` unless something already exists there.
///
/// Uses create-new semantics, so a file created concurrently by another
/// writer is never overwritten. If writing fails after the file was
/// created, the partial file is removed so a later call writes it afresh.
///
/// # Errors
///
/// Returns any I/O error other than "already exists".
pub fn write_if_absent(path: &Path, contents: &str) -> io::Result<WriteOutcome> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Ok(WriteOutcome::AlreadyPresent);
        }
        Err(e) => return Err(e),
    };
    fill_new_file(path, file, contents.as_bytes())?;
    Ok(WriteOutcome::Written)
}

/// Write `contents` into the freshly created `path`, removing it on failure.
fn fill_new_file(path: &Path, mut file: impl Write, contents: &[u8]) -> io::Result<()> {
    if let Err(e) = file.write_all(contents).and_then(|()| file.flush()) {
        drop(file);
        if let Err(cleanup) = fs::remove_file(path) {
            log::warn!("Failed to remove partial {}: {cleanup}", path.display());
        }
        return Err(e);
    }
    Ok(())
}
