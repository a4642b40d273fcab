use std::path::PathBuf;

use thiserror::Error;

/// Fatal conditions raised by the install/uninstall workflow.
///
/// Best-effort failures never show up here; they are downgraded to
/// [`crate::outcome::Outcome::Warning`] and collected in a report.
#[derive(Debug, Error)]
pub enum InstallError {
    /// The artifact could not be downloaded.
    #[error("Failed to download {url}: {reason}")]
    Fetch {
        /// Source URL.
        url: String,
        /// Transport-level description of the failure.
        reason: String,
    },

    /// The artifact's content hash differs from the declared checksum.
    #[error(
        "Checksum verification failed for {}\n\nExpected: {expected}\nGot:      {actual}\n\nThe download may be corrupted or tampered with.",
        .path.display()
    )]
    Verification {
        /// File that was hashed.
        path: PathBuf,
        /// Declared checksum.
        expected: String,
        /// Computed checksum.
        actual: String,
    },

    /// `hdiutil attach` failed or did not report a usable mount point.
    #[error("DMG mount failed! Output: {output}")]
    Mount {
        /// Captured command output.
        output: String,
    },

    /// The mounted image does not contain the application bundle.
    #[error("{app} not found in DMG mounted at {}! Check the exact filename (case-sensitive).", .mount.display())]
    MissingBundle {
        /// Expected bundle name, e.g. `MaxLaunchpad.app`.
        app: String,
        /// Mount point that was searched.
        mount: PathBuf,
    },

    /// The bundle could not be copied into the applications directory.
    #[error("Failed to copy {app} to {}: {reason}", .dest.display())]
    Copy {
        /// Bundle name.
        app: String,
        /// Destination path.
        dest: PathBuf,
        /// What went wrong.
        reason: String,
    },

    /// The modern login-item utility rejected the registration.
    #[error("Failed to add login item {id}! Output: {output}")]
    Registration {
        /// Login-item identifier.
        id: String,
        /// Captured command output.
        output: String,
    },

    /// The legacy launch-agent property list could not be written.
    #[error("Failed to write launch agent {}: {source}", .path.display())]
    AgentWrite {
        /// Plist path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A post-install check failed.
    #[error("{0}")]
    Assertion(String),

    /// The host is older than the minimum supported release.
    #[error("macOS {found} is not supported; {name} requires macOS {minimum} or newer")]
    UnsupportedMacos {
        /// Application display name.
        name: String,
        /// Detected host version.
        found: String,
        /// Minimum supported version.
        minimum: String,
    },

    /// Neither `--macos` nor `sw_vers` gave a usable version.
    #[error("Could not determine the macOS version (pass --macos to set it): {reason}")]
    UnknownMacos {
        /// What `sw_vers` did instead.
        reason: String,
    },

    /// An external command could not be started at all.
    #[error("Failed to run `{program}`: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Any other filesystem failure.
    #[error("{context}: {source}")]
    Io {
        /// What was being attempted.
        context: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl InstallError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

/// Shorthand for results carrying an [`InstallError`].
pub type Result<T, E = InstallError> = std::result::Result<T, E>;
