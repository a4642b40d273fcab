mod version;

#[cfg(test)]
mod tests;

pub use version::MacosVersion;

use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::system::{Cmd, CommandRunner, SW_VERS};

/// Facts about the machine the workflow runs on.
///
/// Components receive this value instead of reading the environment, so the
/// whole workflow can run against scratch directories in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub macos: MacosVersion,
    pub home: PathBuf,
    /// Where application bundles are installed, normally `/Applications`.
    pub applications: PathBuf,
}

impl Host {
    pub fn new(macos: MacosVersion, home: impl Into<PathBuf>, applications: impl Into<PathBuf>) -> Self {
        Self { macos, home: home.into(), applications: applications.into() }
    }

    /// Build a host from the running system. `macos` overrides version detection.
    pub fn detect(
        runner: &dyn CommandRunner,
        macos: Option<MacosVersion>,
        applications: &Path,
    ) -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            InstallError::io(
                "Could not determine home directory",
                std::io::Error::from(std::io::ErrorKind::NotFound),
            )
        })?;
        let macos = match macos {
            Some(v) => v,
            None => detect_macos(runner)?,
        };
        Ok(Self::new(macos, home, applications))
    }

    /// `~/Library/LaunchAgents`
    pub fn launch_agents_dir(&self) -> PathBuf {
        self.home.join("Library").join("LaunchAgents")
    }
}

/// Ask `sw_vers` for the product version.
pub fn detect_macos(runner: &dyn CommandRunner) -> Result<MacosVersion> {
    let unknown = |reason: String| InstallError::UnknownMacos { reason };
    let out = runner
        .run(&Cmd::new(SW_VERS).arg("-productVersion"))
        .map_err(|e| unknown(format!("{SW_VERS}: {e}")))?;
    if !out.success {
        return Err(unknown(format!("sw_vers failed: {}", out.combined())));
    }
    out.stdout.trim().parse::<MacosVersion>().map_err(unknown)
}
