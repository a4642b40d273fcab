//! Attach and detach disk images with `hdiutil`.

use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::outcome::Outcome;
use crate::system::{Cmd, CommandRunner, HDIUTIL};

/// A mounted disk image.
///
/// Detaches on drop unless [`MountHandle::detach`] already did, so the volume
/// is released exactly once on every exit path.
pub struct MountHandle<'r> {
    path: PathBuf,
    runner: &'r dyn CommandRunner,
    attached: bool,
}

impl std::fmt::Debug for MountHandle<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MountHandle")
            .field("path", &self.path)
            .field("attached", &self.attached)
            .finish_non_exhaustive()
    }
}

/// Mount `image` read-only without showing it in Finder.
pub fn attach<'r>(runner: &'r dyn CommandRunner, image: &Path) -> Result<MountHandle<'r>> {
    let out = runner.exec(
        &Cmd::new(HDIUTIL)
            .args(["attach", "-nobrowse", "-readonly", "-noautoopen"])
            .arg(image),
    )?;
    if !out.success {
        return Err(InstallError::Mount { output: out.combined() });
    }
    let path = parse_mount_point(&out.stdout)
        .ok_or_else(|| InstallError::Mount { output: out.combined() })?;
    tracing::info!(mount = %path.display(), "attached disk image");
    Ok(MountHandle { path, runner, attached: true })
}

/// Mount point from `hdiutil attach` output: the last tab-separated field of
/// the last non-empty line, which must be an absolute path.
pub fn parse_mount_point(output: &str) -> Option<PathBuf> {
    let line = output.lines().rev().find(|l| !l.trim().is_empty())?;
    let field = line.rsplit('\t').next()?.trim();
    field.starts_with('/').then(|| PathBuf::from(field))
}

impl MountHandle<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detach now. A failure is tolerated and reported as a warning.
    pub fn detach(mut self) -> Outcome {
        self.release()
    }

    fn release(&mut self) -> Outcome {
        if !self.attached {
            return Outcome::Done;
        }
        self.attached = false;
        let cmd = Cmd::new(HDIUTIL).args(["detach", "-quiet"]).arg(&self.path);
        match self.runner.run(&cmd) {
            Ok(out) if out.success => {
                tracing::info!(mount = %self.path.display(), "detached disk image");
                Outcome::Done
            }
            Ok(out) => Outcome::warning(format!(
                "Failed to detach {}: {}",
                self.path.display(),
                out.combined()
            )),
            Err(e) => Outcome::warning(format!("Failed to detach {}: {e}", self.path.display())),
        }
    }
}

impl Drop for MountHandle<'_> {
    fn drop(&mut self) {
        if let Outcome::Warning(message) = self.release() {
            tracing::warn!("{message}");
        }
    }
}
