//! Copy the application bundle out of a mounted image.

mod copy;


use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::mount::MountHandle;
use crate::outcome::{Outcome, Report};
use crate::system::{Cmd, CommandRunner, XATTR};

/// An application bundle living in the applications directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledBundle {
    pub path: PathBuf,
}

impl InstalledBundle {
    pub fn at(applications: &Path, app: &str) -> Self {
        Self { path: applications.join(app) }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// Install `app` from `mount` into `applications`, replacing any previous copy.
///
/// Missing bundle and copy failures are fatal; the caller still owns `mount`
/// and its guard detaches the image on the way out.
pub fn install(
    runner: &dyn CommandRunner,
    mount: &MountHandle<'_>,
    app: &str,
    applications: &Path,
    report: &mut Report,
) -> Result<InstalledBundle> {
    let source = mount.path().join(app);
    if !source.exists() {
        return Err(InstallError::MissingBundle {
            app: app.to_string(),
            mount: mount.path().to_path_buf(),
        });
    }

    let bundle = InstalledBundle::at(applications, app);
    let copy_err = |reason: String| InstallError::Copy {
        app: app.to_string(),
        dest: bundle.path.clone(),
        reason,
    };

    if bundle.path.symlink_metadata().is_ok() {
        remove_path(&bundle.path).map_err(|e| copy_err(format!("could not remove old version: {e}")))?;
        tracing::info!(path = %bundle.path.display(), "removed existing {app} (old version)");
    }

    std::fs::create_dir_all(applications).map_err(|e| copy_err(e.to_string()))?;
    copy::copy_tree(&source, &bundle.path).map_err(|e| copy_err(e.to_string()))?;
    if !bundle.exists() {
        return Err(copy_err("bundle missing after copy".to_string()));
    }
    tracing::info!(path = %bundle.path.display(), "copied {app}");

    report.record(strip_quarantine(runner, &bundle.path));
    Ok(bundle)
}

/// Clear extended attributes, including `com.apple.quarantine`, from `path`.
pub fn strip_quarantine(runner: &dyn CommandRunner, path: &Path) -> Outcome {
    match runner.run(&Cmd::new(XATTR).arg("-cr").arg(path)) {
        Ok(out) if out.success => Outcome::Done,
        Ok(out) => Outcome::warning(format!("Fallback quarantine cleanup: {}", out.combined())),
        Err(e) => Outcome::warning(format!("Fallback quarantine cleanup: {e}")),
    }
}

/// Delete an installed bundle if present.
pub fn remove(bundle: &InstalledBundle) -> Outcome {
    if bundle.path.symlink_metadata().is_err() {
        return Outcome::Done;
    }
    match remove_path(&bundle.path) {
        Ok(()) => {
            tracing::info!(path = %bundle.path.display(), "removed bundle");
            Outcome::Done
        }
        Err(e) => Outcome::warning(format!("Failed to remove {}: {e}", bundle.path.display())),
    }
}

fn remove_path(path: &Path) -> std::io::Result<()> {
    if path.is_dir() && !path.is_symlink() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    }
}
