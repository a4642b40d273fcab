//! The lifecycle entry points: download, install, uninstall, zap, test and
//! caveats.

mod caveats;
mod validate;


use std::path::PathBuf;

use crate::bundle::{self, InstalledBundle};
use crate::config::Config;
use crate::error::{InstallError, Result};
use crate::fetch::{Artifact, Fetcher};
use crate::host::Host;
use crate::login_item::{LoginItem, LoginItemRegistration, LoginItems, Mechanism};
use crate::mount;
use crate::outcome::{Outcome, Report};
use crate::system::{Cmd, CommandRunner, OSASCRIPT};

/// What a successful install produced.
#[derive(Debug)]
pub struct InstallSummary {
    pub bundle: InstalledBundle,
    pub registration: LoginItemRegistration,
    pub report: Report,
}

/// Drives one application's lifecycle on one host.
pub struct Installer<'a> {
    config: &'a Config,
    host: &'a Host,
    runner: &'a dyn CommandRunner,
    fetcher: Fetcher,
}

impl<'a> Installer<'a> {
    pub fn new(config: &'a Config, host: &'a Host, runner: &'a dyn CommandRunner, fetcher: Fetcher) -> Self {
        Self { config, host, runner, fetcher }
    }

    pub fn artifact(&self) -> Result<Artifact> {
        Artifact::from_package(&self.config.package)
    }

    pub fn bundle(&self) -> InstalledBundle {
        InstalledBundle::at(&self.host.applications, &self.config.package.app)
    }

    pub fn mechanism(&self) -> Mechanism {
        Mechanism::for_version(self.host.macos)
    }

    fn login_item(&self) -> LoginItem {
        LoginItem {
            id: self.config.login_item.id.clone(),
            name: self.config.login_item.name.clone(),
            path: self.bundle().path,
            hidden: self.config.login_item.hidden,
        }
    }

    /// Fetch and verify the disk image, returning its cached path.
    pub fn download(&self) -> Result<PathBuf> {
        self.fetcher.fetch(&self.artifact()?)
    }

    /// Download, mount, copy, register. The image is detached before this
    /// returns, whatever the outcome.
    pub fn install(&self) -> Result<InstallSummary> {
        let package = &self.config.package;
        if self.host.macos < package.minimum_macos {
            return Err(InstallError::UnsupportedMacos {
                name: package.name.clone(),
                found: self.host.macos.to_string(),
                minimum: String::from(package.minimum_macos),
            });
        }

        let image = self.download()?;
        let mut report = Report::new();

        let mount = mount::attach(self.runner, &image)?;
        let copied = bundle::install(self.runner, &mount, &package.app, &self.host.applications, &mut report);
        report.record(mount.detach());
        let bundle = match copied {
            Ok(bundle) => bundle,
            Err(e) => {
                for warning in report.warnings() {
                    tracing::warn!("{warning}");
                }
                return Err(e);
            }
        };

        let registration = LoginItems::new(self.runner, self.host).register(&self.login_item(), &mut report)?;
        tracing::info!(version = %package.version, path = %bundle.path.display(), "installed");
        Ok(InstallSummary { bundle, registration, report })
    }

    /// Tear down the login item and the bundle. Never fails; everything that
    /// goes wrong ends up as a warning.
    pub fn uninstall(&self) -> Report {
        let mut report = Report::new();
        let item = &self.config.login_item;

        report.record(self.osascript(&format!(
            "if application id {id} is running then tell application id {id} to quit",
            id = applescript_quoted(&item.id),
        )));

        LoginItems::new(self.runner, self.host).remove_all(&item.id, &mut report);

        // Entries added through System Events by earlier installs.
        report.record(self.osascript(&format!(
            "tell application \"System Events\" to if (exists login item {name}) then delete login item {name}",
            name = applescript_quoted(&item.name),
        )));

        report.record(bundle::remove(&self.bundle()));
        report
    }

    /// Uninstall, then delete preferences, support files and caches.
    pub fn zap(&self) -> Report {
        let mut report = self.uninstall();
        for path in self.zap_paths() {
            report.record(trash(&path));
        }
        report
    }

    pub fn zap_paths(&self) -> Vec<PathBuf> {
        let library = self.host.home.join("Library");
        let id = &self.config.login_item.id;
        vec![
            library.join("Preferences").join(format!("{id}.plist")),
            library.join("Application Support").join(&self.config.package.name),
            library.join("Caches").join(id),
            library.join("LaunchAgents").join(format!("{id}.plist")),
        ]
    }

    /// Post-install assertions.
    pub fn test(&self) -> Result<()> {
        validate::run(self.runner, self.host, self.config)
    }

    /// Post-install instructions for this host.
    pub fn caveats(&self) -> String {
        caveats::render(self.config, self.host)
    }

    fn osascript(&self, script: &str) -> Outcome {
        match self.runner.run(&Cmd::new(OSASCRIPT).args(["-e", script])) {
            Ok(out) if out.success => Outcome::Done,
            Ok(out) => Outcome::warning(format!("osascript failed: {}", out.combined())),
            Err(e) => Outcome::warning(format!("osascript failed: {e}")),
        }
    }
}

fn applescript_quoted(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn trash(path: &std::path::Path) -> Outcome {
    let result = match std::fs::symlink_metadata(path) {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Outcome::Done,
        Err(e) => Err(e),
        Ok(meta) if meta.is_dir() => std::fs::remove_dir_all(path),
        Ok(_) => std::fs::remove_file(path),
    };
    match result {
        Ok(()) => {
            tracing::info!(path = %path.display(), "removed");
            Outcome::Done
        }
        Err(e) => Outcome::warning(format!("Failed to remove {}: {e}", path.display())),
    }
}
