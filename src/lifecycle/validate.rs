use crate::bundle::InstalledBundle;
use crate::config::Config;
use crate::error::{InstallError, Result};
use crate::host::Host;
use crate::login_item::{LoginItems, Mechanism};
use crate::system::{Cmd, CommandRunner, XATTR};

const QUARANTINE_ABSENT: &str = "No such xattr: com.apple.quarantine";

/// Checks, in order: bundle present, login item present for this host's
/// mechanism, quarantine attribute absent. Stops at the first failure.
pub(super) fn run(runner: &dyn CommandRunner, host: &Host, config: &Config) -> Result<()> {
    let app = &config.package.app;
    let bundle = InstalledBundle::at(&host.applications, app);
    if !bundle.exists() {
        return Err(InstallError::Assertion(format!(
            "{app} not installed to {}!",
            host.applications.display()
        )));
    }

    let items = LoginItems::new(runner, host);
    if !items.is_registered(&config.login_item.id) {
        let message = match items.mechanism() {
            Mechanism::Modern => "Sonoma/Tahoe login item not added!",
            Mechanism::Legacy => "Legacy plist login item not created!",
        };
        return Err(InstallError::Assertion(message.to_string()));
    }

    let out = runner.exec(
        &Cmd::new(XATTR)
            .args(["-p", "com.apple.quarantine"])
            .arg(&bundle.path),
    )?;
    if !out.combined().contains(QUARANTINE_ABSENT) {
        return Err(InstallError::Assertion("Application still quarantined!".to_string()));
    }
    Ok(())
}
