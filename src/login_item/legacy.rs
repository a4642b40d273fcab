use std::path::{Path, PathBuf};

use crate::error::{InstallError, Result};
use crate::outcome::Outcome;
use crate::system::{Cmd, CommandRunner, LAUNCHCTL};

use super::LoginItem;

/// Seconds launchd waits for the agent to exit before killing it.
const EXIT_TIMEOUT_SECS: u32 = 5;

pub(super) fn plist_path(launch_agents: &Path, id: &str) -> PathBuf {
    launch_agents.join(format!("{id}.plist"))
}

/// Launch-agent property list that opens `item.path` once per login.
pub fn agent_plist(item: &LoginItem) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{label}</string>
    <key>ProgramArguments</key>
    <array>
        <string>open</string>
        <string>-a</string>
        <string>{path}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
    <key>KeepAlive</key>
    <false/>
    <key>LaunchOnlyOnce</key>
    <true/>
    <key>ExitTimeOut</key>
    <integer>{timeout}</integer>
</dict>
</plist>
"#,
        label = escape_xml(&item.id),
        path = escape_xml(&item.path.display().to_string()),
        timeout = EXIT_TIMEOUT_SECS,
    )
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Write and load the agent. Writing is fatal; loading is not, since the
/// agent may already be loaded.
pub(super) fn register(
    runner: &dyn CommandRunner,
    launch_agents: &Path,
    item: &LoginItem,
) -> Result<Outcome> {
    let path = plist_path(launch_agents, &item.id);
    let write_err = |source: std::io::Error| InstallError::AgentWrite { path: path.clone(), source };

    std::fs::create_dir_all(launch_agents).map_err(write_err)?;
    std::fs::write(&path, agent_plist(item)).map_err(write_err)?;
    if !path.exists() {
        return Err(write_err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "plist missing after write",
        )));
    }
    tracing::info!(path = %path.display(), "wrote launch agent");

    let outcome = match runner.run(&Cmd::new(LAUNCHCTL).args(["load", "-w"]).arg(&path)) {
        Ok(out) if out.success => Outcome::Done,
        Ok(out) => Outcome::warning(format!(
            "Failed to load legacy plist (may already exist): {}",
            out.combined()
        )),
        Err(e) => Outcome::warning(format!("Failed to load legacy plist (may already exist): {e}")),
    };
    Ok(outcome)
}

/// Unload and delete the agent plist if it exists.
pub(super) fn remove(runner: &dyn CommandRunner, launch_agents: &Path, id: &str) -> Outcome {
    let path = plist_path(launch_agents, id);
    if !path.exists() {
        return Outcome::Done;
    }

    // Not loaded is fine; the file still has to go.
    match runner.run(&Cmd::new(LAUNCHCTL).arg("unload").arg(&path)) {
        Ok(out) if !out.success => {
            tracing::debug!(path = %path.display(), "launchctl unload failed: {}", out.combined());
        }
        Err(e) => tracing::debug!(path = %path.display(), "launchctl unload failed: {e}"),
        Ok(_) => {}
    }

    match std::fs::remove_file(&path) {
        Ok(()) => Outcome::Done,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Outcome::Done,
        Err(e) => Outcome::warning(format!("Failed to remove {}: {e}", path.display())),
    }
}
