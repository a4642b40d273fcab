use crate::error::{InstallError, Result};
use crate::outcome::Outcome;
use crate::system::{Cmd, CommandRunner, LOGINITEMUTIL};

use super::LoginItem;

pub(super) fn register(runner: &dyn CommandRunner, item: &LoginItem) -> Result<()> {
    let cmd = Cmd::new(LOGINITEMUTIL)
        .arg("add")
        .args(["--id", item.id.as_str()])
        .args(["--name", item.name.as_str()])
        .arg("--path")
        .arg(&item.path)
        .args(["--hidden", if item.hidden { "true" } else { "false" }])
        .args(["--legacy", "false"]);

    let out = runner.run(&cmd).map_err(|e| InstallError::Registration {
        id: item.id.clone(),
        output: e.to_string(),
    })?;
    if !out.success {
        return Err(InstallError::Registration { id: item.id.clone(), output: out.combined() });
    }
    Ok(())
}

/// Run `loginitemutil remove` unconditionally. Returns the failure text, if any.
pub(super) fn clear(runner: &dyn CommandRunner, id: &str) -> Option<String> {
    match runner.run(&Cmd::new(LOGINITEMUTIL).args(["remove", id])) {
        Ok(out) if out.success => None,
        Ok(out) => Some(out.combined()),
        Err(e) => Some(e.to_string()),
    }
}

/// Remove `id`. A failed removal only counts when the entry is still listed
/// afterwards; "nothing to remove" is success.
pub(super) fn remove(runner: &dyn CommandRunner, id: &str) -> Outcome {
    match clear(runner, id) {
        None => Outcome::Done,
        Some(reason) if is_registered(runner, id) => {
            Outcome::warning(format!("Failed to remove login item {id}: {reason}"))
        }
        Some(reason) => {
            tracing::debug!(%id, "loginitemutil remove: {reason}");
            Outcome::Done
        }
    }
}

/// `loginitemutil list` names `id` as a whole token. An unavailable utility counts as "no".
pub(super) fn is_registered(runner: &dyn CommandRunner, id: &str) -> bool {
    runner
        .run(&Cmd::new(LOGINITEMUTIL).arg("list"))
        .is_ok_and(|out| out.success && lists(&out.stdout, id))
}

fn lists(output: &str, id: &str) -> bool {
    output
        .split(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}'))
        .any(|token| token.trim_end_matches(':') == id)
}
