//! External command execution.
//!
//! Every OS utility the installer touches (`hdiutil`, `xattr`, `launchctl`,
//! `loginitemutil`, `osascript`, `sw_vers`) goes through [`CommandRunner`].

#[cfg(test)]
pub(crate) mod fake;

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{InstallError, Result};

pub const HDIUTIL: &str = "/usr/bin/hdiutil";
pub const XATTR: &str = "/usr/bin/xattr";
pub const LAUNCHCTL: &str = "/bin/launchctl";
pub const LOGINITEMUTIL: &str = "loginitemutil";
pub const OSASCRIPT: &str = "/usr/bin/osascript";
pub const SW_VERS: &str = "/usr/bin/sw_vers";

/// A program plus its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cmd {
    program: String,
    args: Vec<OsString>,
}

impl Cmd {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new() }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Bare program name, e.g. `hdiutil` for `/usr/bin/hdiutil`.
    pub fn program_name(&self) -> &str {
        Path::new(&self.program)
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or(&self.program)
    }

    pub fn arg_list(&self) -> &[OsString] {
        &self.args
    }

    /// Arguments as UTF-8, lossily converted.
    pub fn args_lossy(&self) -> Vec<String> {
        self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
    }
}

impl std::fmt::Display for Cmd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self { success: true, stdout: stdout.into(), stderr: String::new() }
    }

    pub fn failed(stderr: impl Into<String>) -> Self {
        Self { success: false, stdout: String::new(), stderr: stderr.into() }
    }

    /// stdout and stderr joined, the way `2>&1` would show them.
    pub fn combined(&self) -> String {
        match (self.stdout.trim().is_empty(), self.stderr.trim().is_empty()) {
            (false, false) => format!("{}\n{}", self.stdout.trim_end(), self.stderr.trim_end()),
            (false, true) => self.stdout.trim_end().to_string(),
            (true, false) => self.stderr.trim_end().to_string(),
            (true, true) => String::new(),
        }
    }
}

/// Runs external commands to completion.
pub trait CommandRunner {
    /// Run `cmd`, capturing its output. An `Err` means the program could not
    /// be started; a non-zero exit is reported through [`CommandOutput::success`].
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput>;

    /// Like [`CommandRunner::run`] but maps a spawn failure into [`InstallError::Spawn`].
    fn exec(&self, cmd: &Cmd) -> Result<CommandOutput> {
        self.run(cmd).map_err(|source| InstallError::Spawn {
            program: cmd.program().to_string(),
            source,
        })
    }
}

/// [`CommandRunner`] backed by real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput> {
        let program = if cmd.program().contains('/') {
            PathBuf::from(cmd.program())
        } else {
            which::which(cmd.program()).map_err(|e| {
                std::io::Error::new(std::io::ErrorKind::NotFound, format!("{}: {e}", cmd.program()))
            })?
        };

        tracing::debug!(command = %cmd, "running");
        let output = Command::new(program)
            .args(cmd.arg_list())
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
