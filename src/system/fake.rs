//! In-memory stand-in for the macOS utilities, used by unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use super::{Cmd, CommandOutput, CommandRunner};

/// Simulates just enough of `hdiutil`, `loginitemutil`, `launchctl`, `xattr`
/// and `sw_vers` to drive the workflow end to end.
#[derive(Default)]
pub(crate) struct FakeRunner {
    pub calls: RefCell<Vec<Cmd>>,
    /// Stdout returned by `hdiutil attach`.
    pub attach_output: RefCell<String>,
    pub product_version: RefCell<String>,
    pub login_items: RefCell<Vec<String>>,
    pub loaded_agents: RefCell<Vec<String>>,
    pub quarantined: RefCell<HashSet<String>>,
    /// Forced results keyed by `"<program> <first arg>"`.
    pub overrides: RefCell<HashMap<String, CommandOutput>>,
    /// Programs that fail to spawn.
    pub missing: RefCell<HashSet<String>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// `hdiutil attach` will report `volume` as the mount point.
    pub fn with_volume(volume: &Path) -> Self {
        let runner = Self::new();
        *runner.attach_output.borrow_mut() = format!(
            "/dev/disk4          \tGUID_partition_scheme          \t\n\
             /dev/disk4s1        \tApple_HFS                      \t{}\n",
            volume.display()
        );
        runner
    }

    pub fn fail(&self, key: &str, output: CommandOutput) {
        self.overrides.borrow_mut().insert(key.to_string(), output);
    }

    pub fn count(&self, program: &str, first_arg: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.program_name() == program && c.args_lossy().first().map(String::as_str) == Some(first_arg))
            .count()
    }

    pub fn registered(&self, id: &str) -> usize {
        self.login_items.borrow().iter().filter(|i| *i == id).count()
    }
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag).and_then(|i| args.get(i + 1)).cloned()
}

impl CommandRunner for FakeRunner {
    fn run(&self, cmd: &Cmd) -> std::io::Result<CommandOutput> {
        self.calls.borrow_mut().push(cmd.clone());
        let program = cmd.program_name().to_string();
        if self.missing.borrow().contains(&program) {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, program));
        }

        let args = cmd.args_lossy();
        let first = args.first().cloned().unwrap_or_default();
        if let Some(out) = self.overrides.borrow().get(&format!("{program} {first}")) {
            return Ok(out.clone());
        }

        let out = match (program.as_str(), first.as_str()) {
            ("hdiutil", "attach") => CommandOutput::ok(self.attach_output.borrow().clone()),
            ("sw_vers", _) => CommandOutput::ok(format!("{}\n", self.product_version.borrow())),
            ("loginitemutil", "add") => {
                if let Some(id) = flag_value(&args, "--id") {
                    self.login_items.borrow_mut().push(id);
                }
                CommandOutput::ok("")
            }
            ("loginitemutil", "remove") => {
                let id = args.get(1).cloned().unwrap_or_default();
                let mut items = self.login_items.borrow_mut();
                if items.contains(&id) {
                    items.retain(|i| *i != id);
                    CommandOutput::ok("")
                } else {
                    CommandOutput::failed(format!("no login item {id}"))
                }
            }
            ("loginitemutil", "list") => CommandOutput::ok(self.login_items.borrow().join("\n")),
            ("launchctl", "load") => {
                if let Some(path) = args.last() {
                    self.loaded_agents.borrow_mut().push(path.clone());
                }
                CommandOutput::ok("")
            }
            ("launchctl", "unload") => {
                let path = args.last().cloned().unwrap_or_default();
                let mut agents = self.loaded_agents.borrow_mut();
                if agents.contains(&path) {
                    agents.retain(|a| *a != path);
                    CommandOutput::ok("")
                } else {
                    CommandOutput::failed(format!("Unload failed: 5: Input/output error: {path}"))
                }
            }
            ("xattr", "-cr") => {
                if let Some(path) = args.last() {
                    self.quarantined.borrow_mut().remove(path);
                }
                CommandOutput::ok("")
            }
            ("xattr", "-p") => {
                let path = args.last().cloned().unwrap_or_default();
                if self.quarantined.borrow().contains(&path) {
                    CommandOutput::ok("0083;65a1b2c3;Safari;\n")
                } else {
                    CommandOutput::failed(format!("xattr: {path}: No such xattr: com.apple.quarantine\n"))
                }
            }
            _ => CommandOutput::ok(""),
        };
        Ok(out)
    }
}
