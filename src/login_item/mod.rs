//! Per-user auto-launch registration.
//!
//! Two mutually exclusive mechanisms exist, picked once from the host's macOS
//! version: the `loginitemutil` utility on Sonoma and later, and a launchd
//! agent property list on older releases. Registration always clears both
//! first so at most one entry with a given identifier ever exists.

mod legacy;
mod modern;


pub use legacy::agent_plist;

use std::path::PathBuf;

use crate::error::Result;
use crate::host::{Host, MacosVersion};
use crate::outcome::{Outcome, Report};
use crate::system::CommandRunner;

/// What gets registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginItem {
    pub id: String,
    pub name: String,
    pub path: PathBuf,
    pub hidden: bool,
}

/// A registration as created by [`LoginItems::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginItemRegistration {
    pub item: LoginItem,
    pub mechanism: Mechanism,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mechanism {
    /// `loginitemutil`, macOS 14 and later.
    Modern,
    /// `~/Library/LaunchAgents/<id>.plist` loaded with `launchctl`.
    Legacy,
}

impl Mechanism {
    pub fn for_version(version: MacosVersion) -> Self {
        if version >= MacosVersion::SONOMA {
            Self::Modern
        } else {
            Self::Legacy
        }
    }

    pub const ALL: [Self; 2] = [Self::Modern, Self::Legacy];
}

impl std::fmt::Display for Mechanism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Modern => write!(f, "modern"),
            Self::Legacy => write!(f, "legacy"),
        }
    }
}

/// Login-item operations bound to one host.
pub struct LoginItems<'a> {
    runner: &'a dyn CommandRunner,
    launch_agents: PathBuf,
    mechanism: Mechanism,
}

impl<'a> LoginItems<'a> {
    pub fn new(runner: &'a dyn CommandRunner, host: &Host) -> Self {
        Self {
            runner,
            launch_agents: host.launch_agents_dir(),
            mechanism: Mechanism::for_version(host.macos),
        }
    }

    /// Mechanism used for registration and checks on this host.
    pub const fn mechanism(&self) -> Mechanism {
        self.mechanism
    }

    pub fn plist_path(&self, id: &str) -> PathBuf {
        legacy::plist_path(&self.launch_agents, id)
    }

    /// Replace any existing registration of `item.id` with a fresh one.
    pub fn register(&self, item: &LoginItem, report: &mut Report) -> Result<LoginItemRegistration> {
        if let Some(reason) = modern::clear(self.runner, &item.id) {
            tracing::debug!(id = %item.id, "ignored loginitemutil cleanup failure: {reason}");
        }
        if let Outcome::Warning(message) = legacy::remove(self.runner, &self.launch_agents, &item.id) {
            tracing::debug!(id = %item.id, "ignored launch agent cleanup failure: {message}");
        }

        match self.mechanism {
            Mechanism::Modern => modern::register(self.runner, item)?,
            Mechanism::Legacy => report.record(legacy::register(self.runner, &self.launch_agents, item)?),
        }
        tracing::info!(id = %item.id, mechanism = %self.mechanism, "registered login item");
        Ok(LoginItemRegistration { item: item.clone(), mechanism: self.mechanism })
    }

    /// Remove `id` under both mechanisms, reporting failures as warnings.
    pub fn remove_all(&self, id: &str, report: &mut Report) {
        for mechanism in Mechanism::ALL {
            report.record(self.remove_with(mechanism, id));
        }
    }

    pub fn remove_with(&self, mechanism: Mechanism, id: &str) -> Outcome {
        match mechanism {
            Mechanism::Modern => modern::remove(self.runner, id),
            Mechanism::Legacy => legacy::remove(self.runner, &self.launch_agents, id),
        }
    }

    /// Whether `id` is registered through this host's mechanism.
    pub fn is_registered(&self, id: &str) -> bool {
        self.is_registered_with(self.mechanism, id)
    }

    pub fn is_registered_with(&self, mechanism: Mechanism, id: &str) -> bool {
        match mechanism {
            Mechanism::Modern => modern::is_registered(self.runner, id),
            Mechanism::Legacy => legacy::plist_path(&self.launch_agents, id).exists(),
        }
    }
}
