pub mod config;
pub mod lifecycle;

use std::path::PathBuf;

use anyhow::Result;
use maxlaunchpad::{config::Config, fetch::Fetcher, host::Host, system::SystemRunner, MacosVersion};

/// Global options shared by every subcommand.
pub struct Session {
    pub config_path: Option<PathBuf>,
    pub macos: Option<MacosVersion>,
}

impl Session {
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::path(),
        }
    }

    pub fn load_config(&self) -> Result<Config> {
        Config::load_from(&self.config_path()?)
    }

    pub fn host(&self, config: &Config) -> Result<Host> {
        Ok(Host::detect(&SystemRunner, self.macos, &config.paths.applications)?)
    }

    pub fn fetcher(config: &Config) -> Result<Fetcher> {
        Ok(Fetcher::new(config.cache_dir()?, config.download.timeout))
    }
}

/// Print collected warnings the same way everywhere.
pub fn print_warnings(report: &maxlaunchpad::Report) {
    for warning in report.warnings() {
        eprintln!("Warning: {warning}");
    }
}
