use anyhow::Result;
use clap::Subcommand;
use maxlaunchpad::config::Config;

use super::Session;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the current configuration
    Show,
    /// Print the configuration file path
    Path,
    /// Write the default configuration to disk
    Init,
    /// Set a configuration value (e.g. package.version 1.0.4)
    Set { key: String, value: String },
    /// Get a configuration value
    Get { key: String },
}

pub fn cmd_config(session: &Session, action: ConfigAction) -> Result<()> {
    let path = session.config_path()?;
    match action {
        ConfigAction::Show => {
            let config = Config::load_from(&path)?;
            let pretty = toml::to_string_pretty(&config)?;
            print!("{pretty}");
        }
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Init => {
            let config = Config::default();
            config.save_to(&path)?;
            println!("Wrote default config to {}", path.display());
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load_from(&path)?;
            config.set_value(&key, &value)?;
            config.save_to(&path)?;
            println!("Set {key} = {value}");
        }
        ConfigAction::Get { key } => {
            let config = Config::load_from(&path)?;
            println!("{}", config.get_value(&key)?);
        }
    }
    Ok(())
}
