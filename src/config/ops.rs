use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use super::Config;

impl Config {
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Could not determine home directory")?;
        Ok(home.join(".config").join("maxlaunchpad").join("config.toml"))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Download cache directory, `~/Library/Caches/maxlaunchpad` on macOS.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.paths.cache {
            return Ok(dir.clone());
        }
        let base = dirs::cache_dir()
            .context("Could not determine cache directory")?;
        Ok(base.join("maxlaunchpad"))
    }

    /// Get a config value by dot-separated key path
    pub fn get_value(&self, key: &str) -> Result<String> {
        let value = match key {
            "package.name" => self.package.name.clone(),
            "package.version" => self.package.version.clone(),
            "package.sha256" => self.package.sha256.clone(),
            "package.url" => self.package.url.clone(),
            "package.app" => self.package.app.clone(),
            "package.minimum_macos" => String::from(self.package.minimum_macos),
            "login_item.id" => self.login_item.id.clone(),
            "login_item.name" => self.login_item.name.clone(),
            "login_item.hidden" => self.login_item.hidden.to_string(),
            "paths.applications" => self.paths.applications.display().to_string(),
            "paths.cache" => self
                .paths
                .cache
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "download.timeout" => humantime::format_duration(self.download.timeout).to_string(),
            _ => anyhow::bail!("Unknown config key: {key}"),
        };
        Ok(value)
    }

    /// Set a config value by dot-separated key path
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "package.name" => self.package.name = value.to_string(),
            "package.version" => self.package.version = value.to_string(),
            "package.sha256" => {
                if value.len() != 64 || !value.chars().all(|c| c.is_ascii_hexdigit()) {
                    anyhow::bail!("Invalid sha256 (expected 64 hex characters): {value}");
                }
                self.package.sha256 = value.to_ascii_lowercase();
            }
            "package.url" => self.package.url = value.to_string(),
            "package.app" => self.package.app = value.to_string(),
            "package.minimum_macos" => {
                self.package.minimum_macos = value.parse().map_err(anyhow::Error::msg)?;
            }
            "login_item.id" => self.login_item.id = value.to_string(),
            "login_item.name" => self.login_item.name = value.to_string(),
            "login_item.hidden" => {
                self.login_item.hidden = value.parse::<bool>()
                    .with_context(|| format!("Invalid boolean value: {value}"))?;
            }
            "paths.applications" => self.paths.applications = PathBuf::from(value),
            "paths.cache" => {
                self.paths.cache = if value.is_empty() { None } else { Some(PathBuf::from(value)) };
            }
            "download.timeout" => {
                self.download.timeout = humantime::parse_duration(value)
                    .with_context(|| format!("Invalid duration: {value}"))?;
            }
            _ => anyhow::bail!("Unknown config key: {key}"),
        }
        Ok(())
    }
}
