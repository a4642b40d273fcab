mod ops;

#[cfg(test)]
mod tests;

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::host::MacosVersion;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub package: PackageConfig,
    pub login_item: LoginItemConfig,
    pub paths: PathsConfig,
    pub download: DownloadConfig,
}

/// The release being installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Display name of the application.
    pub name: String,
    pub version: String,
    /// Expected SHA-256 of the disk image, lowercase hex.
    pub sha256: String,
    /// Download URL; `{version}` is replaced with `version`.
    pub url: String,
    /// Bundle name inside the disk image, e.g. `MaxLaunchpad.app`.
    pub app: String,
    pub minimum_macos: MacosVersion,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginItemConfig {
    /// Reverse-DNS identifier, also used as the launch-agent label.
    pub id: String,
    pub name: String,
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub applications: PathBuf,
    /// Download cache; defaults to the platform cache directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            name: "MaxLaunchpad".to_string(),
            version: "1.0.3".to_string(),
            sha256: "04de40782d4dabed2b5930bd82175a1004657033f014f2a7ec1611dcbb0e8ac9".to_string(),
            url: "https://github.com/AwesomeDog/maxlaunchpad/releases/download/v{version}/MaxLaunchpad.dmg"
                .to_string(),
            app: "MaxLaunchpad.app".to_string(),
            minimum_macos: MacosVersion::MONTEREY,
        }
    }
}

impl Default for LoginItemConfig {
    fn default() -> Self {
        Self {
            id: "com.awesomedog.maxlaunchpad".to_string(),
            name: "MaxLaunchpad".to_string(),
            hidden: false,
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self { applications: PathBuf::from("/Applications"), cache: None }
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self { timeout: Duration::from_secs(300) }
    }
}
