//! Download and cache the release disk image.

mod verify;


pub use verify::{compute_sha256, verify_checksum};

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

use crate::config::PackageConfig;
use crate::error::{InstallError, Result};

/// One declared release: where to get it and what it must hash to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub url: Url,
    pub sha256: String,
    pub version: String,
}

impl Artifact {
    pub fn new(url: &str, sha256: &str, version: &str) -> Result<Self> {
        let expanded = url.replace("{version}", version);
        let url = Url::parse(&expanded).map_err(|e| InstallError::Fetch {
            url: expanded.clone(),
            reason: format!("invalid URL: {e}"),
        })?;
        Ok(Self {
            url,
            sha256: sha256.trim().to_ascii_lowercase(),
            version: version.to_string(),
        })
    }

    pub fn from_package(package: &PackageConfig) -> Result<Self> {
        Self::new(&package.url, &package.sha256, &package.version)
    }

    /// Last path segment of the URL, e.g. `MaxLaunchpad.dmg`.
    pub fn file_name(&self) -> String {
        self.url
            .path_segments()
            .and_then(|mut s| s.next_back())
            .filter(|s| !s.is_empty())
            .unwrap_or("artifact.dmg")
            .to_string()
    }

    /// Name of the cached copy: `<version>--<file name>`.
    pub fn cache_name(&self) -> String {
        format!("{}--{}", self.version, self.file_name())
    }
}

/// Fetches artifacts into a cache directory, verifying every file it hands out.
#[derive(Debug, Clone)]
pub struct Fetcher {
    cache_dir: PathBuf,
    timeout: Duration,
}

impl Fetcher {
    pub fn new(cache_dir: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self { cache_dir: cache_dir.into(), timeout }
    }

    pub fn cached_path(&self, artifact: &Artifact) -> PathBuf {
        self.cache_dir.join(artifact.cache_name())
    }

    /// Return a local path whose content matches `artifact.sha256`,
    /// downloading only when no verified copy is cached.
    pub fn fetch(&self, artifact: &Artifact) -> Result<PathBuf> {
        let dest = self.cached_path(artifact);
        if dest.exists() {
            match verify_checksum(&dest, &artifact.sha256) {
                Ok(()) => {
                    tracing::info!(path = %dest.display(), "using cached download");
                    return Ok(dest);
                }
                Err(e) => {
                    tracing::warn!("discarding stale cached download: {e}");
                    std::fs::remove_file(&dest).map_err(|e| {
                        InstallError::io(format!("Failed to remove {}", dest.display()), e)
                    })?;
                }
            }
        }

        std::fs::create_dir_all(&self.cache_dir).map_err(|e| {
            InstallError::io(format!("Failed to create {}", self.cache_dir.display()), e)
        })?;

        let part = self
            .cache_dir
            .join(format!(".{}.{}.part", artifact.cache_name(), uuid::Uuid::new_v4()));
        tracing::info!(url = %artifact.url, "downloading");
        let result = self
            .download(&artifact.url, &part)
            .and_then(|()| verify_checksum(&part, &artifact.sha256));
        if let Err(e) = result {
            let _ = std::fs::remove_file(&part);
            return Err(e);
        }

        std::fs::rename(&part, &dest).map_err(|e| {
            InstallError::io(format!("Failed to move download into {}", dest.display()), e)
        })?;
        Ok(dest)
    }

    fn download(&self, url: &Url, to: &Path) -> Result<()> {
        let fetch_err = |reason: String| InstallError::Fetch { url: url.to_string(), reason };
        let mut file = File::create(to)
            .map_err(|e| InstallError::io(format!("Failed to create {}", to.display()), e))?;

        if url.scheme() == "file" {
            let source = url
                .to_file_path()
                .map_err(|()| fetch_err("not a local file path".to_string()))?;
            let mut input = File::open(&source).map_err(|e| fetch_err(e.to_string()))?;
            std::io::copy(&mut input, &mut file).map_err(|e| fetch_err(e.to_string()))?;
            return Ok(());
        }

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("maxlaunchpad-installer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| fetch_err(e.to_string()))?;
        let mut resp = client
            .get(url.clone())
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(|e| fetch_err(e.to_string()))?;
        resp.copy_to(&mut file).map_err(|e| fetch_err(e.to_string()))?;
        Ok(())
    }
}
