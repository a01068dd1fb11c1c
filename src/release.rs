//! Remote release lookup.
//!
//! Production lookups go to the GitHub releases API for the PolyDraw
//! repository. The trait seam exists so the update coordinator can be
//! exercised without a network.

use std::time::Duration;

use serde::Deserialize;

use crate::error::LauncherError;
use crate::installs::artifact_version;
use crate::version::Version;
use crate::{APP_NAME, RELEASE_REPO};

/// Timeout for release lookup requests.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(10);

/// User agent for GitHub API requests (required by the API).
pub(crate) const USER_AGENT: &str = "polydraw-launcher";

/// The artifact asset attached to the latest remote release.
#[derive(Debug, Clone)]
pub struct ReleaseAsset {
    pub name: String,
    pub version: Version,
    pub download_url: String,
    /// Advertised size in bytes; 0 when the API doesn't report one.
    pub size: u64,
}

/// Source of the latest remote release's artifact asset.
pub trait ReleaseSource: Send + Sync {
    fn latest_asset(&self) -> Result<ReleaseAsset, LauncherError>;
}

/// Response from the latest-release endpoint, reduced to what we use.
#[derive(Debug, Deserialize)]
struct LatestReleaseResponse {
    assets: Vec<AssetEntry>,
}

#[derive(Debug, Deserialize)]
struct AssetEntry {
    name: String,
    browser_download_url: String,
    #[serde(default)]
    size: u64,
}

/// Looks up the latest release of the configured GitHub repository.
#[derive(Debug, Clone)]
pub struct GitHubReleaseSource {
    api_url: String,
}

impl GitHubReleaseSource {
    pub fn new() -> Self {
        Self {
            api_url: format!("https://api.github.com/repos/{}/releases/latest", RELEASE_REPO),
        }
    }
}

impl Default for GitHubReleaseSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ReleaseSource for GitHubReleaseSource {
    fn latest_asset(&self) -> Result<ReleaseAsset, LauncherError> {
        // Runtime for this single async operation
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LauncherError::Network(format!("failed to create runtime: {e}")))?;

        rt.block_on(fetch_latest_asset(&self.api_url))
    }
}

async fn fetch_latest_asset(api_url: &str) -> Result<ReleaseAsset, LauncherError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(LOOKUP_TIMEOUT)
        .build()
        .map_err(|e| LauncherError::Network(format!("failed to create HTTP client: {e}")))?;

    let response = client
        .get(api_url)
        .header("Accept", "application/vnd.github.v3+json")
        .send()
        .await
        .map_err(|e| LauncherError::Network(format!("release lookup failed: {e}")))?;

    if !response.status().is_success() {
        return Err(LauncherError::Network(format!(
            "release lookup returned HTTP {}",
            response.status()
        )));
    }

    let release: LatestReleaseResponse = response
        .json()
        .await
        .map_err(|e| LauncherError::Network(format!("failed to parse release response: {e}")))?;

    select_artifact_asset(release)
}

/// Filters the asset list down to the artifact asset, if any.
fn select_artifact_asset(release: LatestReleaseResponse) -> Result<ReleaseAsset, LauncherError> {
    release
        .assets
        .into_iter()
        .find_map(|asset| {
            let version = artifact_version(&asset.name)?;
            Some(ReleaseAsset {
                name: asset.name,
                version,
                download_url: asset.browser_download_url,
                size: asset.size,
            })
        })
        .ok_or_else(|| {
            LauncherError::Network(format!("latest release has no {APP_NAME} artifact asset"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> AssetEntry {
        AssetEntry {
            name: name.to_string(),
            browser_download_url: format!("https://example.invalid/{name}"),
            size: 42,
        }
    }

    #[test]
    fn test_select_artifact_asset() {
        let release = LatestReleaseResponse {
            assets: vec![entry("PolyDraw-2.3.0.jar.sha256"), entry("PolyDraw-2.3.0.jar")],
        };

        let asset = select_artifact_asset(release).unwrap();
        assert_eq!(asset.name, "PolyDraw-2.3.0.jar");
        assert_eq!(asset.version, Version::new(2, 3, 0));
        assert_eq!(asset.size, 42);
    }

    #[test]
    fn test_select_artifact_asset_none_matching() {
        let release = LatestReleaseResponse {
            assets: vec![entry("source.tar.gz"), entry("PolyDraw-setup.exe")],
        };

        assert!(matches!(
            select_artifact_asset(release),
            Err(LauncherError::Network(_))
        ));
    }
}
