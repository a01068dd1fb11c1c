//! Artifact download into the installs directory.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::LauncherError;
use crate::release::{ReleaseAsset, USER_AGENT};

/// Timeout for artifact downloads.
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Transfers a release asset into a destination directory.
pub trait Downloader: Send + Sync {
    /// Fetches the asset into `dest_dir`, named after the asset, and
    /// returns the path of the written file.
    fn fetch(&self, asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf, LauncherError>;
}

/// HTTP downloader for release assets.
#[derive(Debug, Clone)]
pub struct HttpDownloader;

impl Downloader for HttpDownloader {
    fn fetch(&self, asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf, LauncherError> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LauncherError::Network(format!("failed to create runtime: {e}")))?;

        rt.block_on(fetch_async(asset, dest_dir))
    }
}

async fn fetch_async(asset: &ReleaseAsset, dest_dir: &Path) -> Result<PathBuf, LauncherError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(DOWNLOAD_TIMEOUT)
        .build()
        .map_err(|e| LauncherError::Network(format!("failed to create HTTP client: {e}")))?;

    tracing::info!("Downloading {} from {}", asset.name, asset.download_url);

    let response = client
        .get(&asset.download_url)
        .send()
        .await
        .map_err(|e| LauncherError::Network(format!("download failed: {e}")))?;

    if !response.status().is_success() {
        return Err(LauncherError::Network(format!(
            "download failed with HTTP {}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| LauncherError::Network(format!("failed to read download body: {e}")))?;

    if asset.size > 0 && bytes.len() as u64 != asset.size {
        return Err(LauncherError::Network(format!(
            "download truncated: got {} bytes, release advertises {}",
            bytes.len(),
            asset.size
        )));
    }

    let dest = dest_dir.join(&asset.name);
    let mut file = File::create(&dest)?;
    file.write_all(&bytes)?;

    tracing::info!("Installed {} ({} bytes)", dest.display(), bytes.len());
    Ok(dest)
}
