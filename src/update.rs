//! Update orchestration.
//!
//! Two protocols share the same release lookup:
//!
//! - **Bootstrap** runs when no usable build is installed. It blocks the
//!   launcher; any failure there is fatal because there is nothing to run.
//! - **Freshness check** runs on a fire-and-forget thread next to the
//!   active session. It only ever affects the *next* launch, so every
//!   failure is caught here and reported informationally.

use std::path::PathBuf;
use std::thread;

use crate::download::Downloader;
use crate::error::LauncherError;
use crate::notify::Notifier;
use crate::release::ReleaseSource;
use crate::version::Version;
use crate::APP_NAME;

/// Result of a background freshness check.
#[derive(Debug)]
pub enum FreshnessOutcome {
    /// The installed build is already the newest compatible release.
    UpToDate,
    /// A newer compatible release was downloaded for the next launch.
    Updated { version: Version },
    /// The latest release has moved to a different major line; nothing
    /// was downloaded.
    FutureIncompatible { remote: Version },
    /// Lookup or download failed; the current session is unaffected.
    CheckFailed(String),
}

/// Coordinates first-run acquisition and background freshness checking.
#[derive(Debug, Clone)]
pub struct UpdateCoordinator<S, D> {
    supported_major: u32,
    installs_dir: PathBuf,
    source: S,
    downloader: D,
}

impl<S: ReleaseSource, D: Downloader> UpdateCoordinator<S, D> {
    pub fn new(supported_major: u32, installs_dir: PathBuf, source: S, downloader: D) -> Self {
        Self {
            supported_major,
            installs_dir,
            source,
            downloader,
        }
    }

    /// Blocking first-run acquisition: fetches the latest release's
    /// artifact into the installs directory.
    ///
    /// Errors here are fatal at the caller: a release on a different major
    /// line means nothing downloadable can ever run under this launcher,
    /// and without any installed build there is no session to start.
    pub fn bootstrap(&self) -> Result<PathBuf, LauncherError> {
        let asset = self.source.latest_asset()?;
        tracing::info!("Latest release asset: {}", asset.name);

        if asset.version.major != self.supported_major {
            return Err(LauncherError::IncompatibleMajor {
                remote: asset.version,
                supported: self.supported_major,
            });
        }

        self.downloader.fetch(&asset, &self.installs_dir)
    }

    /// Background freshness check against the currently selected build.
    ///
    /// Downloads a newer compatible release into the installs directory;
    /// the running session keeps its already-loaded executable either way.
    pub fn freshness_check(&self, local: &Version, notifier: &dyn Notifier) -> FreshnessOutcome {
        let asset = match self.source.latest_asset() {
            Ok(asset) => asset,
            Err(e) => {
                notifier.info(&format!(
                    "Update check could not reach the {APP_NAME} release feed, \
                     make sure you are connected to the internet: {e}"
                ));
                return FreshnessOutcome::CheckFailed(e.to_string());
            }
        };

        if asset.version.major != self.supported_major {
            notifier.info(&format!(
                "Future versions of {APP_NAME} are incompatible with this launcher, \
                 please update the launcher"
            ));
            return FreshnessOutcome::FutureIncompatible {
                remote: asset.version,
            };
        }

        if asset.version <= *local {
            return FreshnessOutcome::UpToDate;
        }

        notifier.info(&format!(
            "New version of {APP_NAME} available, downloading now..."
        ));
        match self.downloader.fetch(&asset, &self.installs_dir) {
            Ok(_) => FreshnessOutcome::Updated {
                version: asset.version,
            },
            Err(e) => {
                notifier.info(&format!("Failed to download the new {APP_NAME}: {e}"));
                FreshnessOutcome::CheckFailed(e.to_string())
            }
        }
    }
}

/// Spawns the freshness check on its own thread, fire-and-forget.
///
/// The thread is never joined; its result is only ever logged, and it
/// becomes irrelevant once the launcher exits.
pub fn spawn_freshness_check<S, D>(
    coordinator: UpdateCoordinator<S, D>,
    local: Version,
    notifier: std::sync::Arc<dyn Notifier>,
) where
    S: ReleaseSource + 'static,
    D: Downloader + 'static,
{
    let spawned = thread::Builder::new()
        .name("freshness-check".into())
        .spawn(move || {
            let outcome = coordinator.freshness_check(&local, notifier.as_ref());
            match outcome {
                FreshnessOutcome::UpToDate => tracing::debug!("{} is up to date", APP_NAME),
                FreshnessOutcome::Updated { version } => {
                    tracing::info!("Downloaded {} v{} for the next launch", APP_NAME, version)
                }
                FreshnessOutcome::FutureIncompatible { remote } => {
                    tracing::warn!("Latest {} release v{} is on a newer major line", APP_NAME, remote)
                }
                FreshnessOutcome::CheckFailed(reason) => {
                    tracing::debug!("Freshness check failed: {}", reason)
                }
            }
        });

    if let Err(e) = spawned {
        tracing::warn!("Could not start freshness check: {}", e);
    }
}
