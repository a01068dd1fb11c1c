//! PolyDraw launcher binary.
//!
//! Startup flow: make sure at least one usable build exists (bootstrap
//! download if not), pick the newest compatible build, kick off a
//! background freshness check, and supervise the PolyDraw session until it
//! exits. All fatal paths terminate with exit code 1 through the notifier.

use std::sync::Arc;

use polydraw_launcher::download::HttpDownloader;
use polydraw_launcher::error::LauncherError;
use polydraw_launcher::installs;
use polydraw_launcher::notify::{DialogNotifier, Notifier};
use polydraw_launcher::paths::LauncherDirs;
use polydraw_launcher::release::GitHubReleaseSource;
use polydraw_launcher::update::{UpdateCoordinator, spawn_freshness_check};
use polydraw_launcher::{APP_NAME, SUPPORTED_MAJOR, save, session};

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let notifier: Arc<dyn Notifier> = Arc::new(DialogNotifier);

    let dirs = match LauncherDirs::resolve() {
        Some(Ok(dirs)) => dirs,
        Some(Err(e)) => {
            notifier.fatal(&format!("Failed to prepare the launcher directory: {e}"))
        }
        None => notifier.fatal("Could not determine a data directory for this platform"),
    };

    let saved_geometry = save::load(&dirs.save_file);

    let coordinator = UpdateCoordinator::new(
        SUPPORTED_MAJOR,
        dirs.installs_dir.clone(),
        GitHubReleaseSource::new(),
        HttpDownloader,
    );

    if !installs::has_usable_build(&dirs.installs_dir, SUPPORTED_MAJOR) {
        notifier.progress(&format!(
            "{APP_NAME} not found, downloading the latest release..."
        ));
        if let Err(e) = coordinator.bootstrap() {
            let message = match e {
                LauncherError::IncompatibleMajor { .. } => format!(
                    "Current versions of {APP_NAME} are incompatible with this launcher, \
                     please update the launcher ({e})"
                ),
                e => format!(
                    "Failed to download {APP_NAME}, make sure you are connected \
                     to the internet: {e}"
                ),
            };
            notifier.fatal(&message);
        }
    }

    let target = match installs::pick_newest(&dirs.installs_dir, SUPPORTED_MAJOR) {
        Ok(build) => build,
        Err(e) => notifier.fatal(&e.to_string()),
    };
    tracing::info!("Selected {} (v{})", target.filename, target.version);

    // Fire-and-forget; only affects the next launch.
    spawn_freshness_check(coordinator, target.version, Arc::clone(&notifier));

    if let Err(e) = session::run(
        &target.path,
        saved_geometry,
        dirs.save_file.clone(),
        Arc::clone(&notifier),
    ) {
        let message = match &e {
            LauncherError::Io(_) => format!("Fatal error while starting {APP_NAME}: {e}"),
            _ => e.to_string(),
        };
        notifier.fatal(&message);
    }
}
