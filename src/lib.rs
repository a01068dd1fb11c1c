//! PolyDraw launcher
//!
//! Keeps a local set of PolyDraw builds up to date and runs the newest one
//! that this launcher is compatible with. PolyDraw itself is a separate
//! process; the launcher hands it the previously saved window geometry on
//! the command line and persists the geometry it reports back on exit.
//!
//! Update handling has two modes:
//! - a blocking bootstrap download when no usable build is installed yet
//! - a background freshness check that runs alongside the active session
//!   and only affects the *next* launch

pub mod download;
pub mod error;
pub mod installs;
pub mod notify;
pub mod paths;
pub mod release;
pub mod save;
pub mod session;
pub mod update;
pub mod version;

/// Name of the managed application. Artifacts are named
/// `PolyDraw-<major>.<minor>.<patch>.jar`.
pub const APP_NAME: &str = "PolyDraw";

/// File extension of release artifacts.
pub const ARTIFACT_EXT: &str = "jar";

/// Major version line this launcher build supports. Builds and releases
/// with any other major are never selected or auto-installed.
pub const SUPPORTED_MAJOR: u32 = 2;

/// GitHub repository that publishes PolyDraw releases.
pub const RELEASE_REPO: &str = "polydraw-app/PolyDraw";
