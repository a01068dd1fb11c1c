//! Installed build discovery.
//!
//! The installs directory holds downloaded artifacts named
//! `PolyDraw-<major>.<minor>.<patch>.jar`. The set of installed builds is
//! recomputed from the directory on every launch; nothing about it is
//! persisted. Files whose names don't match the artifact pattern (including
//! ones where the version part fails to parse) are silently skipped.

use std::path::{Path, PathBuf};

use crate::error::LauncherError;
use crate::version::Version;
use crate::{APP_NAME, ARTIFACT_EXT};

/// One artifact file found in the installs directory.
#[derive(Debug, Clone)]
pub struct InstalledBuild {
    pub version: Version,
    pub path: PathBuf,
    pub filename: String,
}

/// Extracts the version from an artifact file name, or `None` if the name
/// doesn't match `PolyDraw-<version>.jar` with a well-formed version.
pub fn artifact_version(file_name: &str) -> Option<Version> {
    let rest = file_name.strip_prefix(APP_NAME)?.strip_prefix('-')?;
    let version = rest.strip_suffix(ARTIFACT_EXT)?.strip_suffix('.')?;
    version.parse().ok()
}

/// Scans a directory for installed builds.
///
/// An unreadable or missing directory scans as empty. Entries that aren't
/// artifact files are skipped without diagnostics.
pub fn scan(dir: &Path) -> Vec<InstalledBuild> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        tracing::debug!("Installs directory {} not readable", dir.display());
        return vec![];
    };

    entries
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if !path.is_file() {
                return None;
            }
            let filename = entry.file_name().to_str()?.to_string();
            let version = artifact_version(&filename)?;
            Some(InstalledBuild {
                version,
                path,
                filename,
            })
        })
        .collect()
}

/// Whether at least one installed build matches the supported major line.
pub fn has_usable_build(dir: &Path, supported_major: u32) -> bool {
    scan(dir)
        .iter()
        .any(|build| build.version.major == supported_major)
}

/// Picks the newest installed build on the supported major line.
///
/// Explicit max-by-version reduction; among files carrying the same
/// version the first one encountered wins (directory order, deliberately
/// unspecified). Never falls back to an incompatible build.
pub fn pick_newest(dir: &Path, supported_major: u32) -> Result<InstalledBuild, LauncherError> {
    scan(dir)
        .into_iter()
        .filter(|build| build.version.major == supported_major)
        .reduce(|best, candidate| {
            if candidate.version > best.version {
                candidate
            } else {
                best
            }
        })
        .ok_or_else(|| LauncherError::NoUsableBuild {
            major: supported_major,
            dir: dir.to_path_buf(),
        })
}
