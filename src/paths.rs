//! Launcher state directories.

use std::io;
use std::path::PathBuf;

use directories::ProjectDirs;

/// Per-user launcher state: the save file and the installs directory.
#[derive(Debug, Clone)]
pub struct LauncherDirs {
    pub save_file: PathBuf,
    pub installs_dir: PathBuf,
}

impl LauncherDirs {
    /// Resolves the platform data directory and creates the installs
    /// subdirectory if needed.
    ///
    /// Returns `None` if the platform has no notion of a home/data
    /// directory.
    pub fn resolve() -> Option<io::Result<Self>> {
        let dirs = ProjectDirs::from("app.polydraw", "", "PolyDrawLauncher")?;
        Some(Self::at(dirs.data_dir().to_path_buf()))
    }

    fn at(root: PathBuf) -> io::Result<Self> {
        let installs_dir = root.join("installs");
        std::fs::create_dir_all(&installs_dir)?;
        Ok(Self {
            save_file: root.join("save.json"),
            installs_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_at_creates_installs_dir() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("PolyDrawLauncher");

        let dirs = LauncherDirs::at(root.clone()).unwrap();
        assert!(dirs.installs_dir.is_dir());
        assert_eq!(dirs.save_file, root.join("save.json"));

        // Idempotent
        LauncherDirs::at(root).unwrap();
    }
}
