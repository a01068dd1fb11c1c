//! Persisted window geometry.
//!
//! `save.json` holds the last geometry PolyDraw reported on shutdown. It is
//! loaded once at launcher startup and replaced wholesale when a session
//! finalizes. A missing or malformed file just means first-launch defaults:
//! no geometry arguments are passed to the child.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LauncherError;

/// Last-known window placement and shape of the PolyDraw window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeometryRecord {
    pub posx: i32,
    pub posy: i32,
    pub width: i32,
    pub height: i32,
    pub sides: i32,
}

impl GeometryRecord {
    /// Parses the child's final stdout line: exactly five
    /// whitespace-separated integers `posx posy width height sides`.
    pub fn parse_report_line(line: &str) -> Result<Self, LauncherError> {
        let malformed = || LauncherError::MalformedReport(line.to_string());

        let fields: Vec<i32> = line
            .split_whitespace()
            .map(|tok| tok.parse().map_err(|_| malformed()))
            .collect::<Result<_, _>>()?;

        match fields[..] {
            [posx, posy, width, height, sides] => Ok(Self {
                posx,
                posy,
                width,
                height,
                sides,
            }),
            _ => Err(malformed()),
        }
    }
}

/// Loads the saved geometry, treating a missing or malformed file as
/// "no saved state".
pub fn load(path: &Path) -> Option<GeometryRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Ignoring malformed save file {}: {}", path.display(), e);
            None
        }
    }
}

/// Overwrites the save file with a new geometry record.
pub fn store(path: &Path, record: &GeometryRecord) -> io::Result<()> {
    let content = serde_json::to_string_pretty(record)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_report_line() {
        let record = GeometryRecord::parse_report_line("10 20 800 600 6").unwrap();
        assert_eq!(
            record,
            GeometryRecord {
                posx: 10,
                posy: 20,
                width: 800,
                height: 600,
                sides: 6,
            }
        );
    }

    #[test]
    fn test_parse_report_line_negative_position() {
        // Windows can sit partially off-screen
        let record = GeometryRecord::parse_report_line("-5 -12 640 480 3").unwrap();
        assert_eq!(record.posx, -5);
        assert_eq!(record.posy, -12);
    }

    #[test]
    fn test_parse_report_line_wrong_count() {
        assert!(matches!(
            GeometryRecord::parse_report_line("10 20 800"),
            Err(LauncherError::MalformedReport(_))
        ));
        assert!(matches!(
            GeometryRecord::parse_report_line("10 20 800 600 6 7"),
            Err(LauncherError::MalformedReport(_))
        ));
    }

    #[test]
    fn test_parse_report_line_non_integer() {
        assert!(GeometryRecord::parse_report_line("10 20 eight 600 6").is_err());
        assert!(GeometryRecord::parse_report_line("").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load(&dir.path().join("save.json")), None);
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        fs::write(&path, "{\"posx\": \"not an int\"}").unwrap();
        assert_eq!(load(&path), None);
    }

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("save.json");
        let record = GeometryRecord {
            posx: 10,
            posy: 20,
            width: 800,
            height: 600,
            sides: 6,
        };

        store(&path, &record).unwrap();
        assert_eq!(load(&path), Some(record));

        // Store replaces the record wholesale
        let replacement = GeometryRecord { sides: 9, ..record };
        store(&path, &replacement).unwrap();
        assert_eq!(load(&path), Some(replacement));
    }
}
