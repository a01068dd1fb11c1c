//! Launcher error taxonomy.
//!
//! Whether an error is fatal depends on where it surfaces: everything is
//! fatal on the bootstrap and session paths, while the background freshness
//! check catches all of these at its boundary and reports them
//! informationally.

use std::path::PathBuf;

use thiserror::Error;

use crate::version::Version;

#[derive(Debug, Error)]
pub enum LauncherError {
    /// A version string was not exactly three non-negative integers.
    #[error("malformed version string '{0}'")]
    VersionParse(String),

    /// No installed build matches the supported major version.
    #[error("no usable build with major version {major} in {}", .dir.display())]
    NoUsableBuild { major: u32, dir: PathBuf },

    /// Release lookup or download failed.
    #[error("network error: {0}")]
    Network(String),

    /// The latest remote release targets a different major version line.
    #[error("latest release v{remote} targets major version {}, this launcher supports major {supported}", .remote.major)]
    IncompatibleMajor { remote: Version, supported: u32 },

    /// The child exited with a nonzero code (or was killed by a signal,
    /// in which case there is no code to report).
    #[error("{app} exited abnormally ({})", exit_desc(.code))]
    ChildAbnormalExit { app: &'static str, code: Option<i32> },

    /// The child's final stdout line was not five whitespace-separated
    /// integers.
    #[error("malformed geometry report '{0}'")]
    MalformedReport(String),

    /// The child exited cleanly but never printed a geometry report.
    #[error("{0} exited without reporting its window geometry")]
    MissingReport(&'static str),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn exit_desc(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("code {code}"),
        None => "killed by signal".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abnormal_exit_messages() {
        let with_code = LauncherError::ChildAbnormalExit {
            app: "PolyDraw",
            code: Some(3),
        };
        assert_eq!(with_code.to_string(), "PolyDraw exited abnormally (code 3)");

        let signalled = LauncherError::ChildAbnormalExit {
            app: "PolyDraw",
            code: None,
        };
        assert_eq!(
            signalled.to_string(),
            "PolyDraw exited abnormally (killed by signal)"
        );
    }

    #[test]
    fn test_incompatible_major_message_names_both_majors() {
        let err = LauncherError::IncompatibleMajor {
            remote: Version::new(3, 0, 0),
            supported: 2,
        };
        let message = err.to_string();
        assert!(message.contains("3.0.0"));
        assert!(message.contains("major 2"));
    }
}

