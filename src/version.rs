//! Semantic version triple used for artifact names and release assets.

use std::fmt;
use std::str::FromStr;

use crate::error::LauncherError;

/// A `(major, minor, patch)` version.
///
/// Ordering is derived over the fields in declaration order, so versions
/// compare component-wise numerically: `2.10.0 > 2.9.0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

impl FromStr for Version {
    type Err = LauncherError;

    /// Parses `"<major>.<minor>.<patch>"`. Anything other than exactly
    /// three non-negative integer components is an error; no defaulting.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || LauncherError::VersionParse(s.to_string());

        let mut parts = s.split('.');
        let major = parts.next().ok_or_else(malformed)?;
        let minor = parts.next().ok_or_else(malformed)?;
        let patch = parts.next().ok_or_else(malformed)?;
        if parts.next().is_some() {
            return Err(malformed());
        }

        Ok(Self {
            major: major.parse().map_err(|_| malformed())?,
            minor: minor.parse().map_err(|_| malformed())?,
            patch: patch.parse().map_err(|_| malformed())?,
        })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for s in ["0.0.0", "2.5.3", "10.0.1", "1.22.333"] {
            let v: Version = s.parse().unwrap();
            assert_eq!(v.to_string(), s);
        }
    }

    #[test]
    fn test_parse_components() {
        let v: Version = "2.5.3".parse().unwrap();
        assert_eq!(v, Version::new(2, 5, 3));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!("2.5".parse::<Version>().is_err());
        assert!("2.5.3.1".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!("2.x.3".parse::<Version>().is_err());
        assert!("v2.5.3".parse::<Version>().is_err());
        assert!("2.-1.3".parse::<Version>().is_err());
    }

    #[test]
    fn test_ordering_is_numeric_not_lexical() {
        let newer: Version = "2.10.0".parse().unwrap();
        let older: Version = "2.9.0".parse().unwrap();
        assert!(newer > older);
    }

    #[test]
    fn test_ordering_major_then_minor_then_patch() {
        assert!(Version::new(3, 0, 0) > Version::new(2, 9, 9));
        assert!(Version::new(2, 1, 0) > Version::new(2, 0, 9));
        assert!(Version::new(2, 0, 2) > Version::new(2, 0, 1));
        assert_eq!(Version::new(2, 0, 1), Version::new(2, 0, 1));
    }
}
