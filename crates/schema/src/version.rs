// standard library
use std::fs;
use std::path::Path;
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};

// external crates
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Key used for the version line of every file, i.e. `Version=1.4.1`
pub const VERSION_KEY: &str = "Version";

/// First released schema, also assumed for files with no version line
pub const VERSION_1_1_1: SchemaVersion = SchemaVersion::new(1, 1, 1);
/// Schema 1.2.0
pub const VERSION_1_2_0: SchemaVersion = SchemaVersion::new(1, 2, 0);
/// Schema 1.2.1
pub const VERSION_1_2_1: SchemaVersion = SchemaVersion::new(1, 2, 1);
/// Schema 1.2.2
pub const VERSION_1_2_2: SchemaVersion = SchemaVersion::new(1, 2, 2);
/// Schema 1.2.3
pub const VERSION_1_2_3: SchemaVersion = SchemaVersion::new(1, 2, 3);
/// Schema 1.2.4
pub const VERSION_1_2_4: SchemaVersion = SchemaVersion::new(1, 2, 4);
/// Schema 1.2.5
pub const VERSION_1_2_5: SchemaVersion = SchemaVersion::new(1, 2, 5);
/// Schema 1.4.0
pub const VERSION_1_4_0: SchemaVersion = SchemaVersion::new(1, 4, 0);
/// Schema 1.4.1
pub const VERSION_1_4_1: SchemaVersion = SchemaVersion::new(1, 4, 1);
/// Schema 1.4.2
pub const VERSION_1_4_2: SchemaVersion = SchemaVersion::new(1, 4, 2);
/// Schema 1.4.3
pub const VERSION_1_4_3: SchemaVersion = SchemaVersion::new(1, 4, 3);
/// Schema 1.4.4
pub const VERSION_1_4_4: SchemaVersion = SchemaVersion::new(1, 4, 4);
/// Schema 1.5.0
pub const VERSION_1_5_0: SchemaVersion = SchemaVersion::new(1, 5, 0);
/// Schema 1.5.1
pub const VERSION_1_5_1: SchemaVersion = SchemaVersion::new(1, 5, 1);
/// Schema 1.5.2
pub const VERSION_1_5_2: SchemaVersion = SchemaVersion::new(1, 5, 2);

/// Version assumed for files written before the version line existed
pub const LEGACY_VERSION: SchemaVersion = VERSION_1_1_1;

/// Most recent schema, used for newly created records
pub const CURRENT_VERSION: SchemaVersion = VERSION_1_5_2;

/// Every released schema in ascending order
pub const ALL_VERSIONS: [SchemaVersion; 15] = [
    VERSION_1_1_1,
    VERSION_1_2_0,
    VERSION_1_2_1,
    VERSION_1_2_2,
    VERSION_1_2_3,
    VERSION_1_2_4,
    VERSION_1_2_5,
    VERSION_1_4_0,
    VERSION_1_4_1,
    VERSION_1_4_2,
    VERSION_1_4_3,
    VERSION_1_4_4,
    VERSION_1_5_0,
    VERSION_1_5_1,
    VERSION_1_5_2,
];

/// Schema version of a deck or result file
///
/// Ordering is lexicographic over `major`, `minor`, then `revision`, which is
/// exactly what the derived [Ord] does given the field order.
///
/// ```rust
/// # use xtools_schema::{SchemaVersion, VERSION_1_2_5, VERSION_1_4_0};
/// let version: SchemaVersion = "1.4.1".parse().unwrap();
///
/// assert!(version > VERSION_1_4_0);
/// assert!(VERSION_1_2_5 < VERSION_1_4_0);
/// assert_eq!(version.to_string(), "1.4.1");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct SchemaVersion {
    /// Major version number
    pub major: u32,
    /// Minor version number
    pub minor: u32,
    /// Revision number
    pub revision: u32,
}

impl SchemaVersion {
    /// Create a version from its three components
    pub const fn new(major: u32, minor: u32, revision: u32) -> Self {
        Self {
            major,
            minor,
            revision,
        }
    }

    /// Parse version text such as `1.4.1`
    ///
    /// Fewer than three components is an error, while any extra components
    /// are ignored.
    ///
    /// ```rust
    /// # use xtools_schema::SchemaVersion;
    /// assert_eq!(SchemaVersion::parse("1.2.5").unwrap(), SchemaVersion::new(1, 2, 5));
    /// assert_eq!(SchemaVersion::parse("1.2.5.9").unwrap(), SchemaVersion::new(1, 2, 5));
    /// assert!(SchemaVersion::parse("1.2").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let malformed = || Error::MalformedVersion(text.to_string());

        let components = text
            .trim()
            .split('.')
            .take(3)
            .map(|item| {
                let item = item.trim();
                // digits only, `u32` would also take a leading sign
                match item.starts_with(|c: char| c.is_ascii_digit()) {
                    true => item.parse::<u32>().ok(),
                    false => None,
                }
            })
            .collect::<Option<Vec<u32>>>()
            .ok_or_else(malformed)?;

        match components[..] {
            [major, minor, revision] => Ok(Self::new(major, minor, revision)),
            _ => Err(malformed()),
        }
    }

    /// Read the schema version of any deck or result file
    ///
    /// Every line is checked for the `Version` key, and the first one found
    /// is parsed. Files with no version line at all were written before the
    /// schema was versioned and are assumed to be [LEGACY_VERSION].
    pub fn read_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let lines = content.lines().collect::<Vec<&str>>();
        Self::read_from_lines(&lines)
    }

    /// Find the schema version in an already buffered file
    pub fn read_from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let line = lines
            .iter()
            .map(|line| line.as_ref().trim())
            .find(|line| line.starts_with(VERSION_KEY));

        match line {
            Some(line) => {
                let value = line.rsplit('=').next().unwrap_or_default();
                let version = Self::parse(value)?;
                debug!("Version     = {version}");
                Ok(version)
            }
            None => {
                warn!("No version line found, assuming {LEGACY_VERSION}");
                Ok(LEGACY_VERSION)
            }
        }
    }

    /// True for any schema written before the version line existed
    pub fn is_legacy(&self) -> bool {
        *self == LEGACY_VERSION
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        CURRENT_VERSION
    }
}

impl FromStr for SchemaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_text() {
        assert!(SchemaVersion::parse("").is_err());
        assert!(SchemaVersion::parse("1").is_err());
        assert!(SchemaVersion::parse("1.a.2").is_err());
        assert!(SchemaVersion::parse("1..2").is_err());
        assert!(SchemaVersion::parse("-1.2.3").is_err());
    }

    #[test]
    fn signed_components() {
        assert!(SchemaVersion::parse("+1.2.3").is_err());
        assert!(SchemaVersion::parse("1.+2.3").is_err());
        assert!(SchemaVersion::parse("1.2. +3").is_err());
        assert_eq!(SchemaVersion::parse("1.2. 3").unwrap(), VERSION_1_2_3);
    }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(SchemaVersion::parse(" 1.4.4\r").unwrap(), VERSION_1_4_4);
    }

    #[test]
    fn version_line_anywhere() {
        let lines = ["*** header", "", "Version=1.2.3", "BeamEnergy=5.0"];
        assert_eq!(SchemaVersion::read_from_lines(&lines).unwrap(), VERSION_1_2_3);

        let lines = ["*** header", "BeamEnergy=5.0"];
        assert_eq!(SchemaVersion::read_from_lines(&lines).unwrap(), LEGACY_VERSION);
    }

    #[test]
    fn first_version_line_wins() {
        let lines = ["Version=1.4.0", "Version=1.5.2"];
        assert_eq!(SchemaVersion::read_from_lines(&lines).unwrap(), VERSION_1_4_0);
    }

    #[test]
    fn malformed_version_line_is_fatal() {
        let lines = ["Version=1.4"];
        assert!(SchemaVersion::read_from_lines(&lines).is_err());
    }

    #[test]
    fn constants_are_sorted() {
        assert!(ALL_VERSIONS.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(ALL_VERSIONS[0], LEGACY_VERSION);
        assert_eq!(ALL_VERSIONS[14], CURRENT_VERSION);
    }
}
