//! Decorative deck headers and line endings

// xtools modules
use xtools_schema::{SchemaVersion, VERSION_1_2_0, VERSION_1_4_0};
use xtools_utils::f;

const BANNER: &str =
    "********************************************************************************";

/// One of the three header layouts the simulator has used over time
///
/// | Style        | Versions                  |
/// | ------------ | ------------------------- |
/// | `Legacy`     | `< 1.2.0`                 |
/// | `Standard`   | `>= 1.2.0` and `< 1.4.0`  |
/// | `Documented` | `>= 1.4.0`                |
///
/// For a microscope deck written with schema 1.4.1 this is:
///
/// ```text
/// ********************************************************************************
/// ***
/// *** MICROSCOPE PARAMETERS
/// ***
/// *** Version: schema version of the format below
/// *** Key=Value: one parameter per line, units as documented for each key
/// ***
/// ********************************************************************************
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// Title only, used before the schema was documented
    Legacy,
    /// Title padded by blank comment lines
    Standard,
    /// Title followed by a short description of the layout
    Documented,
}

impl HeaderStyle {
    /// Header style used by a schema version
    pub fn for_version(version: SchemaVersion) -> Self {
        if version < VERSION_1_2_0 {
            HeaderStyle::Legacy
        } else if version < VERSION_1_4_0 {
            HeaderStyle::Standard
        } else {
            HeaderStyle::Documented
        }
    }

    /// Header lines for a deck title, without line endings
    pub fn lines(&self, title: &str) -> Vec<String> {
        let mut lines = vec![BANNER.to_string()];
        match self {
            HeaderStyle::Legacy => {
                lines.push(f!("*** {title}"));
            }
            HeaderStyle::Standard => {
                lines.push("***".to_string());
                lines.push(f!("*** {title}"));
                lines.push("***".to_string());
            }
            HeaderStyle::Documented => {
                lines.push("***".to_string());
                lines.push(f!("*** {title}"));
                lines.push("***".to_string());
                lines.push("*** Version: schema version of the format below".to_string());
                lines.push(
                    "*** Key=Value: one parameter per line, units as documented for each key"
                        .to_string(),
                );
                lines.push("***".to_string());
            }
        }
        lines.push(BANNER.to_string());
        lines
    }
}

/// Line terminator used when writing a deck
///
/// Decks from schemas before 1.4.0 were always produced on Windows, so the
/// simulator expects `\r\n` for those. Either ending is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    /// `\n`
    Lf,
    /// `\r\n`
    CrLf,
}

impl LineEnding {
    /// Line ending pinned to a schema version
    pub fn for_version(version: SchemaVersion) -> Self {
        match version < VERSION_1_4_0 {
            true => LineEnding::CrLf,
            false => LineEnding::Lf,
        }
    }

    /// Terminator as a string slice
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::{VERSION_1_1_1, VERSION_1_2_5, VERSION_1_5_2};

    #[test]
    fn three_variants() {
        assert_eq!(HeaderStyle::for_version(VERSION_1_1_1), HeaderStyle::Legacy);
        assert_eq!(HeaderStyle::for_version(VERSION_1_2_0), HeaderStyle::Standard);
        assert_eq!(HeaderStyle::for_version(VERSION_1_2_5), HeaderStyle::Standard);
        assert_eq!(HeaderStyle::for_version(VERSION_1_4_0), HeaderStyle::Documented);
        assert_eq!(HeaderStyle::for_version(VERSION_1_5_2), HeaderStyle::Documented);
    }

    #[test]
    fn header_lengths() {
        assert_eq!(HeaderStyle::Legacy.lines("T").len(), 3);
        assert_eq!(HeaderStyle::Standard.lines("T").len(), 5);
        assert_eq!(HeaderStyle::Documented.lines("T").len(), 8);
        assert_eq!(BANNER.len(), 80);
    }

    #[test]
    fn pinned_line_endings() {
        assert_eq!(LineEnding::for_version(VERSION_1_2_5).as_str(), "\r\n");
        assert_eq!(LineEnding::for_version(VERSION_1_4_0).as_str(), "\n");
    }
}
