//! Locating tagged lines in a buffered result file

// crate modules
use crate::error::{Error, Result};

/// Index of the first line starting with `tag`
///
/// Leading and trailing whitespace is ignored on every line.
///
/// ```rust
/// # use xtools_results::find_tag;
/// let lines = ["", "  Beam Parameters:", "Electron incident energy = 30.0 (keV)"];
/// assert_eq!(find_tag("Beam Parameters:", &lines).unwrap(), 1);
/// assert!(find_tag("Detector Parameters:", &lines).is_err());
/// ```
pub fn find_tag<S: AsRef<str>>(tag: &str, lines: &[S]) -> Result<usize> {
    lines
        .iter()
        .position(|line| line.as_ref().trim().starts_with(tag))
        .ok_or_else(|| Error::TagNotFound {
            tag: tag.to_string(),
        })
}

/// Indices of every line starting with `tag`
///
/// If `contains` is given, only lines that also contain that text are kept.
/// An empty list is not an error.
///
/// ```rust
/// # use xtools_results::find_all_tags;
/// let lines = ["Region 0 spectrum", "Region 0 number of elements = 2", "Region 1 spectrum"];
/// assert_eq!(find_all_tags("Region", &lines, None), vec![0, 1, 2]);
/// assert_eq!(find_all_tags("Region", &lines, Some("spectrum")), vec![0, 2]);
/// ```
pub fn find_all_tags<S: AsRef<str>>(tag: &str, lines: &[S], contains: Option<&str>) -> Vec<usize> {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.as_ref().trim();
            line.starts_with(tag) && contains.map_or(true, |text| line.contains(text))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_only() {
        let lines = ["a", "tag 1", "tag 2"];
        assert_eq!(find_tag("tag", &lines).unwrap(), 1);
    }

    #[test]
    fn missing_tag_is_named() {
        let lines: [&str; 0] = [];
        match find_tag("Electron Results:", &lines) {
            Err(Error::TagNotFound { tag }) => assert_eq!(tag, "Electron Results:"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
