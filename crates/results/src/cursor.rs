//! Forward-only cursor over the lines of a result file

// standard library
use std::str::FromStr;

// crate modules
use crate::error::{Error, Result};
use crate::navigator::find_tag;
use crate::parsers::{indexed, is_value, labelled_value, row_of_f64};

// xtools modules
use xtools_schema::SchemaVersion;
use xtools_utils::f;

// external crates
use log::trace;
use serde::{Deserialize, Serialize};

/// A tagged block of a result file that can be read in isolation
///
/// Implementors are handed the remaining lines of the file, starting at or
/// before their tag, and report how many lines they consumed. Sections never
/// look back, so the caller simply advances by that count.
pub trait ResultSection: Sized {
    /// Read the section, returning it with the number of lines consumed
    fn read_from_lines<S: AsRef<str>>(lines: &[S], version: SchemaVersion)
        -> Result<(Self, usize)>;
}

/// Sub-block of a result file that is consumed but not interpreted
///
/// Holds the number of lines skipped, including the block title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Skipped(pub usize);

/// Position in a list of lines, only ever moving forward
///
/// Every accessor trims the line it returns, so indentation in the file does
/// not matter. Blank lines are skipped wherever a tag or a labelled value is
/// expected.
///
/// ```rust
/// # use xtools_results::{LineCursor, tags};
/// # use xtools_schema::VERSION_1_4_1;
/// let lines = ["", "Simulated Spectra:", "Number of regions = 2"];
/// let mut cursor = LineCursor::new(&lines, VERSION_1_4_1);
///
/// assert!(cursor.peek_tag(tags::SPECTRA));
/// cursor.expect_tag(tags::SPECTRA).unwrap();
/// assert_eq!(cursor.count(tags::NUMBER_OF_REGIONS).unwrap(), 2);
/// assert_eq!(cursor.position(), 3);
/// ```
#[derive(Debug)]
pub struct LineCursor<'a, S> {
    lines: &'a [S],
    position: usize,
    version: SchemaVersion,
}

impl<'a, S: AsRef<str>> LineCursor<'a, S> {
    /// Start at the first line
    pub fn new(lines: &'a [S], version: SchemaVersion) -> Self {
        Self {
            lines,
            position: 0,
            version,
        }
    }

    /// Schema version the lines were written with
    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    /// Number of lines consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Lines that have not been consumed yet
    pub fn remaining(&self) -> &'a [S] {
        &self.lines[self.position..]
    }

    /// Lines that have already been consumed
    pub fn consumed(&self) -> &'a [S] {
        &self.lines[..self.position]
    }

    /// Capacity for `n` announced repetitions, never more than the lines left
    ///
    /// Counts come from the file, so they are only trusted as far as there
    /// are lines to back them.
    pub fn capacity(&self, n: usize) -> usize {
        n.min(self.remaining().len())
    }

    /// Check if every line has been consumed
    pub fn is_finished(&self) -> bool {
        self.position >= self.lines.len()
    }

    /// Next line, trimmed, without consuming it
    pub fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.position).map(|line| line.as_ref().trim())
    }

    /// Consume the next line, trimmed
    pub fn next_line(&mut self) -> Result<&'a str> {
        let line = self.peek().ok_or(Error::UnexpectedEndOfLines)?;
        self.position += 1;
        trace!("{:>6}: {line}", self.position);
        Ok(line)
    }

    /// Consume `n` lines without looking at them
    pub fn advance(&mut self, n: usize) -> Result<()> {
        if self.position + n > self.lines.len() {
            return Err(Error::UnexpectedEndOfLines);
        }
        self.position += n;
        Ok(())
    }

    /// Consume any blank lines
    pub fn skip_blank_lines(&mut self) {
        while self.peek().is_some_and(str::is_empty) {
            self.position += 1;
        }
    }

    /// Next non-blank line, trimmed, without consuming anything
    fn peek_non_blank(&self) -> Option<&'a str> {
        self.remaining()
            .iter()
            .map(|line| line.as_ref().trim())
            .find(|line| !line.is_empty())
    }

    /// Check if the next non-blank line starts with `tag`, consuming nothing
    pub fn peek_tag(&self, tag: &str) -> bool {
        self.peek_non_blank()
            .is_some_and(|line| line.starts_with(tag))
    }

    /// Check that the next non-blank line is repetition `index` of `word`
    ///
    /// Repeated blocks are titled `word i`, numbered from zero in file order.
    /// Nothing is consumed, and a missing or out of order repetition fails
    /// with [Error::TagNotFound] for the title that was expected.
    pub fn expect_index(&self, word: &str, index: usize) -> Result<()> {
        match self.peek_non_blank().map(|line| indexed(word, line)) {
            Some(Ok((_, found))) if found == index => Ok(()),
            _ => Err(Error::TagNotFound {
                tag: f!("{word} {index}"),
            }),
        }
    }

    /// Consume the next non-blank line, which must start with `tag`
    pub fn expect_tag(&mut self, tag: &str) -> Result<&'a str> {
        self.skip_blank_lines();
        match self.peek() {
            Some(line) if line.starts_with(tag) => self.next_line(),
            _ => Err(Error::TagNotFound {
                tag: tag.to_string(),
            }),
        }
    }

    /// Move forward to the next line starting with `tag`, without consuming it
    pub fn seek(&mut self, tag: &str) -> Result<()> {
        let offset = find_tag(tag, self.remaining())?;
        self.position += offset;
        Ok(())
    }

    /// Read a nested section and move past it
    pub fn read<T: ResultSection>(&mut self) -> Result<T> {
        let (section, consumed) = T::read_from_lines(self.remaining(), self.version)?;
        self.advance(consumed)?;
        Ok(section)
    }

    /// Raw text of a `Label = value (unit)` line
    pub fn raw_field(&mut self, label: &str) -> Result<&'a str> {
        self.skip_blank_lines();
        let line = self.next_line()?;
        match labelled_value(line) {
            Ok((_, (found, value))) if found == label => Ok(value),
            _ => Err(Error::TagNotFound {
                tag: label.to_string(),
            }),
        }
    }

    /// Value of a `Label = value (unit)` line, converted to `T`
    pub fn field<T: FromStr>(&mut self, label: &str) -> Result<T> {
        let raw = self.raw_field(label)?;
        let value = raw.parse::<T>().map_err(|_| Error::ParseError {
            field: label.to_string(),
            raw_value: raw.to_string(),
        })?;
        trace!("{label} = {raw}");
        Ok(value)
    }

    /// Count prefix of a repeated block, e.g. `Number of regions = 2`
    pub fn count(&mut self, label: &str) -> Result<usize> {
        self.field::<usize>(label)
    }

    /// Value of a `Label is value` line
    pub fn named(&mut self, label: &str) -> Result<String> {
        self.skip_blank_lines();
        let line = self.next_line()?;
        match is_value(line) {
            Ok((_, (found, value))) if found == label => Ok(value.to_string()),
            _ => Err(Error::TagNotFound {
                tag: label.to_string(),
            }),
        }
    }

    /// A line made only of numbers
    pub fn values(&mut self, field: &str) -> Result<Vec<f64>> {
        let line = self.next_line()?;
        row_of_f64(line).ok_or_else(|| Error::ParseError {
            field: field.to_string(),
            raw_value: line.to_string(),
        })
    }

    /// Consume a titled block up to and including the next blank line
    pub fn skip_block(&mut self, tag: &str) -> Result<Skipped> {
        let start = self.position;
        self.expect_tag(tag)?;
        while let Some(line) = self.peek() {
            self.position += 1;
            if line.is_empty() {
                break;
            }
        }
        Ok(Skipped(self.position - start))
    }
}
