//! Generic reader and writer for flat `Key=Value` decks

// standard library
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

// crate modules
use crate::error::{Error, Result};
use crate::field::{Field, Value};
use crate::header::{HeaderStyle, LineEnding};

// xtools modules
use xtools_schema::{Artifact, SchemaVersion, VERSION_KEY};
use xtools_utils::f;

// external crates
use log::{debug, info, trace, warn};

/// Common behaviour of every parameter deck
///
/// Implementors are plain structs with named, typed fields. The trait links
/// those fields to the master key table ([Deck::FIELDS]) so that reading and
/// writing can be driven entirely by the table.
///
/// Keys that only exist for some schema versions are `Option` fields on the
/// struct. A key applicable to the record's version but set to `None` makes
/// [Deck::write] fail with [Error::MissingField] rather than inventing a
/// value.
pub trait Deck: Default {
    /// Title line of the decorative header
    const TITLE: &'static str;

    /// Master key table, in the order keys are written
    const FIELDS: &'static [Field];

    /// Kind of file this deck is written to, if it is a simulation artifact
    const ARTIFACT: Option<Artifact>;

    /// Schema version of the record
    fn version(&self) -> SchemaVersion;

    /// Change the schema version used on the next write
    fn set_version(&mut self, version: SchemaVersion);

    /// Current value for a key, `None` if the record holds no value
    fn value(&self, key: &str) -> Option<Value>;

    /// Set the value for a key from the table
    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;

    /// Remove the value of a version gated key
    ///
    /// Keys present in every version always hold a value, so this is a no-op
    /// for them.
    fn clear_value(&mut self, key: &str);

    /// Defaults for a given schema version
    ///
    /// Every gated key that does not exist in `version` is cleared.
    fn new(version: SchemaVersion) -> Self {
        let mut deck = Self::default();
        deck.set_version(version);
        Self::FIELDS
            .iter()
            .filter(|field| !field.is_applicable(version))
            .for_each(|field| deck.clear_value(field.key));
        deck
    }

    /// Ordered table entries that exist for a schema version
    fn applicable_fields(version: SchemaVersion) -> Vec<&'static Field> {
        applicable_fields(Self::FIELDS, version)
    }

    /// Ordered keys that exist for a schema version
    fn applicable_keys(version: SchemaVersion) -> Vec<&'static str> {
        Self::applicable_fields(version)
            .into_iter()
            .map(|field| field.key)
            .collect()
    }

    /// Read a deck file
    fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        read(path)
    }

    /// Read a deck from lines already in memory
    fn from_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        read_lines(lines)
    }

    /// Write the deck to a file
    fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        write(self, path)
    }

    /// Write the deck to anything implementing [Write]
    fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        write_to(self, writer)
    }

    /// The exact file content that would be written
    fn to_text(&self) -> Result<String> {
        Ok(render(self)?.concat())
    }
}

/// Ordered table entries that exist for a schema version
pub fn applicable_fields(fields: &'static [Field], version: SchemaVersion) -> Vec<&'static Field> {
    fields
        .iter()
        .filter(|field| field.is_applicable(version))
        .collect()
}

/// Find the table entry for a line by prefix match, the longest key wins
fn match_field<'a>(fields: &'a [Field], line: &str) -> Option<&'a Field> {
    fields
        .iter()
        .filter(|field| line.starts_with(field.key))
        .max_by_key(|field| field.key.len())
}

/// Read a deck file of any kind
pub fn read<D: Deck, P: AsRef<Path>>(path: P) -> Result<D> {
    let path = path.as_ref();
    info!("Reading {:?}", path.file_name().unwrap_or(path.as_os_str()));
    let content = fs::read_to_string(path)?;
    let lines = content.lines().collect::<Vec<&str>>();
    read_lines(&lines)
}

/// Read a deck of any kind from buffered lines
///
/// Lines that do not start with a known key are ignored, which covers the
/// decorative header and any free text comments.
pub fn read_lines<D: Deck, S: AsRef<str>>(lines: &[S]) -> Result<D> {
    let version = SchemaVersion::read_from_lines(lines)?;
    let mut deck = D::new(version);

    debug!("--------------------------------");
    debug!(" Reading {}", D::TITLE);
    debug!("--------------------------------");

    for line in lines {
        let line = line.as_ref().trim();

        let Some(field) = match_field(D::FIELDS, line) else {
            trace!("Skipped {line:?}");
            continue;
        };

        let Some((_, raw)) = line.rsplit_once('=') else {
            warn!("Key {} found without a value: {line:?}", field.key);
            continue;
        };

        if !field.is_applicable(version) {
            warn!("Key {} is not expected for version {version}", field.key);
        }

        debug!("{:<32} = {}", field.key, raw.trim());
        let value = field.format.extract(field.key, raw)?;
        deck.set_value(field.key, value)?;
    }

    Ok(deck)
}

/// Write a deck of any kind to a file
pub fn write<D: Deck, P: AsRef<Path>>(deck: &D, path: P) -> Result<()> {
    // render first so that nothing is created for an incomplete record
    let lines = render(deck)?;
    let mut writer = BufWriter::new(File::create(path)?);
    for line in lines {
        writer.write_all(line.as_bytes())?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a deck of any kind to anything implementing [Write]
pub fn write_to<D: Deck, W: Write>(deck: &D, writer: &mut W) -> Result<()> {
    for line in render(deck)? {
        writer.write_all(line.as_bytes())?;
    }
    Ok(())
}

/// Every line of the deck, terminated by the version pinned line ending
fn render<D: Deck>(deck: &D) -> Result<Vec<String>> {
    let version = deck.version();

    if let Some(artifact) = D::ARTIFACT {
        if !artifact.gate().admits(version) {
            return Err(Error::ArtifactNotAvailable { artifact, version });
        }
    }

    let eol = LineEnding::for_version(version).as_str();
    let mut lines = HeaderStyle::for_version(version).lines(D::TITLE);
    lines.push(f!("{VERSION_KEY}={version}"));

    for field in D::applicable_fields(version) {
        let value = deck.value(field.key).ok_or_else(|| Error::MissingField {
            key: field.key.to_string(),
        })?;
        lines.push(f!("{}={}", field.key, field.format.format(field.key, &value)?));
    }

    Ok(lines.into_iter().map(|line| line + eol).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Format;

    const FIELDS: [Field; 3] = [
        Field::always("BeamPosition", Format::Integer),
        Field::always("BeamPositionX", Format::Integer),
        Field::always("Beam", Format::Integer),
    ];

    #[test]
    fn longest_prefix_wins() {
        let field = match_field(&FIELDS, "BeamPositionX=1").unwrap();
        assert_eq!(field.key, "BeamPositionX");
        let field = match_field(&FIELDS, "BeamPosition=1").unwrap();
        assert_eq!(field.key, "BeamPosition");
        let field = match_field(&FIELDS, "BeamOther=1").unwrap();
        assert_eq!(field.key, "Beam");
        assert!(match_field(&FIELDS, "*** Beam").is_none());
    }
}
