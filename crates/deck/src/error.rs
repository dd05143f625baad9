//! Result and Error types for the deck module

use crate::model::ModelFamily;
use xtools_schema::{Artifact, SchemaVersion};

/// Type alias for `Result<T, deck::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `xtools-deck`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Errors from reading the schema version
    #[error("failed to read schema version")]
    Schema(#[from] xtools_schema::Error),

    /// A matched key whose value can not be converted to the expected type
    #[error("failed to parse \"{raw_value}\" for {field}")]
    ParseError { field: String, raw_value: String },

    /// Model code that is not part of the family
    #[error("no {family:?} model with code {code}")]
    UnknownModelCode { family: ModelFamily, code: u32 },

    /// Free text that does not contain any display name of the family
    #[error("no {family:?} model matches \"{text}\"")]
    UnknownModelName { family: ModelFamily, text: String },

    /// Applicable key with no value in the record at write time
    #[error("no value for required key {key}")]
    MissingField { key: String },

    /// Value of the wrong kind for a key, always a programming error
    #[error("value of the wrong kind for key {key}")]
    ValueKindMismatch { key: String },

    /// Key that is not part of the deck, always a programming error
    #[error("unknown key {key}")]
    UnknownKey { key: String },

    /// Deck written for a schema that does not have this kind of file
    #[error("{artifact} files do not exist for version {version}")]
    ArtifactNotAvailable {
        artifact: Artifact,
        version: SchemaVersion,
    },
}
