//! Result and Error types for the results module

/// Type alias for `Result<T, results::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `xtools-results`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Errors from reading the schema version
    #[error("failed to read schema version")]
    Schema(#[from] xtools_schema::Error),

    /// Errors from the parameter decks, including unknown model names
    #[error("failed deck operation")]
    Deck(#[from] xtools_deck::Error),

    /// Required tag missing from the remaining lines
    #[error("could not find \"{tag}\"")]
    TagNotFound { tag: String },

    /// A labelled value that can not be converted to the expected type
    #[error("failed to parse \"{raw_value}\" for {field}")]
    ParseError { field: String, raw_value: String },

    /// Section of the file that can not be read yet
    #[error("reading \"{0}\" is not implemented")]
    NotImplemented(String),

    /// Series or count that does not match what was announced
    #[error("expected {expected} values, found {found}")]
    UnexpectedLength { expected: usize, found: usize },

    /// Ran out of lines in the middle of a section
    #[error("unexpected end of lines")]
    UnexpectedEndOfLines,

    /// Raw nom crate errors
    #[error("parser failed: {0}")]
    Nom(String),

    /// Failure reading or writing CSV tables
    #[error("failed CSV operation")]
    Csv(#[from] csv::Error),

    /// Failure to serialise to a JSON string
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Self::Nom(format!("{err:?}"))
    }
}
