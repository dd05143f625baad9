//! Result and Error types for the schema module

/// Type alias for `Result<T, schema::Error>`
pub type Result<T> = core::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
/// The error type for `xtools-schema`
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Version text that does not split into three integers
    #[error("malformed schema version \"{0}\"")]
    MalformedVersion(String),
}
