//! Schema versions and naming conventions for simulator files
//!
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod artifact;
mod error;
mod gate;
mod version;

// Inline anything important for a nice public API
#[doc(inline)]
pub use version::*;

#[doc(inline)]
pub use gate::Gate;

#[doc(inline)]
pub use artifact::Artifact;

#[doc(inline)]
pub use error::{Error, Result};
