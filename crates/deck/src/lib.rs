//! Reading and writing of the simulator parameter decks
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod codec;
mod error;
mod field;
mod header;
mod inputs;
mod microscope;
mod model;
mod models;
mod results;
mod simulation;

// Inline the generic codec for a nice public API
#[doc(inline)]
pub use codec::{read, read_lines, write, write_to, Deck};

#[doc(inline)]
pub use field::{Field, Format, Value};

#[doc(inline)]
pub use header::{HeaderStyle, LineEnding};

#[doc(inline)]
pub use model::{ModelChoice, ModelFamily};

// Every deck kind
#[doc(inline)]
pub use inputs::{SimulationInputs, SIM_EXTENSION};

#[doc(inline)]
pub use microscope::Microscope;

#[doc(inline)]
pub use models::Models;

#[doc(inline)]
pub use results::ResultsParameters;

#[doc(inline)]
pub use simulation::{SimulationParameters, DEFAULT_RESULTS_DIRECTORY};

#[doc(inline)]
pub use error::{Error, Result};
