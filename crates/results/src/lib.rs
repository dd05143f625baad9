//! Reading of the text dump written at the end of a simulation
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod beam;
mod cursor;
mod detector;
mod eds;
mod electron;
mod error;
mod models;
mod navigator;
mod parsers;
mod phirhoz;
mod simulation;
mod spectra;
mod table;

pub mod tags;

// Inline the reader and convenience functions for a nice public API
#[doc(inline)]
pub use simulation::{
    read_results, read_simulation, results_file, ResultsReader, SimulationResults,
    RESULTS_EXTENSION,
};

#[doc(inline)]
pub use navigator::{find_all_tags, find_tag};

#[doc(inline)]
pub use cursor::{LineCursor, ResultSection, Skipped};

#[doc(inline)]
pub use table::{Table, TableRow};

// Every section of the file
#[doc(inline)]
pub use beam::BeamParameters;

#[doc(inline)]
pub use detector::DetectorParameters;

#[doc(inline)]
pub use electron::ElectronStatistics;

#[doc(inline)]
pub use spectra::{RegionSpectra, Spectra};

#[doc(inline)]
pub use phirhoz::{Phirhoz, PhirhozElement, PhirhozRegion, PhirhozResults, Shell, WindowIntensity};

#[doc(inline)]
pub use eds::{PartialSpectraReference, PeakIntensity, ReferencePeak, RegionEds, SpectraEds};

#[doc(inline)]
pub use error::{Error, Result};
