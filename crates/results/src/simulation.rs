// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

// crate modules
use crate::beam::BeamParameters;
use crate::cursor::{LineCursor, ResultSection};
use crate::detector::DetectorParameters;
use crate::eds::SpectraEds;
use crate::electron::ElectronStatistics;
use crate::error::{Error, Result};
use crate::navigator::find_tag;
use crate::phirhoz::PhirhozResults;
use crate::spectra::Spectra;
use crate::tags;

// xtools modules
use xtools_deck::{Models, SimulationParameters};
use xtools_schema::{SchemaVersion, VERSION_1_5_0};

// external crates
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Extension of the text dump written at the end of a simulation
pub const RESULTS_EXTENSION: &str = "txt";

/// Everything read from a simulation result file
///
/// The beam, detector, electron and model sections are always present. The
/// spectra and phi-rho-z sections depend on what the simulation was asked to
/// compute, and the EDS spectra only exist from schema 1.5.0. Sections that
/// were skipped by the [ResultsReader] are also `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResults {
    /// Schema version of the file
    pub version: SchemaVersion,
    /// Electron beam
    pub beam: BeamParameters,
    /// EDS detector
    pub detector: DetectorParameters,
    /// Electron counts and coefficients
    pub electrons: ElectronStatistics,
    /// Physical models used
    pub models: Models,
    /// Simulated spectra, if computed
    pub spectra: Option<Spectra>,
    /// Phi-rho-z distributions, if computed
    pub phirhoz: Option<PhirhozResults>,
    /// Detector spectra, if computed
    pub eds: Option<SpectraEds>,
}

impl SimulationResults {
    /// Write the results to a JSON file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Read results back from a JSON file written by [write_json()](Self::write_json)
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Reader for the text dump of a simulation
///
/// The whole file is buffered and the schema version is found first. Each
/// section is then located by its tag, starting where the previous one ended.
///
/// ```rust, no_run
/// # use xtools_results::ResultsReader;
/// let mut reader = ResultsReader::new();
/// reader.skip_phirhoz();
/// let results = reader.parse("path/to/Simulation.txt").unwrap();
/// assert!(results.phirhoz.is_none());
/// ```
#[derive(Debug, Default)]
pub struct ResultsReader {
    skip_spectra: bool,
    skip_phirhoz: bool,
    skip_eds: bool,
}

impl ResultsReader {
    /// Reader with every section enabled
    pub fn new() -> Self {
        Default::default()
    }

    /// Do not read the simulated spectra
    pub fn skip_spectra(&mut self) {
        self.skip_spectra = true;
    }

    /// Do not read the phi-rho-z distributions
    pub fn skip_phirhoz(&mut self) {
        self.skip_phirhoz = true;
    }

    /// Do not read the EDS spectra
    pub fn skip_eds(&mut self) {
        self.skip_eds = true;
    }

    /// Read a result file
    pub fn parse<P: AsRef<Path>>(&self, path: P) -> Result<SimulationResults> {
        let path = path.as_ref();
        info!("Reading {:?}", path.file_name().unwrap_or(path.as_os_str()));
        let content = std::fs::read_to_string(path)?;
        let lines = content.lines().collect::<Vec<&str>>();
        self.read_lines(&lines)
    }

    /// Read results from an already buffered file
    ///
    /// Sections are read in file order by a single cursor. Each one is looked
    /// for after the end of the previous one, so a section found out of order
    /// fails with [Error::TagNotFound].
    pub fn read_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<SimulationResults> {
        let version = SchemaVersion::read_from_lines(lines)?;
        let mut cursor = LineCursor::new(lines, version);

        let beam = required::<BeamParameters, S>(&mut cursor, tags::BEAM)?;
        let detector = required::<DetectorParameters, S>(&mut cursor, tags::DETECTOR)?;
        let electrons = required::<ElectronStatistics, S>(&mut cursor, tags::ELECTRON)?;
        let models = required::<Models, S>(&mut cursor, tags::MODELS)?;

        let spectra = match self.skip_spectra {
            true => None,
            false => optional::<Spectra, S>(&mut cursor, tags::SPECTRA)?,
        };

        let phirhoz = match self.skip_phirhoz {
            true => None,
            false => optional::<PhirhozResults, S>(&mut cursor, tags::PHIRHOZ)?,
        };

        let eds = match self.skip_eds || version < VERSION_1_5_0 {
            true => None,
            false => optional::<SpectraEds, S>(&mut cursor, tags::EDS)?,
        };
        debug!("{} of {} lines read", cursor.position(), lines.len());

        Ok(SimulationResults {
            version,
            beam,
            detector,
            electrons,
            models,
            spectra,
            phirhoz,
            eds,
        })
    }
}

/// Section that every result file has
fn required<T: ResultSection, S: AsRef<str>>(cursor: &mut LineCursor<S>, tag: &str) -> Result<T> {
    cursor.seek(tag)?;
    cursor.read::<T>()
}

/// Section that is only written when it was computed
fn optional<T: ResultSection, S: AsRef<str>>(
    cursor: &mut LineCursor<S>,
    tag: &str,
) -> Result<Option<T>> {
    if find_tag(tag, cursor.remaining()).is_ok() {
        return required::<T, S>(cursor, tag).map(Some);
    }

    // only in the lines already read means it came before the previous section
    if find_tag(tag, cursor.consumed()).is_ok() {
        return Err(Error::TagNotFound {
            tag: tag.to_string(),
        });
    }

    debug!("No \"{tag}\" section");
    Ok(None)
}

/// Read every section of a result file
///
/// Example
/// ```rust, no_run
/// # use xtools_results::read_results;
/// let results = read_results("path/to/Simulation.txt").unwrap();
/// println!("{} keV", results.beam.incident_energy_kev);
/// ```
pub fn read_results<P: AsRef<Path>>(path: P) -> Result<SimulationResults> {
    ResultsReader::new().parse(path)
}

/// Location of the result file a simulation deck points to
///
/// The base filename of the `.par` deck is relative to the directory the
/// simulation is run from.
pub fn results_file<P: AsRef<Path>>(parameters: &SimulationParameters, directory: P) -> PathBuf {
    parameters
        .results_path(directory)
        .with_extension(RESULTS_EXTENSION)
}

/// Read the results of the simulation described by a `.par` deck
///
/// Example
/// ```rust, no_run
/// # use xtools_deck::{read, SimulationParameters};
/// # use xtools_results::read_simulation;
/// let parameters: SimulationParameters = read("path/to/AlMg.par").unwrap();
/// let results = read_simulation(&parameters, "path/to").unwrap();
/// ```
pub fn read_simulation<P: AsRef<Path>>(
    parameters: &SimulationParameters,
    directory: P,
) -> Result<SimulationResults> {
    let path = results_file(parameters, directory);
    let results = read_results(&path)?;
    if results.version != parameters.version {
        warn!(
            "Results written with {} but deck is {}",
            results.version, parameters.version
        );
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_file_follows_the_deck() {
        let mut parameters = SimulationParameters::default();
        parameters.set_base_filename("Out", "AlMg");
        assert_eq!(
            results_file(&parameters, "sims"),
            PathBuf::from("sims").join("Out").join("AlMg.txt")
        );
    }
}
