// standard library
use std::path::Path;

// crate modules
use crate::codec::Deck;
use crate::error::{Error, Result};
use crate::field::{Field, Format, Value};

// xtools modules
use xtools_schema::{
    Artifact, SchemaVersion, CURRENT_VERSION, VERSION_1_2_0, VERSION_1_2_4, VERSION_1_4_1,
    VERSION_1_5_0,
};
use xtools_utils::f;

// external crates
use serde::{Deserialize, Serialize};

/// Directory the simulator writes its result files into by default
pub const DEFAULT_RESULTS_DIRECTORY: &str = "Results";

const KEY_BASE_FILE_NAME: &str = "BaseFileName";
const KEY_ELECTRONS: &str = "ElectronNbr";
const KEY_PHOTONS: &str = "PhotonNbr";
const KEY_WINDOWS: &str = "WindowNbr";
const KEY_ENERGY_CHANNEL_WIDTH: &str = "EnergyChannelWidth";
const KEY_INTERPOLATION: &str = "SpectraInterpolationModel";
const KEY_VOXEL_SIMPLIFICATION: &str = "VoxelSimplification";
const KEY_ELASTIC_SCALING: &str = "ElasticCrossSectionScalingFactor";
const KEY_ENERGY_LOSS_SCALING: &str = "EnergyLossScalingFactor";
const KEY_REPETITIONS: &str = "RepetitionNbr";

/// Run control of the simulation (`.par`)
///
/// The energy channel width moved to the microscope deck in 1.2.0, where it
/// became `DetectorChannelWidth`.
///
/// ```rust
/// # use xtools_deck::{Deck, SimulationParameters};
/// # use xtools_schema::VERSION_1_5_2;
/// let mut parameters = SimulationParameters::new(VERSION_1_5_2);
/// parameters.set_base_filename("Output", "AlMgBulk5keV");
/// assert_eq!(parameters.base_filename, "Output\\AlMgBulk5keV");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Schema version of the deck
    pub version: SchemaVersion,
    /// Prefix of every result file, relative to the simulation directory
    pub base_filename: String,
    /// Number of simulated electron trajectories
    pub number_electrons: i64,
    /// Number of photons emitted per interaction
    pub number_photons: i64,
    /// Number of energy windows for phi-rho-z curves
    pub number_windows: i64,
    /// Width of an energy channel (eV), before 1.2.0
    pub energy_channel_width_ev: Option<f64>,
    /// Spectrum interpolation model, since 1.2.0
    pub spectra_interpolation_model: Option<i64>,
    /// Merge identical neighbouring voxels, since 1.2.4
    pub voxel_simplification: Option<bool>,
    /// Scaling of the elastic cross section, since 1.4.1
    pub elastic_cross_section_scaling_factor: Option<f64>,
    /// Scaling of the energy loss, since 1.4.1
    pub energy_loss_scaling_factor: Option<f64>,
    /// Number of independent repetitions, since 1.5.0
    pub number_repetitions: Option<i64>,
}

impl SimulationParameters {
    /// Point the result files to `name` inside `directory`
    ///
    /// The simulator runs on Windows and expects a backslash separator,
    /// whatever platform the deck is produced on.
    pub fn set_base_filename(&mut self, directory: &str, name: &str) {
        self.base_filename = match directory.is_empty() {
            true => name.to_string(),
            false => f!("{directory}\\{name}"),
        };
    }

    /// Name of the result files without the directory
    pub fn base_name(&self) -> &str {
        self.base_filename
            .rsplit(['\\', '/'])
            .next()
            .unwrap_or(&self.base_filename)
    }

    /// Location of the result files relative to a simulation directory
    pub fn results_path<P: AsRef<Path>>(&self, directory: P) -> std::path::PathBuf {
        self.base_filename
            .split(['\\', '/'])
            .fold(directory.as_ref().to_path_buf(), |path, part| path.join(part))
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            base_filename: f!("{DEFAULT_RESULTS_DIRECTORY}\\Simulation"),
            number_electrons: 1000,
            number_photons: 10000,
            number_windows: 64,
            energy_channel_width_ev: Some(5.0),
            spectra_interpolation_model: Some(1),
            voxel_simplification: Some(false),
            elastic_cross_section_scaling_factor: Some(1.0),
            energy_loss_scaling_factor: Some(1.0),
            number_repetitions: Some(1),
        }
    }
}

impl Deck for SimulationParameters {
    const TITLE: &'static str = "SIMULATION PARAMETERS";

    const ARTIFACT: Option<Artifact> = Some(Artifact::Parameters);

    const FIELDS: &'static [Field] = &[
        Field::always(KEY_BASE_FILE_NAME, Format::Text),
        Field::always(KEY_ELECTRONS, Format::Integer),
        Field::always(KEY_PHOTONS, Format::Integer),
        Field::always(KEY_WINDOWS, Format::Integer),
        Field::before(KEY_ENERGY_CHANNEL_WIDTH, VERSION_1_2_0, Format::FixedTrimmed(6)),
        Field::since(KEY_INTERPOLATION, VERSION_1_2_0, Format::Integer),
        Field::since(KEY_VOXEL_SIMPLIFICATION, VERSION_1_2_4, Format::Flag),
        Field::since(KEY_ELASTIC_SCALING, VERSION_1_4_1, Format::Scientific(6)),
        Field::since(KEY_ENERGY_LOSS_SCALING, VERSION_1_4_1, Format::Scientific(6)),
        Field::since(KEY_REPETITIONS, VERSION_1_5_0, Format::Integer),
    ];

    fn version(&self) -> SchemaVersion {
        self.version
    }

    fn set_version(&mut self, version: SchemaVersion) {
        self.version = version;
    }

    fn value(&self, key: &str) -> Option<Value> {
        let value = match key {
            KEY_BASE_FILE_NAME => self.base_filename.as_str().into(),
            KEY_ELECTRONS => self.number_electrons.into(),
            KEY_PHOTONS => self.number_photons.into(),
            KEY_WINDOWS => self.number_windows.into(),
            KEY_ENERGY_CHANNEL_WIDTH => self.energy_channel_width_ev?.into(),
            KEY_INTERPOLATION => self.spectra_interpolation_model?.into(),
            KEY_VOXEL_SIMPLIFICATION => self.voxel_simplification?.into(),
            KEY_ELASTIC_SCALING => self.elastic_cross_section_scaling_factor?.into(),
            KEY_ENERGY_LOSS_SCALING => self.energy_loss_scaling_factor?.into(),
            KEY_REPETITIONS => self.number_repetitions?.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        match key {
            KEY_BASE_FILE_NAME => self.base_filename = value.into_text(key)?,
            KEY_ELECTRONS => self.number_electrons = value.into_i64(key)?,
            KEY_PHOTONS => self.number_photons = value.into_i64(key)?,
            KEY_WINDOWS => self.number_windows = value.into_i64(key)?,
            KEY_ENERGY_CHANNEL_WIDTH => self.energy_channel_width_ev = Some(value.into_f64(key)?),
            KEY_INTERPOLATION => self.spectra_interpolation_model = Some(value.into_i64(key)?),
            KEY_VOXEL_SIMPLIFICATION => self.voxel_simplification = Some(value.into_flag(key)?),
            KEY_ELASTIC_SCALING => {
                self.elastic_cross_section_scaling_factor = Some(value.into_f64(key)?)
            }
            KEY_ENERGY_LOSS_SCALING => self.energy_loss_scaling_factor = Some(value.into_f64(key)?),
            KEY_REPETITIONS => self.number_repetitions = Some(value.into_i64(key)?),
            _ => {
                return Err(Error::UnknownKey {
                    key: key.to_string(),
                })
            }
        }
        Ok(())
    }

    fn clear_value(&mut self, key: &str) {
        match key {
            KEY_ENERGY_CHANNEL_WIDTH => self.energy_channel_width_ev = None,
            KEY_INTERPOLATION => self.spectra_interpolation_model = None,
            KEY_VOXEL_SIMPLIFICATION => self.voxel_simplification = None,
            KEY_ELASTIC_SCALING => self.elastic_cross_section_scaling_factor = None,
            KEY_ENERGY_LOSS_SCALING => self.energy_loss_scaling_factor = None,
            KEY_REPETITIONS => self.number_repetitions = None,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_filename() {
        let mut parameters = SimulationParameters::default();
        assert_eq!(parameters.base_filename, "Results\\Simulation");
        assert_eq!(parameters.base_name(), "Simulation");

        parameters.set_base_filename("", "Bulk");
        assert_eq!(parameters.base_filename, "Bulk");
        assert_eq!(parameters.base_name(), "Bulk");
    }

    #[test]
    fn results_path_is_platform_native() {
        let parameters = SimulationParameters::default();
        let path = parameters.results_path("run");
        assert_eq!(path, Path::new("run").join("Results").join("Simulation"));
    }

    #[test]
    fn channel_width_moved_out() {
        let keys = SimulationParameters::applicable_keys(xtools_schema::VERSION_1_1_1);
        assert!(keys.contains(&KEY_ENERGY_CHANNEL_WIDTH));
        assert!(!keys.contains(&KEY_INTERPOLATION));

        let keys = SimulationParameters::applicable_keys(VERSION_1_2_0);
        assert!(!keys.contains(&KEY_ENERGY_CHANNEL_WIDTH));
        assert!(keys.contains(&KEY_INTERPOLATION));
    }
}
