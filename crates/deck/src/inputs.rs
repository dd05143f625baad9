// crate modules
use crate::codec::Deck;
use crate::error::{Error, Result};
use crate::field::{Field, Format, Value};

// xtools modules
use xtools_schema::{Artifact, SchemaVersion, CURRENT_VERSION, VERSION_1_4_0};

// external crates
use serde::{Deserialize, Serialize};

/// Extension of the simulation input list, without the leading dot
pub const SIM_EXTENSION: &str = "sim";

const KEY_SPECIMEN: &str = "Specimen";
const KEY_MODEL: &str = "Model";
const KEY_MICROSCOPE: &str = "Microscope";
const KEY_PARAMETERS: &str = "SimParameters";
const KEY_MAP: &str = "Map";
const KEY_RESULTS: &str = "ResultParameters";
const KEY_SNR: &str = "SNR";

/// List of the files that make up one simulation (`.sim`)
///
/// This is the file handed to the simulator. Every entry is the file name of
/// one [Artifact] deck, so the list follows the same version gating.
///
/// ```rust
/// # use xtools_deck::{Deck, SimulationInputs};
/// # use xtools_schema::{VERSION_1_2_5, VERSION_1_4_0};
/// let inputs = SimulationInputs::with_base_name("AlMgBulk5keV", VERSION_1_4_0);
/// assert_eq!(inputs.microscope, "AlMgBulk5keV.mic");
/// assert_eq!(inputs.results.as_deref(), Some("AlMgBulk5keV.rp"));
///
/// let inputs = SimulationInputs::with_base_name("AlMgBulk5keV", VERSION_1_2_5);
/// assert_eq!(inputs.results, None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInputs {
    /// Schema version of the list
    pub version: SchemaVersion,
    /// Specimen deck (`.sam`)
    pub specimen: String,
    /// Model deck (`.mdl`)
    pub model: String,
    /// Microscope deck (`.mic`)
    pub microscope: String,
    /// Simulation parameters deck (`.par`)
    pub parameters: String,
    /// X-ray map deck (`.mpp`)
    pub map: String,
    /// Result flags deck (`.rp`), since 1.4.0
    pub results: Option<String>,
    /// Signal to noise deck (`.snp`)
    pub snr: String,
}

impl SimulationInputs {
    /// Inputs for every artifact sharing `base_name`
    pub fn with_base_name(base_name: &str, version: SchemaVersion) -> Self {
        let mut inputs = Self::new(version);
        for artifact in Artifact::applicable(version) {
            inputs.set_file_name(artifact, artifact.file_name(base_name));
        }
        inputs
    }

    /// File name listed for an artifact, `None` if absent from the record
    pub fn file_name(&self, artifact: Artifact) -> Option<&str> {
        match artifact {
            Artifact::Specimen => Some(&self.specimen),
            Artifact::Model => Some(&self.model),
            Artifact::Microscope => Some(&self.microscope),
            Artifact::Parameters => Some(&self.parameters),
            Artifact::Map => Some(&self.map),
            Artifact::Results => self.results.as_deref(),
            Artifact::Snr => Some(&self.snr),
        }
    }

    /// Change the file name listed for an artifact
    pub fn set_file_name(&mut self, artifact: Artifact, file_name: String) {
        match artifact {
            Artifact::Specimen => self.specimen = file_name,
            Artifact::Model => self.model = file_name,
            Artifact::Microscope => self.microscope = file_name,
            Artifact::Parameters => self.parameters = file_name,
            Artifact::Map => self.map = file_name,
            Artifact::Results => self.results = Some(file_name),
            Artifact::Snr => self.snr = file_name,
        }
    }
}

impl Default for SimulationInputs {
    fn default() -> Self {
        let mut inputs = Self {
            version: CURRENT_VERSION,
            specimen: String::new(),
            model: String::new(),
            microscope: String::new(),
            parameters: String::new(),
            map: String::new(),
            results: None,
            snr: String::new(),
        };
        for artifact in Artifact::ALL {
            inputs.set_file_name(artifact, artifact.file_name("Simulation"));
        }
        inputs
    }
}

fn artifact_for(key: &str) -> Option<Artifact> {
    let artifact = match key {
        KEY_SPECIMEN => Artifact::Specimen,
        KEY_MODEL => Artifact::Model,
        KEY_MICROSCOPE => Artifact::Microscope,
        KEY_PARAMETERS => Artifact::Parameters,
        KEY_MAP => Artifact::Map,
        KEY_RESULTS => Artifact::Results,
        KEY_SNR => Artifact::Snr,
        _ => return None,
    };
    Some(artifact)
}

impl Deck for SimulationInputs {
    const TITLE: &'static str = "SIMULATION INPUTS";

    // not one of the simulation artifacts, the list itself is always valid
    const ARTIFACT: Option<Artifact> = None;

    const FIELDS: &'static [Field] = &[
        Field::always(KEY_SPECIMEN, Format::Text),
        Field::always(KEY_MODEL, Format::Text),
        Field::always(KEY_MICROSCOPE, Format::Text),
        Field::always(KEY_PARAMETERS, Format::Text),
        Field::always(KEY_MAP, Format::Text),
        Field::since(KEY_RESULTS, VERSION_1_4_0, Format::Text),
        Field::always(KEY_SNR, Format::Text),
    ];

    fn version(&self) -> SchemaVersion {
        self.version
    }

    fn set_version(&mut self, version: SchemaVersion) {
        self.version = version;
    }

    fn value(&self, key: &str) -> Option<Value> {
        let artifact = artifact_for(key)?;
        self.file_name(artifact).map(Value::from)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let Some(artifact) = artifact_for(key) else {
            return Err(Error::UnknownKey {
                key: key.to_string(),
            });
        };
        self.set_file_name(artifact, value.into_text(key)?);
        Ok(())
    }

    fn clear_value(&mut self, key: &str) {
        if key == KEY_RESULTS {
            self.results = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_key_per_artifact() {
        for version in xtools_schema::ALL_VERSIONS {
            let keys = SimulationInputs::applicable_keys(version);
            assert_eq!(keys.len(), Artifact::applicable(version).len());
        }
    }

    #[test]
    fn unknown_key() {
        let mut inputs = SimulationInputs::default();
        let result = inputs.set_value("Spectrum", "a.spc".into());
        assert!(matches!(result, Err(Error::UnknownKey { .. })));
    }
}
