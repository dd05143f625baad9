// crate modules
use crate::codec::Deck;
use crate::error::{Error, Result};
use crate::field::{Field, Format, Value};

// xtools modules
use xtools_schema::{Artifact, SchemaVersion, CURRENT_VERSION, VERSION_1_4_4, VERSION_1_5_0};

// external crates
use serde::{Deserialize, Serialize};

const KEY_CHARACTERISTIC: &str = "ComputeXrayCharacteristic";
const KEY_BREMSSTRAHLUNG: &str = "ComputeXrayBremsstrahlung";
const KEY_PHIRHOZ: &str = "ComputeXrayPhirhoz";
const KEY_SIMULATED_SPECTRUM: &str = "ComputeXraySimulatedSpectrum";
const KEY_PARTIAL_SPECTRA: &str = "ExportPartialSpectra";
const KEY_EDS_SPECTRA: &str = "ExportEdsSpectra";

/// Switches for the optional result sections (`.rp`)
///
/// The file only exists from schema 1.4.0. Writing it for an older version
/// fails with [Error::ArtifactNotAvailable].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultsParameters {
    /// Schema version of the deck
    pub version: SchemaVersion,
    /// Compute characteristic x-ray intensities
    pub compute_xray_characteristic: bool,
    /// Compute bremsstrahlung intensities
    pub compute_xray_bremsstrahlung: bool,
    /// Compute phi-rho-z distributions
    pub compute_xray_phirhoz: bool,
    /// Compute the simulated spectrum
    pub compute_xray_simulated_spectrum: bool,
    /// Export the spectrum of each element, since 1.4.4
    pub export_partial_spectra: Option<bool>,
    /// Export spectra as measured by the EDS detector, since 1.5.0
    pub export_eds_spectra: Option<bool>,
}

impl Default for ResultsParameters {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            compute_xray_characteristic: true,
            compute_xray_bremsstrahlung: true,
            compute_xray_phirhoz: true,
            compute_xray_simulated_spectrum: true,
            export_partial_spectra: Some(false),
            export_eds_spectra: Some(false),
        }
    }
}

impl Deck for ResultsParameters {
    const TITLE: &'static str = "RESULTS PARAMETERS";

    const ARTIFACT: Option<Artifact> = Some(Artifact::Results);

    const FIELDS: &'static [Field] = &[
        Field::always(KEY_CHARACTERISTIC, Format::Flag),
        Field::always(KEY_BREMSSTRAHLUNG, Format::Flag),
        Field::always(KEY_PHIRHOZ, Format::Flag),
        Field::always(KEY_SIMULATED_SPECTRUM, Format::Flag),
        Field::since(KEY_PARTIAL_SPECTRA, VERSION_1_4_4, Format::Flag),
        Field::since(KEY_EDS_SPECTRA, VERSION_1_5_0, Format::Flag),
    ];

    fn version(&self) -> SchemaVersion {
        self.version
    }

    fn set_version(&mut self, version: SchemaVersion) {
        self.version = version;
    }

    fn value(&self, key: &str) -> Option<Value> {
        let value = match key {
            KEY_CHARACTERISTIC => self.compute_xray_characteristic,
            KEY_BREMSSTRAHLUNG => self.compute_xray_bremsstrahlung,
            KEY_PHIRHOZ => self.compute_xray_phirhoz,
            KEY_SIMULATED_SPECTRUM => self.compute_xray_simulated_spectrum,
            KEY_PARTIAL_SPECTRA => self.export_partial_spectra?,
            KEY_EDS_SPECTRA => self.export_eds_spectra?,
            _ => return None,
        };
        Some(Value::Flag(value))
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let flag = value.into_flag(key)?;
        match key {
            KEY_CHARACTERISTIC => self.compute_xray_characteristic = flag,
            KEY_BREMSSTRAHLUNG => self.compute_xray_bremsstrahlung = flag,
            KEY_PHIRHOZ => self.compute_xray_phirhoz = flag,
            KEY_SIMULATED_SPECTRUM => self.compute_xray_simulated_spectrum = flag,
            KEY_PARTIAL_SPECTRA => self.export_partial_spectra = Some(flag),
            KEY_EDS_SPECTRA => self.export_eds_spectra = Some(flag),
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
            KEY_PARTIAL_SPECTRA => self.export_partial_spectra = None,
            KEY_EDS_SPECTRA => self.export_eds_spectra = None,
            _ => (),
        }
    }
}
