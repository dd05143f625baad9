// crate modules
use crate::codec::Deck;
use crate::error::{Error, Result};
use crate::field::{Field, Format, Value};

// xtools modules
use xtools_schema::{
    Artifact, SchemaVersion, CURRENT_VERSION, VERSION_1_2_0, VERSION_1_2_3, VERSION_1_4_1,
};

// external crates
use serde::{Deserialize, Serialize};

const KEY_BEAM_ENERGY: &str = "BeamEnergy";
const KEY_BEAM_CURRENT: &str = "BeamCurrent";
const KEY_BEAM_DIAMETER: &str = "BeamDiameter";
const KEY_BEAM_POSITION_X: &str = "BeamPositionX";
const KEY_BEAM_POSITION_Y: &str = "BeamPositionY";
const KEY_BEAM_TILT: &str = "BeamTilt";
const KEY_BEAM_STANDARD_DEVIATION: &str = "BeamStandardDeviation";
const KEY_CRYSTAL_ATOM: &str = "DetectorCrystalAtom";
const KEY_CRYSTAL_THICKNESS: &str = "DetectorCrystalThickness";
const KEY_CRYSTAL_RADIUS: &str = "DetectorCrystalRadius";
const KEY_CRYSTAL_DISTANCE: &str = "DetectorCrystalDistance";
const KEY_DEAD_LAYER: &str = "DetectorDeadLayer";
const KEY_DIFFUSION_LENGTH: &str = "DetectorDiffusionLength";
const KEY_SURFACE_QUALITY: &str = "DetectorSurfaceQuality";
const KEY_NOISE: &str = "DetectorNoise";
const KEY_TAKE_OFF_ANGLE: &str = "DetectorTOA";
const KEY_PITCH: &str = "DetectorPitch";
const KEY_AZIMUTHAL_ANGLE: &str = "DetectorAzimuthalAngle";
const KEY_CHANNEL_WIDTH: &str = "DetectorChannelWidth";
const KEY_TIME: &str = "Time";

/// Microscope and EDS detector settings (`.mic`)
///
/// The detector pitch was renamed to the azimuthal angle in 1.2.3. Both are
/// kept as separate fields since they never coexist in a file.
///
/// ```rust
/// # use xtools_deck::{Deck, Microscope};
/// # use xtools_schema::VERSION_1_4_1;
/// let mut microscope = Microscope::new(VERSION_1_4_1);
/// microscope.beam_energy_kev = 5.0;
///
/// let text = microscope.to_text().unwrap();
/// assert!(text.contains("\nBeamEnergy=5.0\n"));
/// assert!(text.contains("\nBeamCurrent=1e-10\n"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Microscope {
    /// Schema version of the deck
    pub version: SchemaVersion,
    /// Incident electron energy (keV)
    pub beam_energy_kev: f64,
    /// Beam current (A)
    pub beam_current_a: f64,
    /// Beam diameter (A)
    pub beam_diameter_a: f64,
    /// Beam position along x (A)
    pub beam_position_x_a: f64,
    /// Beam position along y (A)
    pub beam_position_y_a: f64,
    /// Beam tilt (deg), since 1.2.0
    pub beam_tilt_deg: Option<f64>,
    /// Standard deviation of the gaussian beam (A), since 1.4.1
    pub beam_standard_deviation_a: Option<f64>,
    /// Element of the detector crystal
    pub detector_crystal_atom: String,
    /// Crystal thickness (cm)
    pub detector_crystal_thickness_cm: f64,
    /// Crystal radius (cm)
    pub detector_crystal_radius_cm: f64,
    /// Distance from the beam to the crystal (cm)
    pub detector_crystal_distance_cm: f64,
    /// Dead layer thickness (A)
    pub detector_dead_layer_a: f64,
    /// Diffusion length (A)
    pub detector_diffusion_length_a: f64,
    /// Surface quality factor
    pub detector_surface_quality: f64,
    /// Electronic noise (eV)
    pub detector_noise_ev: f64,
    /// Take-off angle (deg)
    pub detector_take_off_angle_deg: f64,
    /// Detector pitch (deg), before 1.2.3
    pub detector_pitch_deg: Option<f64>,
    /// Azimuthal angle (deg), since 1.2.3
    pub detector_azimuthal_angle_deg: Option<f64>,
    /// Width of an energy channel (eV), since 1.2.0
    pub detector_channel_width_ev: Option<f64>,
    /// Acquisition time (s)
    pub time_s: f64,
}

impl Default for Microscope {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            beam_energy_kev: 10.0,
            beam_current_a: 1.0e-10,
            beam_diameter_a: 0.0,
            beam_position_x_a: 0.0,
            beam_position_y_a: 0.0,
            beam_tilt_deg: Some(0.0),
            beam_standard_deviation_a: Some(0.0),
            detector_crystal_atom: "Si".to_string(),
            detector_crystal_thickness_cm: 0.3,
            detector_crystal_radius_cm: 0.3,
            detector_crystal_distance_cm: 4.0,
            detector_dead_layer_a: 200.0,
            detector_diffusion_length_a: 0.5,
            detector_surface_quality: 1.0,
            detector_noise_ev: 50.0,
            detector_take_off_angle_deg: 40.0,
            detector_pitch_deg: Some(0.0),
            detector_azimuthal_angle_deg: Some(0.0),
            detector_channel_width_ev: Some(5.0),
            time_s: 100.0,
        }
    }
}

impl Deck for Microscope {
    const TITLE: &'static str = "MICROSCOPE PARAMETERS";

    const ARTIFACT: Option<Artifact> = Some(Artifact::Microscope);

    const FIELDS: &'static [Field] = &[
        Field::always(KEY_BEAM_ENERGY, Format::FixedTrimmed(6)),
        Field::always(KEY_BEAM_CURRENT, Format::SciTrimmed(9)),
        Field::always(KEY_BEAM_DIAMETER, Format::FixedTrimmed(6)),
        Field::always(KEY_BEAM_POSITION_X, Format::FixedTrimmed(6)),
        Field::always(KEY_BEAM_POSITION_Y, Format::FixedTrimmed(6)),
        Field::since(KEY_BEAM_TILT, VERSION_1_2_0, Format::FixedTrimmed(6)),
        Field::since(KEY_BEAM_STANDARD_DEVIATION, VERSION_1_4_1, Format::FixedTrimmed(6)),
        Field::always(KEY_CRYSTAL_ATOM, Format::Text),
        Field::always(KEY_CRYSTAL_THICKNESS, Format::FixedTrimmed(6)),
        Field::always(KEY_CRYSTAL_RADIUS, Format::FixedTrimmed(6)),
        Field::always(KEY_CRYSTAL_DISTANCE, Format::FixedTrimmed(6)),
        Field::always(KEY_DEAD_LAYER, Format::FixedTrimmed(6)),
        Field::always(KEY_DIFFUSION_LENGTH, Format::FixedTrimmed(6)),
        Field::always(KEY_SURFACE_QUALITY, Format::FixedTrimmed(6)),
        Field::always(KEY_NOISE, Format::FixedTrimmed(6)),
        Field::always(KEY_TAKE_OFF_ANGLE, Format::Fixed(2)),
        Field::before(KEY_PITCH, VERSION_1_2_3, Format::Fixed(2)),
        Field::since(KEY_AZIMUTHAL_ANGLE, VERSION_1_2_3, Format::Fixed(2)),
        Field::since(KEY_CHANNEL_WIDTH, VERSION_1_2_0, Format::FixedTrimmed(6)),
        Field::always(KEY_TIME, Format::FixedTrimmed(6)),
    ];

    fn version(&self) -> SchemaVersion {
        self.version
    }

    fn set_version(&mut self, version: SchemaVersion) {
        self.version = version;
    }

    fn value(&self, key: &str) -> Option<Value> {
        let value = match key {
            KEY_BEAM_ENERGY => self.beam_energy_kev.into(),
            KEY_BEAM_CURRENT => self.beam_current_a.into(),
            KEY_BEAM_DIAMETER => self.beam_diameter_a.into(),
            KEY_BEAM_POSITION_X => self.beam_position_x_a.into(),
            KEY_BEAM_POSITION_Y => self.beam_position_y_a.into(),
            KEY_BEAM_TILT => self.beam_tilt_deg?.into(),
            KEY_BEAM_STANDARD_DEVIATION => self.beam_standard_deviation_a?.into(),
            KEY_CRYSTAL_ATOM => self.detector_crystal_atom.as_str().into(),
            KEY_CRYSTAL_THICKNESS => self.detector_crystal_thickness_cm.into(),
            KEY_CRYSTAL_RADIUS => self.detector_crystal_radius_cm.into(),
            KEY_CRYSTAL_DISTANCE => self.detector_crystal_distance_cm.into(),
            KEY_DEAD_LAYER => self.detector_dead_layer_a.into(),
            KEY_DIFFUSION_LENGTH => self.detector_diffusion_length_a.into(),
            KEY_SURFACE_QUALITY => self.detector_surface_quality.into(),
            KEY_NOISE => self.detector_noise_ev.into(),
            KEY_TAKE_OFF_ANGLE => self.detector_take_off_angle_deg.into(),
            KEY_PITCH => self.detector_pitch_deg?.into(),
            KEY_AZIMUTHAL_ANGLE => self.detector_azimuthal_angle_deg?.into(),
            KEY_CHANNEL_WIDTH => self.detector_channel_width_ev?.into(),
            KEY_TIME => self.time_s.into(),
            _ => return None,
        };
        Some(value)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        match key {
            KEY_BEAM_ENERGY => self.beam_energy_kev = value.into_f64(key)?,
            KEY_BEAM_CURRENT => self.beam_current_a = value.into_f64(key)?,
            KEY_BEAM_DIAMETER => self.beam_diameter_a = value.into_f64(key)?,
            KEY_BEAM_POSITION_X => self.beam_position_x_a = value.into_f64(key)?,
            KEY_BEAM_POSITION_Y => self.beam_position_y_a = value.into_f64(key)?,
            KEY_BEAM_TILT => self.beam_tilt_deg = Some(value.into_f64(key)?),
            KEY_BEAM_STANDARD_DEVIATION => {
                self.beam_standard_deviation_a = Some(value.into_f64(key)?)
            }
            KEY_CRYSTAL_ATOM => self.detector_crystal_atom = value.into_text(key)?,
            KEY_CRYSTAL_THICKNESS => self.detector_crystal_thickness_cm = value.into_f64(key)?,
            KEY_CRYSTAL_RADIUS => self.detector_crystal_radius_cm = value.into_f64(key)?,
            KEY_CRYSTAL_DISTANCE => self.detector_crystal_distance_cm = value.into_f64(key)?,
            KEY_DEAD_LAYER => self.detector_dead_layer_a = value.into_f64(key)?,
            KEY_DIFFUSION_LENGTH => self.detector_diffusion_length_a = value.into_f64(key)?,
            KEY_SURFACE_QUALITY => self.detector_surface_quality = value.into_f64(key)?,
            KEY_NOISE => self.detector_noise_ev = value.into_f64(key)?,
            KEY_TAKE_OFF_ANGLE => self.detector_take_off_angle_deg = value.into_f64(key)?,
            KEY_PITCH => self.detector_pitch_deg = Some(value.into_f64(key)?),
            KEY_AZIMUTHAL_ANGLE => self.detector_azimuthal_angle_deg = Some(value.into_f64(key)?),
            KEY_CHANNEL_WIDTH => self.detector_channel_width_ev = Some(value.into_f64(key)?),
            KEY_TIME => self.time_s = value.into_f64(key)?,
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
            KEY_BEAM_TILT => self.beam_tilt_deg = None,
            KEY_BEAM_STANDARD_DEVIATION => self.beam_standard_deviation_a = None,
            KEY_PITCH => self.detector_pitch_deg = None,
            KEY_AZIMUTHAL_ANGLE => self.detector_azimuthal_angle_deg = None,
            KEY_CHANNEL_WIDTH => self.detector_channel_width_ev = None,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::{VERSION_1_1_1, VERSION_1_2_3};

    #[test]
    fn renamed_pitch_is_exclusive() {
        for version in xtools_schema::ALL_VERSIONS {
            let keys = Microscope::applicable_keys(version);
            let pitch = keys.contains(&KEY_PITCH);
            let azimuthal = keys.contains(&KEY_AZIMUTHAL_ANGLE);
            assert!(pitch ^ azimuthal, "{version}");
        }
        assert!(Microscope::applicable_keys(VERSION_1_1_1).contains(&KEY_PITCH));
        assert!(Microscope::applicable_keys(VERSION_1_2_3).contains(&KEY_AZIMUTHAL_ANGLE));
    }

    #[test]
    fn new_clears_gated_fields() {
        let microscope = Microscope::new(VERSION_1_1_1);
        assert_eq!(microscope.beam_tilt_deg, None);
        assert_eq!(microscope.detector_azimuthal_angle_deg, None);
        assert_eq!(microscope.detector_pitch_deg, Some(0.0));
    }

    #[test]
    fn every_key_is_reachable() {
        let microscope = Microscope::default();
        for field in Microscope::FIELDS {
            assert!(microscope.value(field.key).is_some(), "{}", field.key);
        }
    }
}
