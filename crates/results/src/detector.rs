// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::Result;
use crate::tags;

// xtools modules
use xtools_schema::{SchemaVersion, VERSION_1_2_3};
use xtools_utils::OptionExt;

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// EDS detector as used by the simulation
///
/// The azimuthal angle is only reported from schema 1.2.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorParameters {
    /// Element of the detector crystal, e.g. `Si`
    pub crystal: String,
    /// Crystal density (g/cm3)
    pub density_g_cm3: f64,
    /// Crystal thickness (cm)
    pub thickness_cm: f64,
    /// Crystal radius (cm)
    pub radius_cm: f64,
    /// Distance from the beam to the crystal (cm)
    pub distance_cm: f64,
    /// Dead layer thickness (A)
    pub dead_layer_a: f64,
    /// Diffusion length (A)
    pub diffusion_length_a: f64,
    /// Surface quality factor
    pub surface_quality: f64,
    /// Electronic noise (eV)
    pub noise_ev: f64,
    /// Take-off angle (deg)
    pub take_off_angle_deg: f64,
    /// Azimuthal angle (deg), since 1.2.3
    pub azimuthal_angle_deg: Option<f64>,
    /// Number of energy channels
    pub number_channels: usize,
    /// Width of an energy channel (eV)
    pub channel_width_ev: f64,
}

impl ResultSection for DetectorParameters {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("----------------------------");
        debug!(" Parsing Detector Parameters ");
        debug!("----------------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::DETECTOR)?;

        let detector = Self {
            crystal: cursor.named(tags::CRYSTAL)?,
            density_g_cm3: cursor.field(tags::CRYSTAL_DENSITY)?,
            thickness_cm: cursor.field(tags::CRYSTAL_THICKNESS)?,
            radius_cm: cursor.field(tags::CRYSTAL_RADIUS)?,
            distance_cm: cursor.field(tags::CRYSTAL_DISTANCE)?,
            dead_layer_a: cursor.field(tags::DEAD_LAYER)?,
            diffusion_length_a: cursor.field(tags::DIFFUSION_LENGTH)?,
            surface_quality: cursor.field(tags::SURFACE_QUALITY)?,
            noise_ev: cursor.field(tags::NOISE)?,
            take_off_angle_deg: cursor.field(tags::TAKE_OFF_ANGLE)?,
            azimuthal_angle_deg: match version >= VERSION_1_2_3 {
                true => Some(cursor.field(tags::AZIMUTHAL_ANGLE)?),
                false => None,
            },
            number_channels: cursor.field(tags::NUMBER_OF_CHANNELS)?,
            channel_width_ev: cursor.field(tags::CHANNEL_WIDTH)?,
        };

        debug!("Crystal     = {}", detector.crystal);
        debug!("TOA         = {} deg", detector.take_off_angle_deg);
        debug!("Azimuthal   = {}", detector.azimuthal_angle_deg.display());
        debug!("Channels    = {}", detector.number_channels);

        Ok((detector, cursor.position()))
    }
}
