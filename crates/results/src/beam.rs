// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::Result;
use crate::tags;

// xtools modules
use xtools_schema::SchemaVersion;

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// Electron beam as used by the simulation
///
/// ```text
/// Beam Parameters:
/// Electron incident energy = 30.000000 (KeV)
/// Beam current = 1e-10 (A)
/// Acquisition time = 100.0 (s)
/// Beam diameter = 0.0 (A)
/// Beam tilt = 0.0 (deg)
/// Gaussian mean = 0.0 (A)
/// Gaussian sigma = 0.0 (A)
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeamParameters {
    /// Incident electron energy (keV)
    pub incident_energy_kev: f64,
    /// Beam current (A)
    pub current_a: f64,
    /// Acquisition time (s)
    pub acquisition_time_s: f64,
    /// Beam diameter (A)
    pub diameter_a: f64,
    /// Beam tilt (deg)
    pub tilt_deg: f64,
    /// Mean of the gaussian beam profile (A)
    pub gaussian_mean_a: f64,
    /// Standard deviation of the gaussian beam profile (A)
    pub gaussian_sigma_a: f64,
}

impl ResultSection for BeamParameters {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("------------------------");
        debug!(" Parsing Beam Parameters ");
        debug!("------------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::BEAM)?;

        let beam = Self {
            incident_energy_kev: cursor.field(tags::INCIDENT_ENERGY)?,
            current_a: cursor.field(tags::BEAM_CURRENT)?,
            acquisition_time_s: cursor.field(tags::ACQUISITION_TIME)?,
            diameter_a: cursor.field(tags::BEAM_DIAMETER)?,
            tilt_deg: cursor.field(tags::BEAM_TILT)?,
            gaussian_mean_a: cursor.field(tags::GAUSSIAN_MEAN)?,
            gaussian_sigma_a: cursor.field(tags::GAUSSIAN_SIGMA)?,
        };

        debug!("Energy      = {} keV", beam.incident_energy_kev);
        debug!("Current     = {} A", beam.current_a);
        debug!("Time        = {} s", beam.acquisition_time_s);

        Ok((beam, cursor.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::VERSION_1_4_1;

    const LINES: [&str; 9] = [
        "Beam Parameters:",
        "Electron incident energy = 30.000000 (KeV)",
        "Beam current = 1e-10 (A)",
        "Acquisition time = 100.0 (s)",
        "Beam diameter = 0.0 (A)",
        "Beam tilt = 0.0 (deg)",
        "Gaussian mean = 0.0 (A)",
        "Gaussian sigma = 0.0 (A)",
        "",
    ];

    #[test]
    fn beam_scenario() {
        let (beam, consumed) = BeamParameters::read_from_lines(&LINES, VERSION_1_4_1).unwrap();
        assert_eq!(beam.incident_energy_kev, 30.0);
        assert_eq!(beam.current_a, 1.0e-10);
        assert_eq!(beam.acquisition_time_s, 100.0);
        assert_eq!(consumed, 8);
    }

    #[test]
    fn missing_tag() {
        let result = BeamParameters::read_from_lines(&LINES[1..], VERSION_1_4_1);
        assert!(matches!(result, Err(crate::Error::TagNotFound { .. })));
    }
}
