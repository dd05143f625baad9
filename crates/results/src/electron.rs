// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::Result;
use crate::tags;

// xtools modules
use xtools_schema::{SchemaVersion, VERSION_1_2_0};
use xtools_utils::OptionExt;

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// Fate of the simulated electrons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElectronStatistics {
    /// Number of electron trajectories simulated
    pub simulated: u64,
    /// Electrons leaving through the top surface
    pub backscattered: u64,
    /// Fraction of backscattered electrons
    pub backscattered_coefficient: f64,
    /// Electrons leaving through the bottom surface
    pub transmitted: u64,
    /// Fraction of transmitted electrons
    pub transmitted_coefficient: f64,
    /// Electrons scattered by the gas before reaching the specimen, since 1.2.0
    pub skirted: Option<u64>,
    /// Electrons stopped inside the specimen
    pub internal: u64,
    /// Energy deposited in the specimen (keV)
    pub absorbed_energy_kev: f64,
}

impl ResultSection for ElectronStatistics {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("-------------------------");
        debug!(" Parsing Electron Results ");
        debug!("-------------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::ELECTRON)?;

        let electrons = Self {
            simulated: cursor.field(tags::ELECTRONS_SIMULATED)?,
            backscattered: cursor.field(tags::BACKSCATTERED)?,
            backscattered_coefficient: cursor.field(tags::BACKSCATTERED_COEFFICIENT)?,
            transmitted: cursor.field(tags::TRANSMITTED)?,
            transmitted_coefficient: cursor.field(tags::TRANSMITTED_COEFFICIENT)?,
            skirted: match version >= VERSION_1_2_0 {
                true => Some(cursor.field(tags::SKIRTED)?),
                false => None,
            },
            internal: cursor.field(tags::INTERNAL)?,
            absorbed_energy_kev: cursor.field(tags::ABSORBED_ENERGY)?,
        };

        // decoration only
        cursor.advance(tags::ELECTRON_DECORATION_LINES)?;

        debug!("Simulated   = {}", electrons.simulated);
        debug!("BSE coeff.  = {}", electrons.backscattered_coefficient);
        debug!("Skirted     = {}", electrons.skirted.display());

        Ok((electrons, cursor.position()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::VERSION_1_1_1;

    #[test]
    fn legacy_has_no_skirted_electrons() {
        let lines = [
            "Electron Results:",
            "Electrons Simulated = 1000",
            "Backscattered Electrons = 152",
            "Backscattered Coefficient = 0.152",
            "Transmitted Electrons = 0",
            "Transmitted Coefficient = 0.0",
            "Internal Electrons = 848",
            "Absorbed Energy = 2.45e+04 (keV)",
            "--------------------------------",
            "--------------------------------",
            "Model Parameters:",
        ];
        let (electrons, consumed) =
            ElectronStatistics::read_from_lines(&lines, VERSION_1_1_1).unwrap();
        assert_eq!(electrons.skirted, None);
        assert_eq!(electrons.internal, 848);
        assert_eq!(electrons.absorbed_energy_kev, 2.45e4);
        assert_eq!(consumed, 10);

        // the newer layout expects one more field
        assert!(ElectronStatistics::read_from_lines(&lines, VERSION_1_2_0).is_err());
    }
}
