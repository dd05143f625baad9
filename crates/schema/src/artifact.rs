// crate modules
use crate::gate::Gate;
use crate::version::{SchemaVersion, VERSION_1_4_0};

// external crates
use serde::{Deserialize, Serialize};

/// Kinds of file that make up one simulation
///
/// Each simulation is a set of files sharing a base name, distinguished only
/// by a fixed three letter extension.
///
/// | Artifact     | Extension | Available    |
/// | ------------ | --------- | ------------ |
/// | `Specimen`   | `.sam`    | always       |
/// | `Model`      | `.mdl`    | always       |
/// | `Microscope` | `.mic`    | always       |
/// | `Parameters` | `.par`    | always       |
/// | `Map`        | `.mpp`    | always       |
/// | `Results`    | `.rp`     | `>= 1.4.0`   |
/// | `Snr`        | `.snp`    | always       |
///
/// ```rust
/// # use xtools_schema::{Artifact, VERSION_1_2_5};
/// assert_eq!(Artifact::Microscope.file_name("AlMgBulk5keV"), "AlMgBulk5keV.mic");
/// assert!(!Artifact::applicable(VERSION_1_2_5).contains(&Artifact::Results));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Artifact {
    /// Specimen geometry and composition
    Specimen,
    /// Physical model selections
    Model,
    /// Microscope and detector settings
    Microscope,
    /// Simulation control parameters
    Parameters,
    /// X-ray map parameters
    Map,
    /// Result computation flags
    Results,
    /// Signal to noise parameters
    Snr,
}

impl Artifact {
    /// Every artifact in the order the simulator lists them
    pub const ALL: [Artifact; 7] = [
        Artifact::Specimen,
        Artifact::Model,
        Artifact::Microscope,
        Artifact::Parameters,
        Artifact::Map,
        Artifact::Results,
        Artifact::Snr,
    ];

    /// File extension without the leading dot
    pub fn extension(&self) -> &'static str {
        match self {
            Artifact::Specimen => "sam",
            Artifact::Model => "mdl",
            Artifact::Microscope => "mic",
            Artifact::Parameters => "par",
            Artifact::Map => "mpp",
            Artifact::Results => "rp",
            Artifact::Snr => "snp",
        }
    }

    /// Find the artifact for an extension, with or without the leading dot
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.');
        Self::ALL
            .into_iter()
            .find(|artifact| artifact.extension().eq_ignore_ascii_case(extension))
    }

    /// Version condition for the artifact to exist
    pub fn gate(&self) -> Gate {
        match self {
            Artifact::Results => Gate::Since(VERSION_1_4_0),
            _ => Gate::Always,
        }
    }

    /// Ordered list of artifacts that exist for a schema version
    pub fn applicable(version: SchemaVersion) -> Vec<Artifact> {
        Self::ALL
            .into_iter()
            .filter(|artifact| artifact.gate().admits(version))
            .collect()
    }

    /// Full file name for a simulation base name
    pub fn file_name(&self, base_name: &str) -> String {
        format!("{base_name}.{}", self.extension())
    }
}

impl std::fmt::Display for Artifact {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
