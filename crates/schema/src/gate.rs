use crate::version::SchemaVersion;

/// Version condition attached to a key, an artifact, or a result section
///
/// Every item carries at most one gate. A field renamed at some version is
/// described by two items, one [Gate::Before] and one [Gate::Since] at the
/// same threshold, so the two can never be present together.
///
/// ```rust
/// # use xtools_schema::{Gate, VERSION_1_2_0, VERSION_1_1_1, VERSION_1_4_0};
/// let gate = Gate::Since(VERSION_1_2_0);
/// assert!(!gate.admits(VERSION_1_1_1));
/// assert!(gate.admits(VERSION_1_2_0));
/// assert!(gate.admits(VERSION_1_4_0));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    /// Present in every schema
    #[default]
    Always,
    /// Present from this version onwards (inclusive)
    Since(SchemaVersion),
    /// Present only in versions strictly older than this one
    Before(SchemaVersion),
}

impl Gate {
    /// Check if a schema version passes the gate
    pub fn admits(&self, version: SchemaVersion) -> bool {
        match self {
            Gate::Always => true,
            Gate::Since(threshold) => version >= *threshold,
            Gate::Before(threshold) => version < *threshold,
        }
    }

    /// The version at which the gate changes state, if any
    pub fn threshold(&self) -> Option<SchemaVersion> {
        match self {
            Gate::Always => None,
            Gate::Since(threshold) | Gate::Before(threshold) => Some(*threshold),
        }
    }
}
