// crate modules
use crate::codec::Deck;
use crate::error::{Error, Result};
use crate::field::{Field, Format, Value};
use crate::model::{ModelChoice, ModelFamily};

// xtools modules
use xtools_schema::{Artifact, SchemaVersion, CURRENT_VERSION, VERSION_1_2_0, VERSION_1_2_2, VERSION_1_4_2};

// external crates
use serde::{Deserialize, Serialize};

/// Physics model selection (`.mdl`)
///
/// One [ModelChoice] per [ModelFamily]. Families introduced after the first
/// schema are `Option` and cleared for older versions.
///
/// ```rust
/// # use xtools_deck::{Deck, ModelFamily, Models};
/// # use xtools_schema::{VERSION_1_1_1, VERSION_1_5_2};
/// let models = Models::new(VERSION_1_1_1);
/// assert!(models.get(ModelFamily::AtomMac).is_none());
///
/// let models = Models::new(VERSION_1_5_2);
/// assert_eq!(models.get(ModelFamily::AtomMac).unwrap().code(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Models {
    /// Schema version of the deck
    pub version: SchemaVersion,
    /// Mean ionization potential of an atom
    pub atom_mean_ionization_potential: ModelChoice,
    /// Continuous energy loss of electrons
    pub atom_energy_loss: ModelChoice,
    /// Screening of the atomic potential
    pub atom_screening: ModelChoice,
    /// Total elastic cross section
    pub atom_cross_section: ModelChoice,
    /// Screening used by the elastic cross section, since 1.2.0
    pub atom_cross_section_screening: Option<ModelChoice>,
    /// Angular distribution of elastic collisions
    pub atom_collision: ModelChoice,
    /// Screening used by the collision model, since 1.2.0
    pub atom_collision_screening: Option<ModelChoice>,
    /// Electron range
    pub atom_electron_range: ModelChoice,
    /// Characteristic x-ray ionization cross section
    pub xray_cs_characteristic: ModelChoice,
    /// Bremsstrahlung cross section
    pub xray_cs_bremsstrahlung: ModelChoice,
    /// Mass absorption coefficients, since 1.2.2
    pub atom_mac: Option<ModelChoice>,
    /// Energy loss at the sample level, since 1.4.2
    pub sample_energy_loss: Option<ModelChoice>,
}

impl Models {
    /// Current choice for a family, `None` for families absent from the record
    pub fn get(&self, family: ModelFamily) -> Option<ModelChoice> {
        match family {
            ModelFamily::AtomMeanIonizationPotential => Some(self.atom_mean_ionization_potential),
            ModelFamily::AtomEnergyLoss => Some(self.atom_energy_loss),
            ModelFamily::AtomScreening => Some(self.atom_screening),
            ModelFamily::AtomCrossSection => Some(self.atom_cross_section),
            ModelFamily::AtomCrossSectionScreening => self.atom_cross_section_screening,
            ModelFamily::AtomCollision => Some(self.atom_collision),
            ModelFamily::AtomCollisionScreening => self.atom_collision_screening,
            ModelFamily::AtomElectronRange => Some(self.atom_electron_range),
            ModelFamily::XrayCsCharacteristic => Some(self.xray_cs_characteristic),
            ModelFamily::XrayCsBremsstrahlung => Some(self.xray_cs_bremsstrahlung),
            ModelFamily::AtomMac => self.atom_mac,
            ModelFamily::SampleEnergyLoss => self.sample_energy_loss,
        }
    }

    /// Replace the choice for the family of `choice`
    pub fn set(&mut self, choice: ModelChoice) {
        match choice.family() {
            ModelFamily::AtomMeanIonizationPotential => self.atom_mean_ionization_potential = choice,
            ModelFamily::AtomEnergyLoss => self.atom_energy_loss = choice,
            ModelFamily::AtomScreening => self.atom_screening = choice,
            ModelFamily::AtomCrossSection => self.atom_cross_section = choice,
            ModelFamily::AtomCrossSectionScreening => {
                self.atom_cross_section_screening = Some(choice)
            }
            ModelFamily::AtomCollision => self.atom_collision = choice,
            ModelFamily::AtomCollisionScreening => self.atom_collision_screening = Some(choice),
            ModelFamily::AtomElectronRange => self.atom_electron_range = choice,
            ModelFamily::XrayCsCharacteristic => self.xray_cs_characteristic = choice,
            ModelFamily::XrayCsBremsstrahlung => self.xray_cs_bremsstrahlung = choice,
            ModelFamily::AtomMac => self.atom_mac = Some(choice),
            ModelFamily::SampleEnergyLoss => self.sample_energy_loss = Some(choice),
        }
    }

    /// Every family present in the record, in deck order
    pub fn choices(&self) -> Vec<ModelChoice> {
        ModelFamily::ALL
            .iter()
            .filter_map(|family| self.get(*family))
            .collect()
    }
}

impl Default for Models {
    fn default() -> Self {
        Self {
            version: CURRENT_VERSION,
            atom_mean_ionization_potential: default(ModelFamily::AtomMeanIonizationPotential),
            atom_energy_loss: default(ModelFamily::AtomEnergyLoss),
            atom_screening: default(ModelFamily::AtomScreening),
            atom_cross_section: default(ModelFamily::AtomCrossSection),
            atom_cross_section_screening: Some(default(ModelFamily::AtomCrossSectionScreening)),
            atom_collision: default(ModelFamily::AtomCollision),
            atom_collision_screening: Some(default(ModelFamily::AtomCollisionScreening)),
            atom_electron_range: default(ModelFamily::AtomElectronRange),
            xray_cs_characteristic: default(ModelFamily::XrayCsCharacteristic),
            xray_cs_bremsstrahlung: default(ModelFamily::XrayCsBremsstrahlung),
            atom_mac: Some(default(ModelFamily::AtomMac)),
            sample_energy_loss: Some(default(ModelFamily::SampleEnergyLoss)),
        }
    }
}

fn default(family: ModelFamily) -> ModelChoice {
    ModelChoice::default_for(family)
}

impl Deck for Models {
    const TITLE: &'static str = "MODEL PARAMETERS";

    const ARTIFACT: Option<Artifact> = Some(Artifact::Model);

    const FIELDS: &'static [Field] = &[
        Field::always(
            "AtomMeanIonizationPotModel",
            Format::Model(ModelFamily::AtomMeanIonizationPotential),
        ),
        Field::always(
            "AtomEnergyLossModel",
            Format::Model(ModelFamily::AtomEnergyLoss),
        ),
        Field::always(
            "AtomScreeningModel",
            Format::Model(ModelFamily::AtomScreening),
        ),
        Field::always(
            "AtomCrossSectionModel",
            Format::Model(ModelFamily::AtomCrossSection),
        ),
        Field::since(
            "AtomCrossSectionScreeningModel",
            VERSION_1_2_0,
            Format::Model(ModelFamily::AtomCrossSectionScreening),
        ),
        Field::always(
            "AtomCollisionModel",
            Format::Model(ModelFamily::AtomCollision),
        ),
        Field::since(
            "AtomCollisionScreeningModel",
            VERSION_1_2_0,
            Format::Model(ModelFamily::AtomCollisionScreening),
        ),
        Field::always(
            "AtomElectronRangeModel",
            Format::Model(ModelFamily::AtomElectronRange),
        ),
        Field::always(
            "XRayCSCharacteristicModel",
            Format::Model(ModelFamily::XrayCsCharacteristic),
        ),
        Field::always(
            "XRayCSBremsstrahlungModel",
            Format::Model(ModelFamily::XrayCsBremsstrahlung),
        ),
        Field::since(
            "AtomMacModel",
            VERSION_1_2_2,
            Format::Model(ModelFamily::AtomMac),
        ),
        Field::since(
            "SampleEnergyLossModel",
            VERSION_1_4_2,
            Format::Model(ModelFamily::SampleEnergyLoss),
        ),
    ];

    fn version(&self) -> SchemaVersion {
        self.version
    }

    fn set_version(&mut self, version: SchemaVersion) {
        self.version = version;
    }

    fn value(&self, key: &str) -> Option<Value> {
        let family = ModelFamily::from_key(key)?;
        self.get(family).map(Value::Model)
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let Some(family) = ModelFamily::from_key(key) else {
            return Err(Error::UnknownKey {
                key: key.to_string(),
            });
        };
        let choice = value.into_model(key)?;
        if choice.family() != family {
            return Err(Error::ValueKindMismatch {
                key: key.to_string(),
            });
        }
        self.set(choice);
        Ok(())
    }

    fn clear_value(&mut self, key: &str) {
        match ModelFamily::from_key(key) {
            Some(ModelFamily::AtomCrossSectionScreening) => self.atom_cross_section_screening = None,
            Some(ModelFamily::AtomCollisionScreening) => self.atom_collision_screening = None,
            Some(ModelFamily::AtomMac) => self.atom_mac = None,
            Some(ModelFamily::SampleEnergyLoss) => self.sample_energy_loss = None,
            _ => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_families() {
        assert_eq!(Models::FIELDS.len(), ModelFamily::ALL.len());
        for (field, family) in Models::FIELDS.iter().zip(ModelFamily::ALL) {
            assert_eq!(field.key, family.key());
            assert_eq!(field.gate, family.gate());
        }
    }

    #[test]
    fn wrong_family_is_rejected() {
        let mut models = Models::default();
        let choice = ModelChoice::default_for(ModelFamily::AtomMac);
        let result = models.set_value("AtomScreeningModel", choice.into());
        assert!(matches!(result, Err(Error::ValueKindMismatch { .. })));
    }

    #[test]
    fn choices_follow_version() {
        assert_eq!(Models::new(xtools_schema::VERSION_1_1_1).choices().len(), 8);
        assert_eq!(Models::new(CURRENT_VERSION).choices().len(), 12);
    }
}
