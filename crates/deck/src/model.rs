//! Physical model families and their selectable choices

// crate modules
use crate::error::{Error, Result};

// xtools modules
use xtools_schema::{Gate, VERSION_1_2_0, VERSION_1_2_2, VERSION_1_4_2};

// external crates
use serde::{Deserialize, Serialize};

/// A named set of mutually exclusive physics models
///
/// Every family is a closed table of numeric codes, each with a canonical
/// display name. The code is what appears in a `.mdl` deck, while the display
/// name is what the simulator prints in its result files.
///
/// | Family                        | Deck key                         | Since   |
/// | ----------------------------- | -------------------------------- | ------- |
/// | `AtomMeanIonizationPotential` | `AtomMeanIonizationPotModel`     | 1.1.1   |
/// | `AtomEnergyLoss`              | `AtomEnergyLossModel`            | 1.1.1   |
/// | `AtomScreening`               | `AtomScreeningModel`             | 1.1.1   |
/// | `AtomCrossSection`            | `AtomCrossSectionModel`          | 1.1.1   |
/// | `AtomCrossSectionScreening`   | `AtomCrossSectionScreeningModel` | 1.2.0   |
/// | `AtomCollision`               | `AtomCollisionModel`             | 1.1.1   |
/// | `AtomCollisionScreening`      | `AtomCollisionScreeningModel`    | 1.2.0   |
/// | `AtomElectronRange`           | `AtomElectronRangeModel`         | 1.1.1   |
/// | `XrayCsCharacteristic`        | `XRayCSCharacteristicModel`      | 1.1.1   |
/// | `XrayCsBremsstrahlung`        | `XRayCSBremsstrahlungModel`      | 1.1.1   |
/// | `AtomMac`                     | `AtomMacModel`                   | 1.2.2   |
/// | `SampleEnergyLoss`            | `SampleEnergyLossModel`          | 1.4.2   |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    /// Mean ionization potential of an atom
    AtomMeanIonizationPotential,
    /// Continuous energy loss of electrons
    AtomEnergyLoss,
    /// Screening of the atomic potential
    AtomScreening,
    /// Total elastic cross section
    AtomCrossSection,
    /// Screening used by the elastic cross section
    AtomCrossSectionScreening,
    /// Angular distribution of elastic collisions
    AtomCollision,
    /// Screening used by the collision model
    AtomCollisionScreening,
    /// Electron range
    AtomElectronRange,
    /// Characteristic x-ray ionization cross section
    XrayCsCharacteristic,
    /// Bremsstrahlung cross section
    XrayCsBremsstrahlung,
    /// Mass absorption coefficients
    AtomMac,
    /// Energy loss at the sample level
    SampleEnergyLoss,
}

impl ModelFamily {
    /// Every family in the order they appear in decks and result files
    pub const ALL: [ModelFamily; 12] = [
        ModelFamily::AtomMeanIonizationPotential,
        ModelFamily::AtomEnergyLoss,
        ModelFamily::AtomScreening,
        ModelFamily::AtomCrossSection,
        ModelFamily::AtomCrossSectionScreening,
        ModelFamily::AtomCollision,
        ModelFamily::AtomCollisionScreening,
        ModelFamily::AtomElectronRange,
        ModelFamily::XrayCsCharacteristic,
        ModelFamily::XrayCsBremsstrahlung,
        ModelFamily::AtomMac,
        ModelFamily::SampleEnergyLoss,
    ];

    /// Key used in the `.mdl` deck
    pub fn key(&self) -> &'static str {
        match self {
            Self::AtomMeanIonizationPotential => "AtomMeanIonizationPotModel",
            Self::AtomEnergyLoss => "AtomEnergyLossModel",
            Self::AtomScreening => "AtomScreeningModel",
            Self::AtomCrossSection => "AtomCrossSectionModel",
            Self::AtomCrossSectionScreening => "AtomCrossSectionScreeningModel",
            Self::AtomCollision => "AtomCollisionModel",
            Self::AtomCollisionScreening => "AtomCollisionScreeningModel",
            Self::AtomElectronRange => "AtomElectronRangeModel",
            Self::XrayCsCharacteristic => "XRayCSCharacteristicModel",
            Self::XrayCsBremsstrahlung => "XRayCSBremsstrahlungModel",
            Self::AtomMac => "AtomMacModel",
            Self::SampleEnergyLoss => "SampleEnergyLossModel",
        }
    }

    /// Label printed before the model name in result files
    pub fn label(&self) -> &'static str {
        match self {
            Self::AtomMeanIonizationPotential => "Atom Mean Ionization Potential",
            Self::AtomEnergyLoss => "Atom Energy Loss",
            Self::AtomScreening => "Atom Screening",
            Self::AtomCrossSection => "Atom Cross Section",
            Self::AtomCrossSectionScreening => "Atom Cross Section Screening",
            Self::AtomCollision => "Atom Collision",
            Self::AtomCollisionScreening => "Atom Collision Screening",
            Self::AtomElectronRange => "Atom Electron Range",
            Self::XrayCsCharacteristic => "X-ray Characteristic Cross Section",
            Self::XrayCsBremsstrahlung => "X-ray Bremsstrahlung Cross Section",
            Self::AtomMac => "Atom Mass Absorption Coefficient",
            Self::SampleEnergyLoss => "Sample Energy Loss",
        }
    }

    /// Version condition for the family to exist
    pub fn gate(&self) -> Gate {
        match self {
            Self::AtomCrossSectionScreening | Self::AtomCollisionScreening => {
                Gate::Since(VERSION_1_2_0)
            }
            Self::AtomMac => Gate::Since(VERSION_1_2_2),
            Self::SampleEnergyLoss => Gate::Since(VERSION_1_4_2),
            _ => Gate::Always,
        }
    }

    /// Table of `(code, display name)` pairs
    pub fn members(&self) -> &'static [(u32, &'static str)] {
        match self {
            Self::AtomMeanIonizationPotential => &[
                (0, "Joy & Luo 1989"),
                (1, "Berger & Seltzer 1983"),
                (2, "Sternheimer 1964"),
            ],
            Self::AtomEnergyLoss => &[
                (0, "Bethe 1930"),
                (1, "Bethe relativistic"),
                (2, "Joy & Luo 1989"),
            ],
            Self::AtomScreening => &[
                (0, "Henoc & Maurice 1991"),
                (1, "Bishop 1976"),
                (2, "Nigam 1959"),
            ],
            Self::AtomCrossSection | Self::AtomCollision => &[
                (0, "Browning 1994"),
                (1, "Gauvin & Drouin 1993"),
                (2, "ELSEPA 2005"),
            ],
            Self::AtomCrossSectionScreening | Self::AtomCollisionScreening => {
                &[(0, "Henoc & Maurice 1991"), (1, "Nigam 1959")]
            }
            Self::AtomElectronRange => &[(0, "Kanaya & Okayama 1972"), (1, "Bethe range")],
            Self::XrayCsCharacteristic => &[
                (0, "Green & Cosslett 1961"),
                (1, "Bote 2009"),
                (2, "Casnati 1982"),
            ],
            Self::XrayCsBremsstrahlung => &[
                (0, "Bethe & Heitler 1934"),
                (1, "Kirkpatrick & Wiedmann 1945"),
                (2, "Ding 2002"),
                (3, "Gauvin 2006"),
            ],
            Self::AtomMac => &[
                (0, "Heinrich 1986"),
                (1, "Henke 1993"),
                (2, "Chantler 2005"),
            ],
            Self::SampleEnergyLoss => &[(0, "Continuous slowing down"), (1, "Discrete losses")],
        }
    }

    /// Canonical choice for a freshly created deck
    pub fn default_code(&self) -> u32 {
        match self {
            Self::XrayCsBremsstrahlung => 3,
            Self::AtomCrossSection | Self::AtomCollision => 1,
            _ => 0,
        }
    }

    /// Display name of a code, if it belongs to the family
    pub fn name_of(&self, code: u32) -> Option<&'static str> {
        self.members()
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
    }

    /// Code of an exact display name, if it belongs to the family
    pub fn code_of(&self, name: &str) -> Option<u32> {
        let name = name.trim();
        self.members()
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(code, _)| *code)
    }

    /// Find the family for a deck key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|family| family.key() == key)
    }
}

impl std::fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The current selection within one [ModelFamily]
///
/// ```rust
/// # use xtools_deck::{ModelChoice, ModelFamily};
/// let mut model = ModelChoice::default_for(ModelFamily::XrayCsBremsstrahlung);
/// assert_eq!(model.name(), "Gauvin 2006");
///
/// // set by index
/// model.set_code(2).unwrap();
/// assert_eq!(model.name(), "Ding 2002");
///
/// // or from free text containing the display name
/// model.set_from_text("    X-ray Bremsstrahlung Cross Section: Bethe & Heitler 1934").unwrap();
/// assert_eq!(model.code(), 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelChoice {
    family: ModelFamily,
    code: u32,
}

impl ModelChoice {
    /// Select a model by code, failing for codes outside of the family
    pub fn new(family: ModelFamily, code: u32) -> Result<Self> {
        match family.name_of(code) {
            Some(_) => Ok(Self { family, code }),
            None => Err(Error::UnknownModelCode { family, code }),
        }
    }

    /// Canonical choice of a family
    pub fn default_for(family: ModelFamily) -> Self {
        Self {
            family,
            code: family.default_code(),
        }
    }

    /// Resolve a model from free text that contains its display name
    ///
    /// The longest matching name wins, so that e.g. `Bethe relativistic` is
    /// never mistaken for a shorter name it happens to contain.
    pub fn from_text(family: ModelFamily, text: &str) -> Result<Self> {
        let lowercase = text.to_lowercase();
        family
            .members()
            .iter()
            .filter(|(_, name)| lowercase.contains(&name.to_lowercase()))
            .max_by_key(|(_, name)| name.len())
            .map(|(code, _)| Self {
                family,
                code: *code,
            })
            .ok_or_else(|| Error::UnknownModelName {
                family,
                text: text.trim().to_string(),
            })
    }

    /// Family this choice belongs to
    pub fn family(&self) -> ModelFamily {
        self.family
    }

    /// Numeric code written to decks
    pub fn code(&self) -> u32 {
        self.code
    }

    /// Canonical display name
    pub fn name(&self) -> &'static str {
        // codes are validated on every mutation
        self.family.name_of(self.code).unwrap_or_default()
    }

    /// Change the selection by code
    pub fn set_code(&mut self, code: u32) -> Result<()> {
        *self = Self::new(self.family, code)?;
        Ok(())
    }

    /// Change the selection from free text containing a display name
    pub fn set_from_text(&mut self, text: &str) -> Result<()> {
        *self = Self::from_text(self.family, text)?;
        Ok(())
    }
}

impl std::fmt::Display for ModelChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_name_round_trip() {
        for family in ModelFamily::ALL {
            for (code, _) in family.members() {
                let name = family.name_of(*code).unwrap();
                assert_eq!(family.code_of(name), Some(*code));
            }
        }
    }

    #[test]
    fn names_are_unique_within_family() {
        for family in ModelFamily::ALL {
            let members = family.members();
            for (i, (_, a)) in members.iter().enumerate() {
                for (_, b) in &members[i + 1..] {
                    assert_ne!(a, b, "{family:?}");
                }
            }
        }
    }

    #[test]
    fn defaults_are_members() {
        for family in ModelFamily::ALL {
            assert!(family.name_of(family.default_code()).is_some());
        }
    }

    #[test]
    fn keys_resolve_to_families() {
        for family in ModelFamily::ALL {
            assert_eq!(ModelFamily::from_key(family.key()), Some(family));
        }
    }

    #[test]
    fn longest_name_wins() {
        let model = ModelChoice::from_text(ModelFamily::AtomEnergyLoss, "Bethe relativistic");
        assert_eq!(model.unwrap().code(), 1);
    }

    #[test]
    fn unknown_codes_and_names() {
        assert!(matches!(
            ModelChoice::new(ModelFamily::AtomMac, 7),
            Err(Error::UnknownModelCode { code: 7, .. })
        ));
        assert!(matches!(
            ModelChoice::from_text(ModelFamily::AtomMac, "Atom Mass Absorption Coefficient: Bob"),
            Err(Error::UnknownModelName { .. })
        ));
    }

    #[test]
    fn failed_mutation_keeps_selection() {
        let mut model = ModelChoice::default_for(ModelFamily::AtomScreening);
        assert!(model.set_code(99).is_err());
        assert_eq!(model.code(), 0);
    }
}
