// crate modules
use crate::cursor::{LineCursor, ResultSection, Skipped};
use crate::error::{Error, Result};
use crate::parsers::{element_flags, indexed};
use crate::tags;

// xtools modules
use xtools_schema::SchemaVersion;
use xtools_utils::{f, StringExt};

// external crates
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Atomic shell of a characteristic x-ray line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Shell {
    /// K shell
    K,
    /// L shell
    L,
    /// M shell
    M,
}

impl Shell {
    /// Every shell in the order of the element flags
    pub const ALL: [Shell; 3] = [Shell::K, Shell::L, Shell::M];
}

impl std::fmt::Display for Shell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Phi-rho-z distributions of every region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhirhozResults {
    /// One entry per region, in file order
    pub regions: Vec<PhirhozRegion>,
}

/// Element of a region, with the shells that have a curve
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhirhozElement {
    /// Chemical symbol
    pub symbol: String,
    /// Atomic number
    pub atomic_number: u32,
    /// Flags for the K, L and M shells
    pub shells: [bool; 3],
}

impl PhirhozElement {
    /// Shells with a phi-rho-z curve, in K, L, M order
    pub fn computed_shells(&self) -> Vec<Shell> {
        Shell::ALL
            .into_iter()
            .zip(self.shells)
            .filter_map(|(shell, flag)| flag.then_some(shell))
            .collect()
    }
}

/// Background intensity for one energy window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowIntensity {
    /// Centre of the energy window (keV)
    pub energy_kev: f64,
    /// Intensity in the window
    pub intensity: f64,
}

/// Phi-rho-z data for one region of the specimen
///
/// ```text
/// Phi-rho-z for region 0
/// Region volume:
/// ...
///
/// Distribution:
/// ...
///
/// Number of elements = 2
/// Al 13 1 0 0
/// Mg 12 1 0 0
/// Number of energy windows = 2
/// Background generated:
/// 1.0 2.5e-3
/// 2.0 1.5e-3
/// Background emitted:
/// 1.0 2.1e-3
/// 2.0 1.4e-3
/// Phi-rho-z curve Al K
/// Number of depth bins = 3
/// ...
/// ```
///
/// The region volume and distribution sub-blocks are not interpreted and
/// only their sizes are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhirhozRegion {
    /// Index of the region in the specimen
    pub index: usize,
    /// Region volume sub-block
    pub volume: Skipped,
    /// Distribution sub-block
    pub distribution: Skipped,
    /// Elements of the region
    pub elements: Vec<PhirhozElement>,
    /// Background generated in each energy window
    pub background_generated: Vec<WindowIntensity>,
    /// Background emitted in each energy window
    pub background_emitted: Vec<WindowIntensity>,
    /// One curve per flagged (element, shell) pair, in file order
    pub curves: Vec<Phirhoz>,
}

impl PhirhozRegion {
    /// Curve for an element and shell, if it was computed
    pub fn curve(&self, symbol: &str, shell: Shell) -> Option<&Phirhoz> {
        self.curves
            .iter()
            .find(|c| c.shell == shell && c.symbol == symbol.as_symbol())
    }
}

/// Depth distribution of one characteristic line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phirhoz {
    /// Chemical symbol of the emitting element
    pub symbol: String,
    /// Ionised shell
    pub shell: Shell,
    /// Mass depth of each bin
    pub depths: Vec<f64>,
    /// Generated intensity of each bin
    pub generated: Vec<f64>,
    /// Emitted intensity of each bin
    pub emitted: Vec<f64>,
}

impl ResultSection for PhirhozResults {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("------------------");
        debug!(" Parsing Phi-rho-z ");
        debug!("------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::PHIRHOZ)?;

        let n_regions = cursor.count(tags::NUMBER_OF_REGIONS)?;
        debug!("Regions     = {n_regions}");

        let mut regions = Vec::with_capacity(cursor.capacity(n_regions));
        for i in 0..n_regions {
            cursor.expect_index(tags::PHIRHOZ_REGION, i)?;
            regions.push(cursor.read::<PhirhozRegion>()?);
        }

        Ok((Self { regions }, cursor.position()))
    }
}

impl ResultSection for PhirhozRegion {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        let mut cursor = LineCursor::new(lines, version);

        let title = cursor.expect_tag(tags::PHIRHOZ_REGION)?;
        let (_, index) = indexed(tags::PHIRHOZ_REGION, title)?;
        debug!("Region {index}");

        let volume = cursor.skip_block(tags::REGION_VOLUME)?;
        let distribution = cursor.skip_block(tags::DISTRIBUTION)?;
        trace!("Skipped {volume:?} and {distribution:?}");

        let n_elements = cursor.count(tags::NUMBER_OF_ELEMENTS)?;
        let mut elements = Vec::with_capacity(cursor.capacity(n_elements));
        for _ in 0..n_elements {
            let (_, (symbol, atomic_number, shells)) = element_flags(cursor.next_line()?)?;
            elements.push(PhirhozElement {
                symbol: symbol.as_symbol(),
                atomic_number,
                shells,
            });
        }

        let n_windows = cursor.count(tags::NUMBER_OF_WINDOWS)?;
        cursor.expect_tag(tags::BACKGROUND_GENERATED)?;
        let background_generated = windows(&mut cursor, n_windows)?;
        cursor.expect_tag(tags::BACKGROUND_EMITTED)?;
        let background_emitted = windows(&mut cursor, n_windows)?;

        let mut curves = Vec::new();
        for element in &elements {
            for shell in element.computed_shells() {
                let curve = cursor.read::<Phirhoz>()?;
                if curve.shell != shell || curve.symbol != element.symbol {
                    return Err(Error::TagNotFound {
                        tag: f!("{} {} {shell}", tags::PHIRHOZ_CURVE, element.symbol),
                    });
                }
                curves.push(curve);
            }
        }
        debug!("  {} elements, {} curves", elements.len(), curves.len());

        let region = Self {
            index,
            volume,
            distribution,
            elements,
            background_generated,
            background_emitted,
            curves,
        };
        Ok((region, cursor.position()))
    }
}

impl ResultSection for Phirhoz {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        let mut cursor = LineCursor::new(lines, version);

        let title = cursor.expect_tag(tags::PHIRHOZ_CURVE)?;
        let mut words = title[tags::PHIRHOZ_CURVE.len()..].split_whitespace();
        let (symbol, shell) = match (words.next(), words.next()) {
            (Some(symbol), Some("K")) => (symbol, Shell::K),
            (Some(symbol), Some("L")) => (symbol, Shell::L),
            (Some(symbol), Some("M")) => (symbol, Shell::M),
            _ => {
                return Err(Error::ParseError {
                    field: tags::PHIRHOZ_CURVE.to_string(),
                    raw_value: title.to_string(),
                })
            }
        };

        let n_bins = cursor.count(tags::NUMBER_OF_DEPTH_BINS)?;
        let capacity = cursor.capacity(n_bins);
        let mut curve = Self {
            symbol: symbol.as_symbol(),
            shell,
            depths: Vec::with_capacity(capacity),
            generated: Vec::with_capacity(capacity),
            emitted: Vec::with_capacity(capacity),
        };

        for _ in 0..n_bins {
            let row = cursor.values(tags::PHIRHOZ_CURVE)?;
            let &[depth, generated, emitted] = row.as_slice() else {
                return Err(Error::UnexpectedLength {
                    expected: 3,
                    found: row.len(),
                });
            };
            curve.depths.push(depth);
            curve.generated.push(generated);
            curve.emitted.push(emitted);
        }
        trace!("  {symbol} {shell}: {n_bins} depth bins");

        Ok((curve, cursor.position()))
    }
}

/// `W` lines of `energy intensity`
fn windows<S: AsRef<str>>(cursor: &mut LineCursor<S>, n_windows: usize) -> Result<Vec<WindowIntensity>> {
    (0..n_windows)
        .map(|_| {
            let row = cursor.values(tags::NUMBER_OF_WINDOWS)?;
            match row.as_slice() {
                &[energy_kev, intensity] => Ok(WindowIntensity {
                    energy_kev,
                    intensity,
                }),
                _ => Err(Error::UnexpectedLength {
                    expected: 2,
                    found: row.len(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::CURRENT_VERSION;

    #[test]
    fn curve() {
        let lines = [
            "Phi-rho-z curve Al K",
            "Number of depth bins = 2",
            "0.0 1.0 0.9",
            "1.0e-5 1.2 1.0",
        ];
        let (curve, consumed) = Phirhoz::read_from_lines(&lines, CURRENT_VERSION).unwrap();
        assert_eq!(curve.symbol, "Al");
        assert_eq!(curve.shell, Shell::K);
        assert_eq!(curve.depths, vec![0.0, 1.0e-5]);
        assert_eq!(curve.emitted, vec![0.9, 1.0]);
        assert_eq!(consumed, 4);
    }

    #[test]
    fn short_depth_row() {
        let lines = ["Phi-rho-z curve Al K", "Number of depth bins = 1", "0.0 1.0"];
        assert!(matches!(
            Phirhoz::read_from_lines(&lines, CURRENT_VERSION),
            Err(Error::UnexpectedLength { expected: 3, found: 2 })
        ));
    }

    #[test]
    fn more_depth_bins_than_lines() {
        let count = f!("{} = {}", tags::NUMBER_OF_DEPTH_BINS, usize::MAX);
        let lines = ["Phi-rho-z curve Al K", count.as_str(), "0.0 1.0 0.9"];
        assert!(matches!(
            Phirhoz::read_from_lines(&lines, CURRENT_VERSION),
            Err(Error::UnexpectedEndOfLines)
        ));
    }

    #[test]
    fn regions_are_numbered_in_order() {
        let lines = ["Phi-rho-z:", "Number of regions = 1", "Phi-rho-z for region 3"];
        match PhirhozResults::read_from_lines(&lines, CURRENT_VERSION) {
            Err(Error::TagNotFound { tag }) => assert_eq!(tag, "Phi-rho-z for region 0"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn element_shells() {
        let element = PhirhozElement {
            symbol: "Cu".to_string(),
            atomic_number: 29,
            shells: [true, true, false],
        };
        assert_eq!(element.computed_shells(), vec![Shell::K, Shell::L]);
    }
}
