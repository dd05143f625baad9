// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::{Error, Result};
use crate::parsers::indexed;
use crate::table::Table;
use crate::tags;

// xtools modules
use xtools_schema::SchemaVersion;
use xtools_utils::{f, StringExt};

// external crates
use log::debug;
use serde::{Deserialize, Serialize};

/// Simulated spectra of every region
///
/// ```text
/// Simulated Spectra:
/// Number of regions = 1
/// Region 0 spectrum
/// Energy Total Background Characteristic
/// 0.005 0.0 0.0 0.0
/// ...
///
/// Region 0 number of elements = 2
/// Elements: Al Mg
/// Element Al spectrum
/// Energy Total Background Characteristic
/// ...
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectra {
    /// One entry per region, in file order
    pub regions: Vec<RegionSpectra>,
}

/// Total spectrum of a region and the partial spectrum of each of its elements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpectra {
    /// Index of the region in the specimen
    pub index: usize,
    /// Spectrum of the whole region
    pub spectrum: Table,
    /// `(symbol, spectrum)` for every element of the region
    pub elements: Vec<(String, Table)>,
}

impl RegionSpectra {
    /// Partial spectrum of an element
    pub fn element(&self, symbol: &str) -> Option<&Table> {
        self.elements
            .iter()
            .find(|(s, _)| *s == symbol.as_symbol())
            .map(|(_, table)| table)
    }
}

impl ResultSection for Spectra {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("--------------------------");
        debug!(" Parsing Simulated Spectra ");
        debug!("--------------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::SPECTRA)?;

        let n_regions = cursor.count(tags::NUMBER_OF_REGIONS)?;
        debug!("Regions     = {n_regions}");

        let mut regions = Vec::with_capacity(cursor.capacity(n_regions));
        for i in 0..n_regions {
            cursor
                .expect_index(tags::REGION, i)
                .map_err(|_| Error::TagNotFound {
                    tag: f!("{} {i} {}", tags::REGION, tags::SPECTRUM),
                })?;
            regions.push(cursor.read::<RegionSpectra>()?);
        }

        Ok((Self { regions }, cursor.position()))
    }
}

impl ResultSection for RegionSpectra {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        let mut cursor = LineCursor::new(lines, version);

        let title = cursor.expect_tag(tags::REGION)?;
        let (_, index) = indexed(tags::REGION, title)?;
        if !title.ends_with(tags::SPECTRUM) {
            return Err(Error::TagNotFound {
                tag: f!("{} {index} {}", tags::REGION, tags::SPECTRUM),
            });
        }
        let spectrum = Table::read_from_cursor(&mut cursor)?;
        debug!("Region {index}: {} channels", spectrum.len());

        let n_elements = cursor.count(&f!(
            "{} {index} {}",
            tags::REGION,
            tags::REGION_NUMBER_OF_ELEMENTS
        ))?;
        let symbols = element_list(&mut cursor)?;
        if symbols.len() != n_elements {
            return Err(Error::UnexpectedLength {
                expected: n_elements,
                found: symbols.len(),
            });
        }

        let mut elements = Vec::with_capacity(cursor.capacity(n_elements));
        for symbol in symbols {
            cursor.expect_tag(&f!("{} {symbol} {}", tags::ELEMENT, tags::SPECTRUM))?;
            let table = Table::read_from_cursor(&mut cursor)?;
            debug!("  {symbol:<3}: {} channels", table.len());
            elements.push((symbol, table));
        }

        let region = Self {
            index,
            spectrum,
            elements,
        };
        Ok((region, cursor.position()))
    }
}

/// Symbols listed on the line following the element count
fn element_list<S: AsRef<str>>(cursor: &mut LineCursor<S>) -> Result<Vec<String>> {
    cursor.skip_blank_lines();
    let line = cursor.next_line()?;
    let list = line.strip_prefix(tags::ELEMENT_LIST).unwrap_or(line);
    Ok(list.split_whitespace().map(|s| s.as_symbol()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use xtools_schema::CURRENT_VERSION;

    #[test]
    fn regions_are_numbered_in_order() {
        let lines = [
            "Simulated Spectra:",
            "Number of regions = 1",
            "Region 7 spectrum",
            "Energy Total",
            "0.005 1.0",
        ];
        match Spectra::read_from_lines(&lines, CURRENT_VERSION) {
            Err(Error::TagNotFound { tag }) => assert_eq!(tag, "Region 0 spectrum"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn more_regions_than_lines() {
        let count = f!("{} = {}", tags::NUMBER_OF_REGIONS, usize::MAX);
        let lines = ["Simulated Spectra:", count.as_str()];
        match Spectra::read_from_lines(&lines, CURRENT_VERSION) {
            Err(Error::TagNotFound { tag }) => assert_eq!(tag, "Region 0 spectrum"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
