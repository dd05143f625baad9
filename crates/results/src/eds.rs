// crate modules
use crate::cursor::{LineCursor, ResultSection};
use crate::error::{Error, Result};
use crate::parsers::{bracketed_count, indexed, peak_intensity, reference_peak};
use crate::tags;

// xtools modules
use xtools_schema::SchemaVersion;
use xtools_utils::StringExt;

// external crates
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Spectra as measured by the EDS detector, available from schema 1.5.0
///
/// ```text
/// EDS Spectra:
/// Number of channels = 4
/// Partial spectra reference start
/// 0.005 0.010 0.015 0.020
/// Partial spectra reference peaks
/// Al Ka 1.4865
/// Partial spectra reference end
/// Number of regions = 1
/// Region 0
/// Number of characteristic peaks in region = 1
/// I_Out[channel]
/// 0.0 1.0 2.0 1.0
/// I_Brem[channel]
/// 0.0 0.5 0.5 0.5
/// P_I (char)(1)
/// Al Ka 1.4865 1520.5
/// E_Net[peak][channel](1)
/// 0.0 0.5 1.5 0.5
/// ```
///
/// The test input section written by debug builds of the simulator is not
/// supported, and reading it fails with [Error::NotImplemented].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectraEds {
    /// Number of detector channels
    pub number_channels: usize,
    /// Reference data for the partial spectra, if exported
    pub reference: Option<PartialSpectraReference>,
    /// One entry per region, in file order
    pub regions: Vec<RegionEds>,
}

/// Channel energies and reference peaks shared by every region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialSpectraReference {
    /// Energy of every channel (keV)
    pub channel_energies_kev: Vec<f64>,
    /// Characteristic peaks the partial spectra refer to
    pub peaks: Vec<ReferencePeak>,
}

/// A characteristic line of an element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferencePeak {
    /// Chemical symbol
    pub symbol: String,
    /// Siegbahn name of the line, e.g. `Ka`
    pub line: String,
    /// Line energy (keV)
    pub energy_kev: f64,
}

/// Intensity of a characteristic peak in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakIntensity {
    /// The characteristic line
    pub peak: ReferencePeak,
    /// Integrated intensity
    pub intensity: f64,
}

/// Detector spectra for one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEds {
    /// Index of the region in the specimen
    pub index: usize,
    /// Total detected intensity per channel
    pub i_out: Vec<f64>,
    /// Bremsstrahlung intensity per channel
    pub i_brem: Vec<f64>,
    /// Intensity of every characteristic peak
    pub peak_intensities: Vec<PeakIntensity>,
    /// Net spectrum of every characteristic peak, each of `i_out` length
    pub e_net: Vec<Vec<f64>>,
}

impl ResultSection for SpectraEds {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        debug!("--------------------");
        debug!(" Parsing EDS Spectra ");
        debug!("--------------------");

        let mut cursor = LineCursor::new(lines, version);
        cursor.expect_tag(tags::EDS)?;

        let number_channels = cursor.count(tags::NUMBER_OF_EDS_CHANNELS)?;
        debug!("Channels    = {number_channels}");

        if cursor.peek_tag(tags::TEST_INPUT) {
            return Err(Error::NotImplemented(tags::TEST_INPUT.to_string()));
        }

        let reference = match cursor.peek_tag(tags::REFERENCE_START) {
            true => Some(read_reference(&mut cursor, number_channels)?),
            false => None,
        };

        let n_regions = cursor.count(tags::NUMBER_OF_REGIONS)?;
        debug!("Regions     = {n_regions}");

        let mut regions = Vec::with_capacity(cursor.capacity(n_regions));
        for i in 0..n_regions {
            cursor.expect_index(tags::REGION, i)?;
            let region = cursor.read::<RegionEds>()?;
            if region.i_out.len() != number_channels {
                return Err(Error::UnexpectedLength {
                    expected: number_channels,
                    found: region.i_out.len(),
                });
            }
            regions.push(region);
        }

        let eds = Self {
            number_channels,
            reference,
            regions,
        };
        Ok((eds, cursor.position()))
    }
}

impl ResultSection for RegionEds {
    fn read_from_lines<S: AsRef<str>>(
        lines: &[S],
        version: SchemaVersion,
    ) -> Result<(Self, usize)> {
        let mut cursor = LineCursor::new(lines, version);

        let title = cursor.expect_tag(tags::REGION)?;
        let (_, index) = indexed(tags::REGION, title)?;
        let n_peaks = cursor.count(tags::NUMBER_OF_PEAKS)?;
        debug!("Region {index}: {n_peaks} peaks");

        cursor.expect_tag(tags::I_OUT)?;
        let i_out = cursor.values(tags::I_OUT)?;
        let n_channels = i_out.len();

        cursor.expect_tag(tags::I_BREM)?;
        let i_brem = same_length(cursor.values(tags::I_BREM)?, n_channels)?;

        expect_count(&mut cursor, tags::P_I, n_peaks)?;
        let mut peak_intensities = Vec::with_capacity(cursor.capacity(n_peaks));
        for _ in 0..n_peaks {
            let (_, (symbol, line, energy_kev, intensity)) = peak_intensity(cursor.next_line()?)?;
            peak_intensities.push(PeakIntensity {
                peak: ReferencePeak {
                    symbol: symbol.as_symbol(),
                    line: line.to_string(),
                    energy_kev,
                },
                intensity,
            });
        }

        expect_count(&mut cursor, tags::E_NET, n_peaks)?;
        let mut e_net = Vec::with_capacity(cursor.capacity(n_peaks));
        for _ in 0..n_peaks {
            e_net.push(same_length(cursor.values(tags::E_NET)?, n_channels)?);
        }
        trace!("  {} net spectra of {n_channels} channels", e_net.len());

        let region = Self {
            index,
            i_out,
            i_brem,
            peak_intensities,
            e_net,
        };
        Ok((region, cursor.position()))
    }
}

/// Delimited reference block, from the start marker to the end marker
fn read_reference<S: AsRef<str>>(
    cursor: &mut LineCursor<S>,
    number_channels: usize,
) -> Result<PartialSpectraReference> {
    cursor.expect_tag(tags::REFERENCE_START)?;
    let channel_energies_kev = same_length(cursor.values(tags::REFERENCE_START)?, number_channels)?;

    cursor.expect_tag(tags::REFERENCE_PEAKS)?;
    let mut peaks = Vec::new();
    loop {
        let line = cursor.next_line()?;
        if line.starts_with(tags::REFERENCE_END) {
            break;
        }
        let (_, (symbol, line, energy_kev)) = reference_peak(line)?;
        peaks.push(ReferencePeak {
            symbol: symbol.as_symbol(),
            line: line.to_string(),
            energy_kev,
        });
    }
    debug!("Reference   = {} peaks", peaks.len());

    Ok(PartialSpectraReference {
        channel_energies_kev,
        peaks,
    })
}

/// Block title carrying a repetition count, which must match the announced one
fn expect_count<S: AsRef<str>>(cursor: &mut LineCursor<S>, title: &str, expected: usize) -> Result<()> {
    let line = cursor.expect_tag(title)?;
    let (_, found) = bracketed_count(title, line)?;
    if found != expected {
        return Err(Error::UnexpectedLength { expected, found });
    }
    Ok(())
}

fn same_length(values: Vec<f64>, expected: usize) -> Result<Vec<f64>> {
    match values.len() == expected {
        true => Ok(values),
        false => Err(Error::UnexpectedLength {
            expected,
            found: values.len(),
        }),
    }
}
