//! Numeric tables with named columns, and their CSV exports
//!
//! The simulator writes its spectra as whitespace separated tables inside
//! the result file, and may also export them as CSV files. Both end up as a
//! [Table], where the first column is always the independent variable.

// standard library
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

// crate modules
use crate::cursor::LineCursor;
use crate::error::{Error, Result};
use crate::parsers::row_of_f64;

// external crates
use log::{info, trace};
use serde::{Deserialize, Serialize};

/// Rows of numbers under a header of column names
///
/// ```rust
/// # use xtools_results::Table;
/// let csv = "Energy,Total,Background\n0.005,1.0,0.5\n0.010,2.0,1.5\n";
/// let table = Table::from_csv_reader(csv.as_bytes()).unwrap();
///
/// assert_eq!(table.x(), vec![0.005, 0.010]);
/// assert_eq!(table.column("Background"), Some(vec![0.5, 1.5]));
///
/// for row in table.rows() {
///     assert!(row.get("Total").unwrap() > row.get("Background").unwrap());
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Column names, in file order
    pub columns: Vec<String>,
    /// Values, one inner vector per row with one value per column
    pub values: Vec<Vec<f64>>,
}

impl Table {
    /// Empty table with the given column names
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            values: Vec::new(),
        }
    }

    /// Add a row, which must have a value for every column
    pub fn push(&mut self, row: Vec<f64>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(Error::UnexpectedLength {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.values.push(row);
        Ok(())
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Position of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Every value of a named column
    ///
    /// `None` if the column does not exist, or if a row is too short to have
    /// it, which can only happen when `values` was filled by hand.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let index = self.column_index(name)?;
        self.values
            .iter()
            .map(|row| row.get(index).copied())
            .collect()
    }

    /// The independent variable, i.e. the first column
    pub fn x(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter_map(|row| row.first().copied())
            .collect()
    }

    /// Iterate over rows with values accessible by column name
    pub fn rows(&self) -> impl Iterator<Item = TableRow<'_>> {
        self.values.iter().map(|values| TableRow {
            columns: &self.columns,
            values,
        })
    }

    /// Read a whitespace separated table from a result file
    ///
    /// The first line is the header, and rows continue until the first blank
    /// line (consumed) or the first line that is not only numbers (left for
    /// the caller).
    pub(crate) fn read_from_cursor<S: AsRef<str>>(cursor: &mut LineCursor<S>) -> Result<Self> {
        let header = cursor.next_line()?;
        let mut table = Self::new(header.split_whitespace().map(String::from).collect());

        while let Some(line) = cursor.peek() {
            if line.is_empty() {
                cursor.advance(1)?;
                break;
            }
            let Some(row) = row_of_f64(line) else {
                break;
            };
            cursor.advance(1)?;
            table.push(row)?;
        }

        trace!("{} rows of {:?}", table.len(), table.columns);
        Ok(table)
    }

    /// Read a CSV export
    pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Reading {:?}", path.file_name().unwrap_or(path.as_os_str()));
        Self::from_csv_reader(BufReader::new(File::open(path)?))
    }

    /// Read CSV content from anything implementing [Read]
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = reader.headers()?.iter().map(String::from).collect();
        let mut table = Self::new(columns);
        for record in reader.deserialize::<Vec<f64>>() {
            table.push(record?)?;
        }
        Ok(table)
    }

    /// Write the table as CSV
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_csv_writer(BufWriter::new(File::create(path)?))
    }

    /// Write CSV content to anything implementing [Write]
    pub fn to_csv_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record(&self.columns)?;
        for row in &self.values {
            writer.write_record(row.iter().map(|value| value.to_string()))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// One row of a [Table], indexed by column name
#[derive(Debug, Clone, Copy)]
pub struct TableRow<'a> {
    columns: &'a [String],
    values: &'a [f64],
}

impl<'a> TableRow<'a> {
    /// Value in a named column
    pub fn get(&self, name: &str) -> Option<f64> {
        let index = self.columns.iter().position(|column| column == name)?;
        self.values.get(index).copied()
    }

    /// The independent variable of the row
    pub fn x(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Every value of the row, in column order
    pub fn values(&self) -> &'a [f64] {
        self.values
    }
}
