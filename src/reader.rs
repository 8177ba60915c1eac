//! Delimited table loader
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;

use crate::Error;

/// Argos exports are semicolon separated
pub const DELIMITER: u8 = b';';

/// [Table] is the raw content of one delimited file,
/// rows are kept in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Header row
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<StringRecord>,
    /// Source file, when loaded from disk
    pub path: Option<PathBuf>,
}

impl Table {
    /// Loads a [Table] from a file with a header row.
    /// Every row must have as many fields as the header.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .trim(Trim::All)
            .from_path(path)
            .map_err(|e| Error::Parse {
                path: path.to_path_buf(),
                source: e,
            })?;
        let mut table = Self::from_csv_reader(reader).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        table.path = Some(path.to_path_buf());
        debug!(
            "\"{}\": {} columns, {} rows",
            path.display(),
            table.headers.len(),
            table.rows.len()
        );
        Ok(table)
    }

    /// Parses a [Table] from readable content
    pub fn from_reader<R: std::io::Read>(content: R) -> Result<Self, csv::Error> {
        let reader = ReaderBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(true)
            .flexible(false)
            .trim(Trim::All)
            .from_reader(content);
        Self::from_csv_reader(reader)
    }

    fn from_csv_reader<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self, csv::Error> {
        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.to_string())
            .collect::<Vec<_>>();
        let rows = reader.records().collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            headers,
            rows,
            path: None,
        })
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// True if this table has no data row
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the content of one column, in row order
    pub fn column(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |row| row.get(index).unwrap_or(""))
    }
}
