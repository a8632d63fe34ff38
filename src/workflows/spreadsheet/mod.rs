//! Spreadsheet ingestion: turns CSV exports into header-keyed rows without interpreting them.

mod normalizer;
mod parser;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

pub use normalizer::clean_header;

#[derive(Debug, thiserror::Error)]
pub enum SpreadsheetError {
    #[error("failed to read spreadsheet: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
}

/// One data row, keyed by (cleaned) header name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpreadsheetRow(BTreeMap<String, String>);

impl SpreadsheetRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0.get(header).map(String::as_str)
    }

    pub fn insert(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.0.insert(header.into(), value.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

impl<K, V> FromIterator<(K, V)> for SpreadsheetRow
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Rows plus the header order they were read with. Header order drives column-role resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSet {
    headers: Vec<String>,
    rows: Vec<SpreadsheetRow>,
}

impl RowSet {
    pub fn new(headers: Vec<String>, rows: Vec<SpreadsheetRow>) -> Self {
        Self { headers, rows }
    }

    /// Builds a row set from literal cell pairs; headers are collected in first-seen order.
    pub fn from_records<'a, I, R>(records: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut headers: Vec<String> = Vec::new();
        let mut rows = Vec::new();

        for record in records {
            let mut row = SpreadsheetRow::default();
            for (header, value) in record {
                if !headers.iter().any(|known| known == header) {
                    headers.push(header.to_string());
                }
                row.insert(header, value);
            }
            rows.push(row);
        }

        Self { headers, rows }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SpreadsheetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, SpreadsheetError> {
        let (headers, rows) = parser::parse_rows(reader)?;
        Ok(Self { headers, rows })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[SpreadsheetRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }
}
