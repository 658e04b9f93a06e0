//! The [`TabularDataset`] type, a rectangular in-memory table.
//!
//! Every section of an export is materialized as one [`TabularDataset`]: an
//! ordered set of unique column names and an ordered set of rows, where each row
//! has exactly one cell per column. Cells are kept verbatim as `String`s, so that
//! writing a table back out reproduces the source text exactly.

use std::collections::HashSet;
use std::io::{Read, Write};

use crate::error::GeoTablesError;
use crate::io::tsv::TsvConfig;

/// A rectangular table with named columns and ordered rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TabularDataset {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TabularDataset {
    /// Create a new empty table with the supplied column names.
    ///
    /// Column names are made unique with [`unique_column_names()`].
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: unique_column_names(columns),
            rows: Vec::new(),
        }
    }

    /// Create a new empty table with `ncols` positional column names, `0, 1, 2, …`.
    pub fn positional(ncols: usize) -> Self {
        Self {
            columns: (0..ncols).map(|i| i.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table from column names and rows, checking that it is rectangular.
    pub fn from_parts(
        columns: Vec<String>,
        rows: Vec<Vec<String>>,
    ) -> Result<Self, GeoTablesError> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Append a row. Rows must have exactly one cell per column.
    pub fn push_row(&mut self, row: Vec<String>) -> Result<(), GeoTablesError> {
        if row.len() != self.columns.len() {
            return Err(GeoTablesError::InvalidTable(format!(
                "row {} has {} cells but the table has {} columns",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    pub fn nrows(&self) -> usize {
        self.rows.len()
    }

    /// Return the position of column `name`, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Get the cell of row `row` in column `name`.
    pub fn get(&self, row: usize, name: &str) -> Option<&str> {
        let index = self.column_index(name)?;
        self.rows.get(row).map(|cells| cells[index].as_str())
    }

    /// Remove every column in `names` that exists in this table. Names not in the
    /// table are ignored. The remaining columns keep their relative order.
    ///
    /// Returns the names of the removed columns, in table order.
    pub fn drop_columns(&mut self, names: &[&str]) -> Vec<String> {
        let keep: Vec<bool> = self
            .columns
            .iter()
            .map(|column| !names.contains(&column.as_str()))
            .collect();
        if keep.iter().all(|&k| k) {
            return Vec::new();
        }

        let mut removed = Vec::new();
        let columns = std::mem::take(&mut self.columns);
        for (column, &k) in columns.into_iter().zip(keep.iter()) {
            if k {
                self.columns.push(column);
            } else {
                removed.push(column);
            }
        }
        for row in self.rows.iter_mut() {
            let cells = std::mem::take(row);
            *row = cells
                .into_iter()
                .zip(keep.iter())
                .filter_map(|(cell, &k)| k.then_some(cell))
                .collect();
        }
        removed
    }

    /// Read a table whose first line is the header row.
    ///
    /// Ragged rows are an error; nothing is padded or truncated.
    pub fn read_tsv<R: Read>(reader: R, config: &TsvConfig) -> Result<Self, GeoTablesError> {
        let mut reader = config.reader_builder().from_reader(reader);
        let mut records = reader.records();
        let header = match records.next() {
            Some(record) => record?,
            None => {
                return Err(GeoTablesError::InvalidTable(
                    "table has no header row".to_string(),
                ))
            }
        };
        let mut table = Self::new(header.iter().map(|s| s.to_string()).collect());
        for record in records {
            let record = record?;
            table.push_row(record.iter().map(|s| s.to_string()).collect())?;
        }
        Ok(table)
    }

    /// Write the header row followed by every data row, one line each with
    /// cells written verbatim.
    ///
    /// A cell holding the delimiter or a line break cannot be written without
    /// changing the row layout, and is an [`GeoTablesError::InvalidTable`].
    pub fn write_tsv<W: Write>(&self, mut writer: W, config: &TsvConfig) -> Result<(), GeoTablesError> {
        let delimiter = (config.delimiter as char).to_string();
        for row in std::iter::once(&self.columns).chain(self.rows.iter()) {
            if let Some(cell) = row.iter().find(|cell| !config.is_plain_cell(cell)) {
                return Err(GeoTablesError::InvalidTable(format!(
                    "cell {:?} contains a delimiter or line break",
                    cell
                )));
            }
            writeln!(writer, "{}", row.join(&delimiter))?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Make header names unique and non-empty.
///
/// Empty names become `Unnamed: <i>`, where `i` is the column position, and a
/// repeated name gets a `.1`, `.2`, … suffix, so `[a, a, b, a]` becomes
/// `[a, a.1, b, a.2]`.
pub fn unique_column_names(names: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::with_capacity(names.len());
    let mut unique = Vec::with_capacity(names.len());
    for (i, name) in names.into_iter().enumerate() {
        let base = if name.is_empty() {
            format!("Unnamed: {}", i)
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut suffix = 0;
        while seen.contains(&candidate) {
            suffix += 1;
            candidate = format!("{}.{}", base, suffix);
        }
        seen.insert(candidate.clone());
        unique.push(candidate);
    }
    unique
}
