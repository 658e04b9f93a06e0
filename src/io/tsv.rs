//! TSV configuration and serializing helpers.

use csv::ReaderBuilder;
use lazy_static::lazy_static;

use crate::{error::GeoTablesError, table::TabularDataset, traits::TsvSerialize};

/// The section whose body has no header row of its own.
pub const HEADING_SECTION: &str = "Heading";

/// The extension of every emitted table file.
pub const TABLE_EXTENSION: &str = "tsv";

lazy_static! {
    /// The tab-separated configuration used by gene-expression exports.
    pub static ref GEO_TSV: TsvConfig = TsvConfig {
        delimiter: b'\t',
        headerless_section: HEADING_SECTION.to_string(),
        extension: TABLE_EXTENSION.to_string(),
    };
}

/// This is an extensible type to handle common
/// TSV input and output configurations, shared by
/// the section splitter and the table pruner so both
/// agree on one on-disk format.
#[derive(Clone, Debug)]
pub struct TsvConfig {
    pub delimiter: u8,
    /// Name of the section parsed without a header row.
    pub headerless_section: String,
    pub extension: String,
}

impl TsvConfig {
    /// Whether the first body line of section `name` is its header row.
    pub fn has_inferred_header(&self, name: &str) -> bool {
        name != self.headerless_section
    }

    /// The file name of the table for section `name`, e.g. `Probes.tsv`.
    pub fn table_file_name(&self, name: &str) -> String {
        format!("{}.{}", name, self.extension)
    }

    /// A reader that yields every record, header included, and leaves
    /// row-length checks to the caller. Quote characters are ordinary
    /// cell content, so one line is always one record.
    pub fn reader_builder(&self) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        builder
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .quoting(false);
        builder
    }

    /// Split one line (terminator included or not) into its cells.
    pub fn split_line<'a>(&self, line: &'a str) -> Vec<&'a str> {
        line.trim_end_matches(['\n', '\r'])
            .split(self.delimiter as char)
            .collect()
    }

    /// Whether `cell` can be written without breaking the row layout.
    pub fn is_plain_cell(&self, cell: &str) -> bool {
        !cell.contains([self.delimiter as char, '\n', '\r'])
    }
}

impl TsvSerialize for TabularDataset {
    fn to_tsv(&self, config: &TsvConfig) -> Result<String, GeoTablesError> {
        let mut buf = Vec::new();
        self.write_tsv(&mut buf, config)?;
        String::from_utf8(buf)
            .map_err(|e| GeoTablesError::InvalidTable(format!("non UTF-8 output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_inferred_header() {
        assert!(!GEO_TSV.has_inferred_header("Heading"));
        assert!(GEO_TSV.has_inferred_header("Probes"));
        assert!(GEO_TSV.has_inferred_header("heading"));
    }

    #[test]
    fn test_table_file_name() {
        assert_eq!(GEO_TSV.table_file_name("Probes"), "Probes.tsv");
        assert_eq!(GEO_TSV.table_file_name("Control Probes"), "Control Probes.tsv");
    }

    #[test]
    fn test_split_line() {
        assert_eq!(GEO_TSV.split_line("1\t\"a b\"\t\r\n"), vec!["1", "\"a b\"", ""]);
        assert_eq!(GEO_TSV.split_line("x"), vec!["x"]);
        assert!(GEO_TSV.is_plain_cell("5' UTR \""));
        assert!(!GEO_TSV.is_plain_cell("a\tb"));
        assert!(!GEO_TSV.is_plain_cell("a\nb"));
    }

    #[test]
    fn test_to_tsv() {
        let table = TabularDataset::from_parts(
            vec!["0".to_string(), "1".to_string()],
            vec![vec!["Date".to_string(), "1/1/2015".to_string()]],
        )
        .unwrap();
        assert_eq!(table.to_tsv(&GEO_TSV).unwrap(), "0\t1\nDate\t1/1/2015\n");
    }
}
