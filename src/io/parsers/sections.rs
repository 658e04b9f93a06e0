//! Splitting a sectioned export into one table per section.
//!
//! An export is a single text file holding several logically distinct tables.
//! Each table starts with a header line whose first character is `[`, e.g.
//! `[Probes]`, and runs until the next header line or the end of the file:
//!
//! ```text
//! [Heading]
//! Normalization	none
//! [Probes]
//! ID	Symbol	Definition
//! ILMN_1	ACTB	actin beta
//! ```
//!
//! Every section body is tab-separated. The `Heading` section has no header
//! row and gets positional column names `0, 1, 2, …`; for every other section
//! the first body line is the header row. Bodies must be rectangular: a row
//! with a different number of fields than the header is a
//! [`GeoTablesError::MalformedSection`], never padded or truncated. Quote
//! characters carry no meaning: each source line is exactly one row, and a
//! cell such as `"a b"` keeps its quotes.
//!
//! [`SectionIterator`] is the parsing iterator, yielding each non-empty
//! section as it is completed; [`split_sections()`] collects it into an
//! ordered map. Neither touches the filesystem.

use indexmap::IndexMap;
use std::io::BufRead;

use crate::error::GeoTablesError;
use crate::io::tsv::{TsvConfig, GEO_TSV};
use crate::table::TabularDataset;

/// Whether `line` opens a new section.
pub fn is_section_header(line: &str) -> bool {
    line.starts_with('[')
}

/// The section name of a header line: the line with any leading or trailing
/// `[`, `]` and line terminator characters removed.
pub fn section_name(line: &str) -> &str {
    line.trim_matches(|c| matches!(c, '[' | ']' | '\n' | '\r'))
}

/// The non-blank body lines of one section, with their source line numbers
/// (1-based), accumulated until the section is closed.
#[derive(Debug)]
struct Section {
    name: String,
    lines: Vec<(usize, String)>,
    has_inferred_header: bool,
}

impl Section {
    fn open(name: String, config: &TsvConfig) -> Self {
        let has_inferred_header = config.has_inferred_header(&name);
        Self {
            name,
            lines: Vec::new(),
            has_inferred_header,
        }
    }

    fn push_line(&mut self, line_number: usize, line: String) {
        if !line.trim_end_matches(['\n', '\r']).is_empty() {
            self.lines.push((line_number, line));
        }
    }

    /// Parse the body into a table. Sections without any non-blank body line
    /// give `None`.
    fn into_table(self, config: &TsvConfig) -> Result<Option<TabularDataset>, GeoTablesError> {
        let mut lines = self.lines.iter();
        let first = match lines.next() {
            Some((_, line)) => config.split_line(line),
            None => return Ok(None),
        };
        let expected = first.len();
        let first: Vec<String> = first.into_iter().map(|s| s.to_string()).collect();

        let mut table = if self.has_inferred_header {
            TabularDataset::new(first)
        } else {
            let mut table = TabularDataset::positional(expected);
            table.push_row(first)?;
            table
        };

        for (line_number, line) in lines {
            let cells = config.split_line(line);
            if cells.len() != expected {
                return Err(GeoTablesError::MalformedSection {
                    section: self.name,
                    line: *line_number,
                    expected,
                    found: cells.len(),
                });
            }
            table.push_row(cells.into_iter().map(|s| s.to_string()).collect())?;
        }
        Ok(Some(table))
    }
}

/// A parsing iterator over the sections of an export, yielding
/// `(section name, table)` pairs in the order sections are found.
///
/// Lines before the first section header are ignored, and sections with
/// empty bodies are skipped. After the first error the iterator is exhausted.
pub struct SectionIterator<R> {
    reader: R,
    config: TsvConfig,
    line_number: usize,
    current: Option<Section>,
    buf: Vec<u8>,
    finished: bool,
}

impl<R> std::fmt::Debug for SectionIterator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SectionIterator")
            .field("line_number", &self.line_number)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> SectionIterator<R> {
    /// Create a new section iterator using the [`GEO_TSV`] configuration.
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, &GEO_TSV)
    }

    pub fn with_config(reader: R, config: &TsvConfig) -> Self {
        Self {
            reader,
            config: config.clone(),
            line_number: 0,
            current: None,
            buf: Vec::new(),
            finished: false,
        }
    }

    fn read_line(&mut self) -> Result<Option<String>, GeoTablesError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_number += 1;
        let line = match String::from_utf8(std::mem::take(&mut self.buf)) {
            Ok(line) => line,
            Err(e) => {
                log::warn!(
                    "line {} is not valid UTF-8; invalid bytes were replaced",
                    self.line_number
                );
                String::from_utf8_lossy(e.as_bytes()).into_owned()
            }
        };
        Ok(Some(line))
    }

    /// Close `section`, yielding its table unless it is empty.
    fn close(&mut self, section: Section) -> Option<Result<(String, TabularDataset), GeoTablesError>> {
        let name = section.name.clone();
        match section.into_table(&self.config) {
            Ok(Some(table)) => {
                log::debug!(
                    "section '{}': {} columns, {} rows",
                    name,
                    table.ncols(),
                    table.nrows()
                );
                Some(Ok((name, table)))
            }
            Ok(None) => {
                log::debug!("section '{}' has an empty body; skipped", name);
                None
            }
            Err(e) => self.fail(e),
        }
    }

    fn fail(
        &mut self,
        error: GeoTablesError,
    ) -> Option<Result<(String, TabularDataset), GeoTablesError>> {
        self.finished = true;
        self.current = None;
        Some(Err(error))
    }
}

impl<R: BufRead> Iterator for SectionIterator<R> {
    type Item = Result<(String, TabularDataset), GeoTablesError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finished = true;
                    let section = self.current.take()?;
                    return self.close(section);
                }
                Err(e) => return self.fail(e),
            };

            if is_section_header(&line) {
                let name = section_name(&line);
                if name.is_empty() {
                    return self.fail(GeoTablesError::EmptySectionName(self.line_number));
                }
                let next = Section::open(name.to_string(), &self.config);
                if let Some(previous) = self.current.replace(next) {
                    if let Some(item) = self.close(previous) {
                        return Some(item);
                    }
                }
            } else if let Some(section) = self.current.as_mut() {
                section.push_line(self.line_number, line);
            }
        }
    }
}

/// Split an export into its sections, keyed by section name in the order
/// they first appear.
///
/// A section name that appears twice keeps its first position, but the later
/// body replaces the earlier table.
pub fn split_sections<R: BufRead>(
    reader: R,
) -> Result<IndexMap<String, TabularDataset>, GeoTablesError> {
    split_sections_with_config(reader, &GEO_TSV)
}

pub fn split_sections_with_config<R: BufRead>(
    reader: R,
    config: &TsvConfig,
) -> Result<IndexMap<String, TabularDataset>, GeoTablesError> {
    let mut tables = IndexMap::new();
    for item in SectionIterator::with_config(reader, config) {
        let (name, table) = item?;
        if tables.insert(name.clone(), table).is_some() {
            log::warn!("section '{}' appears more than once; keeping the last one", name);
        }
    }
    Ok(tables)
}
