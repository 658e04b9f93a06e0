//! Traits used by the geotables library.
//!

use std::io::BufRead;
use std::path::Path;

use crate::{error::GeoTablesError, io::tsv::TsvConfig, table::TabularDataset};

/// The [`TsvSerialize`] trait defines how to convert a type to its
/// TSV text representation.
pub trait TsvSerialize {
    fn to_tsv(&self, config: &TsvConfig) -> Result<String, GeoTablesError>;
}

/// The [`Workspace`] trait is the narrow set of filesystem side effects
/// used when splitting and pruning: everything else is pure parsing.
///
/// [`FsWorkspace`] works on real files, and [`MemoryWorkspace`] keeps
/// everything in memory for tests.
///
/// [`FsWorkspace`]: crate::workspace::FsWorkspace
/// [`MemoryWorkspace`]: crate::workspace::MemoryWorkspace
pub trait Workspace {
    /// Open a source file for line-oriented reading. A missing or unreadable
    /// file is a [`GeoTablesError::MissingInput`].
    fn reader(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, GeoTablesError>;

    /// Create a directory (and its parents); an existing directory is fine.
    fn create_dir(&mut self, path: &Path) -> Result<(), GeoTablesError>;

    /// Write `table` to `path`, replacing any existing content.
    fn write_table(&mut self, path: &Path, table: &TabularDataset) -> Result<(), GeoTablesError>;

    /// Read the table at `path` back; the first line is its header.
    fn read_table(&self, path: &Path) -> Result<TabularDataset, GeoTablesError>;

    fn exists(&self, path: &Path) -> bool;

    fn remove_file(&mut self, path: &Path) -> Result<(), GeoTablesError>;
}
