//! Handoff records between processing steps.
//!
//! A [`Manifest`] lists the tables emitted for one source file, so that the
//! pruner and the caller never have to rescan a table directory. A
//! [`FileList`] is the dataset-level handoff: the names of the extracted
//! source files waiting to be split, stored one per line in
//! [`FILE_LIST_NAME`].

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::GeoTablesError;
use crate::io::file::{InputFile, OutputFile};
use crate::io::parsers::utils::strip_compressed_extension;

/// The name of the dataset-level file list.
pub const FILE_LIST_NAME: &str = "file_list.txt";

/// One emitted table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub name: String,
    pub path: PathBuf,
    pub columns: usize,
    pub rows: usize,
}

/// The tables emitted for one source file, in emission order.
#[derive(Clone, Debug, PartialEq)]
pub struct Manifest {
    pub source: PathBuf,
    pub output_dir: PathBuf,
    pub tables: Vec<ManifestEntry>,
}

impl Manifest {
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            tables: Vec::new(),
        }
    }

    pub fn push(&mut self, name: &str, path: impl Into<PathBuf>, columns: usize, rows: usize) {
        self.tables.push(ManifestEntry {
            name: name.to_string(),
            path: path.into(),
            columns,
            rows,
        });
    }

    /// The entry for table `name`, if it was emitted.
    pub fn table(&self, name: &str) -> Option<&ManifestEntry> {
        self.tables.iter().find(|entry| entry.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.tables.iter().map(|entry| entry.name.as_str()).collect()
    }

    pub fn paths(&self) -> Vec<&Path> {
        self.tables.iter().map(|entry| entry.path.as_path()).collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Write the entries as a TSV with a header row.
    pub fn write_tsv<W: Write>(&self, writer: W) -> Result<(), GeoTablesError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);
        for entry in &self.tables {
            writer.serialize(entry)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Read entries written by [`Manifest::write_tsv()`].
    pub fn read_tsv<R: std::io::Read>(
        reader: R,
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Result<Self, GeoTablesError> {
        let mut manifest = Self::new(source, output_dir);
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_reader(reader);
        for entry in reader.deserialize() {
            manifest.tables.push(entry?);
        }
        Ok(manifest)
    }
}

/// The source files of a dataset directory, by file name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileList {
    pub files: Vec<String>,
}

impl FileList {
    /// Read a file list; blank lines are ignored and names are trimmed.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, GeoTablesError> {
        let reader = InputFile::new(path.as_ref()).reader()?;
        let mut files = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let name = line.trim();
            if !name.is_empty() {
                files.push(name.to_string());
            }
        }
        Ok(Self { files })
    }

    /// List the source files of a dataset directory: every regular file,
    /// except compressed members and the file list itself, sorted by name.
    pub fn scan(dir: impl AsRef<Path>) -> Result<Self, GeoTablesError> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir.as_ref())? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if name == FILE_LIST_NAME || strip_compressed_extension(&name).is_some() {
                continue;
            }
            files.push(name);
        }
        files.sort();
        Ok(Self { files })
    }

    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), GeoTablesError> {
        let mut writer = OutputFile::new(path.as_ref()).writer()?;
        for name in &self.files {
            writeln!(writer, "{}", name)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_lookup() {
        let mut manifest = Manifest::new("GSM1.txt", "GSM1");
        manifest.push("Heading", "GSM1/Heading.tsv", 2, 3);
        manifest.push("Probes", "GSM1/Probes.tsv", 10, 2);
        assert_eq!(manifest.names(), vec!["Heading", "Probes"]);
        assert_eq!(manifest.table("Probes").unwrap().rows, 2);
        assert!(manifest.table("Controls").is_none());
        assert_eq!(manifest.len(), 2);
    }

    #[test]
    fn test_manifest_tsv() {
        let mut manifest = Manifest::new("GSM1.txt", "GSM1");
        manifest.push("Control Probes", "GSM1/Control Probes.tsv", 3, 1);
        let mut buf = Vec::new();
        manifest.write_tsv(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf.clone()).unwrap(),
            "name\tpath\tcolumns\trows\nControl Probes\tGSM1/Control Probes.tsv\t3\t1\n"
        );
        let back = Manifest::read_tsv(buf.as_slice(), "GSM1.txt", "GSM1").unwrap();
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_file_list_scan_and_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("GSM2.txt"), "").unwrap();
        fs::write(dir.path().join("GSM1.txt"), "").unwrap();
        fs::write(dir.path().join("GSM3.txt.gz"), "").unwrap();
        fs::write(dir.path().join(FILE_LIST_NAME), "").unwrap();
        fs::create_dir(dir.path().join("GSM0")).unwrap();

        let list = FileList::scan(dir.path()).unwrap();
        assert_eq!(list.files, vec!["GSM1.txt", "GSM2.txt"]);

        let path = dir.path().join(FILE_LIST_NAME);
        list.write(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "GSM1.txt\nGSM2.txt\n");

        fs::write(&path, "GSM1.txt\n\n  GSM2.txt \n").unwrap();
        assert_eq!(FileList::read(&path).unwrap(), list);
    }
}
