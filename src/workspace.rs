//! [`Workspace`] implementations: [`FsWorkspace`] for real files and
//! [`MemoryWorkspace`] for tests.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::io::{self, BufRead, Cursor, Write};
use std::path::{Path, PathBuf};

use crate::error::GeoTablesError;
use crate::io::file::{InputFile, OutputFile};
use crate::io::tsv::{TsvConfig, GEO_TSV};
use crate::table::TabularDataset;
use crate::traits::{TsvSerialize, Workspace};

/// A [`Workspace`] on the local filesystem.
#[derive(Clone, Debug)]
pub struct FsWorkspace {
    config: TsvConfig,
}

impl Default for FsWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl FsWorkspace {
    pub fn new() -> Self {
        Self::with_config(&GEO_TSV)
    }

    pub fn with_config(config: &TsvConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

impl Workspace for FsWorkspace {
    fn reader(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, GeoTablesError> {
        InputFile::new(path).lines_reader()
    }

    fn create_dir(&mut self, path: &Path) -> Result<(), GeoTablesError> {
        std::fs::create_dir_all(path)?;
        Ok(())
    }

    fn write_table(&mut self, path: &Path, table: &TabularDataset) -> Result<(), GeoTablesError> {
        let mut writer = OutputFile::new(path).writer()?;
        table.write_tsv(&mut writer, &self.config)?;
        writer.flush()?;
        Ok(())
    }

    fn read_table(&self, path: &Path) -> Result<TabularDataset, GeoTablesError> {
        let reader = InputFile::new(path).reader()?;
        TabularDataset::read_tsv(reader, &self.config)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn remove_file(&mut self, path: &Path) -> Result<(), GeoTablesError> {
        std::fs::remove_file(path)?;
        Ok(())
    }
}

/// A [`Workspace`] that keeps files as text in memory.
///
/// Like a real filesystem, a file can only be written into a directory
/// that was created first.
#[derive(Clone, Debug)]
pub struct MemoryWorkspace {
    config: TsvConfig,
    dirs: HashSet<PathBuf>,
    files: IndexMap<PathBuf, String>,
}

impl Default for MemoryWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorkspace {
    pub fn new() -> Self {
        Self {
            config: GEO_TSV.clone(),
            dirs: HashSet::new(),
            files: IndexMap::new(),
        }
    }

    /// Add a file with the given content.
    pub fn insert_text(&mut self, path: impl Into<PathBuf>, text: &str) {
        self.files.insert(path.into(), text.to_string());
    }

    pub fn text(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(|s| s.as_str())
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.contains(path.as_ref())
    }

    /// All file paths, in creation order.
    pub fn paths(&self) -> Vec<&Path> {
        self.files.keys().map(|p| p.as_path()).collect()
    }

    fn check_parent(&self, path: &Path) -> Result<(), GeoTablesError> {
        match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !self.has_dir(parent) => {
                Err(GeoTablesError::IOError(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("directory {} does not exist", parent.display()),
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Workspace for MemoryWorkspace {
    fn reader(&self, path: &Path) -> Result<Box<dyn BufRead + '_>, GeoTablesError> {
        let text = self
            .text(path)
            .ok_or_else(|| GeoTablesError::MissingInput(path.to_path_buf()))?;
        Ok(Box::new(Cursor::new(text.as_bytes())))
    }

    fn create_dir(&mut self, path: &Path) -> Result<(), GeoTablesError> {
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn write_table(&mut self, path: &Path, table: &TabularDataset) -> Result<(), GeoTablesError> {
        self.check_parent(path)?;
        let text = table.to_tsv(&self.config)?;
        self.files.insert(path.to_path_buf(), text);
        Ok(())
    }

    fn read_table(&self, path: &Path) -> Result<TabularDataset, GeoTablesError> {
        let text = self
            .text(path)
            .ok_or_else(|| GeoTablesError::MissingInput(path.to_path_buf()))?;
        TabularDataset::read_tsv(text.as_bytes(), &self.config)
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn remove_file(&mut self, path: &Path) -> Result<(), GeoTablesError> {
        match self.files.shift_remove(path) {
            Some(_) => Ok(()),
            None => Err(GeoTablesError::IOError(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} does not exist", path.display()),
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn table() -> TabularDataset {
        TabularDataset::from_parts(
            vec!["ID".to_string(), "Symbol".to_string()],
            vec![vec!["1".to_string(), "ACTB".to_string()]],
        )
        .unwrap()
    }

    #[test]
    fn test_fs_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let mut workspace = FsWorkspace::new();
        let table_dir = dir.path().join("GSM1");
        workspace.create_dir(&table_dir).unwrap();
        // creating it twice is fine
        workspace.create_dir(&table_dir).unwrap();

        let path = table_dir.join("Probes.tsv");
        assert!(!workspace.exists(&path));
        workspace.write_table(&path, &table()).unwrap();
        assert!(workspace.exists(&path));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "ID\tSymbol\n1\tACTB\n");
        assert_eq!(workspace.read_table(&path).unwrap(), table());

        let mut text = String::new();
        workspace.reader(&path).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "ID\tSymbol\n1\tACTB\n");

        workspace.remove_file(&path).unwrap();
        assert!(!workspace.exists(&path));
        assert!(matches!(
            workspace.reader(&path),
            Err(GeoTablesError::MissingInput(_))
        ));
    }

    #[test]
    fn test_memory_workspace_requires_dir() {
        let mut workspace = MemoryWorkspace::new();
        let path = Path::new("data/GSM1/Probes.tsv");
        assert!(workspace.write_table(path, &table()).is_err());

        workspace.create_dir(Path::new("data/GSM1")).unwrap();
        assert!(workspace.has_dir("data"));
        workspace.write_table(path, &table()).unwrap();
        assert_eq!(workspace.text(path).unwrap(), "ID\tSymbol\n1\tACTB\n");
        assert_eq!(workspace.read_table(path).unwrap(), table());

        workspace.remove_file(path).unwrap();
        assert!(workspace.remove_file(path).is_err());
        assert!(workspace.paths().is_empty());
    }
}
