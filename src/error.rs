//! The [`GeoTablesError`] `enum` definition and error messages.
//!
use std::path::PathBuf;
use thiserror::Error;

/// The [`GeoTablesError`] defines the standard set of errors that should
/// be passed to the user.
#[derive(Debug, Error)]
pub enum GeoTablesError {
    // IO related errors
    #[error("File reading error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Input file '{}' does not exist or is not readable", .0.display())]
    MissingInput(PathBuf),

    // Section parsing errors
    #[error("Section '{section}' is not rectangular: line {line} has {found} fields, expected {expected}")]
    MalformedSection {
        section: String,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("Section header on line {0} has an empty name")]
    EmptySectionName(usize),
    #[error("Section name '{0}' cannot be used as a table file name")]
    InvalidSectionName(String),
    #[error("Table is invalid: {0}")]
    InvalidTable(String),
    #[error("Could not derive a table directory name from '{0}'")]
    InvalidSourceName(String),

    // Errors with the file that caused them attached.
    #[error("{}: {source}", .path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<GeoTablesError>,
    },

    // Command line tool related errors
    #[error("Command line argument error: {0}")]
    ArgumentError(#[from] clap::error::Error),
}

impl GeoTablesError {
    /// Attach the path of the file being processed, unless one is already attached.
    pub fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            GeoTablesError::InFile { .. } => self,
            other => GeoTablesError::InFile {
                path: path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any file context removed.
    pub fn root(&self) -> &GeoTablesError {
        match self {
            GeoTablesError::InFile { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GeoTablesError;

    #[test]
    fn test_in_file_wraps_once() {
        let err = GeoTablesError::InvalidTable("ragged".to_string())
            .in_file("a.txt")
            .in_file("b.txt");
        let msg = err.to_string();
        assert!(msg.starts_with("a.txt:"), "{}", msg);
        assert!(matches!(err.root(), GeoTablesError::InvalidTable(_)));
    }

    #[test]
    fn test_malformed_message() {
        let err = GeoTablesError::MalformedSection {
            section: "Probes".to_string(),
            line: 7,
            expected: 3,
            found: 2,
        };
        assert_eq!(
            err.to_string(),
            "Section 'Probes' is not rectangular: line 7 has 2 fields, expected 3"
        );
    }
}
