//! Input/Output file handling with [`InputFile`] and [`OutputFile`].
//!
//! These types abstract over reading both plaintext and gzip-compressed
//! input, and writing to either a file or standard output.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::GeoTablesError;

/// Check if a file is gzipped by looking for the magic numbers.
///
/// Files shorter than the magic number are not gzipped.
pub fn is_gzipped_file(file_path: impl AsRef<Path>) -> io::Result<bool> {
    let file = File::open(file_path.as_ref())?;
    let mut buffer = Vec::with_capacity(2);
    file.take(2).read_to_end(&mut buffer)?;
    Ok(buffer == [0x1f_u8, 0x8b])
}

/// Decompress the gzip file `source` into `destination`, returning the
/// number of bytes written.
pub fn gunzip_file(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
) -> Result<u64, GeoTablesError> {
    let source = source.as_ref();
    let input = File::open(source).map_err(|_| GeoTablesError::MissingInput(source.into()))?;
    let mut decoder = GzDecoder::new(BufReader::new(input));
    let mut output = BufWriter::new(File::create(destination.as_ref())?);
    let written = io::copy(&mut decoder, &mut output)?;
    output.flush()?;
    Ok(written)
}

/// Represents an input file.
///
/// This abstracts how data is read in, allowing for both plaintext and gzip-compressed
/// input to be read through a common interface.
#[derive(Clone, Debug)]
pub struct InputFile {
    pub filepath: PathBuf,
}

impl InputFile {
    /// Constructs a new `InputFile`.
    ///
    /// # Arguments
    ///
    /// * `filepath` - The path to the file. Gzip-compressed content is detected
    /// from its magic number and decompressed automatically.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            filepath: filepath.into(),
        }
    }

    /// Opens the file and returns a buffered reader.
    ///
    /// # Returns
    ///
    /// A result containing a `BufReader<Box<dyn Read>>` on success, or
    /// [`GeoTablesError::MissingInput`] if the file cannot be opened.
    pub fn reader(&self) -> Result<BufReader<Box<dyn Read>>, GeoTablesError> {
        let missing = |_| GeoTablesError::MissingInput(self.filepath.clone());
        let file = File::open(&self.filepath).map_err(missing)?;
        if !file.metadata().map_err(missing)?.is_file() {
            return Err(GeoTablesError::MissingInput(self.filepath.clone()));
        }
        let is_gzipped = is_gzipped_file(&self.filepath)?;
        let reader: Box<dyn Read> = if is_gzipped {
            log::debug!("decompressing gzip input {}", self.filepath.display());
            Box::new(GzDecoder::new(file))
        } else {
            Box::new(file)
        };
        Ok(BufReader::new(reader))
    }

    /// Open the file as a line-oriented reader.
    pub fn lines_reader(&self) -> Result<Box<dyn BufRead>, GeoTablesError> {
        Ok(Box::new(self.reader()?))
    }
}

enum OutputDestination {
    File(PathBuf),
    Stdout,
}

/// Represents an output file.
///
/// This struct is used to handle operations on an output file, such as writing to the file,
/// or to standard output.
pub struct OutputFile {
    destination: OutputDestination,
}

impl OutputFile {
    /// Constructs a new `OutputFile` that will replace any existing file at `filepath`.
    pub fn new(filepath: impl Into<PathBuf>) -> Self {
        Self {
            destination: OutputDestination::File(filepath.into()),
        }
    }

    /// Constructs a new [`OutputFile`] for standard output.
    pub fn new_stdout() -> Self {
        Self {
            destination: OutputDestination::Stdout,
        }
    }

    /// Opens the file (truncating it) and returns a buffered writer.
    pub fn writer(&self) -> io::Result<Box<dyn Write>> {
        let writer: Box<dyn Write> = match &self.destination {
            OutputDestination::File(path) => Box::new(BufWriter::new(File::create(path)?)),
            OutputDestination::Stdout => Box::new(BufWriter::new(io::stdout())),
        };
        Ok(writer)
    }
}
