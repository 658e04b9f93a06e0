use std::path::{Path, PathBuf};

/// The extensions of compressed members in a dataset archive.
const COMPRESSED_EXTENSIONS: [&str; 1] = ["gz"];

/// Get the name of the table directory for a source file: the file name with its
/// last extension removed, so `path/GSM1_sample.txt` gives `GSM1_sample`.
///
/// Returns `None` when there is no extension to remove, since the directory would
/// then collide with the source file itself.
pub fn get_table_dir_name<P: AsRef<Path>>(filepath: P) -> Option<String> {
    let path = filepath.as_ref();
    let file_name = path.file_name()?.to_str()?;
    let stem = path.file_stem()?.to_str()?;
    if stem == file_name || stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

/// Get the path of the table directory for a source file, next to the source.
pub fn get_table_dir<P: AsRef<Path>>(filepath: P) -> Option<PathBuf> {
    let path = filepath.as_ref();
    let name = get_table_dir_name(path)?;
    Some(match path.parent() {
        Some(parent) => parent.join(name),
        None => PathBuf::from(name),
    })
}

/// Whether section `name` can be used as the stem of a table file inside the
/// table directory. Names holding a path separator or a NUL byte, and the
/// `.`/`..` components, would resolve somewhere else.
pub fn is_valid_table_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// If `file_name` is a compressed member (e.g. `GSM1.txt.gz`), return its
/// decompressed name (`GSM1.txt`).
pub fn strip_compressed_extension(file_name: &str) -> Option<&str> {
    COMPRESSED_EXTENSIONS.iter().find_map(|ext| {
        file_name
            .strip_suffix(ext)
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|rest| !rest.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_table_dir_name() {
        assert_eq!(get_table_dir_name("GSM1_sample.txt").unwrap(), "GSM1_sample");
        assert_eq!(get_table_dir_name("some/path/GSM1.txt").unwrap(), "GSM1");
        assert_eq!(get_table_dir_name("GSM1.v2.txt").unwrap(), "GSM1.v2");
        assert_eq!(get_table_dir_name("GSM1"), None);
        assert_eq!(get_table_dir_name("foo/GSM1"), None);
        assert_eq!(get_table_dir_name(".hidden"), None);
    }

    #[test]
    fn test_get_table_dir() {
        assert_eq!(
            get_table_dir("data/GSE1/GSM1.txt").unwrap(),
            PathBuf::from("data/GSE1/GSM1")
        );
        assert_eq!(get_table_dir("GSM1.txt").unwrap(), PathBuf::from("GSM1"));
    }

    #[test]
    fn test_is_valid_table_name() {
        assert!(is_valid_table_name("Probes"));
        assert!(is_valid_table_name("Control Probes"));
        assert!(is_valid_table_name("Samples.v2"));
        assert!(!is_valid_table_name("../../escaped"));
        assert!(!is_valid_table_name("sub/table"));
        assert!(!is_valid_table_name("..\\escaped"));
        assert!(!is_valid_table_name(".."));
        assert!(!is_valid_table_name("."));
        assert!(!is_valid_table_name("nul\0name"));
        assert!(!is_valid_table_name(""));
    }

    #[test]
    fn test_strip_compressed_extension() {
        assert_eq!(strip_compressed_extension("GSM1.txt.gz"), Some("GSM1.txt"));
        assert_eq!(strip_compressed_extension("GSM1.gz"), Some("GSM1"));
        assert_eq!(strip_compressed_extension("GSM1.txt"), None);
        assert_eq!(strip_compressed_extension(".gz"), None);
        assert_eq!(strip_compressed_extension("GSM1gz"), None);
    }
}
