//! Test cases and test utility functions.
//!

use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::io::tsv::HEADING_SECTION;
use crate::prune::PROBES_TABLE;

/// The non-empty sections of [`sample_export()`], in order.
pub const SAMPLE_SECTIONS: [&str; 4] = [HEADING_SECTION, PROBES_TABLE, "Control Probes", "Samples Table"];

/// The columns of the sample `Probes` section.
pub const SAMPLE_PROBE_COLUMNS: [&str; 10] = [
    "Species",
    "Source",
    "Probe_Id",
    "Symbol",
    "Definition",
    "Ontology_Component",
    "Synonyms",
    "Obsolete_Probe_Id",
    "Probe_Sequence",
    "Chromosome",
];

/// A small export in the bracketed-section format, with a headerless
/// `Heading` section, an empty `Empty` section and a blank line.
pub fn sample_export() -> String {
    let mut text = String::new();
    text.push_str("[Heading]\n");
    text.push_str("Illumina Inc. GenomeStudio version\t1.9.0\n");
    text.push_str("Normalization\tnone\n");
    text.push_str("Array Content\tHumanHT-12_V4_0_R2_15002873_B.bgx\n");
    text.push_str("[Empty]\n");
    text.push_str("[Probes]\n");
    text.push_str(&SAMPLE_PROBE_COLUMNS.join("\t"));
    text.push('\n');
    text.push_str(
        "Homo sapiens\tRefSeq\tILMN_1343291\tEEF1A1\teukaryotic translation elongation factor 1 alpha 1\tcytosol\tEF1A; EEF1A\t\tTGTGTTGAGAGCTTCTCAGACTATCCACCTTTGGGTCGCTTTGCTGTTCG\t6\n",
    );
    text.push_str(
        "Homo sapiens\tRefSeq\tILMN_1343295\tGAPDH\tglyceraldehyde-3-phosphate dehydrogenase\tcytoplasm\tG3PD; GAPD\t\tCTTCAACAGCGACACCCACTCCTCCACCTTTGACGCTGGGGCTGGCATTG\t12\n",
    );
    text.push('\n');
    text.push_str("[Control Probes]\n");
    text.push_str("Array_Address_Id\tReporter_Group_Name\tReporter_Group_id\n");
    text.push_str("5090180\thousekeeping\tnegative\n");
    text.push_str("[Samples Table]\n");
    text.push_str("Sample Group\tSample ID\n");
    text.push_str("GSM1\t5522_1\n");
    text
}

/// Write `content` to `file_name` inside a new temporary directory, which is
/// removed when the returned [`TempDir`] is dropped.
pub fn temp_source(file_name: &str, content: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("could not create temporary directory");
    let path = dir.path().join(file_name);
    std::fs::write(&path, content).expect("could not write temporary source file");
    (dir, path)
}

/// Read a text file, panicking with its path if that fails.
pub fn read_text(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    std::fs::read_to_string(path).unwrap_or_else(|e| panic!("could not read {}: {}", path.display(), e))
}

/// Get the path to the compiled `geotables` binary, for CLI tests.
pub fn geotables_binary_path() -> PathBuf {
    let mut path = std::env::current_exe().expect("could not get current executable");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("geotables");
    path
}
