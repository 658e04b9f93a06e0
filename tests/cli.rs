//! Command line tests, running the `geotables` binary.

use geotables::{
    manifest::FILE_LIST_NAME,
    test_utilities::{geotables_binary_path, read_text, sample_export, temp_source},
};
use std::fs;
use std::process::Command;

#[test]
fn test_split_scenario() {
    let (dir, source) = temp_source(
        "GSM1.txt",
        "[A]\nx\ty\n1\t2\n[B]\n[Probes]\nID\tDefinition\tProbe_Sequence\n1\tfoo\tACGT\n",
    );

    let output = Command::new(geotables_binary_path())
        .arg("split")
        .arg(&source)
        .output()
        .expect("geotables split failed");
    assert!(output.status.success(), "{:?}", output);

    let table_dir = dir.path().join("GSM1");
    assert_eq!(read_text(table_dir.join("A.tsv")), "x\ty\n1\t2\n");
    assert!(!table_dir.join("B.tsv").exists());
    assert_eq!(read_text(table_dir.join("Probes.tsv")), "ID\n1\n");
    assert!(!source.exists());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let mut lines = stdout.lines();
    assert_eq!(lines.next().unwrap(), "name\tpath\tcolumns\trows");
    assert!(lines.next().unwrap().starts_with("A\t"));
    assert!(lines.next().unwrap().starts_with("Probes\t"));
    assert!(lines.next().is_none());
}

#[test]
fn test_split_malformed() {
    let (dir, source) = temp_source("GSM1.txt", "[A]\nx\ty\n1\n");

    let output = Command::new(geotables_binary_path())
        .arg("split")
        .arg(&source)
        .output()
        .expect("geotables split failed to run");
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Section 'A' is not rectangular"), "{}", stderr);
    assert!(stderr.contains("GSM1.txt"), "{}", stderr);
    assert!(!dir.path().join("GSM1/A.tsv").exists());
    assert!(source.exists());
}

#[test]
fn test_split_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(geotables_binary_path())
        .arg("split")
        .arg(dir.path().join("absent.txt"))
        .output()
        .expect("geotables split failed to run");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}

#[test]
fn test_unknown_argument() {
    let output = Command::new(geotables_binary_path())
        .arg("split")
        .arg("--no-such-flag")
        .output()
        .expect("geotables split failed to run");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Command line argument error"), "{}", stderr);
}

#[test]
fn test_help_is_not_an_error() {
    let output = Command::new(geotables_binary_path())
        .arg("--help")
        .output()
        .expect("geotables --help failed to run");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("split"));
}

#[test]
fn test_split_then_prune_twice() {
    let (dir, source) = temp_source("GSM1_sample.txt", &sample_export());

    let output = Command::new(geotables_binary_path())
        .arg("split")
        .arg("--keep-source")
        .arg("--no-prune")
        .arg(&source)
        .output()
        .expect("geotables split failed");
    assert!(output.status.success(), "{:?}", output);
    assert!(source.exists());

    let table_dir = dir.path().join("GSM1_sample");
    let manifest_path = dir.path().join("manifest.tsv");
    fs::write(&manifest_path, &output.stdout).unwrap();
    let unpruned = read_text(table_dir.join("Probes.tsv"));
    assert!(unpruned.lines().next().unwrap().contains("Probe_Sequence"));

    let first = Command::new(geotables_binary_path())
        .arg("prune")
        .arg("--manifest")
        .arg(&manifest_path)
        .arg(&table_dir)
        .output()
        .expect("geotables prune failed");
    assert!(first.status.success(), "{:?}", first);
    let once = read_text(table_dir.join("Probes.tsv"));

    let second = Command::new(geotables_binary_path())
        .arg("prune")
        .arg(&table_dir)
        .output()
        .expect("geotables prune failed");
    assert!(second.status.success(), "{:?}", second);
    assert_eq!(read_text(table_dir.join("Probes.tsv")), once);
    assert!(String::from_utf8_lossy(&second.stdout).contains("nothing to prune"));
}

#[test]
fn test_prune_absent() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(geotables_binary_path())
        .arg("prune")
        .arg(dir.path())
        .output()
        .expect("geotables prune failed");
    assert!(output.status.success(), "{:?}", output);
    assert!(String::from_utf8_lossy(&output.stdout).contains("no Probes table"));
}

#[test]
fn test_prepare_and_process() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("GSM1_sample.txt"), sample_export()).unwrap();
    fs::write(dir.path().join("GSM2_sample.txt"), "[Heading]\nNormalization\tnone\n").unwrap();

    let prepare = Command::new(geotables_binary_path())
        .arg("prepare")
        .arg(dir.path())
        .output()
        .expect("geotables prepare failed");
    assert!(prepare.status.success(), "{:?}", prepare);
    assert_eq!(
        read_text(dir.path().join(FILE_LIST_NAME)),
        "GSM1_sample.txt\nGSM2_sample.txt\n"
    );

    let process = Command::new(geotables_binary_path())
        .arg("process")
        .arg(dir.path())
        .output()
        .expect("geotables process failed");
    assert!(process.status.success(), "{:?}", process);
    assert!(!dir.path().join(FILE_LIST_NAME).exists());
    assert!(dir.path().join("GSM1_sample/Control Probes.tsv").is_file());
    assert_eq!(
        read_text(dir.path().join("GSM2_sample/Heading.tsv")),
        "0\t1\nNormalization\tnone\n"
    );
}
