//! Pruning of bulky free-text and sequence columns from the `Probes` table.
//!
//! The `Probes` section of an export carries long annotation and sequence
//! fields that are rarely needed downstream. [`prune_probes()`] removes every
//! column of [`PRUNED_COLUMNS`] that is present and rewrites the table in
//! place; columns that are not present are ignored, since the set covers
//! several export format variants.

use std::path::Path;

use crate::error::GeoTablesError;
use crate::io::tsv::{TsvConfig, GEO_TSV};
use crate::manifest::Manifest;
use crate::table::TabularDataset;
use crate::traits::Workspace;

/// The name of the table subject to pruning.
pub const PROBES_TABLE: &str = "Probes";

/// Columns removed from the [`PROBES_TABLE`] when present.
pub const PRUNED_COLUMNS: [&str; 7] = [
    "Definition",
    "Ontology_Component",
    "Ontology_Process",
    "Ontology_Function",
    "Synonyms",
    "Obsolete_Probe_Id",
    "Probe_Sequence",
];

/// What [`prune_probes()`] did.
#[derive(Clone, Debug, PartialEq)]
pub enum PruneOutcome {
    /// There is no `Probes` table; nothing to do.
    Absent,
    /// The `Probes` table exists; `removed` lists the dropped columns, which is
    /// empty if the table had already been pruned.
    Pruned { removed: Vec<String> },
}

/// Drop the [`PRUNED_COLUMNS`] from `table`, returning the removed names.
pub fn prune_columns(table: &mut TabularDataset) -> Vec<String> {
    table.drop_columns(&PRUNED_COLUMNS)
}

/// Prune the `Probes` table in the table directory `dir`, if there is one.
pub fn prune_probes<W: Workspace>(
    workspace: &mut W,
    dir: &Path,
) -> Result<PruneOutcome, GeoTablesError> {
    prune_probes_with_config(workspace, dir, &GEO_TSV)
}

pub fn prune_probes_with_config<W: Workspace>(
    workspace: &mut W,
    dir: &Path,
    config: &TsvConfig,
) -> Result<PruneOutcome, GeoTablesError> {
    let path = dir.join(config.table_file_name(PROBES_TABLE));
    if !workspace.exists(&path) {
        log::debug!("no {} table in {}", PROBES_TABLE, dir.display());
        return Ok(PruneOutcome::Absent);
    }
    prune_table_file(workspace, &path)
}

/// Prune the `Probes` table listed in `manifest`, without looking at any
/// other file.
pub fn prune_manifest<W: Workspace>(
    workspace: &mut W,
    manifest: &Manifest,
) -> Result<PruneOutcome, GeoTablesError> {
    match manifest.table(PROBES_TABLE) {
        Some(entry) => prune_table_file(workspace, &entry.path),
        None => Ok(PruneOutcome::Absent),
    }
}

fn prune_table_file<W: Workspace>(
    workspace: &mut W,
    path: &Path,
) -> Result<PruneOutcome, GeoTablesError> {
    let mut table = workspace
        .read_table(path)
        .map_err(|e| e.in_file(path))?;
    let removed = prune_columns(&mut table);
    if removed.is_empty() {
        log::debug!("{} has no prunable columns", path.display());
    } else {
        workspace
            .write_table(path, &table)
            .map_err(|e| e.in_file(path))?;
        log::info!(
            "pruned {} columns from {} ({} remain)",
            removed.len(),
            path.display(),
            table.ncols()
        );
    }
    Ok(PruneOutcome::Pruned { removed })
}
