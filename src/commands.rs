use std::fs;
use std::path::{Path, PathBuf};

use crate::{
    io::{
        file::gunzip_file,
        parsers::{
            split_sections,
            utils::{get_table_dir, is_valid_table_name, strip_compressed_extension},
        },
        tsv::GEO_TSV,
    },
    error::GeoTablesError,
    manifest::{FileList, Manifest, FILE_LIST_NAME},
    prune::{prune_manifest, PruneOutcome},
    reporting::{CommandOutput, Report},
    traits::Workspace,
    workspace::FsWorkspace,
};

/// Options for processing a single source file.
#[derive(Clone, Debug)]
pub struct SplitOptions {
    /// Where to put the tables; by default a directory named after the source
    /// file (extension removed), next to it.
    pub output_dir: Option<PathBuf>,
    /// Keep the source file after a successful split.
    pub keep_source: bool,
    /// Prune the `Probes` table after splitting.
    pub prune: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            keep_source: false,
            prune: true,
        }
    }
}

/// Split the export at `source` into one table file per non-empty section.
///
/// The source is parsed completely before anything is written, so a malformed
/// section, or a section name that is not a plain file name, leaves no table
/// directory behind. The source file is removed after
/// every table has been written, unless `keep_source` is set.
pub fn split_file<W: Workspace>(
    workspace: &mut W,
    source: &Path,
    output_dir: Option<&Path>,
    keep_source: bool,
) -> Result<Manifest, GeoTablesError> {
    split_file_inner(workspace, source, output_dir, keep_source).map_err(|e| e.in_file(source))
}

fn split_file_inner<W: Workspace>(
    workspace: &mut W,
    source: &Path,
    output_dir: Option<&Path>,
    keep_source: bool,
) -> Result<Manifest, GeoTablesError> {
    let output_dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_table_dir(source)
            .ok_or_else(|| GeoTablesError::InvalidSourceName(source.display().to_string()))?,
    };

    let tables = {
        let reader = workspace.reader(source)?;
        split_sections(reader)?
    };
    if let Some(name) = tables.keys().find(|name| !is_valid_table_name(name)) {
        return Err(GeoTablesError::InvalidSectionName(name.clone()));
    }

    workspace.create_dir(&output_dir)?;
    let mut manifest = Manifest::new(source, &output_dir);
    for (name, table) in &tables {
        let path = output_dir.join(GEO_TSV.table_file_name(name));
        workspace.write_table(&path, table)?;
        log::info!(
            "wrote {} ({} columns, {} rows)",
            path.display(),
            table.ncols(),
            table.nrows()
        );
        manifest.push(name, path, table.ncols(), table.nrows());
    }

    if !keep_source {
        workspace.remove_file(source)?;
        log::info!("removed source {}", source.display());
    }
    Ok(manifest)
}

/// Split `source`, then prune its `Probes` table through the manifest.
///
/// The source is removed only once both steps succeeded (and `keep_source` is
/// not set), so a failed prune leaves it in place for a rerun.
pub fn process_file<W: Workspace>(
    workspace: &mut W,
    source: &Path,
    options: &SplitOptions,
) -> Result<CommandOutput<Manifest>, GeoTablesError> {
    let mut report = Report::new();
    let manifest = split_file(workspace, source, options.output_dir.as_deref(), true)?;

    if manifest.is_empty() {
        report.add_issue(format!(
            "{} contained no non-empty sections; no tables were written",
            source.display()
        ));
    }

    if options.prune {
        if let PruneOutcome::Absent = prune_manifest(workspace, &manifest)? {
            log::debug!("{} has no Probes table", source.display());
        }
    }

    if !options.keep_source {
        workspace
            .remove_file(source)
            .map_err(|e| e.in_file(source))?;
        log::info!("removed source {}", source.display());
    }
    Ok(CommandOutput::new(manifest, report))
}

/// Decompress every gzip member of the dataset directory `dir` and write the
/// [`FILE_LIST_NAME`] list of source files waiting to be split.
pub fn prepare_dataset(dir: &Path) -> Result<CommandOutput<FileList>, GeoTablesError> {
    let mut report = Report::new();

    let mut members: Vec<PathBuf> = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    members.sort();

    for member in members.iter().filter(|path| path.is_file()) {
        let Some(name) = member.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if let Some(decompressed) = strip_compressed_extension(name) {
            let destination = dir.join(decompressed);
            let bytes = gunzip_file(member, &destination).map_err(|e| e.in_file(member))?;
            fs::remove_file(member)?;
            log::info!(
                "decompressed {} ({} bytes)",
                destination.display(),
                bytes
            );
        }
    }

    let file_list = FileList::scan(dir)?;
    if file_list.is_empty() {
        report.add_issue(format!("no source files found in {}", dir.display()));
    }
    file_list.write(dir.join(FILE_LIST_NAME))?;
    log::info!("listed {} source files in {}", file_list.len(), dir.display());
    Ok(CommandOutput::new(file_list, report))
}

/// Split and prune every source file of the dataset directory `dir`.
///
/// Files come from [`FILE_LIST_NAME`] when it exists, otherwise from scanning
/// the directory. Each source is removed as soon as its own tables are written
/// and pruned, so a failed run can be restarted: listed sources that are gone but whose
/// table directory exists are reported and skipped. Processing stops at the
/// first failing file, and the file list is removed only after every file
/// succeeded.
pub fn process_dataset(
    dir: &Path,
    keep_sources: bool,
    prune: bool,
) -> Result<CommandOutput<Vec<Manifest>>, GeoTablesError> {
    let mut workspace = FsWorkspace::new();
    let mut report = Report::new();

    let list_path = dir.join(FILE_LIST_NAME);
    let has_list = list_path.is_file();
    let file_list = if has_list {
        log::info!("reading source files from {}", list_path.display());
        FileList::read(&list_path)?
    } else {
        log::info!("no {} in {}; scanning", FILE_LIST_NAME, dir.display());
        FileList::scan(dir)?
    };

    let options = SplitOptions {
        output_dir: None,
        keep_source: keep_sources,
        prune,
    };

    let mut manifests = Vec::with_capacity(file_list.len());
    for name in &file_list.files {
        let source = dir.join(name);
        if !source.is_file() {
            match get_table_dir(&source) {
                Some(table_dir) if table_dir.is_dir() => {
                    report.add_issue(format!(
                        "{} is gone but {} exists; assuming it was already processed",
                        source.display(),
                        table_dir.display()
                    ));
                    continue;
                }
                _ => return Err(GeoTablesError::MissingInput(source)),
            }
        }
        let (manifest, file_report) = process_file(&mut workspace, &source, &options)?.into_parts();
        report.extend(file_report);
        manifests.push(manifest);
    }

    if has_list {
        fs::remove_file(&list_path)?;
        log::info!("removed {}", list_path.display());
    }
    Ok(CommandOutput::new(manifests, report))
}
