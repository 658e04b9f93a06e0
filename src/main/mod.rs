use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geotables::{
    commands::{prepare_dataset, process_dataset, process_file, SplitOptions},
    io::{InputFile, OutputFile},
    manifest::Manifest,
    prelude::{prune_probes, FsWorkspace, GeoTablesError, PruneOutcome},
    prune::prune_manifest,
    reporting::Report,
};

const INFO: &str = "\
geotables: split sectioned gene-expression exports into per-section TSV tables
usage: geotables [--help] <subcommand>

Subcommands:

  split: split one export file into <name>/<Section>.tsv tables.
  prune: remove bulky annotation columns from a Probes.tsv table.
  prepare: decompress a dataset directory and list its source files.
  process: split and prune every source file of a dataset directory.

";

#[derive(Parser)]
#[clap(name = "geotables")]
#[clap(about = INFO)]
struct Cli {
    /// increase logging verbosity (-d info, -dd debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    debug: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    Split {
        /// an export file with bracketed section headers
        #[arg(required = true)]
        file: PathBuf,

        /// the table directory (default: the file name without its extension, next to the file)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// keep the export file after splitting
        #[arg(long)]
        keep_source: bool,

        /// do not prune the Probes table
        #[arg(long)]
        no_prune: bool,
    },
    Prune {
        /// a table directory written by `split`
        #[arg(required = true)]
        dir: PathBuf,

        /// a manifest written by `split` to locate the Probes table
        #[arg(long)]
        manifest: Option<PathBuf>,
    },
    Prepare {
        /// a dataset directory of extracted (possibly gzipped) export files
        #[arg(required = true)]
        dir: PathBuf,
    },
    Process {
        /// a dataset directory, usually after `prepare`
        #[arg(required = true)]
        dir: PathBuf,

        /// keep the export files after splitting
        #[arg(long)]
        keep_sources: bool,

        /// do not prune the Probes tables
        #[arg(long)]
        no_prune: bool,
    },
}

fn print_report(report: &Report) {
    for issue in report.issues() {
        eprintln!("Warning: {}", issue);
    }
}

fn print_manifest(manifest: &Manifest) -> Result<(), GeoTablesError> {
    let writer = OutputFile::new_stdout().writer()?;
    manifest.write_tsv(writer)
}

fn run() -> Result<(), GeoTablesError> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version are not failures
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => return Err(e.into()),
    };

    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match &cli.command {
        Some(Commands::Split {
            file,
            output_dir,
            keep_source,
            no_prune,
        }) => {
            let options = SplitOptions {
                output_dir: output_dir.clone(),
                keep_source: *keep_source,
                prune: !*no_prune,
            };
            let mut workspace = FsWorkspace::new();
            let output = process_file(&mut workspace, file, &options)?;
            print_report(output.report());
            print_manifest(output.value())?;
        }
        Some(Commands::Prune { dir, manifest }) => {
            let mut workspace = FsWorkspace::new();
            let outcome = match manifest {
                Some(path) => {
                    let reader = InputFile::new(path).reader()?;
                    let manifest = Manifest::read_tsv(reader, PathBuf::new(), dir)?;
                    prune_manifest(&mut workspace, &manifest)?
                }
                None => prune_probes(&mut workspace, dir)?,
            };
            match outcome {
                PruneOutcome::Absent => println!("no Probes table in {}", dir.display()),
                PruneOutcome::Pruned { removed } if removed.is_empty() => {
                    println!("nothing to prune in {}", dir.display())
                }
                PruneOutcome::Pruned { removed } => println!("removed: {}", removed.join(", ")),
            }
        }
        Some(Commands::Prepare { dir }) => {
            let output = prepare_dataset(dir)?;
            print_report(output.report());
            for name in &output.value().files {
                println!("{}", name);
            }
        }
        Some(Commands::Process {
            dir,
            keep_sources,
            no_prune,
        }) => {
            let output = process_dataset(dir, *keep_sources, !*no_prune)?;
            print_report(output.report());
            for manifest in output.value() {
                println!(
                    "{}\t{}",
                    manifest.output_dir.display(),
                    manifest.names().join(",")
                );
            }
        }
        None => {
            println!("{}\n", INFO);
            std::process::exit(1);
        }
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
