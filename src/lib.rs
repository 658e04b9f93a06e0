//! # geotables
//!
//! Split sectioned gene-expression exports into one tab-separated table per
//! section, and prune bulky annotation columns from the `Probes` table.
//!
//! ```
//! use geotables::prelude::*;
//!
//! let export = "[Heading]\nNormalization\tnone\n[Probes]\nID\tDefinition\n1\tfoo\n";
//! let mut tables = split_sections(export.as_bytes()).unwrap();
//! assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["Heading", "Probes"]);
//!
//! let probes = tables.get_mut("Probes").unwrap();
//! assert_eq!(prune_columns(probes), vec!["Definition".to_string()]);
//! assert_eq!(probes.columns(), &["ID".to_string()]);
//! ```

pub mod commands;
pub mod error;
pub mod io;
pub mod manifest;
pub mod prune;
pub mod reporting;
pub mod table;
pub mod test_utilities;
pub mod traits;
pub mod workspace;

pub mod prelude {
    pub use crate::error::GeoTablesError;
    pub use crate::io::parsers::{split_sections, SectionIterator};
    pub use crate::io::tsv::{TsvConfig, GEO_TSV, HEADING_SECTION};
    pub use crate::manifest::{FileList, Manifest, ManifestEntry};
    pub use crate::prune::{prune_columns, prune_probes, PruneOutcome, PROBES_TABLE, PRUNED_COLUMNS};
    pub use crate::table::TabularDataset;
    pub use crate::traits::{TsvSerialize, Workspace};
    pub use crate::workspace::{FsWorkspace, MemoryWorkspace};
}
