//! Parsers for sectioned gene-expression exports.
//!
//! An export bundles several tables into one text file, each introduced by a
//! bracketed header line such as `[Probes]`. The [`SectionIterator`] parsing
//! iterator walks the file once, line by line, with two states: before the
//! first header, where lines are ignored, and inside a section, where lines are
//! accumulated into a buffer owned by that section. Each new header (and the end
//! of the input) closes the current section, turning its buffer into a
//! [`TabularDataset`] or discarding it if the body was empty.
//!
//! Parsing never touches the filesystem; writing tables is done through a
//! [`Workspace`] in [`crate::commands`].
//!
//! [`TabularDataset`]: crate::table::TabularDataset
//! [`Workspace`]: crate::traits::Workspace
//!

pub mod sections;
pub mod utils;

pub use sections::{split_sections, split_sections_with_config, SectionIterator};
