//! Nextrees is a library to read named phylogenetic trees from Nexus
//! documents.
//!
//! Core functionality provided:
//! - Nexus: Read the TAXA and TREES blocks of a Nexus document, including
//!   `TRANSLATE` tables and rooting tags, and produce one Newick string per
//!   named tree with all leaf tokens replaced by taxon labels.
//! - Newick: Parse single Newick strings into [Tree]s and write them back in
//!   canonical form ([Tree::write]).
//! - Tree model: [Tree] stores its [Vertex](model::Vertex) nodes in an
//!   arena, vertices are referenced by index, and every vertex may carry a
//!   label and a branch length. See [crate::model] for details.
//!
//! Errors are reported as [NexusError] for malformed documents and
//! [ParsingError] for malformed Newick; [LoadError] combines both.
//!
//! The library emits [tracing] events (block routing at `debug`, tolerated
//! irregularities at `warn`) and installs no subscriber.
//!
//! # Usage patterns
//! 1. Quick functions with default settings: [get_trees], [load],
//!    [load_str], [load_file] and [parse_newick_str].
//! 2. A configured [NexusReader](crate::nexus::NexusReader), e.g. to reject
//!    translate tokens mapped twice.
//!
//! ## Example
//! ```
//! use nextrees::load_str;
//!
//! let text = "#NEXUS
//! BEGIN TAXA;
//!     TaxLabels Scarabaeus Drosophila Aranaeus;
//! END;
//! BEGIN TREES;
//!     Translate beetle Scarabaeus, fly Drosophila, spider Aranaeus;
//!     Tree numeric = ((1,2),3);
//!     Tree translated = [&R] ((beetle,fly),spider);
//! END;";
//!
//! let trees = load_str(text)?;
//! for tree in trees.values() {
//!     assert_eq!(tree.write(), "((Scarabaeus,Drosophila),Aranaeus);");
//! }
//! # Ok::<(), nextrees::LoadError>(())
//! ```
//!
//! ## Example Reader Configuration
//! ```
//! use nextrees::nexus::{DuplicateTokens, NexusReader};
//!
//! let reader = NexusReader::new()
//!     .with_duplicate_tokens(DuplicateTokens::Reject)
//!     .without_positional_taxa();
//!
//! let result = reader.get_trees("#NEXUS\nBEGIN TREES; Translate 1 A, 1 B; END;");
//! assert!(result.is_err());
//! ```

pub mod model;
pub mod newick;
pub mod nexus;
pub mod parser;

pub use crate::model::Tree;
pub use crate::nexus::{LoadError, NexusError};
pub use crate::parser::parsing_error::ParsingError;

use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;

// ============================================================================
// Quick Nexus API
// ============================================================================
/// Returns the substituted Newick string of every tree in a Nexus document,
/// keyed by name in first-declared order.
///
/// See [`nexus::get_trees`] for full documentation.
pub fn get_trees(text: &str) -> Result<IndexMap<String, String>, NexusError> {
    nexus::get_trees(text)
}

/// Loads every tree of a Nexus document read from `source`.
///
/// See [`nexus::load`] for full documentation.
pub fn load<R: Read>(source: R) -> Result<IndexMap<String, Tree>, LoadError> {
    nexus::load(source)
}

/// Loads every tree of a Nexus document given as text.
///
/// See [`nexus::load_str`] for full documentation.
pub fn load_str(text: &str) -> Result<IndexMap<String, Tree>, LoadError> {
    nexus::load_str(text)
}

/// Loads every tree of a Nexus file.
///
/// See [`nexus::load_file`] for full documentation.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, Tree>, LoadError> {
    nexus::load_file(path)
}

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parse a Newick string using default settings, returning a [Tree].
///
/// See [`newick::parse_str`] for full documentation of this convenience function.
pub fn parse_newick_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    newick::parse_str(newick)
}
