//! NEXUS format reader for phylogenetic trees.
//!
//! A document is read in a short pipeline of plain functions:
//! 1. [scanner::scan] - header check, comment stripping, statements
//! 2. [router::route] - `BEGIN`/`END` blocks
//! 3. [taxa::parse_taxa_block] and [trees::parse_trees_block] - block contents
//! 4. [substitute::substitute] - translate tokens in tree bodies
//! 5. [NexusReader::get_trees] / [NexusReader::load_str] - named Newick
//!    strings or [Tree]s
//!
//! # Quick API
//! For default settings:
//! - [get_trees] - tree name to substituted Newick string
//! - [load], [load_str], [load_file] - tree name to [Tree]
//!
//! # Format
//! ```text
//! #NEXUS
//! BEGIN TAXA;
//!     DIMENSIONS NTAX=3;
//!     TAXLABELS Scarabaeus Drosophila Aranaeus;
//! END;
//! BEGIN TREES;
//!     TRANSLATE beetle Scarabaeus, fly Drosophila, spider Aranaeus;
//!     TREE insects = [&U] ((beetle,fly),spider);
//! END;
//! ```
//! * Keywords (`BEGIN`, `END`, `TAXLABELS`, `TRANSLATE`, `TREE`, ...) are
//!   matched case-insensitively
//! * `[...]` comments may appear anywhere and may nest; the rooting tag
//!   `[&U]`/`[&R]` right after `=` of a tree statement is recognised
//! * Labels with whitespace or punctuation are written in single quotes, with
//!   `''` standing for one quote: `'Wilson''s storm-petrel'`
//! * Leaves of a tree may be written as translate tokens, as 1-based positions
//!   in the TAXA block, or as labels
//! * Blocks other than TAXA and TREES are skipped

pub mod defs;
pub mod document;
pub mod error;
pub mod loader;
pub mod router;
pub mod scanner;
pub mod substitute;
pub mod taxa;
pub mod trees;

pub use self::document::{NexusReader, ParsedDocument};
pub use self::error::NexusError;
pub use self::loader::LoadError;
pub use self::trees::{DuplicateTokens, RootingTag, TranslateTable, TreeEntry};

use crate::model::Tree;
use indexmap::IndexMap;
use std::io::Read;
use std::path::Path;

// ============================================================================
// QUICK PARSING API (public)
// ============================================================================
/// Returns the Newick string of every tree in a Nexus document, keyed by tree
/// name in first-declared order, with translate tokens and numeric TAXA
/// positions replaced by labels.
///
/// # Arguments
/// * `text` - The complete Nexus document
///
/// # Errors
/// Returns a [NexusError] if the document does not start with `#NEXUS`, its
/// blocks are unbalanced or a `Tree` statement is malformed. A document
/// without trees is not an error.
///
/// # Example
/// ```
/// let text = "#NEXUS
/// BEGIN TREES;
///     Translate 1 Ephedra, 2 Gnetum, 3 Welwitschia, 4 Ginkgo, 5 Pinus;
///     Tree gymnosperms = [&U] (1,2,(3,(4,5)));
/// END;";
///
/// let trees = nextrees::nexus::get_trees(text)?;
/// assert_eq!(trees["gymnosperms"], "(Ephedra,Gnetum,(Welwitschia,(Ginkgo,Pinus)));");
/// # Ok::<(), nextrees::nexus::NexusError>(())
/// ```
pub fn get_trees(text: &str) -> Result<IndexMap<String, String>, NexusError> {
    NexusReader::new().get_trees(text)
}

/// Loads every tree of a Nexus document read from `source`.
///
/// See [NexusReader::load].
pub fn load<R: Read>(source: R) -> Result<IndexMap<String, Tree>, LoadError> {
    NexusReader::new().load(source)
}

/// Loads every tree of a Nexus document given as text.
///
/// See [NexusReader::load_str].
pub fn load_str(text: &str) -> Result<IndexMap<String, Tree>, LoadError> {
    NexusReader::new().load_str(text)
}

/// Loads every tree of a Nexus file.
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Errors
/// Returns a [LoadError] if the file cannot be read or parsed.
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<IndexMap<String, Tree>, LoadError> {
    NexusReader::new().load_file(path)
}
