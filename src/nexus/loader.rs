//! Building [Tree]s from a Nexus document.

use crate::model::Tree;
use crate::newick;
use crate::nexus::document::NexusReader;
use crate::nexus::error::NexusError;
use crate::parser::ParsingError;
use indexmap::IndexMap;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Error of loading trees from a Nexus document.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document itself could not be read.
    #[error("Nexus error: {0}")]
    Nexus(#[from] NexusError),
    /// A tree body is not valid Newick; forwarded as raised by the Newick parser.
    #[error(transparent)]
    Newick(#[from] ParsingError),
}

impl NexusReader {
    /// Loads every tree of a Nexus document given as text.
    ///
    /// Each substituted Newick string is handed to the Newick parser and the
    /// resulting [Tree] is named after its entry. Trees are returned in
    /// first-declared order.
    ///
    /// # Errors
    /// * [LoadError::Nexus] - The document is malformed, see [NexusReader::parse]
    /// * [LoadError::Newick] - A tree body is not valid Newick
    pub fn load_str(&self, text: &str) -> Result<IndexMap<String, Tree>, LoadError> {
        let newick_trees = self.get_trees(text)?;

        let mut trees = IndexMap::with_capacity(newick_trees.len());
        for (name, newick) in newick_trees {
            let tree = newick::parse_str(&newick)?.with_name(name.as_str());
            trees.insert(name, tree);
        }

        debug!("Loaded {} trees", trees.len());
        Ok(trees)
    }

    /// Loads every tree of a Nexus document read completely from `source`.
    ///
    /// # Errors
    /// Like [load_str()](NexusReader::load_str); failing to read `source`
    /// is a [LoadError::Nexus].
    pub fn load<R: Read>(&self, mut source: R) -> Result<IndexMap<String, Tree>, LoadError> {
        let mut text = String::new();
        source.read_to_string(&mut text).map_err(NexusError::from)?;
        self.load_str(&text)
    }

    /// Loads every tree of the Nexus file at `path`.
    ///
    /// # Errors
    /// Like [load()](NexusReader::load).
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<IndexMap<String, Tree>, LoadError> {
        let text = fs::read_to_string(path.as_ref()).map_err(NexusError::from)?;
        self.load_str(&text)
    }
}
