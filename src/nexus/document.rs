//! Assembling a Nexus document into named Newick strings.
//!
//! [NexusReader] runs the whole pipeline: [scan] the text into statements,
//! [route] them into blocks, read TAXA and TREES blocks into a
//! [ParsedDocument] and [substitute] the tree bodies.

use crate::nexus::defs::NexusBlock;
use crate::nexus::error::NexusError;
use crate::nexus::router::{Block, route};
use crate::nexus::scanner::scan;
use crate::nexus::substitute::substitute;
use crate::nexus::taxa::parse_taxa_block;
use crate::nexus::trees::{DuplicateTokens, TranslateTable, TreeEntry, parse_trees_block};
use indexmap::IndexMap;
use tracing::{debug, trace, warn};

// =#========================================================================#=
// PARSED DOCUMENT
// =#========================================================================#=
/// The TAXA and TREES content of one Nexus document.
///
/// Built fresh for every parse; nothing is shared between documents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    taxa: Vec<String>,
    ntax: Option<usize>,
    translate: TranslateTable,
    block_translates: Vec<TranslateTable>,
    trees: IndexMap<String, TreeEntry>,
}

impl ParsedDocument {
    /// Collects the interpreted blocks, in document order.
    ///
    /// Several TAXA blocks append their labels, several TREES blocks add to
    /// one tree list. Each TREES block keeps its own translate table for its
    /// trees; the tables are also merged into one document-wide view. A tree
    /// name declared again keeps the position of its first declaration and
    /// takes the later body.
    ///
    /// # Errors
    /// Propagates [NexusError]s of the TREES block handler and of merging the
    /// translate tables under `duplicates`.
    pub fn from_blocks(blocks: &[Block], duplicates: DuplicateTokens) -> Result<Self, NexusError> {
        let mut document = ParsedDocument::default();

        for block in blocks {
            match block.kind() {
                NexusBlock::Taxa => {
                    let (labels, ntax) = parse_taxa_block(block).into_parts();
                    document.taxa.extend(labels);
                    document.ntax = ntax.or(document.ntax);
                }
                NexusBlock::Trees => {
                    let (translate, trees) = parse_trees_block(block, duplicates)?.into_parts();
                    document.translate.merge(&translate, duplicates)?;
                    let index = document.block_translates.len();
                    document.block_translates.push(translate);
                    for entry in trees.into_iter().map(|entry| entry.with_block(index)) {
                        if let Some(previous) = document.trees.insert(entry.name().to_string(), entry) {
                            warn!("Tree '{}' is declared more than once, keeping the last body", previous.name());
                        }
                    }
                }
                other => debug!("Skipping uninterpreted block {other:?}"),
            }
        }

        Ok(document)
    }

    /// Taxon labels of all TAXA blocks, in declaration order.
    pub fn taxa(&self) -> &[String] {
        &self.taxa
    }

    /// Announced number of taxa, if any TAXA block has `Dimensions ntax=<n>`.
    pub fn ntax(&self) -> Option<usize> {
        self.ntax
    }

    /// Translate entries of all TREES blocks merged, later blocks winning.
    pub fn translate(&self) -> &TranslateTable {
        &self.translate
    }

    /// Translate table of one TREES block (0-based), if there is such block.
    pub fn block_translate(&self, block: usize) -> Option<&TranslateTable> {
        self.block_translates.get(block)
    }

    /// Tree entries keyed by name, in first-declared order.
    pub fn trees(&self) -> &IndexMap<String, TreeEntry> {
        &self.trees
    }

    /// Builds a table over the merged translate entries of all TREES blocks.
    ///
    /// With `positional` set, the 1-based position of every taxon maps to its
    /// label (`"1"` to the first taxon, ...). The translate entries are laid
    /// over these and win on conflicts.
    pub fn label_table(&self, positional: bool) -> TranslateTable {
        let mut table = self.positional_table(positional);
        table.extend(&self.translate);
        table
    }

    /// Builds the table used to substitute the trees of one TREES block:
    /// like [label_table()](ParsedDocument::label_table), but with only that
    /// block's translate entries.
    pub fn block_label_table(&self, block: usize, positional: bool) -> TranslateTable {
        let mut table = self.positional_table(positional);
        if let Some(translate) = self.block_translates.get(block) {
            table.extend(translate);
        }
        table
    }

    fn positional_table(&self, positional: bool) -> TranslateTable {
        if !positional {
            return TranslateTable::new();
        }
        self.taxa
            .iter()
            .enumerate()
            .map(|(i, label)| ((i + 1).to_string(), label.as_str()))
            .collect()
    }
}

// =#========================================================================#=
// READER
// =#========================================================================#=
/// Reader for Nexus documents with its configuration.
///
/// # Configuration
/// * [with_duplicate_tokens()](NexusReader::with_duplicate_tokens) - Handling of
///   translate tokens mapped twice, [DuplicateTokens::LastWins] by default
/// * [without_positional_taxa()](NexusReader::without_positional_taxa) - Do not
///   resolve numeric leaves (`1`, `2`, ...) to TAXA labels by position
///
/// # Example
/// ```
/// use nextrees::nexus::{DuplicateTokens, NexusReader};
///
/// let text = "#NEXUS
/// BEGIN TAXA; TaxLabels Ephedra Gnetum Welwitschia; END;
/// BEGIN TREES; Tree gnetales = [&U] (1,(2,3)); END;";
///
/// let trees = NexusReader::new()
///     .with_duplicate_tokens(DuplicateTokens::Reject)
///     .get_trees(text)?;
/// assert_eq!(trees["gnetales"], "(Ephedra,(Gnetum,Welwitschia));");
/// # Ok::<(), nextrees::nexus::NexusError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NexusReader {
    duplicate_tokens: DuplicateTokens,
    positional_taxa: bool,
}

impl Default for NexusReader {
    fn default() -> Self {
        Self {
            duplicate_tokens: DuplicateTokens::default(),
            positional_taxa: true,
        }
    }
}

impl NexusReader {
    /// Creates a reader with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how translate tokens mapped more than once are handled.
    pub fn with_duplicate_tokens(mut self, duplicate_tokens: DuplicateTokens) -> Self {
        self.duplicate_tokens = duplicate_tokens;
        self
    }

    /// Leaves numeric leaf tokens alone unless the translate table maps them.
    pub fn without_positional_taxa(mut self) -> Self {
        self.positional_taxa = false;
        self
    }

    /// Parses the TAXA and TREES content of a Nexus document.
    ///
    /// # Errors
    /// Returns a [NexusError] for a missing `#NEXUS` header, unbalanced
    /// blocks, unterminated statements or malformed `Tree` statements.
    pub fn parse(&self, text: &str) -> Result<ParsedDocument, NexusError> {
        let blocks = route(scan(text)?)?;
        let document = ParsedDocument::from_blocks(&blocks, self.duplicate_tokens)?;
        debug!(
            "Parsed Nexus document with {} taxa, {} translations and {} trees",
            document.taxa.len(),
            document.translate.len(),
            document.trees.len()
        );
        Ok(document)
    }

    /// Returns the substituted Newick string of every tree, keyed by tree
    /// name in first-declared order. Each string ends in `;`.
    ///
    /// Every tree is substituted with the translate table of its own TREES
    /// block. A document without TREES block or without trees yields an
    /// empty map.
    ///
    /// # Errors
    /// See [parse()](NexusReader::parse).
    pub fn get_trees(&self, text: &str) -> Result<IndexMap<String, String>, NexusError> {
        let document = self.parse(text)?;
        let tables: Vec<TranslateTable> = (0..document.block_translates.len())
            .map(|block| document.block_label_table(block, self.positional_taxa))
            .collect();

        let trees = document
            .trees
            .into_iter()
            .map(|(name, entry)| {
                let newick = substitute(entry.raw_body(), &tables[entry.block()]);
                trace!("Tree '{name}': {newick}");
                (name, newick)
            })
            .collect();

        Ok(trees)
    }
}
