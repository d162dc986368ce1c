//! NEXUS format constants and definitions.
//!
//! Keywords are stored case-folded; statements are matched by comparing their
//! case-folded first token against these constants.

/// NEXUS file header "#NEXUS" (matched case-insensitively)
pub(crate) const NEXUS_HEADER: &str = "#NEXUS";

/// Block opening keyword
pub(crate) const BLOCK_BEGIN: &str = "begin";

/// Block closing keywords
pub(crate) const BLOCK_END: &str = "end";
pub(crate) const BLOCK_ENDBLOCK: &str = "endblock";

// Taxa block keywords
/// TAXA block dimensions command
pub(crate) const DIMENSIONS: &str = "dimensions";

/// Number of taxa parameter of the dimensions command
pub(crate) const NTAX: &str = "ntax";

/// Tax labels command
pub(crate) const TAXLABELS: &str = "taxlabels";

// Trees block keywords
/// TREES block translate command
pub(crate) const TRANSLATE: &str = "translate";

/// Individual tree declaration keyword
pub(crate) const TREE: &str = "tree";

/// Delimiters of the Newick grammar relevant for label substitution
pub(crate) const NEWICK_DELIMITERS: &[char] = &['(', ')', ',', ':', ';'];

/// NEXUS block types
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum NexusBlock {
    Taxa,
    Trees,
    Data,
    Characters,
    Distances,
    Sets,
    Assumptions,
    Unknown(String),
}

impl NexusBlock {
    /// Parse a block name (case-insensitive) into a [NexusBlock] variant
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "taxa" => NexusBlock::Taxa,
            "trees" => NexusBlock::Trees,
            "data" => NexusBlock::Data,
            "characters" => NexusBlock::Characters,
            "distances" => NexusBlock::Distances,
            "sets" => NexusBlock::Sets,
            "assumptions" => NexusBlock::Assumptions,
            other => NexusBlock::Unknown(other.to_string()),
        }
    }

    /// Whether statements of this block are interpreted by a handler.
    pub fn is_interpreted(&self) -> bool {
        matches!(self, NexusBlock::Taxa | NexusBlock::Trees)
    }
}
