//! TREES block handler.
//!
//! Reads the optional `Translate` table and every `Tree <name> = [&X] <body>`
//! statement of a TREES block. Bodies are kept as raw Newick text; label
//! substitution happens later in [substitute](crate::nexus::substitute).

use crate::nexus::defs::{TRANSLATE, TREE};
use crate::nexus::error::NexusError;
use crate::nexus::router::Block;
use crate::nexus::scanner::Statement;
use crate::parser::utils::{find_outside_quotes, split_outside_quotes, unquote_label};
use indexmap::IndexMap;
use indexmap::map::Iter;
use std::fmt;
use tracing::{debug, warn};

// =#========================================================================#=
// TRANSLATE TABLE
// =#========================================================================#=
/// Mapping of tokens used in tree bodies to taxon labels, in insertion order.
///
/// Labels are stored the way they are written in the document, so a quoted
/// label keeps its quotes and can be put into Newick text as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslateTable {
    entries: IndexMap<String, String>,
}

impl TranslateTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps `token` to `label`, returning the label previously mapped to
    /// `token`. A re-inserted token keeps its original position.
    pub fn insert(&mut self, token: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.entries.insert(token.into(), label.into())
    }

    /// The label `token` maps to, if any.
    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Whether `token` is mapped.
    pub fn contains(&self, token: &str) -> bool {
        self.entries.contains_key(token)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(token, label)` pairs in insertion order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Adds all entries of `other`, overwriting tokens present in both.
    pub fn extend(&mut self, other: &TranslateTable) {
        for (token, label) in other.iter() {
            self.entries.insert(token.clone(), label.clone());
        }
    }

    /// Adds all entries of `other` under a duplicate policy.
    ///
    /// Tokens mapped to the same label in both tables are accepted under
    /// either policy.
    ///
    /// # Errors
    /// Under [DuplicateTokens::Reject], returns a [NexusError] for a token
    /// that `other` maps to a different label. `self` is left unchanged then.
    pub fn merge(&mut self, other: &TranslateTable, duplicates: DuplicateTokens) -> Result<(), NexusError> {
        if duplicates == DuplicateTokens::Reject {
            let conflict = other.iter().find_map(|(token, label)| {
                self.get(token)
                    .filter(|previous| *previous != label.as_str())
                    .map(|previous| (token, previous, label))
            });
            if let Some((token, previous, label)) = conflict {
                return Err(NexusError::new(format!(
                    "Translate token {token:?} is mapped twice ({previous:?} and {label:?}) across TREES blocks"
                )));
            }
        }
        self.extend(other);
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslateTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TranslateTable {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// How repeated translate tokens are handled, within one `Translate`
/// statement and across the TREES blocks of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicateTokens {
    /// The later mapping replaces the earlier one without notice.
    #[default]
    LastWins,
    /// A token repeated within a block, or remapped to another label by a
    /// later TREES block, is a [NexusError].
    Reject,
}

// =#========================================================================#=
// TREE ENTRY
// =#========================================================================#=
/// Rooting annotation written right after the `=` of a tree statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootingTag {
    /// `[&R]`
    Rooted,
    /// `[&U]`
    Unrooted,
    /// Any other `[&X]` with a single letter
    Other(char),
}

impl RootingTag {
    /// Recognises a tag of the form `[&X]`, with `X` a single ASCII letter.
    ///
    /// # Example
    /// ```
    /// use nextrees::nexus::trees::RootingTag;
    ///
    /// assert_eq!(RootingTag::parse("[&U]"), Some(RootingTag::Unrooted));
    /// assert_eq!(RootingTag::parse("[&r]"), Some(RootingTag::Rooted));
    /// assert_eq!(RootingTag::parse("[&lnP=-3.2]"), None);
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.as_bytes() {
            [b'[', b'&', letter, b']'] if letter.is_ascii_alphabetic() => {
                Some(match letter.to_ascii_uppercase() {
                    b'R' => RootingTag::Rooted,
                    b'U' => RootingTag::Unrooted,
                    _ => RootingTag::Other(char::from(*letter)),
                })
            }
            _ => None,
        }
    }
}

impl fmt::Display for RootingTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RootingTag::Rooted => write!(f, "[&R]"),
            RootingTag::Unrooted => write!(f, "[&U]"),
            RootingTag::Other(letter) => write!(f, "[&{letter}]"),
        }
    }
}

/// A named tree of a TREES block, with its body not yet substituted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeEntry {
    name: String,
    rooting_tag: Option<RootingTag>,
    raw_body: String,
    block: usize,
}

impl TreeEntry {
    /// Creates an entry; the body is normalized to end in exactly one `;`.
    pub fn new(name: impl Into<String>, rooting_tag: Option<RootingTag>, raw_body: &str) -> Self {
        Self {
            name: name.into(),
            rooting_tag,
            raw_body: normalize_body(raw_body),
            block: 0,
        }
    }

    pub(crate) fn with_block(mut self, block: usize) -> Self {
        self.block = block;
        self
    }

    /// 0-based number of the TREES block declaring this tree; its
    /// `Translate` table is the one applied to the body.
    pub fn block(&self) -> usize {
        self.block
    }

    /// The (unquoted) tree name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rooting_tag(&self) -> Option<RootingTag> {
        self.rooting_tag
    }

    /// The Newick body as written in the document, terminated by one `;`.
    pub fn raw_body(&self) -> &str {
        &self.raw_body
    }
}

/// Trims `body` and makes it end in exactly one `;`.
fn normalize_body(body: &str) -> String {
    let mut body = body.trim().trim_end_matches(|c: char| c == ';' || c.is_whitespace()).to_string();
    body.push(';');
    body
}

// =#========================================================================#=
// TREES BLOCK
// =#========================================================================#=
/// Contents of a TREES block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreesBlock {
    translate: TranslateTable,
    trees: Vec<TreeEntry>,
}

impl TreesBlock {
    pub fn translate(&self) -> &TranslateTable {
        &self.translate
    }

    /// Tree entries in declaration order.
    pub fn trees(&self) -> &[TreeEntry] {
        &self.trees
    }

    pub(crate) fn into_parts(self) -> (TranslateTable, Vec<TreeEntry>) {
        (self.translate, self.trees)
    }
}

/// Extracts the `Translate` table and the `Tree` statements of a TREES block.
///
/// # Arguments
/// * `block` - A block routed as [NexusBlock::Trees](crate::nexus::defs::NexusBlock::Trees)
/// * `duplicates` - Handling of tokens mapped more than once
///
/// # Errors
/// Returns a [NexusError] if a `Tree` statement has no `=`, an empty name or
/// an empty body, or if a token is repeated under [DuplicateTokens::Reject].
pub fn parse_trees_block(block: &Block, duplicates: DuplicateTokens) -> Result<TreesBlock, NexusError> {
    let mut trees_block = TreesBlock::default();

    for statement in block.statements() {
        if statement.is(TRANSLATE) {
            parse_translate(statement, duplicates, &mut trees_block.translate)?;
        } else if statement.is(TREE) {
            trees_block.trees.push(parse_tree_statement(statement)?);
        } else {
            debug!("Ignoring statement in TREES block: {:?}", statement.keyword());
        }
    }

    debug!(
        "Parsed TREES block with {} translations and {} trees",
        trees_block.translate.len(),
        trees_block.trees.len()
    );
    Ok(trees_block)
}

/// Adds the `<token> <label>` pairs of a `Translate` statement to `table`.
fn parse_translate(
    statement: &Statement,
    duplicates: DuplicateTokens,
    table: &mut TranslateTable,
) -> Result<(), NexusError> {
    for piece in split_outside_quotes(statement.rest(), ',') {
        let piece = piece.trim();
        if piece.is_empty() {
            continue;
        }

        let Some((token, label)) = piece.split_once(char::is_whitespace) else {
            warn!("Translate entry {piece:?} has no label, skipping it");
            continue;
        };
        let label = label.trim_start();

        if let Some(previous) = table.insert(token, label) {
            if duplicates == DuplicateTokens::Reject {
                return Err(NexusError::new(format!(
                    "Translate token {token:?} at position {} is mapped twice ({previous:?} and {label:?})",
                    statement.position()
                )));
            }
            debug!("Translate token {token:?} remapped from {previous:?} to {label:?}");
        }
    }

    Ok(())
}

/// Splits `Tree <name> = [&X] <body>` into a [TreeEntry].
fn parse_tree_statement(statement: &Statement) -> Result<TreeEntry, NexusError> {
    let invalid = |reason: &str| NexusError::invalid_tree_statement(reason, statement.text(), statement.position());

    let declaration = statement.rest();
    let equals = find_outside_quotes(declaration, '=').ok_or_else(|| invalid("missing '='"))?;

    let name = declaration[..equals].trim();
    // `*` marks the default tree
    let name = unquote_label(name.strip_prefix('*').unwrap_or(name).trim_start());
    if name.is_empty() {
        return Err(invalid("empty tree name"));
    }

    let mut body = declaration[equals + 1..].trim_start();
    let mut rooting_tag = None;
    if let Some(tag) = body.get(..4).and_then(RootingTag::parse) {
        rooting_tag = Some(tag);
        body = body[4..].trim_start();
    }

    if body.trim_end_matches(|c: char| c == ';' || c.is_whitespace()).is_empty() {
        return Err(invalid("empty tree body"));
    }

    Ok(TreeEntry::new(name, rooting_tag, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nexus::router::route;
    use crate::nexus::scanner::scan;

    fn trees_of(text: &str, duplicates: DuplicateTokens) -> Result<TreesBlock, NexusError> {
        let blocks = route(scan(text).unwrap()).unwrap();
        parse_trees_block(&blocks[0], duplicates)
    }

    #[test]
    fn test_translate_and_trees() {
        let block = trees_of(
            "#NEXUS\nBEGIN TREES;\n\
             TRANSLATE\n  beetle Scarabaeus,\n  fly Drosophila,\n  spider Aranaeus;\n\
             TREE translated = ((beetle,fly),spider);\n\
             END;",
            DuplicateTokens::default(),
        )
        .unwrap();

        let pairs: Vec<_> = block.translate().iter().map(|(t, l)| (t.as_str(), l.as_str())).collect();
        assert_eq!(pairs, vec![("beetle", "Scarabaeus"), ("fly", "Drosophila"), ("spider", "Aranaeus")]);
        assert_eq!(block.trees().len(), 1);
        assert_eq!(block.trees()[0].name(), "translated");
        assert_eq!(block.trees()[0].raw_body(), "((beetle,fly),spider);");
        assert_eq!(block.trees()[0].rooting_tag(), None);
    }

    #[test]
    fn test_translate_quoted_labels_and_trailing_comma() {
        let block = trees_of(
            "#NEXUS\nBEGIN TREES; Translate 1 'Baillon''s Crake', 2\t'Swamp, hen' , 3 Pukeko,; END;",
            DuplicateTokens::default(),
        )
        .unwrap();

        assert_eq!(block.translate().len(), 3);
        assert_eq!(block.translate().get("1"), Some("'Baillon''s Crake'"));
        assert_eq!(block.translate().get("2"), Some("'Swamp, hen'"));
        assert_eq!(block.translate().get("3"), Some("Pukeko"));
    }

    #[test]
    fn test_translate_duplicates() {
        let text = "#NEXUS\nBEGIN TREES; Translate 1 A, 2 B, 1 C; END;";

        let block = trees_of(text, DuplicateTokens::LastWins).unwrap();
        assert_eq!(block.translate().get("1"), Some("C"));
        assert_eq!(block.translate().iter().next().map(|(t, _)| t.as_str()), Some("1"));

        let err = trees_of(text, DuplicateTokens::Reject).unwrap_err();
        assert!(err.message().contains("mapped twice"));
    }

    #[test]
    fn test_merge_translate_tables() {
        let first: TranslateTable = [("1", "Ephedra"), ("2", "Gnetum")].into_iter().collect();
        let second: TranslateTable = [("2", "Gnetum"), ("3", "Welwitschia")].into_iter().collect();
        let conflicting: TranslateTable = [("1", "Ginkgo")].into_iter().collect();

        let mut table = first.clone();
        table.merge(&second, DuplicateTokens::Reject).unwrap();
        assert_eq!(table.len(), 3);

        let err = table.merge(&conflicting, DuplicateTokens::Reject).unwrap_err();
        assert!(err.message().contains("across TREES blocks"));
        assert_eq!(table.get("1"), Some("Ephedra"));

        table.merge(&conflicting, DuplicateTokens::LastWins).unwrap();
        assert_eq!(table.get("1"), Some("Ginkgo"));
    }

    #[test]
    fn test_translate_piece_without_label_skipped() {
        let block = trees_of("#NEXUS\nBEGIN TREES; Translate 1 A, 2, 3 C; END;", DuplicateTokens::default()).unwrap();
        assert_eq!(block.translate().len(), 2);
        assert!(!block.translate().contains("2"));
    }

    #[test]
    fn test_rooting_tags() {
        let block = trees_of(
            "#NEXUS\nBEGIN TREES;\n\
             Tree a = [&U] (1,2,(3,(4,5)));\n\
             tree b=[&R](A,B);\n\
             TREE c = [&lnP=-2.5] (A,B);\n\
             END;",
            DuplicateTokens::default(),
        )
        .unwrap();

        let trees = block.trees();
        assert_eq!(trees[0].rooting_tag(), Some(RootingTag::Unrooted));
        assert_eq!(trees[0].raw_body(), "(1,2,(3,(4,5)));");
        assert_eq!(trees[1].rooting_tag(), Some(RootingTag::Rooted));
        assert_eq!(trees[1].raw_body(), "(A,B);");
        assert_eq!(trees[2].rooting_tag(), None);
        assert_eq!(trees[2].raw_body(), "(A,B);");
    }

    #[test]
    fn test_tree_names() {
        let block = trees_of(
            "#NEXUS\nBEGIN TREES; Tree * best = (A,B); Tree 'my tree=1' = (A,B); END;",
            DuplicateTokens::default(),
        )
        .unwrap();

        assert_eq!(block.trees()[0].name(), "best");
        assert_eq!(block.trees()[1].name(), "my tree=1");
    }

    #[test]
    fn test_malformed_tree_statements() {
        for text in [
            "#NEXUS\nBEGIN TREES; Tree broken (A,B); END;",
            "#NEXUS\nBEGIN TREES; Tree = (A,B); END;",
            "#NEXUS\nBEGIN TREES; Tree empty = ; END;",
            "#NEXUS\nBEGIN TREES; Tree tagged = [&U]; END;",
        ] {
            assert!(trees_of(text, DuplicateTokens::default()).is_err(), "{text}");
        }
    }

    #[test]
    fn test_empty_trees_block() {
        let block = trees_of("#NEXUS\nBEGIN TREES; END;", DuplicateTokens::default()).unwrap();
        assert!(block.trees().is_empty());
        assert!(block.translate().is_empty());
    }

    #[test]
    fn test_normalize_body() {
        assert_eq!(normalize_body(" (A,B) "), "(A,B);");
        assert_eq!(normalize_body("(A,B);;\n"), "(A,B);");
        assert_eq!(TreeEntry::new("t", None, "(A,B); ;").raw_body(), "(A,B);");
    }
}
