//! Structs and logic to parse Newick strings.
//!
//! This module provides the [NewickParser] struct, which turns a Newick
//! string read through a [ByteParser] into a [Tree].

use crate::model::{BranchLength, Tree, VertexIndex};
use crate::newick::defs::{DEFAULT_NUM_VERTICES_GUESS, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;

// =#========================================================================#=
// NEWICK PARSER
// =#========================================================================#=
/// Parser for Newick format phylogenetic trees.
///
/// Supports trees with any number of children per vertex, labels on leaves
/// and internal vertices, and branch lengths. After each tree the parser
/// remembers its size to pre-allocate the next one.
///
/// # Format
/// * `tree ::= vertex ';'`
/// * `vertex ::= ['(' vertex {',' vertex} ')'] [label] [':' branch_length]`
/// * `label ::= unquoted_label | "'" quoted_label "'"`
/// * `branch_length ::= number` (non-negative, scientific notation allowed)
///
/// Furthermore:
/// * Whitespace can occur between elements,
///   just not within an unquoted label or a branch length
/// * Comments are square brackets and can occur anywhere whitespace can;
///   they are skipped
/// * Inside quoted labels, `''` stands for a single quote
///
/// # Example
/// ```
/// use nextrees::newick::NewickParser;
/// use nextrees::parser::ByteParser;
///
/// let mut byte_parser = ByteParser::for_str("((A:1.0,B:1.0):0.5,C:1.5);");
/// let tree = NewickParser::new().parse_tree(&mut byte_parser).unwrap();
/// assert_eq!(tree.num_leaves(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct NewickParser {
    num_vertices: usize,
}

impl Default for NewickParser {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Construction & Configuration (pub)
// ============================================================================
impl NewickParser {
    /// Creates a new [NewickParser] with default settings.
    pub fn new() -> Self {
        Self { num_vertices: DEFAULT_NUM_VERTICES_GUESS }
    }

    /// Sets the expected number of vertices per tree for pre-allocation.
    pub fn with_num_vertices(mut self, num_vertices: usize) -> Self {
        self.num_vertices = num_vertices;
        self
    }
}

// ============================================================================
// Parsing (pub)
// ============================================================================
impl NewickParser {
    /// Parses a single Newick tree from the given [ByteParser],
    /// consuming the terminating `;`.
    ///
    /// # Returns
    /// * `Ok(Tree)` - The parsed phylogenetic tree
    /// * [ParsingError] - If the Newick format is invalid
    pub fn parse_tree(&mut self, parser: &mut ByteParser<'_>) -> Result<Tree, ParsingError> {
        let mut tree = Tree::with_capacity(self.num_vertices);

        parser.skip_comment_and_whitespace()?;
        if parser.is_eof() {
            return Err(ParsingError::unexpected_eof(parser));
        }

        self.parse_vertices(parser, &mut tree)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(b) => ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ';' at end of tree but found '{}'", b as char),
                ),
            });
        }

        self.num_vertices = tree.num_vertices();
        Ok(tree)
    }
}

// ============================================================================
// Parsing helpers (private)
// ============================================================================
impl NewickParser {
    /// Parses the vertices of one tree up to (excluding) the terminating `;`
    /// and adds them bottom-up, the root last.
    ///
    /// Opened clades are kept on an explicit stack, so nesting depth is only
    /// limited by memory.
    fn parse_vertices(&mut self, parser: &mut ByteParser<'_>, tree: &mut Tree) -> Result<(), ParsingError> {
        // Children collected so far for every clade opened but not yet closed, innermost last
        let mut open: Vec<Vec<VertexIndex>> = Vec::new();

        loop {
            parser.skip_comment_and_whitespace()?;
            if parser.consume_if(b'(') {
                open.push(Vec::with_capacity(2));
                continue;
            }

            // Finish the vertex just read, then every clade its `)` closes
            let mut children = Vec::new();
            loop {
                let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
                let label = (!label.is_empty()).then_some(label);
                let branch_length = self.parse_branch_length(parser)?;

                let Some(siblings) = open.last_mut() else {
                    // A branch length on the root is accepted but has nothing to attach to
                    tree.add_root(children, label);
                    return Ok(());
                };

                let index = if children.is_empty() {
                    tree.add_leaf(label, branch_length)
                } else {
                    tree.add_internal_vertex(children, label, branch_length)
                };
                siblings.push(index);

                parser.skip_comment_and_whitespace()?;
                match parser.next_byte() {
                    Some(b',') => break,
                    Some(b')') => children = open.pop().unwrap_or_default(),
                    Some(b) => {
                        return Err(ParsingError::invalid_newick_string(
                            parser,
                            format!("Expected ',' or ')' after child but found '{}'", b as char),
                        ));
                    }
                    None => return Err(ParsingError::unexpected_eof(parser)),
                }
            }
        }
    }

    /// Parses optional branch length `[:number]`.
    ///
    /// # Returns
    /// - [BranchLength] if found and valid
    /// - `None` if there is no branch length
    /// - [ParsingError] if the value is not a non-negative finite number
    fn parse_branch_length(&mut self, parser: &mut ByteParser<'_>) -> Result<Option<BranchLength>, ParsingError> {
        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b':') {
            return Ok(None);
        }
        parser.skip_comment_and_whitespace()?;

        let text = parser.consume_while(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'));
        let value: f64 = text
            .parse()
            .map_err(|_| ParsingError::invalid_branch_length(parser, format!("'{text}' is not a number")))?;

        BranchLength::try_new(value)
            .map(Some)
            .ok_or_else(|| ParsingError::invalid_branch_length(parser, format!("{value} is negative or not finite")))
    }
}
