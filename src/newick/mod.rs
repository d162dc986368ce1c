//! Newick format parser and writer for phylogenetic trees.
//!
//! This module provides [NewickParser] to parse Newick strings into [Tree]s
//! and [to_newick] (also available as [Tree::write]) to produce canonical
//! Newick text. The Nexus loader builds its trees through [parse_str].
//!
//! # Format
//! * `tree ::= vertex ';'`
//! * `vertex ::= ['(' vertex {',' vertex} ')'] [label] [':' branch_length]`
//!
//! Whitespace and `[...]` comments may occur between elements; comment-like
//! annotations such as `[&rate=0.5]` are skipped.

mod defs;
pub mod parser;
pub mod writer;

pub use parser::NewickParser;
pub use writer::to_newick;

use crate::model::Tree;
use crate::parser::ParsingError;
use crate::parser::byte_parser::ByteParser;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single Newick string into a [Tree].
///
/// Only whitespace and comments may follow the terminating `;`.
///
/// # Returns
/// * [Tree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid Newick format
///
/// # Example
/// ```
/// use nextrees::newick::parse_str;
///
/// let tree = parse_str("(Fratercula_cirrhata,(Fratercula_arctica,Fratercula_corniculata));")?;
/// assert_eq!(tree.num_leaves(), 3);
/// # Ok::<(), nextrees::parser::ParsingError>(())
/// ```
pub fn parse_str<S: AsRef<str>>(newick: S) -> Result<Tree, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick.as_ref());
    let tree = NewickParser::new().parse_tree(&mut byte_parser)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        return Err(ParsingError::invalid_newick_string(
            &byte_parser,
            String::from("Unexpected content after ';'"),
        ));
    }

    Ok(tree)
}
