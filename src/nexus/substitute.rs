//! Translate-table substitution on raw Newick text.

use crate::nexus::defs::NEWICK_DELIMITERS;
use crate::nexus::trees::TranslateTable;

/// Replaces the leaf tokens of a Newick body found in `table`.
///
/// The body is cut at the Newick delimiters `(`, `)`, `,`, `:` and `;`
/// (outside single quotes), which are kept in place. A token is looked up
/// only when it names a leaf, i.e. when it starts the body or follows `(` or
/// `,`. Branch lengths (after `:`) and internal labels (after `)`) are never
/// replaced, and tokens are compared whole, so `1` never matches inside `12`.
/// Whitespace around tokens is dropped.
///
/// # Example
/// ```
/// use nextrees::nexus::substitute::substitute;
/// use nextrees::nexus::trees::TranslateTable;
///
/// let table: TranslateTable = [("beetle", "Scarabaeus"), ("fly", "Drosophila"), ("spider", "Aranaeus")]
///     .into_iter()
///     .collect();
/// assert_eq!(substitute("((beetle,fly),spider)", &table), "((Scarabaeus,Drosophila),Aranaeus)");
/// assert_eq!(substitute("((1,2),3)", &table), "((1,2),3)");
/// ```
pub fn substitute(raw_body: &str, table: &TranslateTable) -> String {
    let mut output = String::with_capacity(raw_body.len() + 8 * table.len().min(raw_body.len()));
    let mut token_start = 0;
    let mut previous_delimiter = None;
    let mut in_quotes = false;

    for (i, c) in raw_body.char_indices() {
        if c == '\'' {
            in_quotes = !in_quotes;
        } else if !in_quotes && NEWICK_DELIMITERS.contains(&c) {
            push_token(&mut output, &raw_body[token_start..i], previous_delimiter, table);
            output.push(c);
            previous_delimiter = Some(c);
            token_start = i + c.len_utf8();
        }
    }
    push_token(&mut output, &raw_body[token_start..], previous_delimiter, table);

    output
}

/// Appends a trimmed token, replaced by its label if it is a mapped leaf.
fn push_token(output: &mut String, token: &str, previous_delimiter: Option<char>, table: &TranslateTable) {
    let token = token.trim();
    if token.is_empty() {
        return;
    }

    let is_leaf = matches!(previous_delimiter, None | Some('(') | Some(','));
    match table.get(token) {
        Some(label) if is_leaf => output.push_str(label),
        _ => output.push_str(token),
    }
}
