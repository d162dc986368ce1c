//! Splitting a Nexus document into statements.
//!
//! [scan] checks the `#NEXUS` header, removes `[...]` comments and cuts the
//! remaining text at every `;` into [Statement]s. Single-quoted labels are
//! opaque: brackets and semicolons inside them are kept. The one bracket group
//! that survives is a rooting tag (`[&U]`, `[&R]`) directly after the `=` of a
//! `tree` statement, which the trees block handler picks up.

use crate::nexus::defs::{NEXUS_HEADER, TREE};
use crate::nexus::error::NexusError;
use crate::parser::utils::find_outside_quotes;
use tracing::debug;

/// Number of characters shown when the header is missing
const HEADER_CONTEXT_LENGTH: usize = 20;

// =#========================================================================#=
// STATEMENT
// =#========================================================================#=
/// A trimmed, comment-free instruction of a Nexus document,
/// without its terminating `;`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    text: String,
    position: usize,
}

impl Statement {
    /// Creates a statement from its text and the byte offset where it starts.
    pub fn new(text: impl Into<String>, position: usize) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        let text = if trimmed.len() == text.len() { text } else { trimmed.to_string() };
        Self { text, position }
    }

    /// The statement text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte offset of the statement in the scanned document.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The case-folded first word, e.g. `"begin"` for `BEGIN TREES`.
    pub fn keyword(&self) -> String {
        self.split_keyword().0.to_ascii_lowercase()
    }

    /// Whether the first word equals `keyword` (case-insensitive).
    pub fn is(&self, keyword: &str) -> bool {
        self.split_keyword().0.eq_ignore_ascii_case(keyword)
    }

    /// The text after the first word, trimmed.
    pub fn rest(&self) -> &str {
        self.split_keyword().1
    }

    fn split_keyword(&self) -> (&str, &str) {
        match self.text.find(char::is_whitespace) {
            Some(i) => (&self.text[..i], self.text[i..].trim_start()),
            None => (&self.text, ""),
        }
    }
}

// =#========================================================================#=
// SCANNING
// =#========================================================================#=
/// Splits a Nexus document into its statements.
///
/// # Errors
/// Returns a [NexusError] if
/// - the first non-whitespace content is not the `#NEXUS` token,
/// - a comment or quoted label is not closed, or
/// - text remains after the last `;`.
///
/// # Example
/// ```
/// use nextrees::nexus::scanner::scan;
///
/// let statements = scan("#NEXUS\nBEGIN TREES; [generated] Tree t = [&U] (A,B); END;").unwrap();
/// let texts: Vec<_> = statements.iter().map(|s| s.text()).collect();
/// assert_eq!(texts, vec!["BEGIN TREES", "Tree t = [&U] (A,B)", "END"]);
/// ```
pub fn scan(text: &str) -> Result<Vec<Statement>, NexusError> {
    let body_start = skip_header(text)?;

    let mut statements = Vec::new();
    let mut buffer = String::new();
    let mut statement_start = None;
    let mut quote_start = None;

    let mut i = body_start;
    while let Some(c) = text[i..].chars().next() {
        let width = c.len_utf8();

        if quote_start.is_some() {
            if c == '\'' {
                quote_start = None;
            }
            buffer.push(c);
            i += width;
            continue;
        }

        match c {
            '\'' => {
                quote_start = Some(i);
                statement_start.get_or_insert(i);
                buffer.push(c);
            }
            '[' => {
                let end = comment_end(text, i)?;
                let comment = &text[i..end];
                if is_rooting_tag(comment) && ends_at_tree_equals(&buffer) {
                    buffer.push_str(comment);
                } else {
                    // A comment separates tokens like whitespace does
                    buffer.push(' ');
                }
                i = end;
                continue;
            }
            ';' => {
                if let Some(start) = statement_start.take() {
                    statements.push(Statement::new(buffer.as_str(), start));
                }
                buffer.clear();
            }
            _ => {
                if !c.is_whitespace() {
                    statement_start.get_or_insert(i);
                }
                buffer.push(c);
            }
        }
        i += width;
    }

    if let Some(start) = quote_start {
        return Err(NexusError::new(format!("Quoted label starting at position {start} is never closed")));
    }
    if let Some(start) = statement_start {
        return Err(NexusError::unterminated_statement(buffer.trim(), start));
    }

    debug!("Scanned {} statements", statements.len());
    Ok(statements)
}

/// Checks the `#NEXUS` header and returns the byte offset right after it.
fn skip_header(text: &str) -> Result<usize, NexusError> {
    let content = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let offset = text.len() - content.len();

    let header_len = NEXUS_HEADER.len();
    let has_header = content
        .get(..header_len)
        .is_some_and(|header| header.eq_ignore_ascii_case(NEXUS_HEADER))
        && content[header_len..]
            .chars()
            .next()
            .is_none_or(|c| c.is_whitespace() || c == ';' || c == '[');

    if !has_header {
        let found: String = content.chars().take(HEADER_CONTEXT_LENGTH).collect();
        return Err(NexusError::missing_header(&found));
    }

    Ok(offset + header_len)
}

/// Returns the byte offset after the `]` closing the (possibly nested)
/// comment that opens at `start`.
fn comment_end(text: &str, start: usize) -> Result<usize, NexusError> {
    let mut depth = 0usize;
    for (i, b) in text[start..].bytes().enumerate() {
        match b {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(start + i + 1);
                }
            }
            _ => {}
        }
    }

    Err(NexusError::new(format!("Comment starting at position {start} is never closed")))
}

/// Whether a bracket group is a rooting tag: `&` and one letter, e.g. `[&U]`.
fn is_rooting_tag(comment: &str) -> bool {
    matches!(comment.as_bytes(), [b'[', b'&', letter, b']'] if letter.is_ascii_alphabetic())
}

/// Whether the statement text so far is `tree <name> =`, with nothing after the `=`.
fn ends_at_tree_equals(buffer: &str) -> bool {
    let text = buffer.trim();
    let is_tree = text
        .split(char::is_whitespace)
        .next()
        .is_some_and(|keyword| keyword.eq_ignore_ascii_case(TREE));

    is_tree && find_outside_quotes(text, '=') == Some(text.len() - 1)
}
