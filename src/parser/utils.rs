//! Utility functions for labels in Nexus and Newick text.
//!
//! Labels with special characters are written in single quotes, with each
//! internal single quote doubled. This module escapes labels for writing,
//! unquotes them for reading, and splits Nexus statement text without
//! breaking quoted labels apart.

/// Characters that force a label into single quotes.
/// Underscores count as well, since an unquoted `_` is read back as a space.
const SPECIAL_CHARACTERS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'', '_'];

/// Checks if a label is enclosed in single quotes.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::is_single_quoted;
/// assert_eq!(is_single_quoted("Pukeko"), false);
/// assert_eq!(is_single_quoted("'Swamp hen'"), true);
/// assert_eq!(is_single_quoted("'"), false);
/// ```
pub fn is_single_quoted(label: &str) -> bool {
    label.len() >= 2 && label.starts_with('\'') && label.ends_with('\'')
}

/// Escapes a label for writing it into a Newick string.
///
/// Labels containing special characters (including `_`) are wrapped in
/// single quotes with internal quotes doubled; otherwise spaces become
/// underscores. Reading the result back with [unescape_label] gives the
/// original label.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label("tree_1"), "'tree_1'");
/// ```
pub fn escape_label(label: &str) -> String {
    if label.chars().any(|c| SPECIAL_CHARACTERS.contains(&c)) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

/// Removes enclosing single quotes and undoubles internal quotes.
/// Unquoted labels are returned unchanged (underscores are kept).
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::unquote_label;
/// assert_eq!(unquote_label("Pukeko"), "Pukeko");
/// assert_eq!(unquote_label("tree_1"), "tree_1");
/// assert_eq!(unquote_label("'Baillon''s Crake'"), "Baillon's Crake");
/// ```
pub fn unquote_label(label: &str) -> String {
    if is_single_quoted(label) {
        label[1..label.len() - 1].replace("''", "'")
    } else {
        label.to_string()
    }
}

/// Reads a label as written in Newick text: a quoted label is unquoted,
/// in an unquoted label every `_` stands for a space.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::unescape_label;
/// assert_eq!(unescape_label("Australasian_Swamphen"), "Australasian Swamphen");
/// assert_eq!(unescape_label("'Australasian_Swamphen'"), "Australasian_Swamphen");
/// assert_eq!(unescape_label("'Baillon''s Crake'"), "Baillon's Crake");
/// ```
pub fn unescape_label(label: &str) -> String {
    if is_single_quoted(label) {
        unquote_label(label)
    } else {
        label.replace('_', " ")
    }
}

/// Returns the byte offset of the first `target` outside single quotes.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::find_outside_quotes;
/// assert_eq!(find_outside_quotes("'a=b' = (A,B)", '='), Some(6));
/// assert_eq!(find_outside_quotes("'a=b'", '='), None);
/// ```
pub fn find_outside_quotes(text: &str, target: char) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in text.char_indices() {
        if c == '\'' {
            in_quotes = !in_quotes;
        } else if c == target && !in_quotes {
            return Some(i);
        }
    }
    None
}

/// Splits `text` at every `separator` outside single quotes.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::split_outside_quotes;
/// let pieces = split_outside_quotes("1 A, 2 'B, C'", ',');
/// assert_eq!(pieces, vec!["1 A", " 2 'B, C'"]);
/// ```
pub fn split_outside_quotes(text: &str, separator: char) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while let Some(i) = find_outside_quotes(rest, separator) {
        pieces.push(&rest[..i]);
        rest = &rest[i + separator.len_utf8()..];
    }
    pieces.push(rest);
    pieces
}

/// Splits `text` into whitespace-separated words, keeping quoted labels
/// (with their quotes) as one word.
///
/// # Examples
/// ```
/// # use nextrees::parser::utils::split_words;
/// let words = split_words("Apteryx_haastii  'Apteryx owenii'\n Apteryx_rowi");
/// assert_eq!(words, vec!["Apteryx_haastii", "'Apteryx owenii'", "Apteryx_rowi"]);
/// ```
pub fn split_words(text: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut start = None;
    let mut in_quotes = false;
    for (i, c) in text.char_indices() {
        if c == '\'' {
            in_quotes = !in_quotes;
        }
        if c.is_whitespace() && !in_quotes {
            if let Some(s) = start.take() {
                words.push(&text[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        words.push(&text[s..]);
    }
    words
}
