//! Low-level byte-by-byte parser for Newick text.
//!
//! This module provides [ByteParser] for walking over an in-memory tree string
//! with support for peeking, consuming, comment skipping and quote-aware label
//! parsing. Used by the [NewickParser](crate::newick::NewickParser).

use crate::parser::parsing_error::ParsingError;
use crate::parser::utils::unescape_label;

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser over borrowed text.
///
/// Delimiters of the Newick grammar are all ASCII, so slicing at them never
/// splits a multi-byte character; labels are decoded from the collected bytes.
///
/// # Example
/// ```
/// use nextrees::parser::ByteParser;
///
/// let mut parser = ByteParser::for_str("  [comment] (A,B);");
/// parser.skip_comment_and_whitespace().unwrap();
/// assert_eq!(parser.peek(), Some(b'('));
/// ```
pub struct ByteParser<'a> {
    /// The borrowed bytes being parsed
    input: &'a [u8],
    /// Current position in `input`
    pos: usize,
}

impl<'a> ByteParser<'a> {
    /// Creates a new [ByteParser] over a string slice.
    pub fn for_str(input: &'a str) -> Self {
        Self::for_bytes(input.as_bytes())
    }

    /// Creates a new [ByteParser] over a byte slice.
    pub fn for_bytes(input: &'a [u8]) -> Self {
        Self { input, pos: 0 }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Gets the current byte and advances the position.
    #[inline(always)]
    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips (consumes) all consecutive ASCII whitespace.
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    /// Skips (consumes) a bracketed comment if present; comments may nest.
    ///
    /// # Returns
    /// * `Ok(true)` - A comment was found and consumed
    /// * `Ok(false)` - No comment at current position
    /// * [ParsingError] - Comment was opened but never closed
    pub fn skip_comment(&mut self) -> Result<bool, ParsingError> {
        if self.peek() != Some(b'[') {
            return Ok(false);
        }

        let start = self.pos;
        let mut depth = 0usize;
        while let Some(b) = self.next_byte() {
            match b {
                b'[' => depth += 1,
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(true);
                    }
                }
                _ => {}
            }
        }

        self.pos = start;
        Err(ParsingError::unclosed_comment(self))
    }

    /// Skips (consumes) all consecutive whitespace and comments.
    pub fn skip_comment_and_whitespace(&mut self) -> Result<(), ParsingError> {
        self.skip_whitespace();

        while self.skip_comment()? {
            self.skip_whitespace();
        }

        Ok(())
    }

    /// Consumes the current byte if it equals `ch`.
    pub fn consume_if(&mut self, ch: u8) -> bool {
        if self.peek() == Some(ch) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the end of input has been reached.
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns a string of up to `k` bytes from the current position for error context.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let end = (self.pos + k).min(self.input.len());
        let start = self.pos.min(end);
        String::from_utf8_lossy(&self.input[start..end]).into_owned()
    }

    /// Parses a label (quoted or unquoted) ending at one of the given delimiters.
    ///
    /// Leading whitespace and comments are skipped first. In an unquoted
    /// label, `_` stands for a space; inside quotes it is kept.
    pub fn parse_label(&mut self, delimiters: &[u8]) -> Result<String, ParsingError> {
        self.skip_comment_and_whitespace()?;

        if self.peek() == Some(b'\'') {
            self.parse_quoted_label()
        } else {
            Ok(unescape_label(&self.parse_unquoted_label(delimiters)))
        }
    }

    /// Parses a label enclosed in single quotes; a doubled quote (`''`)
    /// stands for one literal quote.
    ///
    /// Assumes the opening quote has not been consumed yet.
    pub fn parse_quoted_label(&mut self) -> Result<String, ParsingError> {
        let start = self.pos;
        self.pos += 1; // opening '

        let mut bytes = Vec::new();
        loop {
            match self.next_byte() {
                Some(b'\'') => {
                    if self.consume_if(b'\'') {
                        bytes.push(b'\'');
                    } else {
                        return Ok(String::from_utf8_lossy(&bytes).into_owned());
                    }
                }
                Some(b) => bytes.push(b),
                None => {
                    self.pos = start;
                    return Err(ParsingError::unclosed_quote(self));
                }
            }
        }
    }

    /// Parses an unquoted label until any of the given delimiters (or end of input).
    pub fn parse_unquoted_label(&mut self, delimiters: &[u8]) -> String {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if delimiters.contains(&b) {
                break;
            }
            self.pos += 1;
        }

        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }

    /// Consumes bytes while `accept` holds and returns them as a string slice.
    pub fn consume_while(&mut self, accept: impl Fn(u8) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(b) = self.peek() {
            if !accept(b) {
                break;
            }
            self.pos += 1;
        }

        // Only ASCII predicates are used, so the slice boundaries are valid UTF-8
        let input = self.input;
        std::str::from_utf8(&input[start..self.pos]).unwrap_or_default()
    }
}
