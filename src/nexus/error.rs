//! Error type of the Nexus reader.

use thiserror::Error;

/// Error raised when a Nexus document cannot be read.
///
/// There is a single kind carrying a human-readable message; any such error
/// aborts the whole parse. Missing optional structure (no TAXA or TREES block,
/// an empty TREES block) is never an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct NexusError {
    message: String,
}

impl NexusError {
    /// Create a [NexusError] with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Convenience constructor for a document not starting with `#NEXUS`
    pub(crate) fn missing_header(found: &str) -> Self {
        Self::new(format!("Document does not start with #NEXUS header (found {found:?})"))
    }

    /// Convenience constructor for an `END` without open block
    pub(crate) fn unexpected_end(position: usize) -> Self {
        Self::new(format!("END at position {position} without an open block"))
    }

    /// Convenience constructor for a block still open at document end
    pub(crate) fn unclosed_block(name: &str, position: usize) -> Self {
        Self::new(format!("Block '{name}' opened at position {position} is never closed"))
    }

    /// Convenience constructor for malformed `Tree` statements
    pub(crate) fn invalid_tree_statement(reason: &str, statement: &str, position: usize) -> Self {
        Self::new(format!("Invalid TREE statement at position {position} - {reason}: {statement:?}"))
    }

    /// Convenience constructor for a statement without terminating `;`
    pub(crate) fn unterminated_statement(fragment: &str, position: usize) -> Self {
        Self::new(format!("Statement at position {position} is not terminated by ';': {fragment:?}"))
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for NexusError {
    fn from(err: std::io::Error) -> Self {
        Self::new(format!("IO error - {err}"))
    }
}
