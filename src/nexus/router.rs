//! Grouping statements into Nexus blocks.

use crate::nexus::defs::{BLOCK_BEGIN, BLOCK_END, BLOCK_ENDBLOCK, NexusBlock};
use crate::nexus::error::NexusError;
use crate::nexus::scanner::Statement;
use tracing::debug;

// =#========================================================================#=
// BLOCK
// =#========================================================================#=
/// A `BEGIN <name>; ... END;` block with the statements between its
/// opening and closing directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    kind: NexusBlock,
    name: String,
    position: usize,
    statements: Vec<Statement>,
}

impl Block {
    /// Creates an empty block from its name (case-folded here).
    pub fn new(name: &str, position: usize) -> Self {
        Self {
            kind: NexusBlock::from_name(name),
            name: name.to_ascii_lowercase(),
            position,
            statements: Vec::new(),
        }
    }

    /// The kind of block.
    pub fn kind(&self) -> &NexusBlock {
        &self.kind
    }

    /// The case-folded block name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Byte offset of the opening `BEGIN`.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The statements of this block, in document order.
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }
}

// =#========================================================================#=
// ROUTING
// =#========================================================================#=
/// Groups statements into blocks.
///
/// `BEGIN <name>` opens a block, `END` (or `ENDBLOCK`) closes the innermost
/// open block. Statements outside of any block are ignored. Blocks are
/// returned in the order they are closed; all kinds are returned, but only
/// [NexusBlock::Taxa] and [NexusBlock::Trees] are interpreted later.
///
/// # Errors
/// Returns a [NexusError] for a `BEGIN` without name, an `END` without open
/// block, or a block that is still open at the end of the document.
pub fn route(statements: Vec<Statement>) -> Result<Vec<Block>, NexusError> {
    let mut open: Vec<Block> = Vec::new();
    let mut blocks = Vec::new();

    for statement in statements {
        let keyword = statement.keyword();

        if keyword == BLOCK_BEGIN {
            let name = statement.rest();
            if name.is_empty() {
                return Err(NexusError::new(format!(
                    "BEGIN at position {} without block name",
                    statement.position()
                )));
            }
            debug!("Opening block '{name}' at position {}", statement.position());
            open.push(Block::new(name, statement.position()));
        } else if keyword == BLOCK_END || keyword == BLOCK_ENDBLOCK {
            let block = open.pop().ok_or_else(|| NexusError::unexpected_end(statement.position()))?;
            debug!(
                "Closing block '{}' with {} statements{}",
                block.name,
                block.statements.len(),
                if block.kind.is_interpreted() { "" } else { " (not interpreted)" }
            );
            blocks.push(block);
        } else if let Some(block) = open.last_mut() {
            block.statements.push(statement);
        } else {
            debug!("Ignoring statement outside of any block: {:?}", statement.text());
        }
    }

    if let Some(block) = open.last() {
        return Err(NexusError::unclosed_block(&block.name, block.position));
    }

    Ok(blocks)
}
