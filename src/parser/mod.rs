//! Basic low-level parser functionality.
//!
//! This module provides the byte-level [ByteParser] used by the Newick
//! parser, its [ParsingError], and label utilities shared with the Nexus
//! reader.

pub mod byte_parser;
pub mod parsing_error;
pub mod utils;

pub use byte_parser::ByteParser;
pub use parsing_error::{ParsingError, ParsingErrorType};
