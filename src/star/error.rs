//! Error types for STAR/CIF parsing
//!
//! Every failure mode of the pipeline is one variant of [`ParseError`]. A
//! parse either returns a complete document or exactly one of these; there is
//! no partial-result or recovery mode.

use crate::star::lexing::tokens::TokenKind;
use std::fmt;

/// Errors that can occur while scanning and parsing a STAR/CIF document
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// No lexical rule matches the input at the given byte offset
    Lexical { offset: usize },
    /// The lookahead token is not in the expected set for the current
    /// grammar position
    Syntax {
        offset: usize,
        expected: Vec<TokenKind>,
    },
    /// Collected loop values are not an exact multiple of the column count
    LoopArity { columns: Vec<String> },
    /// A name collides case-insensitively with an existing name in the
    /// same block or document
    DuplicateName { name: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lexical { offset } => {
                write!(f, "Unrecognizable text at offset {}", offset)
            }
            ParseError::Syntax { offset, expected } => {
                let kinds: Vec<&str> = expected.iter().map(|k| k.describe()).collect();
                write!(
                    f,
                    "Syntax error at offset {}: expected one of {}",
                    offset,
                    kinds.join(", ")
                )
            }
            ParseError::LoopArity { columns } => {
                write!(
                    f,
                    "Incorrect number of loop values for loop containing {}",
                    columns.join(", ")
                )
            }
            ParseError::DuplicateName { name } => {
                write!(f, "Duplicate data name or block name {} in input", name)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Type alias for results across the parsing pipeline
pub type ParseResult<T> = Result<T, ParseError>;
