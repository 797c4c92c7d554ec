//! Syntactic analysis for STAR/CIF documents
//!
//! The grammar is LL(1): the kind of the next token always selects the
//! production, so parsing is a single forward pass over the scanner's
//! output. `grammar` records the expected-token sets reported when that
//! selection fails, and `parser` drives the productions and assembles the
//! document through [`crate::star::building::DocumentBuilder`].

pub mod grammar;
pub mod parser;

pub use parser::{parse, Parser};
