//! # star-parser
//!
//! A parser for STAR/CIF data files.
//!
//! STAR is the tag-value text format behind CIF (crystallography) and
//! NMR-STAR: `data_` blocks containing `_name value` items, `loop_`
//! tables, multi-line semicolon text fields, and nested `save_` frames.
//! This crate parses that syntax into an ordered [`Document`] model with
//! case-insensitive name lookup, and applies the CIF text-field
//! conventions (quote stripping, line-prefix removal, line folding) to
//! every value.
//!
//! Everything lives under the [`star`] module; the common entry points are
//! re-exported here.

pub mod star;

pub use star::{
    parse, tokenize, Block, Document, Item, Loop, ParseError, ParseResult, Parser, Token,
    TokenKind, Value,
};
