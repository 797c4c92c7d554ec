//! Scanner for the STAR/CIF lexical layer
//!
//!     This module turns raw source text into a stream of typed tokens with
//!     byte offsets. Scanning is rule-table driven: an ordered list of
//!     patterns is tried at the cursor and the longest match wins, with
//!     earlier rules breaking ties. Whitespace and comment rules participate
//!     like any other rule but their matches are discarded, so the parser
//!     only ever sees significant tokens.
//!
//! The Scanning Pipeline
//!
//!     1. Rule table. See [rules](rules). The ordered patterns, the shared
//!        name character class, and the reserved-prefix guard that keeps
//!        keyword-shaped words out of the bare-value rule.
//!
//!     2. Cursor scanner. See [scanner](scanner). Applies the table at the
//!        cursor, tracks the semicolon text-field mode, and exposes one-token
//!        lookahead for the parser.
//!
//! Text Field Mode
//!
//!     A semicolon only opens a multi-line text field when it is the first
//!     character of a physical line. The opening rule therefore consumes the
//!     preceding line terminator itself, and comment/newline discards are
//!     written so they never swallow a terminator that sits before a
//!     semicolon. While a field is open the scanner switches to a restricted
//!     rule set: whole continuation lines and the closing `;` are the only
//!     recognizable tokens, so field content is never mistaken for keywords
//!     or values. Token lexemes inside a field keep their terminators, which
//!     lets the value normalizer reconstruct the content exactly.

pub mod rules;
pub mod scanner;
pub mod tokens;

pub use scanner::{tokenize, Scanner};
pub use tokens::{Token, TokenKind};
