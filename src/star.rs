//! STAR/CIF parsing pipeline
//!
//! The crate reads the STAR family of text formats, of which CIF is the
//! best-known member: named `data_` blocks holding key/value items,
//! `loop_` tables, and nested `save_` frames. Parsing runs as a small
//! pipeline:
//!
//! ```text
//! source text
//!     │  lexing      ordered rule table, longest match, text-field mode
//!     ▼
//! token stream
//!     │  parsing     LL(1) recursive descent
//!     ▼
//! raw values ── values ── quote stripping, prefix and fold protocols
//!     │
//!     ▼
//! building      one builder per block/frame, merged outward
//!     │
//!     ▼
//! [`Document`]  ordered blocks, case-insensitive lookup
//! ```
//!
//! Most callers only need [`parse`]:
//!
//! ```no_run
//! let doc = star_parser::parse("data_demo\n_alpha 1.5\n")?;
//! let block = doc.block("demo").unwrap();
//! assert_eq!(block.value("_alpha").unwrap().as_single(), Some("1.5"));
//! # Ok::<(), star_parser::ParseError>(())
//! ```
//!
//! The stages are public so tools can stop partway: [`lexing::tokenize`]
//! for a token dump, [`values`] for the text-field normalization protocols
//! on their own, and [`Parser::with_trace`] to watch values as the parser
//! recognizes them.

pub mod ast;
pub mod building;
pub mod error;
pub mod lexing;
pub mod parsing;
pub mod values;

pub use ast::{Block, Document, Item, Loop, Value};
pub use error::{ParseError, ParseResult};
pub use lexing::{tokenize, Token, TokenKind};
pub use parsing::{parse, Parser};
