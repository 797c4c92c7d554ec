//! Expected-token sets for each decision point of the grammar
//!
//! The parser recognizes this shape, dispatching on one token of lookahead
//! at every alternative:
//!
//!     input      := datablock* EOF
//!     datablock  := DATA_HEADING ( saveframe | loop | keyvalue )*
//!     saveframe  := SAVE_HEADING ( saveframe | loop | keyvalue )* SAVE_END
//!     loop       := LOOP_ name* value+
//!     keyvalue   := name value
//!     value      := scalar | text-field
//!
//! When the lookahead fits none of the alternatives at a decision point,
//! the error carries the full set of token kinds that would have been
//! acceptable there. These tables are those sets, one per decision point,
//! in the order they are reported.

use crate::star::lexing::TokenKind;

/// Top level between blocks
pub(crate) const INPUT_EXPECTED: &[TokenKind] = &[TokenKind::Eof, TokenKind::DataHeading];

/// Inside a data block body, including the tokens that legally end it
pub(crate) const BLOCK_BODY_EXPECTED: &[TokenKind] = &[
    TokenKind::SaveHeading,
    TokenKind::Loop,
    TokenKind::DataName,
    TokenKind::SaveEnd,
    TokenKind::Eof,
    TokenKind::DataHeading,
];

/// Inside a save frame body; the frame terminator leads the set
pub(crate) const FRAME_BODY_EXPECTED: &[TokenKind] = &[
    TokenKind::SaveEnd,
    TokenKind::SaveHeading,
    TokenKind::Loop,
    TokenKind::DataName,
    TokenKind::Eof,
    TokenKind::DataHeading,
];

/// Where a value must appear
pub(crate) const VALUE_EXPECTED: &[TokenKind] = &[TokenKind::Value, TokenKind::TextStart];

/// After `loop_`, while collecting column names
pub(crate) const LOOP_FIELD_EXPECTED: &[TokenKind] = &[
    TokenKind::DataName,
    TokenKind::Value,
    TokenKind::TextStart,
];

/// While collecting loop values, including everything that may follow the
/// last one
pub(crate) const LOOP_VALUES_EXPECTED: &[TokenKind] = &[
    TokenKind::Value,
    TokenKind::TextStart,
    TokenKind::Loop,
    TokenKind::DataName,
    TokenKind::SaveHeading,
    TokenKind::SaveEnd,
    TokenKind::Eof,
    TokenKind::DataHeading,
];

/// Inside an open text field
pub(crate) const TEXT_FIELD_EXPECTED: &[TokenKind] =
    &[TokenKind::TextLine, TokenKind::TextEnd];
