//! Token types produced by the STAR/CIF scanner
//!
//! Tokens carry a borrowed lexeme slice plus byte offsets into the source
//! text. Whitespace and comments are discarded during scanning and never
//! surface as tokens; everything else becomes one of the kinds below.

/// The lexical class of a scanned token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// The `loop_` keyword (case-insensitive)
    Loop,
    /// The `global_` keyword (recognized but accepted by no production)
    Global,
    /// The `stop_` keyword (recognized but accepted by no production)
    Stop,
    /// A `save_<name>` heading opening a save frame
    SaveHeading,
    /// A bare `save_` closing a save frame
    SaveEnd,
    /// A `_<name>` data name
    DataName,
    /// A `data_<name>` heading opening a data block
    DataHeading,
    /// The opening line of a semicolon-delimited text field, including the
    /// preceding line terminator
    TextStart,
    /// One continuation line inside a semicolon-delimited text field
    TextLine,
    /// The closing `;` of a semicolon-delimited text field
    TextEnd,
    /// A scalar value: bare, quoted, or triple-quoted
    Value,
    /// End of input
    Eof,
}

impl TokenKind {
    /// Human-readable name used when listing expected kinds in errors
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Loop => "loop_",
            TokenKind::Global => "global_",
            TokenKind::Stop => "stop_",
            TokenKind::SaveHeading => "save frame heading",
            TokenKind::SaveEnd => "save_",
            TokenKind::DataName => "data name",
            TokenKind::DataHeading => "data heading",
            TokenKind::TextStart => "text field start",
            TokenKind::TextLine => "text field line",
            TokenKind::TextEnd => "text field end",
            TokenKind::Value => "value",
            TokenKind::Eof => "end of input",
        }
    }
}

/// One scanned token: kind, borrowed lexeme, byte offsets
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub start: usize,
    pub end: usize,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, start: usize, end: usize) -> Self {
        Token {
            kind,
            text,
            start,
            end,
        }
    }

    /// The heading payload with its 5-character keyword prefix removed.
    ///
    /// Only meaningful for `DataHeading` and `SaveHeading` tokens, whose
    /// lexemes always begin with `data_` or `save_` in some letter case.
    pub fn heading_name(&self) -> &'src str {
        &self.text[5..]
    }
}
