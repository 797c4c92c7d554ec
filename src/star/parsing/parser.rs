//! Recursive-descent parser over the token stream
//!
//! One token of lookahead decides every alternative, so the parser never
//! backtracks and the scanner never rewinds. Each data block and each save
//! frame is parsed into its own single-block sub-document by a fresh
//! builder, then merged outward: blocks into the root document, frames into
//! their parent block. Frames recurse through the same production, so
//! nesting depth is bounded only by the call stack.
//!
//! An optional trace callback observes recognition events as they happen,
//! which is mainly useful when debugging grammar-level surprises in a
//! document. It receives the normalized text of every value, the raw
//! assembled form of every semicolon text field, and every loop value after
//! the first.

use crate::star::ast::{Document, Value};
use crate::star::building::{BlockHandle, DocumentBuilder};
use crate::star::error::{ParseError, ParseResult};
use crate::star::lexing::{Scanner, Token, TokenKind};
use crate::star::parsing::grammar;
use crate::star::values::{normalize_scalar, strip_semicolon_block};

/// Parse a complete STAR/CIF document
pub fn parse(source: &str) -> ParseResult<Document> {
    Parser::new(source).parse()
}

pub struct Parser<'a> {
    scanner: Scanner<'a>,
    trace: Option<Box<dyn FnMut(&str, &str) + 'a>>,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser {
            scanner: Scanner::new(source),
            trace: None,
        }
    }

    /// Like [`Parser::new`], with a callback receiving each recognition
    /// event as a `(location, text)` pair
    pub fn with_trace(source: &'a str, trace: impl FnMut(&str, &str) + 'a) -> Self {
        Parser {
            scanner: Scanner::new(source),
            trace: Some(Box::new(trace)),
        }
    }

    /// Run the parse to completion and release the document
    pub fn parse(mut self) -> ParseResult<Document> {
        let mut builder = DocumentBuilder::new();
        loop {
            let token = self.scanner.peek()?;
            match token.kind {
                TokenKind::DataHeading => {
                    let block = self.data_block()?;
                    builder.merge_document(block)?;
                }
                TokenKind::Eof => break,
                _ => {
                    return Err(ParseError::Syntax {
                        offset: token.start,
                        expected: grammar::INPUT_EXPECTED.to_vec(),
                    })
                }
            }
        }
        Ok(builder.finish())
    }

    fn data_block(&mut self) -> ParseResult<Document> {
        let heading = self.scanner.next_token()?;
        let mut sub = DocumentBuilder::new();
        let handle = sub.new_block(heading.heading_name())?;
        self.block_body(&mut sub, handle, false)?;
        Ok(sub.finish())
    }

    fn save_frame(&mut self) -> ParseResult<Document> {
        let heading = self.scanner.next_token()?;
        let mut sub = DocumentBuilder::new();
        let handle = sub.new_block(heading.heading_name())?;
        self.block_body(&mut sub, handle, true)?;
        self.expect(TokenKind::SaveEnd)?;
        Ok(sub.finish())
    }

    /// The shared body of data blocks and save frames: key/value pairs,
    /// loops, and nested frames, until a token that ends the body.
    fn block_body(
        &mut self,
        builder: &mut DocumentBuilder,
        handle: BlockHandle,
        in_frame: bool,
    ) -> ParseResult<()> {
        loop {
            let token = self.scanner.peek()?;
            match token.kind {
                TokenKind::DataName => self.key_value(builder, handle)?,
                TokenKind::Loop => self.loop_statement(builder, handle)?,
                TokenKind::SaveHeading => {
                    let frame = self.save_frame()?;
                    builder.merge_frame(handle, frame)?;
                }
                TokenKind::SaveEnd | TokenKind::Eof | TokenKind::DataHeading => return Ok(()),
                _ => {
                    let expected = if in_frame {
                        grammar::FRAME_BODY_EXPECTED
                    } else {
                        grammar::BLOCK_BODY_EXPECTED
                    };
                    return Err(ParseError::Syntax {
                        offset: token.start,
                        expected: expected.to_vec(),
                    });
                }
            }
        }
    }

    fn key_value(&mut self, builder: &mut DocumentBuilder, handle: BlockHandle) -> ParseResult<()> {
        let name = self.scanner.next_token()?;
        let value = self.data_value()?;
        builder.add_item(handle, name.text, Value::Single(value), true)
    }

    fn loop_statement(
        &mut self,
        builder: &mut DocumentBuilder,
        handle: BlockHandle,
    ) -> ParseResult<()> {
        self.scanner.next_token()?;
        let columns = self.loop_columns()?;
        let values = self.loop_values()?;
        builder.install_loop(handle, columns, values)
    }

    fn loop_columns(&mut self) -> ParseResult<Vec<String>> {
        let mut columns = Vec::new();
        loop {
            let token = self.scanner.peek()?;
            match token.kind {
                TokenKind::DataName => {
                    columns.push(token.text.to_string());
                    self.scanner.next_token()?;
                }
                TokenKind::Value | TokenKind::TextStart => return Ok(columns),
                _ => {
                    return Err(ParseError::Syntax {
                        offset: token.start,
                        expected: grammar::LOOP_FIELD_EXPECTED.to_vec(),
                    })
                }
            }
        }
    }

    fn loop_values(&mut self) -> ParseResult<Vec<String>> {
        let mut values = vec![self.data_value()?];
        loop {
            let token = self.scanner.peek()?;
            match token.kind {
                TokenKind::Value | TokenKind::TextStart => {
                    let value = self.data_value()?;
                    self.emit_trace("loopval", &value);
                    values.push(value);
                }
                TokenKind::Loop
                | TokenKind::DataName
                | TokenKind::SaveHeading
                | TokenKind::SaveEnd
                | TokenKind::Eof
                | TokenKind::DataHeading => return Ok(values),
                _ => {
                    return Err(ParseError::Syntax {
                        offset: token.start,
                        expected: grammar::LOOP_VALUES_EXPECTED.to_vec(),
                    })
                }
            }
        }
    }

    fn data_value(&mut self) -> ParseResult<String> {
        let token = self.scanner.peek()?;
        match token.kind {
            TokenKind::Value => {
                self.scanner.next_token()?;
                let value = normalize_scalar(token.text).to_string();
                self.emit_trace("data_value", &value);
                Ok(value)
            }
            TokenKind::TextStart => {
                let raw = self.text_field()?;
                self.emit_trace("sc_line_of_text", &raw);
                let value = strip_semicolon_block(&raw);
                self.emit_trace("data_value", &value);
                Ok(value)
            }
            _ => Err(ParseError::Syntax {
                offset: token.start,
                expected: grammar::VALUE_EXPECTED.to_vec(),
            }),
        }
    }

    /// Reassemble a text field's lexemes, closing semicolon included
    fn text_field(&mut self) -> ParseResult<String> {
        let opening = self.scanner.next_token()?;
        let mut raw = String::from(opening.text);
        loop {
            let token = self.scanner.peek()?;
            match token.kind {
                TokenKind::TextLine => {
                    raw.push_str(token.text);
                    self.scanner.next_token()?;
                }
                TokenKind::TextEnd => {
                    raw.push_str(token.text);
                    self.scanner.next_token()?;
                    return Ok(raw);
                }
                _ => {
                    return Err(ParseError::Syntax {
                        offset: token.start,
                        expected: grammar::TEXT_FIELD_EXPECTED.to_vec(),
                    })
                }
            }
        }
    }

    fn expect(&mut self, kind: TokenKind) -> ParseResult<Token<'a>> {
        let token = self.scanner.peek()?;
        if token.kind == kind {
            return self.scanner.next_token();
        }
        Err(ParseError::Syntax {
            offset: token.start,
            expected: vec![kind],
        })
    }

    fn emit_trace(&mut self, location: &str, value: &str) {
        if let Some(trace) = &mut self.trace {
            trace(location, value);
        }
    }
}
