//! Cursor scanner with one-token lookahead
//!
//! The scanner owns a byte cursor over the already-loaded source text and a
//! mode flag for semicolon text fields. Each call applies the active rule
//! table at the cursor, discards whitespace/comment matches, and returns the
//! first emitted token. `peek` caches one token so the parser can dispatch
//! on the lookahead without consuming it.

use crate::star::error::{ParseError, ParseResult};
use crate::star::lexing::rules::{self, Action, Rule};
use crate::star::lexing::tokens::{Token, TokenKind};

pub struct Scanner<'src> {
    source: &'src str,
    pos: usize,
    in_text_field: bool,
    peeked: Option<Token<'src>>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source,
            pos: 0,
            in_text_field: false,
            peeked: None,
        }
    }

    /// The lookahead token, without consuming it
    pub fn peek(&mut self) -> ParseResult<Token<'src>> {
        if let Some(token) = self.peeked {
            return Ok(token);
        }
        let token = self.scan()?;
        self.peeked = Some(token);
        Ok(token)
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> ParseResult<Token<'src>> {
        if let Some(token) = self.peeked.take() {
            return Ok(token);
        }
        self.scan()
    }

    fn scan(&mut self) -> ParseResult<Token<'src>> {
        loop {
            if self.in_text_field {
                return self.scan_in_text_field();
            }
            if self.pos >= self.source.len() {
                return Ok(Token::new(TokenKind::Eof, "", self.pos, self.pos));
            }
            let rest = &self.source[self.pos..];
            match longest_match(rules::normal_rules(), rest) {
                None => return Err(ParseError::Lexical { offset: self.pos }),
                Some((len, Action::Discard)) => {
                    self.pos += len;
                }
                Some((len, Action::Emit(kind))) => {
                    if kind == TokenKind::TextStart {
                        self.in_text_field = true;
                    }
                    return Ok(self.emit(kind, len));
                }
            }
        }
    }

    fn scan_in_text_field(&mut self) -> ParseResult<Token<'src>> {
        if self.pos >= self.source.len() {
            // Unterminated text field
            return Err(ParseError::Lexical { offset: self.pos });
        }
        let rest = &self.source[self.pos..];
        match longest_match(rules::text_field_rules(), rest) {
            None => Err(ParseError::Lexical { offset: self.pos }),
            Some((len, Action::Emit(kind))) => {
                if kind == TokenKind::TextEnd {
                    self.in_text_field = false;
                }
                Ok(self.emit(kind, len))
            }
            // The text-field table has no discard rules
            Some((_, Action::Discard)) => Err(ParseError::Lexical { offset: self.pos }),
        }
    }

    fn emit(&mut self, kind: TokenKind, len: usize) -> Token<'src> {
        let start = self.pos;
        self.pos += len;
        Token::new(kind, &self.source[start..self.pos], start, self.pos)
    }
}

/// Longest match over an ordered rule table; earlier rules win length ties
fn longest_match(table: &[Rule], rest: &str) -> Option<(usize, Action)> {
    let mut best: Option<(usize, Action)> = None;
    for rule in table {
        if let Some(len) = rule.match_len(rest) {
            if best.map_or(true, |(best_len, _)| len > best_len) {
                best = Some((len, rule.action));
            }
        }
    }
    best
}

/// Scan the entire input into a token vector, ending with the end-of-input
/// token. Mostly useful for tests and diagnostics; the parser pulls tokens
/// on demand instead.
pub fn tokenize(source: &str) -> ParseResult<Vec<Token<'_>>> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_block() {
        assert_eq!(
            kinds("data_A\n_x 1\n"),
            vec![
                TokenKind::DataHeading,
                TokenKind::DataName,
                TokenKind::Value,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_keywords_are_case_insensitive() {
        assert_eq!(
            kinds("DATA_a LOOP_ Loop_ GLOBAL_ STOP_ SAVE_f SAVE_"),
            vec![
                TokenKind::DataHeading,
                TokenKind::Loop,
                TokenKind::Loop,
                TokenKind::Global,
                TokenKind::Stop,
                TokenKind::SaveHeading,
                TokenKind::SaveEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_longest_match_beats_keyword() {
        // loop_x is a value, stop_now too; a bare stop_ stays a keyword
        let tokens = tokenize("loop_x stop_now stop_").unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.kind).collect::<Vec<_>>(),
            vec![
                TokenKind::Value,
                TokenKind::Value,
                TokenKind::Stop,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[0].text, "loop_x");
        assert_eq!(tokens[1].text, "stop_now");
    }

    #[test]
    fn test_comments_are_discarded() {
        assert_eq!(
            kinds("# leading comment\ndata_A # trailing\n_x 1\n"),
            vec![
                TokenKind::DataHeading,
                TokenKind::DataName,
                TokenKind::Value,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_comment_does_not_eat_text_field_start() {
        assert_eq!(
            kinds("_x\n# note\n;body\n;\n"),
            vec![
                TokenKind::DataName,
                TokenKind::TextStart,
                TokenKind::TextEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_text_field_token_sequence() {
        let tokens = tokenize("_note\n;hello\nworld\n;\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::DataName,
                TokenKind::TextStart,
                TokenKind::TextLine,
                TokenKind::TextEnd,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[1].text, "\n;hello\n");
        assert_eq!(tokens[2].text, "world\n");
        assert_eq!(tokens[3].text, ";");
    }

    #[test]
    fn test_text_field_content_is_not_lexed_as_structure() {
        // data_ and _name inside an open field are plain text lines
        assert_eq!(
            kinds("_x\n;data_fake\n_not_a_name\n;\n"),
            vec![
                TokenKind::DataName,
                TokenKind::TextStart,
                TokenKind::TextLine,
                TokenKind::TextLine,
                TokenKind::TextEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_blank_lines_before_semicolon_still_open_field() {
        assert_eq!(
            kinds("_x\n\n\n;body\n;\n"),
            vec![
                TokenKind::DataName,
                TokenKind::TextStart,
                TokenKind::TextEnd,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_semicolon_mid_line_is_a_value() {
        let tokens = tokenize("_x ;not-a-field\n").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Value);
        assert_eq!(tokens[1].text, ";not-a-field");
    }

    #[test]
    fn test_semicolon_at_input_start_is_a_value() {
        // No preceding terminator exists at offset zero
        let tokens = tokenize(";x").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Value);
        assert_eq!(tokens[0].text, ";x");
    }

    #[test]
    fn test_crlf_terminators() {
        let tokens = tokenize("data_A\r\n_x\r\n;line\r\n;\r\n").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::DataHeading,
                TokenKind::DataName,
                TokenKind::TextStart,
                TokenKind::TextEnd,
                TokenKind::Eof,
            ]
        );
        assert_eq!(tokens[2].text, "\r\n;line\r\n");
    }

    #[test]
    fn test_unterminated_text_field_is_lexical_error() {
        let err = tokenize("_x\n;open forever").unwrap_err();
        assert!(matches!(err, ParseError::Lexical { .. }));
    }

    #[test]
    fn test_unterminated_quote_is_lexical_error() {
        let err = tokenize("_x 'no closing\n").unwrap_err();
        assert!(matches!(err, ParseError::Lexical { offset: 3 }));
    }

    #[test]
    fn test_quoted_values_keep_delimiters_in_lexeme() {
        let tokens = tokenize("_a 'one two' _b \"three\"\n").unwrap();
        assert_eq!(tokens[1].text, "'one two'");
        assert_eq!(tokens[3].text, "\"three\"");
    }

    #[test]
    fn test_triple_quoted_value_spans_lines() {
        let tokens = tokenize("_a '''first\nsecond'''\n").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Value);
        assert_eq!(tokens[1].text, "'''first\nsecond'''");
    }

    #[test]
    fn test_offsets_cover_lexemes() {
        let source = "data_A _x 1";
        for token in tokenize(source).unwrap() {
            assert_eq!(&source[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut scanner = Scanner::new("_x 1");
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::DataName);
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::DataName);
        assert_eq!(scanner.next_token().unwrap().kind, TokenKind::DataName);
        assert_eq!(scanner.peek().unwrap().kind, TokenKind::Value);
    }

    #[test]
    fn test_empty_input_is_just_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   \n\t # only noise\n"), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_underscore_alone_is_lexical_error() {
        let err = tokenize("_ x").unwrap_err();
        assert_eq!(err, ParseError::Lexical { offset: 0 });
    }
}
