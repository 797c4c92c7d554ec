//! Ordered scanning rules for the STAR/CIF lexical layer
//!
//! Two rule tables, one per scanner mode. Patterns are anchored at the
//! cursor; the scanner takes the longest match and breaks ties by table
//! order, so keyword rules beat the bare-value rule on equal length while a
//! longer bare word (`loop_x`) still wins over a keyword prefix.
//!
//! Two rules carry guards that a plain pattern cannot express. The
//! bare-value rule rejects words opening with a reserved keyword prefix,
//! which is how `stop_` stays a keyword while `stop_now` is an ordinary
//! value. The newline-discard rule refuses to swallow a terminator that sits
//! directly before a semicolon, keeping that terminator available to the
//! text-field opening rule; a line-start semicolon that cannot open a valid
//! field is then a lexical error rather than a silently misread value.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::star::lexing::tokens::TokenKind;

/// Characters allowed in names and headings after the leading sigil.
///
/// ASCII letters, digits, and the safe punctuation set; one or more of these
/// must follow `_`, `data_` or `save_` for the name rules to match.
pub(crate) const NAME_CHAR: &str = r##"[A-Za-z0-9!%&()*+,./:<=>?@^`{}|~"#$';_\[\]\\-]"##;

/// First-character class of a bare (unquoted) value: anything that is not
/// whitespace, a quote, a comment sign, a frame reference sigil, or a name
/// or bracket opener. Subsequent characters run to the next whitespace.
const BARE_FIRST: &str = r##"[^\s"#$'_{\[\]]"##;

/// Keyword prefixes a bare value may not open with
const RESERVED_PREFIXES: &[&str] = &["data_", "save_", "global_", "stop_"];

/// True when `lexeme` opens with one of the reserved keyword prefixes,
/// compared ASCII case-insensitively
pub(crate) fn has_reserved_prefix(lexeme: &str) -> bool {
    RESERVED_PREFIXES.iter().any(|prefix| {
        lexeme
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// What the scanner does with a rule's match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    /// Advance past the match without emitting (whitespace, comments)
    Discard,
    /// Emit a token of the given kind
    Emit(TokenKind),
}

/// Extra acceptance condition applied after a rule's pattern matches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    None,
    /// Reject lexemes opening with a reserved keyword prefix
    NotReservedWord,
    /// Reject the match when the next input character is a semicolon
    NotBeforeSemicolon,
}

/// One scanning rule: an anchored pattern plus the action for its match
pub(crate) struct Rule {
    pub(crate) action: Action,
    regex: Regex,
    guard: Guard,
}

impl Rule {
    fn new(action: Action, pattern: &str, guard: Guard) -> Self {
        Rule {
            action,
            regex: compile(pattern),
            guard,
        }
    }

    fn discard(pattern: &str) -> Self {
        Rule::new(Action::Discard, pattern, Guard::None)
    }

    fn emit(kind: TokenKind, pattern: &str) -> Self {
        Rule::new(Action::Emit(kind), pattern, Guard::None)
    }

    /// Length of this rule's match at the start of `rest`, if any
    pub(crate) fn match_len(&self, rest: &str) -> Option<usize> {
        let found = self.regex.find(rest)?;
        let len = found.end();
        match self.guard {
            Guard::NotReservedWord if has_reserved_prefix(&rest[..len]) => return None,
            Guard::NotBeforeSemicolon if rest[len..].starts_with(';') => return None,
            _ => {}
        }
        Some(len)
    }
}

fn compile(pattern: &str) -> Regex {
    // Table patterns are fixed strings; a failure here is a defect in this
    // module, caught by the tests compiling every rule.
    Regex::new(&format!(r"\A(?:{})", pattern)).unwrap()
}

/// Rules for ordinary scanning context, in priority order
static NORMAL_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::discard(r"[ \t]+"),
        Rule::new(
            Action::Discard,
            r"\r\n|\r|\n",
            Guard::NotBeforeSemicolon,
        ),
        Rule::discard(r"#[^\r\n]*"),
        // A semicolon opens a text field only at the start of a physical
        // line: the rule consumes the preceding terminator, the rest of the
        // opening line, and any immediately following blank lines.
        Rule::emit(TokenKind::TextStart, r"(\r\n|\n);[^\r\n]*(\r\n|\r|\n)+"),
        Rule::emit(TokenKind::Loop, r"(?i)loop_"),
        Rule::emit(TokenKind::Global, r"(?i)global_"),
        Rule::emit(TokenKind::Stop, r"(?i)stop_"),
        Rule::emit(
            TokenKind::SaveHeading,
            &format!(r"(?i)save_{}+", NAME_CHAR),
        ),
        Rule::emit(TokenKind::SaveEnd, r"(?i)save_"),
        Rule::emit(TokenKind::DataName, &format!(r"_{}+", NAME_CHAR)),
        Rule::emit(
            TokenKind::DataHeading,
            &format!(r"(?i)data_{}+", NAME_CHAR),
        ),
        // Triple-quoted values close at the nearest matching triple and may
        // span lines; tried before the single-layer quote rules since a
        // triple-quoted lexeme also looks singly quoted.
        Rule::emit(TokenKind::Value, r"'''(?s:.*?)'''"),
        Rule::emit(TokenKind::Value, r#""""(?s:.*?)""""#),
        // Quoted values: an embedded quote is part of the value when the
        // next character is not whitespace. Form feed is excluded from
        // single-quoted values only.
        Rule::emit(TokenKind::Value, r"'(?:[^'\r\n\x0C]|'[^ \t\r\n\x0B\x0C])*'+"),
        Rule::emit(
            TokenKind::Value,
            r#""(?:[^"\r\n]|"[^ \t\r\n\x0B\x0C])*"+"#,
        ),
        Rule::new(
            Action::Emit(TokenKind::Value),
            &format!(r"{}[^ \t\r\n\x0B\x0C]*", BARE_FIRST),
            Guard::NotReservedWord,
        ),
    ]
});

/// Rules while a semicolon text field is open. The scanner always sits at a
/// line start here, because every field token consumes its terminator run.
static TEXT_FIELD_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::emit(TokenKind::TextEnd, r";"),
        Rule::emit(TokenKind::TextLine, r"[^;\r\n][^\r\n]*(\r\n|\r|\n)+"),
    ]
});

pub(crate) fn normal_rules() -> &'static [Rule] {
    &NORMAL_RULES
}

pub(crate) fn text_field_rules() -> &'static [Rule] {
    &TEXT_FIELD_RULES
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_rules_compile() {
        assert!(!normal_rules().is_empty());
        assert!(!text_field_rules().is_empty());
    }

    #[test]
    fn test_reserved_prefix_detection() {
        assert!(has_reserved_prefix("data_block"));
        assert!(has_reserved_prefix("DATA_block"));
        assert!(has_reserved_prefix("stop_now"));
        assert!(has_reserved_prefix("Global_x"));
        assert!(!has_reserved_prefix("loop_x"));
        assert!(!has_reserved_prefix("databank"));
        assert!(!has_reserved_prefix("1.234"));
    }

    #[test]
    fn test_reserved_prefix_is_char_boundary_safe() {
        assert!(!has_reserved_prefix("дата"));
    }

    #[test]
    fn test_newline_rule_keeps_terminator_before_semicolon() {
        let newline = &normal_rules()[1];
        assert_eq!(newline.match_len("\n_x"), Some(1));
        assert_eq!(newline.match_len("\r\n_x"), Some(2));
        assert_eq!(newline.match_len("\n;field"), None);
        assert_eq!(newline.match_len("\r;field"), None);
    }

    #[test]
    fn test_bare_value_rule_rejects_reserved_words() {
        let bare = normal_rules().last().unwrap();
        assert_eq!(bare.match_len("value"), Some(5));
        assert_eq!(bare.match_len("data_x"), None);
        assert_eq!(bare.match_len("save_x"), None);
        // loop_ is not a reserved prefix for values; the keyword rule only
        // wins the exact-length tie
        assert_eq!(bare.match_len("loop_x"), Some(6));
    }

    #[test]
    fn test_text_start_requires_line_start() {
        let text_start = &normal_rules()[3];
        assert_eq!(text_start.match_len("\n;hello\n"), Some(8));
        assert_eq!(text_start.match_len("\r\n;hello\n"), Some(9));
        assert_eq!(text_start.match_len(";hello\n"), None);
        assert_eq!(text_start.match_len(" ;hello\n"), None);
    }

    #[test]
    fn test_text_start_consumes_trailing_blank_lines() {
        let text_start = &normal_rules()[3];
        assert_eq!(text_start.match_len("\n;hello\n\n\nworld"), Some(10));
    }

    #[test]
    fn test_quoted_value_embedded_quote() {
        let single = &normal_rules()[13];
        assert_eq!(single.match_len("'it's fine' rest"), Some(11));
        assert_eq!(single.match_len("'a' 'b'"), Some(3));
        assert_eq!(single.match_len("'abc"), None);
    }

    #[test]
    fn test_triple_quote_spans_lines() {
        let triple = &normal_rules()[11];
        assert_eq!(triple.match_len("'''line one\nline two''' x"), Some(23));
        assert_eq!(triple.match_len("'''unclosed"), None);
    }

    #[test]
    fn test_text_field_rules() {
        let end = &text_field_rules()[0];
        let line = &text_field_rules()[1];
        assert_eq!(end.match_len(";\n"), Some(1));
        assert_eq!(line.match_len("any content here\nnext"), Some(17));
        assert_eq!(line.match_len(";closing"), None);
    }
}
