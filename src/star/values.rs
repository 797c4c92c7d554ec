//! Normalization of raw value lexemes into logical content
//!
//! The scanner hands values to the parser exactly as they appear in the
//! source, delimiters included. This module owns the two stripping paths
//! that recover the logical content:
//!
//!   1. Scalar lexemes lose one layer of quoting. Triple quotes are tried
//!      before single-layer quotes since a triple-quoted lexeme also looks
//!      singly quoted from the outside. Bare values pass through verbatim.
//!
//!   2. Semicolon text fields lose their opening line and closing
//!      terminator-plus-semicolon, then run through the two multi-line
//!      content protocols in a fixed order: line-prefix removal first,
//!      line-folding removal second. A prefixed field may declare folding
//!      with a doubled backslash on its marker line, which is why prefix
//!      removal has to come first.
//!
//! Both protocols are no-ops when their marker is absent, so plain fields
//! come back unchanged apart from the delimiter surgery.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

/// Opening of an assembled text field: optional blank run, a line
/// terminator, optional extra newlines, then the semicolon.
static BLOCK_OPENER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[\n\r\x0C \t\x0B]*[\n\r\x0C]\n*;").unwrap());

/// A prefix declaration line: the prefix text, one or two backslashes,
/// optional trailing blanks, and the line terminator. The lazy prefix group
/// keeps the marker backslashes out of the prefix itself.
static PREFIX_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A([^;\r\n][^\r\n]*?)(\\\\?)[ \t]*(\r\n|\r|\n)").unwrap());

/// Fold header: the whole first line is a single backslash
static FOLD_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A\\[ \t]*(\r\n|\r|\n)").unwrap());

/// One folded line break, removed everywhere once the header is present
static FOLD_SEQUENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\[ \t]*(\r\n|\r|\n)").unwrap());

/// Remove one layer of matching single or double quotes, if present
pub fn strip_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if value.len() >= 2 {
        let first = bytes[0];
        if (first == b'\'' || first == b'"') && bytes[value.len() - 1] == first {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Remove a matching triple-quote delimiter pair, if present
pub fn strip_triple_quotes(value: &str) -> &str {
    if is_triple_quoted(value) {
        &value[3..value.len() - 3]
    } else {
        value
    }
}

fn is_triple_quoted(value: &str) -> bool {
    value.len() >= 6
        && ((value.starts_with("'''") && value.ends_with("'''"))
            || (value.starts_with("\"\"\"") && value.ends_with("\"\"\"")))
}

/// Strip the delimiters of a scalar value lexeme.
///
/// Exactly one delimiter layer comes off: a triple-quoted value keeps any
/// inner quote characters, and a singly quoted value keeps everything
/// between its outermost quotes.
pub fn normalize_scalar(value: &str) -> &str {
    if is_triple_quoted(value) {
        &value[3..value.len() - 3]
    } else {
        strip_quotes(value)
    }
}

/// Recover the logical content of an assembled semicolon text field.
///
/// `raw` is the concatenation of the field's lexemes: the opening line
/// starting at its preceding terminator, every continuation line with its
/// terminators, and the closing semicolon. The opening run through the
/// semicolon and the final terminator-plus-semicolon are cut off, a
/// carriage return left over from a CRLF closing line is dropped, and the
/// content protocols are applied.
pub fn strip_semicolon_block(raw: &str) -> String {
    if let Some(opener) = BLOCK_OPENER.find(raw) {
        let end = raw.len().saturating_sub(2).max(opener.end());
        let mut body = raw[opener.end()..end].to_string();
        if body.ends_with('\r') {
            body.pop();
        }
        let unprefixed = remove_line_prefix(&body);
        let unfolded = remove_line_folding(&unprefixed);
        return unfolded.into_owned();
    }
    // Salvage path for text that lost its opening line; treat it as an
    // ordinary scalar after dropping leading whitespace.
    let trimmed = raw.trim_start_matches(['\n', '\r', '\x0C', ' ', '\t', '\x0B']);
    strip_quotes(trimmed).to_string()
}

/// Strip a declared line prefix from every line of `text`.
///
/// The first line must be the prefix followed by a backslash; without it
/// the text is returned unchanged. Lines missing the prefix pass through
/// as they are. A doubled backslash on the marker line declares that the
/// field is also folded, so a bare fold header is put back in front of the
/// stripped text for [`remove_line_folding`] to find.
pub fn remove_line_prefix(text: &str) -> Cow<'_, str> {
    let marker = match PREFIX_MARKER.captures(text) {
        Some(captures) => captures,
        None => return Cow::Borrowed(text),
    };
    let prefix = marker.get(1).map_or("", |m| m.as_str());
    let folded = marker.get(2).map_or("", |m| m.as_str()) == r"\\";
    let body = &text[marker.get(0).map_or(0, |m| m.end())..];

    let mut out = String::with_capacity(text.len());
    if folded {
        out.push_str("\\\n");
    }
    for line in split_lines_inclusive(body) {
        out.push_str(line.strip_prefix(prefix).unwrap_or(line));
    }
    Cow::Owned(out)
}

/// Rejoin soft-wrapped lines of `text`.
///
/// Folding is only in effect when the text opens with a fold header line
/// consisting of a lone backslash; every backslash-terminator sequence is
/// then removed, joining each wrapped line to its continuation.
pub fn remove_line_folding(text: &str) -> Cow<'_, str> {
    if FOLD_HEADER.is_match(text) {
        FOLD_SEQUENCE.replace_all(text, "")
    } else {
        Cow::Borrowed(text)
    }
}

/// Split into physical lines, each keeping its terminator. CRLF counts as
/// one terminator; a final line without one is yielded as-is.
fn split_lines_inclusive(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        let bytes = rest.as_bytes();
        let mut end = rest.len();
        for (i, &b) in bytes.iter().enumerate() {
            if b == b'\n' {
                end = i + 1;
                break;
            }
            if b == b'\r' {
                end = if bytes.get(i + 1) == Some(&b'\n') { i + 2 } else { i + 1 };
                break;
            }
        }
        let (line, tail) = rest.split_at(end);
        rest = tail;
        Some(line)
    })
}
