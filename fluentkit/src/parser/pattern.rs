//! Pattern parsing: inline text, block continuation lines, and
//! placeables.
//!
//! Patterns are whitespace-sensitive. A pattern continues past a line end
//! only when the next content line is indented and does not start with
//! `[`, `*`, or `.` (which introduce variants and attributes), or when it
//! starts a placeable. Block prefixes (newlines plus indent) are captured
//! verbatim into the text run before a text continuation and dropped
//! before a placeable; the normalizer later strips the common indent.

use super::expression;
use super::scanner::{ParseError, Scanner};
use crate::ast::{Pattern, PatternElement};

/// Parses `PatternElement*` and stops, without consuming, at whatever
/// terminates the pattern (a line end not followed by a continuation, an
/// attribute or variant marker, `}`, or EOF). The result is raw; callers
/// normalize it.
pub(super) fn parse_pattern_interior(s: &mut Scanner) -> Result<Pattern, ParseError> {
    let mut elements = Vec::new();
    loop {
        match s.peek() {
            None => break,
            Some(b'{') => elements.push(expression::parse_placeable(s)?),
            Some(b'}') => break,
            Some(b'\n') => {
                if !parse_block_element(s, &mut elements)? {
                    break;
                }
            }
            Some(b'\r') if s.peek_at(1) == Some(b'\n') => {
                if !parse_block_element(s, &mut elements)? {
                    break;
                }
            }
            Some(_) => {
                let text = take_inline_text(s);
                elements.push(PatternElement::Text(text.to_string()));
            }
        }
    }
    Ok(Pattern { elements })
}

/// Attempts a block continuation with the cursor on a line end. Returns
/// `false`, with the cursor restored, when the pattern ends here instead.
fn parse_block_element(
    s: &mut Scanner,
    elements: &mut Vec<PatternElement>,
) -> Result<bool, ParseError> {
    let save = s.pos();
    s.skip_eol();
    let indent;
    loop {
        let line_indent = s.skip_blank_inline();
        if s.is_eof() {
            s.seek(save);
            return Ok(false);
        }
        if !s.skip_eol() {
            indent = line_indent;
            break;
        }
    }
    match s.peek() {
        // A placeable continues the pattern even at column zero; its
        // block prefix is not content.
        Some(b'{') => {
            elements.push(expression::parse_placeable(s)?);
            Ok(true)
        }
        Some(b'[') | Some(b'*') | Some(b'.') | Some(b'}') => {
            s.seek(save);
            Ok(false)
        }
        Some(_) if indent == 0 => {
            s.seek(save);
            Ok(false)
        }
        Some(_) => {
            take_inline_text(s);
            elements.push(PatternElement::Text(s.slice(save, s.pos()).to_string()));
            Ok(true)
        }
        None => {
            s.seek(save);
            Ok(false)
        }
    }
}

/// Consumes `text_char+`: everything up to `{`, `}`, or a line end. A
/// lone `\r` is ordinary text.
fn take_inline_text<'s>(s: &mut Scanner<'s>) -> &'s str {
    let start = s.pos();
    while let Some(b) = s.peek() {
        if b == b'{' || b == b'}' || b == b'\n' {
            break;
        }
        if b == b'\r' && s.peek_at(1) == Some(b'\n') {
            break;
        }
        s.bump();
    }
    s.slice(start, s.pos())
}
