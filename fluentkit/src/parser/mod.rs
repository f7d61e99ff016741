//! A recursive-descent parser for the Fluent syntax.
//!
//! The grammar follows the project-fluent EBNF
//! (<https://github.com/projectfluent/fluent/blob/master/spec/fluent.ebnf>):
//! top-down with one or two bytes of lookahead, ordered alternatives, and
//! significant whitespace. [`parse_resource`] recovers from malformed
//! entries by capturing them as [`Junk`]; [`parse_resource_strict`] fails
//! on the first malformed entry instead.

mod expression;
mod pattern;
mod scanner;

use crate::ast::{Attribute, Comment, Entry, Junk, Message, Pattern, Term};
use crate::error::Error;
use crate::normalize::normalize;
use scanner::{is_identifier_start, ParseError, Scanner};

/// Parses a full `.ftl` resource leniently: entries that fail to parse
/// are captured verbatim as [`Entry::Junk`] and parsing resumes at the
/// next possible entry start.
pub fn parse_resource(source: &str) -> Result<Vec<Entry>, Error> {
    parse_resource_with_mode(source, false)
}

/// Parses a full `.ftl` resource, failing on the first malformed entry
/// instead of producing junk.
pub fn parse_resource_strict(source: &str) -> Result<Vec<Entry>, Error> {
    parse_resource_with_mode(source, true)
}

fn parse_resource_with_mode(source: &str, strict: bool) -> Result<Vec<Entry>, Error> {
    let mut s = Scanner::new(source);
    let mut entries = Vec::new();
    loop {
        s.skip_blank_block();
        if s.is_eof() {
            break;
        }
        let start = s.pos();
        match parse_entry(&mut s) {
            Ok(entry) => entries.push(entry),
            Err(error) => {
                if strict {
                    return Err(error.into_error(source));
                }
                s.seek(start);
                entries.push(Entry::Junk(consume_junk(&mut s)));
            }
        }
    }
    Ok(entries)
}

/// Parses a standalone pattern, as used by programmatic message
/// registration. The pattern is normalized and must not be empty.
pub fn parse_pattern(source: &str) -> Result<Pattern, Error> {
    let mut s = Scanner::new(source);
    let mut parsed =
        pattern::parse_pattern_interior(&mut s).map_err(|error| error.into_error(source))?;
    s.skip_blank();
    if !s.is_eof() {
        return Err(s.error("unexpected characters after pattern").into_error(source));
    }
    normalize(&mut parsed);
    if parsed.is_empty() {
        return Err(s.error("expected a pattern").into_error(source));
    }
    Ok(parsed)
}

/// Splits a message reference of the form `name` or `name.attr` into its
/// identifier and optional attribute.
pub fn parse_message_reference(source: &str) -> Result<(String, Option<String>), Error> {
    let mut s = Scanner::new(source);
    let result = (|| {
        let id = s.take_identifier()?;
        let attribute = if s.take_byte_if(b'.') {
            Some(s.take_identifier()?.to_string())
        } else {
            None
        };
        if !s.is_eof() {
            return Err(s.error("unexpected characters after message reference"));
        }
        Ok((id.to_string(), attribute))
    })();
    result.map_err(|error| error.into_error(source))
}

fn parse_entry(s: &mut Scanner) -> Result<Entry, ParseError> {
    match s.peek() {
        Some(b'#') => parse_comment_entry(s),
        Some(b'-') => parse_term(s).map(Entry::Term),
        Some(b) if is_identifier_start(b) => parse_message(s).map(Entry::Message),
        _ => Err(s.error("expected an entry")),
    }
}

/// Parses a run of comment lines. A plain `#` comment immediately
/// followed by a message or term is attached to it; if that entry then
/// fails to parse, the comment stands alone and the entry is left for
/// junk recovery.
fn parse_comment_entry(s: &mut Scanner) -> Result<Entry, ParseError> {
    let (level, comment) = parse_comment(s)?;
    if level == 1 {
        match s.peek() {
            Some(b'-') => {
                let start = s.pos();
                match parse_term(s) {
                    Ok(mut term) => {
                        term.comment = Some(comment);
                        return Ok(Entry::Term(term));
                    }
                    Err(_) => s.seek(start),
                }
            }
            Some(b) if is_identifier_start(b) => {
                let start = s.pos();
                match parse_message(s) {
                    Ok(mut message) => {
                        message.comment = Some(comment);
                        return Ok(Entry::Message(message));
                    }
                    Err(_) => s.seek(start),
                }
            }
            _ => {}
        }
    }
    Ok(match level {
        1 => Entry::Comment(comment),
        2 => Entry::GroupComment(comment),
        _ => Entry::ResourceComment(comment),
    })
}

/// Consecutive lines at the same comment level (`#`, `##`, or `###`)
/// merge into one comment; a line at a different level starts a new one.
fn parse_comment(s: &mut Scanner) -> Result<(usize, Comment), ParseError> {
    let mut level = 0;
    let mut lines = 0;
    let mut content = String::new();
    loop {
        let save = s.pos();
        let mut marker = 0;
        while s.take_byte_if(b'#') {
            marker += 1;
        }
        let well_formed =
            (1..=3).contains(&marker) && (s.peek() == Some(b' ') || s.at_line_end());
        if level == 0 {
            if !well_formed {
                return Err(s.error("expected a space or line end after the comment marker"));
            }
            level = marker;
        } else if !well_formed || marker != level {
            // A line at another level, or a malformed one, starts a new
            // entry instead of continuing this comment.
            s.seek(save);
            break;
        }
        let line = if s.take_byte_if(b' ') {
            s.take_line_content()
        } else {
            ""
        };
        s.skip_eol();
        if lines > 0 {
            content.push('\n');
        }
        content.push_str(line);
        lines += 1;
        if s.peek() != Some(b'#') {
            break;
        }
    }
    Ok((level, Comment { content }))
}

fn parse_message(s: &mut Scanner) -> Result<Message, ParseError> {
    let id = s.take_identifier()?.to_string();
    s.skip_blank_inline();
    s.expect_byte(b'=')?;
    s.skip_blank_inline();
    let mut value = pattern::parse_pattern_interior(s)?;
    normalize(&mut value);
    let attributes = parse_attributes(s)?;
    if value.is_empty() && attributes.is_empty() {
        return Err(s.error("message must have a value or at least one attribute"));
    }
    s.expect_line_end()?;
    Ok(Message {
        id,
        comment: None,
        pattern: value,
        attributes,
    })
}

fn parse_term(s: &mut Scanner) -> Result<Term, ParseError> {
    s.expect_byte(b'-')?;
    let id = s.take_identifier()?.to_string();
    s.skip_blank_inline();
    s.expect_byte(b'=')?;
    s.skip_blank_inline();
    let mut value = pattern::parse_pattern_interior(s)?;
    normalize(&mut value);
    if value.is_empty() {
        return Err(s.error("term must have a value"));
    }
    let attributes = parse_attributes(s)?;
    s.expect_line_end()?;
    Ok(Term {
        id,
        comment: None,
        pattern: value,
        attributes,
    })
}

fn parse_attributes(s: &mut Scanner) -> Result<Vec<Attribute>, ParseError> {
    let mut attributes: Vec<Attribute> = Vec::new();
    loop {
        let save = s.pos();
        if !s.skip_eol() {
            break;
        }
        s.skip_blank();
        if !s.take_byte_if(b'.') {
            s.seek(save);
            break;
        }
        let id = s.take_identifier()?.to_string();
        s.skip_blank_inline();
        s.expect_byte(b'=')?;
        s.skip_blank_inline();
        let mut value = pattern::parse_pattern_interior(s)?;
        normalize(&mut value);
        if value.is_empty() {
            return Err(s.error("attribute must have a value"));
        }
        // Duplicate ids overwrite in place, keeping the first position.
        match attributes.iter_mut().find(|existing| existing.id == id) {
            Some(existing) => existing.pattern = value,
            None => attributes.push(Attribute { id, pattern: value }),
        }
    }
    Ok(attributes)
}

/// Consumes a junk region: the current line plus every following line
/// that cannot start a fresh entry (`#`, `-`, or an ASCII letter).
fn consume_junk(s: &mut Scanner) -> Junk {
    let start = s.pos();
    s.take_line_content();
    s.skip_eol();
    loop {
        match s.peek() {
            None | Some(b'#') | Some(b'-') => break,
            Some(b) if b.is_ascii_alphabetic() => break,
            Some(_) => {
                s.take_line_content();
                s.skip_eol();
            }
        }
    }
    Junk {
        content: s.slice(start, s.pos()).to_string(),
    }
}
