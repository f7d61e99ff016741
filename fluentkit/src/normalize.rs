//! Post-parse pattern normalization.
//!
//! The parser captures multi-line text runs verbatim, including the
//! newlines and indentation that belong to the Fluent block syntax rather
//! than to the message content. This pass rewrites a raw pattern into the
//! canonical form every downstream consumer observes:
//!
//! 1. adjacent text runs are merged,
//! 2. `\r\n` becomes `\n`,
//! 3. the common indent of all continuation lines is stripped,
//! 4. blank-only lines collapse to empty lines,
//! 5. leading and trailing spaces/newlines of the pattern are trimmed.
//!
//! The transformation is idempotent. Message, attribute, and variant
//! patterns are each normalized independently.

use crate::ast::{Pattern, PatternElement};

pub fn normalize(pattern: &mut Pattern) {
    merge_adjacent_text(pattern);

    for element in &mut pattern.elements {
        if let PatternElement::Text(text) = element {
            if text.contains('\r') {
                *text = text.replace("\r\n", "\n");
            }
        }
    }

    let indent = common_indent(pattern);
    for element in &mut pattern.elements {
        if let PatternElement::Text(text) = element {
            *text = strip_indent(text, indent);
        }
    }

    if let Some(PatternElement::Text(first)) = pattern.elements.first_mut() {
        let trimmed = first.trim_start_matches([' ', '\n']);
        if trimmed.len() != first.len() {
            *first = trimmed.to_string();
        }
        if first.is_empty() {
            pattern.elements.remove(0);
        }
    }

    if let Some(PatternElement::Text(last)) = pattern.elements.last_mut() {
        let trimmed = last.trim_end_matches([' ', '\n']);
        if trimmed.len() != last.len() {
            *last = trimmed.to_string();
        }
        if last.is_empty() {
            pattern.elements.pop();
        }
    }
}

fn merge_adjacent_text(pattern: &mut Pattern) {
    let mut merged: Vec<PatternElement> = Vec::with_capacity(pattern.elements.len());
    for element in pattern.elements.drain(..) {
        match (merged.last_mut(), element) {
            (Some(PatternElement::Text(previous)), PatternElement::Text(text)) => {
                previous.push_str(&text);
            }
            (_, element) => merged.push(element),
        }
    }
    pattern.elements = merged;
}

/// The minimum indent of all non-blank continuation lines. The inline
/// fragment on the `=` line is not a continuation line and never counts.
fn common_indent(pattern: &Pattern) -> usize {
    let mut indent: Option<usize> = None;
    for element in &pattern.elements {
        let PatternElement::Text(text) = element else {
            continue;
        };
        for line in text.split('\n').skip(1) {
            if is_blank(line) {
                continue;
            }
            let leading = line.len() - line.trim_start_matches(' ').len();
            indent = Some(indent.map_or(leading, |current| current.min(leading)));
        }
    }
    indent.unwrap_or(0)
}

fn strip_indent(text: &str, indent: usize) -> String {
    if !text.contains('\n') {
        return text.to_string();
    }
    let mut lines = text.split('\n');
    let mut result = String::with_capacity(text.len());
    if let Some(first) = lines.next() {
        result.push_str(first);
    }
    for line in lines {
        result.push('\n');
        if is_blank(line) {
            continue;
        }
        result.push_str(&line[indent.min(line.len())..]);
    }
    result
}

fn is_blank(line: &str) -> bool {
    line.bytes().all(|b| b == b' ')
}
