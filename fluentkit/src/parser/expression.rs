//! Placeable and inline-expression parsing.

use super::pattern;
use super::scanner::{is_identifier_start, ParseError, Scanner};
use crate::ast::{PatternElement, SelectExpression, Variant, VariantKey};
use crate::normalize::normalize;

/// Parses `{ blank? (SelectExpression | InlineExpression) blank? }` with
/// the cursor on the opening brace.
pub(super) fn parse_placeable(s: &mut Scanner) -> Result<PatternElement, ParseError> {
    s.expect_byte(b'{')?;
    s.skip_blank();
    let nested_placeable = s.peek() == Some(b'{');
    let expression = parse_inline_expression(s)?;
    s.skip_blank();
    if s.peek() == Some(b'-') && s.peek_at(1) == Some(b'>') {
        if nested_placeable {
            return Err(s.error("nested placeables are not valid selectors"));
        }
        s.bump();
        s.bump();
        s.skip_blank_inline();
        let (variants, default_index) = parse_variants(s)?;
        s.skip_blank();
        s.expect_byte(b'}')?;
        return Ok(PatternElement::Select(SelectExpression {
            selector: Box::new(expression),
            variants,
            default_index,
        }));
    }
    s.expect_byte(b'}')?;
    Ok(expression)
}

/// `StringLiteral | NumberLiteral | MessageReference | TermReference |
/// VariableReference | inline_placeable`, dispatched on one byte of
/// lookahead (two for the `-` that may start either a number or a term
/// reference).
fn parse_inline_expression(s: &mut Scanner) -> Result<PatternElement, ParseError> {
    match s.peek() {
        Some(b'"') => parse_string_literal(s),
        Some(b'$') => {
            s.bump();
            let id = s.take_identifier()?;
            Ok(PatternElement::VariableReference(id.to_string()))
        }
        Some(b'{') => parse_placeable(s),
        Some(b'-') => {
            if s.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
                parse_number_literal(s)
            } else {
                s.bump();
                let id = s.take_identifier()?;
                let attribute = parse_attribute_accessor(s)?;
                Ok(PatternElement::TermReference {
                    id: id.to_string(),
                    attribute,
                })
            }
        }
        Some(b) if b.is_ascii_digit() => parse_number_literal(s),
        Some(b) if is_identifier_start(b) => {
            let id = s.take_identifier()?;
            let attribute = parse_attribute_accessor(s)?;
            Ok(PatternElement::MessageReference {
                id: id.to_string(),
                attribute,
            })
        }
        _ => Err(s.error("expected an expression")),
    }
}

fn parse_attribute_accessor(s: &mut Scanner) -> Result<Option<String>, ParseError> {
    if s.take_byte_if(b'.') {
        let id = s.take_identifier()?;
        Ok(Some(id.to_string()))
    } else {
        Ok(None)
    }
}

/// `-? digits (. digits)?`, captured in textual form.
fn parse_number_literal(s: &mut Scanner) -> Result<PatternElement, ParseError> {
    let start = s.pos();
    s.take_byte_if(b'-');
    take_digits(s)?;
    if s.take_byte_if(b'.') {
        take_digits(s)?;
    }
    Ok(PatternElement::NumberLiteral(
        s.slice(start, s.pos()).to_string(),
    ))
}

fn take_digits(s: &mut Scanner) -> Result<(), ParseError> {
    if !s.peek().is_some_and(|b| b.is_ascii_digit()) {
        return Err(s.error("expected a digit"));
    }
    while s.peek().is_some_and(|b| b.is_ascii_digit()) {
        s.bump();
    }
    Ok(())
}

/// A double-quoted literal. `\"`, `\\`, `\uXXXX`, and `\UXXXXXX` are
/// resolved here; anything else after a backslash is an error. An escape
/// naming an invalid code point yields U+FFFD.
fn parse_string_literal(s: &mut Scanner) -> Result<PatternElement, ParseError> {
    s.expect_byte(b'"')?;
    let mut value = String::new();
    loop {
        let run_start = s.pos();
        while let Some(b) = s.peek() {
            if b == b'"' || b == b'\\' || b == b'\n' || (b == b'\r' && s.peek_at(1) == Some(b'\n'))
            {
                break;
            }
            s.bump();
        }
        value.push_str(s.slice(run_start, s.pos()));
        match s.peek() {
            Some(b'"') => {
                s.bump();
                return Ok(PatternElement::StringLiteral(value));
            }
            Some(b'\\') => {
                s.bump();
                match s.peek() {
                    Some(b'"') => {
                        value.push('"');
                        s.bump();
                    }
                    Some(b'\\') => {
                        value.push('\\');
                        s.bump();
                    }
                    Some(b'u') => {
                        s.bump();
                        value.push(take_unicode_escape(s, 4)?);
                    }
                    Some(b'U') => {
                        s.bump();
                        value.push(take_unicode_escape(s, 6)?);
                    }
                    _ => return Err(s.error("unknown escape sequence")),
                }
            }
            _ => return Err(s.error("unterminated string literal")),
        }
    }
}

fn take_unicode_escape(s: &mut Scanner, length: usize) -> Result<char, ParseError> {
    let start = s.pos();
    for _ in 0..length {
        if !s.peek().is_some_and(|b| b.is_ascii_hexdigit()) {
            return Err(s.error(format!("expected {} hex digits in unicode escape", length)));
        }
        s.bump();
    }
    let code_point = u32::from_str_radix(s.slice(start, s.pos()), 16)
        .map_err(|_| s.error("invalid unicode escape"))?;
    Ok(char::from_u32(code_point).unwrap_or(char::REPLACEMENT_CHARACTER))
}

/// `Variant* DefaultVariant Variant*`, each variant on its own line.
/// Exactly one variant must carry the `*` marker.
fn parse_variants(s: &mut Scanner) -> Result<(Vec<Variant>, usize), ParseError> {
    let mut variants = Vec::new();
    let mut default_index = None;
    loop {
        let save = s.pos();
        if !s.skip_eol() {
            break;
        }
        s.skip_blank();
        let default = s.take_byte_if(b'*');
        if !s.take_byte_if(b'[') {
            if default {
                return Err(s.error("expected `[` after `*`"));
            }
            s.seek(save);
            break;
        }
        s.skip_blank();
        let key = parse_variant_key(s)?;
        s.skip_blank();
        s.expect_byte(b']')?;
        s.skip_blank_inline();
        let mut value = pattern::parse_pattern_interior(s)?;
        normalize(&mut value);
        if value.is_empty() {
            return Err(s.error("variant must have a value"));
        }
        if default {
            if default_index.is_some() {
                return Err(s.error("a select expression can only have one default variant"));
            }
            default_index = Some(variants.len());
        }
        variants.push(Variant {
            key,
            pattern: value,
        });
    }
    if variants.is_empty() {
        return Err(s.error("expected at least one variant"));
    }
    match default_index {
        Some(default_index) => Ok((variants, default_index)),
        None => Err(s.error("select expression is missing a default variant")),
    }
}

fn parse_variant_key(s: &mut Scanner) -> Result<VariantKey, ParseError> {
    let numeric = match s.peek() {
        Some(b'-') => s.peek_at(1).is_some_and(|b| b.is_ascii_digit()),
        Some(b) => b.is_ascii_digit(),
        None => false,
    };
    if numeric {
        match parse_number_literal(s)? {
            PatternElement::NumberLiteral(raw) => Ok(VariantKey::Number(raw)),
            _ => unreachable!("parse_number_literal only returns number literals"),
        }
    } else {
        let id = s.take_identifier()?;
        Ok(VariantKey::Identifier(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeable(source: &str) -> Result<PatternElement, ParseError> {
        let mut s = Scanner::new(source);
        parse_placeable(&mut s)
    }

    #[test]
    fn test_variable_reference() {
        assert_eq!(
            placeable("{ $count }").unwrap(),
            PatternElement::VariableReference("count".to_string())
        );
    }

    #[test]
    fn test_message_reference_with_attribute() {
        assert_eq!(
            placeable("{ menu.label }").unwrap(),
            PatternElement::MessageReference {
                id: "menu".to_string(),
                attribute: Some("label".to_string()),
            }
        );
    }

    #[test]
    fn test_term_reference() {
        assert_eq!(
            placeable("{ -brand }").unwrap(),
            PatternElement::TermReference {
                id: "brand".to_string(),
                attribute: None,
            }
        );
    }

    #[test]
    fn test_negative_number_is_not_a_term() {
        assert_eq!(
            placeable("{ -3.14 }").unwrap(),
            PatternElement::NumberLiteral("-3.14".to_string())
        );
    }

    #[test]
    fn test_number_requires_digits_after_decimal_point() {
        assert!(placeable("{ 1. }").is_err());
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(
            placeable(r#"{ "say \"hi\" A\U01F602" }"#).unwrap(),
            PatternElement::StringLiteral("say \"hi\" A😂".to_string())
        );
    }

    #[test]
    fn test_invalid_code_point_becomes_replacement_character() {
        assert_eq!(
            placeable(r#"{ "\uD800" }"#).unwrap(),
            PatternElement::StringLiteral("\u{FFFD}".to_string())
        );
    }

    #[test]
    fn test_unknown_escape_is_an_error() {
        assert!(placeable(r#"{ "\n" }"#).is_err());
    }

    #[test]
    fn test_unterminated_string_is_an_error() {
        assert!(placeable("{ \"abc\n\" }").is_err());
    }

    #[test]
    fn test_nested_placeable_expression() {
        assert_eq!(
            placeable(r#"{ { "literal" } }"#).unwrap(),
            PatternElement::StringLiteral("literal".to_string())
        );
    }

    #[test]
    fn test_nested_placeable_selector_is_rejected() {
        let error = placeable("{ { $n } ->\n   *[other] x\n}").unwrap_err();
        assert_eq!(error.message, "nested placeables are not valid selectors");
    }

    #[test]
    fn test_select_expression() {
        let element = placeable("{ $n ->\n    [one] One\n   *[other] Many\n}").unwrap();
        let PatternElement::Select(select) = element else {
            panic!("expected a select expression, got {:?}", element);
        };
        assert_eq!(
            *select.selector,
            PatternElement::VariableReference("n".to_string())
        );
        assert_eq!(select.variants.len(), 2);
        assert_eq!(select.default_index, 1);
        assert_eq!(
            select.variants[0].key,
            VariantKey::Identifier("one".to_string())
        );
    }

    #[test]
    fn test_select_with_number_keys() {
        let element = placeable("{ $n ->\n    [0] Zero\n   *[other] Many\n}").unwrap();
        let PatternElement::Select(select) = element else {
            panic!("expected a select expression");
        };
        assert_eq!(select.variants[0].key, VariantKey::Number("0".to_string()));
    }

    #[test]
    fn test_select_without_default_is_rejected() {
        let error = placeable("{ $n ->\n    [one] One\n}").unwrap_err();
        assert_eq!(error.message, "select expression is missing a default variant");
    }

    #[test]
    fn test_select_with_two_defaults_is_rejected() {
        let error = placeable("{ $n ->\n   *[one] One\n   *[other] Many\n}").unwrap_err();
        assert_eq!(
            error.message,
            "a select expression can only have one default variant"
        );
    }
}
