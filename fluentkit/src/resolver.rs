//! The pattern evaluator.
//!
//! A tree-walking interpreter over [`PatternElement`]: text runs are
//! copied through, references are resolved via lookup callbacks closing
//! over the caller's locale fallback chain, select expressions pick a
//! variant by exact match or CLDR plural category, and numbers go
//! through the locale-number adapter.
//!
//! Failures never abort the surrounding pattern: each element renders
//! independently, falling back to a placeholder (unknown references),
//! the empty string (missing arguments), or language-neutral digits
//! (number formatting errors), with a diagnostic on the log.

use std::collections::HashMap;

use log::warn;
use unic_langid::LanguageIdentifier;

use crate::ast::{Message, Pattern, PatternElement, SelectExpression, Term, VariantKey};
use crate::intl;
use crate::types::{Arguments, Value};

/// Lookup callbacks that resolve cross-entry references in the same
/// locale-resolution context as the message being formatted.
pub(crate) type MessageLookup<'m> = dyn Fn(&str) -> Option<&'m Message> + 'm;
pub(crate) type TermLookup<'m> = dyn Fn(&str) -> Option<&'m Term> + 'm;

/// Renders `pattern` with `args`. `locale` is the locale the top-level
/// message resolved from; it drives number formatting and plural
/// selection for every element, including referenced messages and terms.
pub(crate) fn format_pattern<'m>(
    locale: &LanguageIdentifier,
    pattern: &Pattern,
    args: &Arguments,
    messages: &MessageLookup<'m>,
    terms: &TermLookup<'m>,
) -> String {
    let mut output = String::new();
    write_pattern(&mut output, locale, pattern, args, messages, terms);
    output
}

fn write_pattern<'m>(
    output: &mut String,
    locale: &LanguageIdentifier,
    pattern: &Pattern,
    args: &Arguments,
    messages: &MessageLookup<'m>,
    terms: &TermLookup<'m>,
) {
    for element in &pattern.elements {
        write_element(output, locale, element, args, messages, terms);
    }
}

fn write_element<'m>(
    output: &mut String,
    locale: &LanguageIdentifier,
    element: &PatternElement,
    args: &Arguments,
    messages: &MessageLookup<'m>,
    terms: &TermLookup<'m>,
) {
    match element {
        PatternElement::Text(text) => output.push_str(text),
        PatternElement::StringLiteral(value) => output.push_str(value),
        PatternElement::NumberLiteral(raw) => {
            output.push_str(&format_number_literal(locale, raw));
        }
        PatternElement::VariableReference(name) => match args.get(name) {
            Some(Value::String(value)) => output.push_str(value),
            Some(Value::Integer(value)) => {
                let rendered = intl::format_integer(locale, *value).unwrap_or_else(|error| {
                    warn!("number formatting failed, using neutral digits: {}", error);
                    value.to_string()
                });
                output.push_str(&rendered);
            }
            Some(Value::Float(value)) => {
                let rendered = intl::format_decimal(locale, *value, 0).unwrap_or_else(|error| {
                    warn!("number formatting failed, using neutral digits: {}", error);
                    value.to_string()
                });
                output.push_str(&rendered);
            }
            None => {
                warn!("missing argument `${}`", name);
            }
        },
        PatternElement::MessageReference { id, attribute } => {
            let resolved = messages(id).and_then(|message| match attribute {
                None => Some(&message.pattern),
                Some(attribute) => message.attribute(attribute).map(|a| &a.pattern),
            });
            match resolved {
                Some(pattern) => write_pattern(output, locale, pattern, args, messages, terms),
                None => {
                    let reference = reference_name(id, attribute);
                    warn!("unknown message `{}`", reference);
                    output.push_str("unknown message ");
                    output.push_str(&reference);
                }
            }
        }
        PatternElement::TermReference { id, attribute } => {
            let resolved = terms(id).and_then(|term| match attribute {
                None => Some(&term.pattern),
                Some(attribute) => term.attribute(attribute).map(|a| &a.pattern),
            });
            match resolved {
                // Terms never see the caller's arguments.
                Some(pattern) => {
                    write_pattern(output, locale, pattern, &HashMap::new(), messages, terms)
                }
                None => {
                    let reference = format!("-{}", reference_name(id, attribute));
                    warn!("unknown term `{}`", reference);
                    output.push_str("unknown term ");
                    output.push_str(&reference);
                }
            }
        }
        PatternElement::Select(select) => {
            let index = select_variant(locale, select, args);
            write_pattern(
                output,
                locale,
                &select.variants[index].pattern,
                args,
                messages,
                terms,
            );
        }
    }
}

fn reference_name(id: &str, attribute: &Option<String>) -> String {
    match attribute {
        Some(attribute) => format!("{}.{}", id, attribute),
        None => id.to_string(),
    }
}

/// The selector evaluated to a comparable value. Numbers keep a textual
/// form so plural operands see the fraction digits that were written.
enum SelectorValue {
    String(String),
    Number { value: f64, is_integer: bool, raw: String },
}

fn selector_value(select: &SelectExpression, args: &Arguments) -> Option<SelectorValue> {
    match select.selector.as_ref() {
        PatternElement::StringLiteral(value) => Some(SelectorValue::String(value.clone())),
        PatternElement::NumberLiteral(raw) => Some(number_value(raw)),
        PatternElement::VariableReference(name) => match args.get(name) {
            Some(Value::String(value)) => Some(SelectorValue::String(value.clone())),
            Some(Value::Integer(value)) => Some(SelectorValue::Number {
                value: *value as f64,
                is_integer: true,
                raw: value.to_string(),
            }),
            Some(Value::Float(value)) => Some(SelectorValue::Number {
                value: *value,
                is_integer: false,
                raw: value.to_string(),
            }),
            None => {
                warn!("missing argument `${}` in selector", name);
                None
            }
        },
        PatternElement::MessageReference { id, .. } | PatternElement::TermReference { id, .. } => {
            warn!("reference `{}` is not supported as a selector", id);
            None
        }
        _ => None,
    }
}

fn number_value(raw: &str) -> SelectorValue {
    SelectorValue::Number {
        value: raw.parse().unwrap_or(0.0),
        is_integer: !raw.contains('.'),
        raw: raw.to_string(),
    }
}

/// Picks the variant for `select`: string selectors match identifier keys
/// exactly; numeric selectors match number keys by numeric equality
/// first, then identifier keys by the selector's CLDR plural category.
/// Falls back to the default variant.
fn select_variant(
    locale: &LanguageIdentifier,
    select: &SelectExpression,
    args: &Arguments,
) -> usize {
    let Some(selector) = selector_value(select, args) else {
        return select.default_index;
    };
    match selector {
        SelectorValue::String(value) => {
            for (index, variant) in select.variants.iter().enumerate() {
                if let VariantKey::Identifier(key) = &variant.key {
                    if key == &value {
                        return index;
                    }
                }
            }
        }
        SelectorValue::Number { value, is_integer, raw } => {
            for (index, variant) in select.variants.iter().enumerate() {
                if let VariantKey::Number(key) = &variant.key {
                    if let SelectorValue::Number {
                        value: key_value,
                        is_integer: key_is_integer,
                        ..
                    } = number_value(key)
                    {
                        let equal = if is_integer && key_is_integer {
                            value == key_value
                        } else {
                            floats_equal(value, key_value)
                        };
                        if equal {
                            return index;
                        }
                    }
                }
            }
            match intl::plural_category(locale, &raw) {
                Ok(category) => {
                    for (index, variant) in select.variants.iter().enumerate() {
                        if let VariantKey::Identifier(key) = &variant.key {
                            if key == category.as_str() {
                                return index;
                            }
                        }
                    }
                }
                Err(error) => {
                    warn!("plural category lookup failed: {}", error);
                }
            }
        }
    }
    select.default_index
}

/// Equality within a small relative epsilon, so `0.1 + 0.2` still matches
/// a `[0.3]` key.
fn floats_equal(a: f64, b: f64) -> bool {
    a == b || (a - b).abs() <= f64::EPSILON * a.abs().max(b.abs())
}

fn format_number_literal(locale: &LanguageIdentifier, raw: &str) -> String {
    match raw.find('.') {
        Some(at) => {
            let minimum_fraction_digits = raw.len() - at - 1;
            let Ok(value) = raw.parse::<f64>() else {
                return raw.to_string();
            };
            intl::format_decimal(locale, value, minimum_fraction_digits).unwrap_or_else(|error| {
                warn!("number formatting failed, using raw digits: {}", error);
                raw.to_string()
            })
        }
        None => match raw.parse::<i64>() {
            Ok(value) => intl::format_integer(locale, value).unwrap_or_else(|error| {
                warn!("number formatting failed, using raw digits: {}", error);
                raw.to_string()
            }),
            Err(_) => raw.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_pattern;
    use crate::types::Value;

    fn en() -> LanguageIdentifier {
        "en".parse().unwrap()
    }

    fn no_messages<'m>() -> Box<MessageLookup<'m>> {
        Box::new(|_: &str| None)
    }

    fn no_terms<'m>() -> Box<TermLookup<'m>> {
        Box::new(|_: &str| None)
    }

    fn format(source: &str, args: &Arguments) -> String {
        let pattern = parse_pattern(source).unwrap();
        format_pattern(&en(), &pattern, args, &*no_messages(), &*no_terms())
    }

    #[test]
    fn test_text_and_string_literals() {
        assert_eq!(format(r#"a { "{" } b"#, &Arguments::new()), "a { b");
    }

    #[test]
    fn test_number_literal_preserves_fraction_digits() {
        assert_eq!(format("{ 1.0 }", &Arguments::new()), "1.0");
        assert_eq!(format("{ 1.50 }", &Arguments::new()), "1.50");
        assert_eq!(format("{ 42 }", &Arguments::new()), "42");
        assert_eq!(format("{ -3.14 }", &Arguments::new()), "-3.14");
    }

    #[test]
    fn test_variable_rendering() {
        let mut args = Arguments::new();
        args.insert("name".to_string(), Value::from("World"));
        args.insert("count".to_string(), Value::from(10));
        args.insert("ratio".to_string(), Value::from(2.5));
        assert_eq!(
            format("{ $name } { $count } { $ratio }", &args),
            "World 10 2.5"
        );
    }

    #[test]
    fn test_missing_argument_renders_empty() {
        assert_eq!(format("a{ $missing }b", &Arguments::new()), "ab");
    }

    #[test]
    fn test_unknown_message_placeholder() {
        assert_eq!(
            format("{ nope }", &Arguments::new()),
            "unknown message nope"
        );
        assert_eq!(
            format("{ nope.attr }", &Arguments::new()),
            "unknown message nope.attr"
        );
    }

    #[test]
    fn test_unknown_term_placeholder() {
        assert_eq!(format("{ -nope }", &Arguments::new()), "unknown term -nope");
    }

    #[test]
    fn test_message_reference_resolution() {
        let target = Message {
            id: "target".to_string(),
            comment: None,
            pattern: parse_pattern("resolved").unwrap(),
            attributes: Vec::new(),
        };
        let pattern = parse_pattern("see { target }").unwrap();
        let lookup = |id: &str| if id == "target" { Some(&target) } else { None };
        let rendered = format_pattern(&en(), &pattern, &Arguments::new(), &lookup, &*no_terms());
        assert_eq!(rendered, "see resolved");
    }

    #[test]
    fn test_term_does_not_receive_arguments() {
        let term = Term {
            id: "who".to_string(),
            comment: None,
            pattern: parse_pattern("x{ $name }y").unwrap(),
            attributes: Vec::new(),
        };
        let pattern = parse_pattern("{ -who }").unwrap();
        let mut args = Arguments::new();
        args.insert("name".to_string(), Value::from("World"));
        let lookup = |id: &str| if id == "who" { Some(&term) } else { None };
        let rendered = format_pattern(&en(), &pattern, &args, &*no_messages(), &lookup);
        assert_eq!(rendered, "xy");
    }

    #[test]
    fn test_select_exact_number_match() {
        let source = "{ $n ->\n    [0] zero\n   *[other] other\n}";
        let mut args = Arguments::new();
        args.insert("n".to_string(), Value::from(0));
        assert_eq!(format(source, &args), "zero");
    }

    #[test]
    fn test_select_integer_matches_float_key() {
        let source = "{ $n ->\n    [1.0] exact\n   *[other] other\n}";
        let mut args = Arguments::new();
        args.insert("n".to_string(), Value::from(1));
        assert_eq!(format(source, &args), "exact");
    }

    #[test]
    fn test_select_plural_category() {
        let source = "{ $n ->\n    [one] one thing\n   *[other] many things\n}";
        let mut args = Arguments::new();
        args.insert("n".to_string(), Value::from(1));
        assert_eq!(format(source, &args), "one thing");
        args.insert("n".to_string(), Value::from(5));
        assert_eq!(format(source, &args), "many things");
    }

    #[test]
    fn test_select_string_match() {
        let source = "{ $color ->\n    [red] warm\n   *[blue] cold\n}";
        let mut args = Arguments::new();
        args.insert("color".to_string(), Value::from("red"));
        assert_eq!(format(source, &args), "warm");
    }

    #[test]
    fn test_select_falls_back_to_default() {
        let source = "{ $color ->\n    [red] warm\n   *[blue] cold\n}";
        let mut args = Arguments::new();
        args.insert("color".to_string(), Value::from("green"));
        assert_eq!(format(source, &args), "cold");
        // Missing selector argument also lands on the default.
        assert_eq!(format(source, &Arguments::new()), "cold");
    }

    #[test]
    fn test_select_string_literal_selector() {
        let source = "{ \"red\" ->\n    [red] warm\n   *[blue] cold\n}";
        assert_eq!(format(source, &Arguments::new()), "warm");
    }

    #[test]
    fn test_nested_select() {
        let source = "{ $a ->\n    [x] { $b ->\n        [y] inner\n       *[other] outer-default\n    }\n   *[other] fallback\n}";
        let mut args = Arguments::new();
        args.insert("a".to_string(), Value::from("x"));
        args.insert("b".to_string(), Value::from("y"));
        assert_eq!(format(source, &args), "inner");
    }
}
