//! The reference JSON serialization of the AST.
//!
//! This is the shape the parser fixture corpus is written in: every
//! `tests/fixtures/*.ftl` has a sibling `.json` holding the expected
//! resource. The layout mirrors the reference Fluent AST: placeables wrap
//! their expression, identifiers are nodes with a `name`, and variants
//! carry a `default` flag. Empty attribute lists serialize as `""` and a
//! missing value or comment as `null`.

use serde_json::{json, Value as Json};

use crate::ast::{Attribute, Comment, Entry, Message, Pattern, PatternElement, Term, VariantKey};

pub fn resource_to_json(entries: &[Entry]) -> Json {
    json!({
        "type": "Resource",
        "body": entries.iter().map(entry_to_json).collect::<Vec<_>>(),
    })
}

pub fn entry_to_json(entry: &Entry) -> Json {
    match entry {
        Entry::Message(message) => message_to_json(message),
        Entry::Term(term) => term_to_json(term),
        Entry::Comment(comment) => comment_to_json("Comment", comment),
        Entry::GroupComment(comment) => comment_to_json("GroupComment", comment),
        Entry::ResourceComment(comment) => comment_to_json("ResourceComment", comment),
        Entry::Junk(junk) => json!({ "type": "Junk", "content": junk.content }),
    }
}

fn message_to_json(message: &Message) -> Json {
    json!({
        "type": "Message",
        "id": identifier_to_json(&message.id),
        "value": value_to_json(&message.pattern),
        "attributes": attributes_to_json(&message.attributes),
        "comment": match &message.comment {
            Some(comment) => comment_to_json("Comment", comment),
            None => Json::Null,
        },
    })
}

fn term_to_json(term: &Term) -> Json {
    json!({
        "type": "Term",
        "id": identifier_to_json(&term.id),
        "value": value_to_json(&term.pattern),
        "attributes": attributes_to_json(&term.attributes),
        "comment": match &term.comment {
            Some(comment) => comment_to_json("Comment", comment),
            None => Json::Null,
        },
    })
}

fn comment_to_json(tag: &str, comment: &Comment) -> Json {
    json!({ "type": tag, "content": comment.content })
}

fn identifier_to_json(name: &str) -> Json {
    json!({ "type": "Identifier", "name": name })
}

fn value_to_json(pattern: &Pattern) -> Json {
    if pattern.is_empty() {
        Json::Null
    } else {
        pattern_to_json(pattern)
    }
}

fn pattern_to_json(pattern: &Pattern) -> Json {
    json!({
        "type": "Pattern",
        "elements": pattern.elements.iter().map(element_to_json).collect::<Vec<_>>(),
    })
}

fn attributes_to_json(attributes: &[Attribute]) -> Json {
    if attributes.is_empty() {
        return json!("");
    }
    Json::Array(
        attributes
            .iter()
            .map(|attribute| {
                json!({
                    "type": "Attribute",
                    "id": identifier_to_json(&attribute.id),
                    "value": pattern_to_json(&attribute.pattern),
                })
            })
            .collect(),
    )
}

fn element_to_json(element: &PatternElement) -> Json {
    match element {
        PatternElement::Text(value) => json!({ "type": "TextElement", "value": value }),
        _ => json!({ "type": "Placeable", "expression": expression_to_json(element) }),
    }
}

fn expression_to_json(element: &PatternElement) -> Json {
    match element {
        PatternElement::Text(value) => json!({ "type": "TextElement", "value": value }),
        PatternElement::StringLiteral(value) => {
            json!({ "type": "StringLiteral", "value": value })
        }
        PatternElement::NumberLiteral(raw) => json!({ "type": "NumberLiteral", "value": raw }),
        PatternElement::VariableReference(name) => {
            json!({ "type": "VariableReference", "id": identifier_to_json(name) })
        }
        PatternElement::MessageReference { id, attribute } => json!({
            "type": "MessageReference",
            "id": identifier_to_json(id),
            "attribute": match attribute {
                Some(attribute) => identifier_to_json(attribute),
                None => Json::Null,
            },
        }),
        PatternElement::TermReference { id, attribute } => json!({
            "type": "TermReference",
            "id": identifier_to_json(id),
            "attribute": match attribute {
                Some(attribute) => identifier_to_json(attribute),
                None => Json::Null,
            },
        }),
        PatternElement::Select(select) => json!({
            "type": "SelectExpression",
            "selector": expression_to_json(&select.selector),
            "variants": select
                .variants
                .iter()
                .enumerate()
                .map(|(index, variant)| {
                    json!({
                        "type": "Variant",
                        "key": variant_key_to_json(&variant.key),
                        "value": pattern_to_json(&variant.pattern),
                        "default": index == select.default_index,
                    })
                })
                .collect::<Vec<_>>(),
        }),
    }
}

fn variant_key_to_json(key: &VariantKey) -> Json {
    match key {
        VariantKey::Identifier(name) => identifier_to_json(name),
        VariantKey::Number(raw) => json!({ "type": "NumberLiteral", "value": raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_resource;

    #[test]
    fn test_message_serialization_shape() {
        let entries = parse_resource("greeting = Hello, { $name }!\n").unwrap();
        let actual = resource_to_json(&entries);
        let expected = json!({
            "type": "Resource",
            "body": [{
                "type": "Message",
                "id": { "type": "Identifier", "name": "greeting" },
                "value": {
                    "type": "Pattern",
                    "elements": [
                        { "type": "TextElement", "value": "Hello, " },
                        {
                            "type": "Placeable",
                            "expression": {
                                "type": "VariableReference",
                                "id": { "type": "Identifier", "name": "name" },
                            },
                        },
                        { "type": "TextElement", "value": "!" },
                    ],
                },
                "attributes": "",
                "comment": null,
            }],
        });
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_attribute_only_message_has_null_value() {
        let entries = parse_resource("key =\n    .label = Value\n").unwrap();
        let json = resource_to_json(&entries);
        assert_eq!(json["body"][0]["value"], Json::Null);
        assert_eq!(json["body"][0]["attributes"][0]["id"]["name"], "label");
    }

    #[test]
    fn test_select_serialization_marks_default() {
        let source = "things = { $n ->\n    [one] One\n   *[other] Many\n}\n";
        let entries = parse_resource(source).unwrap();
        let json = resource_to_json(&entries);
        let select = &json["body"][0]["value"]["elements"][0]["expression"];
        assert_eq!(select["type"], "SelectExpression");
        assert_eq!(select["variants"][0]["default"], false);
        assert_eq!(select["variants"][1]["default"], true);
        assert_eq!(select["variants"][1]["key"]["name"], "other");
    }
}
