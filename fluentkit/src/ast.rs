//! The Fluent abstract syntax tree.
//!
//! Entries are produced by the parser, normalized in place, and then owned
//! by the bundle for their locale. The tree is immutable after
//! construction; formatting only reads it.

use std::fmt::{self, Display, Formatter};

/// A top-level entry of a Fluent resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Message(Message),
    Term(Term),
    /// A standalone `#` comment that is not attached to a message or term.
    Comment(Comment),
    /// A `##` section comment.
    GroupComment(Comment),
    /// A `###` file-level comment.
    ResourceComment(Comment),
    /// Source text that failed to parse as an entry, kept verbatim.
    Junk(Junk),
}

/// A message: the unit of translation addressed by a bare identifier.
///
/// Either `pattern` is non-empty or `attributes` is non-empty; the parser
/// rejects messages with neither.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub comment: Option<Comment>,
    pub pattern: Pattern,
    pub attributes: Vec<Attribute>,
}

impl Message {
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.id == id)
    }
}

/// A term: structurally a message, referenced with `-name` syntax and only
/// reachable from other patterns. The stored id excludes the leading `-`.
#[derive(Debug, Clone, PartialEq)]
pub struct Term {
    pub id: String,
    pub comment: Option<Comment>,
    pub pattern: Pattern,
    pub attributes: Vec<Attribute>,
}

impl Term {
    pub fn attribute(&self, id: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|attribute| attribute.id == id)
    }
}

/// A named sub-pattern of a message or term (`.label = …`). Attributes
/// cannot themselves carry attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub id: String,
    pub pattern: Pattern,
}

/// Comment text with the `#` markers and the single following space
/// stripped; multi-line comments are joined with `\n`.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub content: String,
}

/// An unparseable region of the source, preserved byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Junk {
    pub content: String,
}

/// The value of a message, term, attribute, or variant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pattern {
    pub elements: Vec<PatternElement>,
}

impl Pattern {
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

/// One element of a pattern: a text run or a placeable.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternElement {
    /// A literal text run. After normalization no two `Text` elements are
    /// adjacent.
    Text(String),
    /// A quoted literal such as `{ "{" }`; escapes are already resolved.
    StringLiteral(String),
    /// A number literal kept in textual form so significant fraction
    /// digits survive until format time.
    NumberLiteral(String),
    /// `$name`
    VariableReference(String),
    /// `name` or `name.attr`
    MessageReference {
        id: String,
        attribute: Option<String>,
    },
    /// `-name` or `-name.attr`; the stored id excludes the `-`.
    TermReference {
        id: String,
        attribute: Option<String>,
    },
    Select(SelectExpression),
}

/// A variant selector: `{ $n -> [one] … *[other] … }`.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectExpression {
    pub selector: Box<PatternElement>,
    /// Variants in source order; lookup depends on it.
    pub variants: Vec<Variant>,
    /// Index of the variant marked `*` in source. Always in bounds.
    pub default_index: usize,
}

impl SelectExpression {
    pub fn default_variant(&self) -> &Variant {
        &self.variants[self.default_index]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variant {
    pub key: VariantKey,
    pub pattern: Pattern,
}

/// A variant key: a bare identifier (plural category or exact string
/// match) or a number literal (matched by numeric equality).
#[derive(Debug, Clone, PartialEq)]
pub enum VariantKey {
    Identifier(String),
    Number(String),
}

impl Display for VariantKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            VariantKey::Identifier(name) => write!(f, "{}", name),
            VariantKey::Number(raw) => write!(f, "{}", raw),
        }
    }
}

impl Display for PatternElement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            PatternElement::Text(text) => write!(f, "{}", text),
            PatternElement::StringLiteral(value) => write!(f, "{{ \"{}\" }}", value),
            PatternElement::NumberLiteral(raw) => write!(f, "{{ {} }}", raw),
            PatternElement::VariableReference(name) => write!(f, "{{ ${} }}", name),
            PatternElement::MessageReference { id, attribute } => match attribute {
                Some(attribute) => write!(f, "{{ {}.{} }}", id, attribute),
                None => write!(f, "{{ {} }}", id),
            },
            PatternElement::TermReference { id, attribute } => match attribute {
                Some(attribute) => write!(f, "{{ -{}.{} }}", id, attribute),
                None => write!(f, "{{ -{} }}", id),
            },
            PatternElement::Select(select) => {
                write!(f, "{{ {} ->", select.selector)?;
                for (index, variant) in select.variants.iter().enumerate() {
                    let star = if index == select.default_index { "*" } else { " " };
                    write!(f, "\n   {}[{}] {}", star, variant.key, variant.pattern)?;
                }
                write!(f, "\n}}")
            }
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            write!(f, "{}", element)?;
        }
        Ok(())
    }
}

/// Renders the canonical `id = pattern` form, with attributes on
/// continuation lines.
impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.id, self.pattern)?;
        for attribute in &self.attributes {
            write!(f, "\n    .{} = {}", attribute.id, attribute.pattern)?;
        }
        Ok(())
    }
}

impl Display for Term {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "-{} = {}", self.id, self.pattern)?;
        for attribute in &self.attributes {
            write!(f, "\n    .{} = {}", attribute.id, attribute.pattern)?;
        }
        Ok(())
    }
}
