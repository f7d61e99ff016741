#![forbid(unsafe_code)]
//! Project Fluent (`.ftl`) localization for Rust.
//!
//! fluentkit parses Fluent resources into an AST, stores messages per
//! locale, and formats them with runtime arguments, locale-aware numbers,
//! and CLDR plural selection across a locale fallback chain.
//!
//! # Quick Start
//!
//! ```rust
//! use fluentkit::{FluentLoader, Value};
//! use unic_langid::LanguageIdentifier;
//!
//! let en: LanguageIdentifier = "en".parse()?;
//!
//! let mut loader = FluentLoader::new();
//! loader.add_resource(en.clone(), "things = { $n ->\n    [one] One thing\n   *[other] { $n } things\n}\n")?;
//!
//! let mut args = fluentkit::Arguments::new();
//! args.insert("n".to_string(), Value::from(5));
//! assert_eq!(
//!     loader.format_message(&[en], "things", &args),
//!     Some("5 things".to_string()),
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Resources are usually loaded from a `locales/<locale>/*.ftl` layout
//! with [`FluentLoader::add_directory`], or embedded at build time with
//! the `ftlembed` tool and looked up through
//! [`format_static_message`].

pub mod ast;
pub mod bundle;
pub mod error;
pub mod intl;
pub mod json;
pub mod loader;
pub mod normalize;
pub mod parser;
mod registry;
mod resolver;
pub mod types;

// Re-export most used types for easy consumption
pub use crate::{
    ast::{Entry, Message, Pattern, PatternElement, Term},
    bundle::FluentBundle,
    error::Error,
    loader::FluentLoader,
    parser::{parse_message_reference, parse_pattern, parse_resource, parse_resource_strict},
    registry::{add_static_resource, format_static_message},
    types::{Arguments, PluralCategory, Value},
};
