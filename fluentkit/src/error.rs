//! All error types for the fluentkit crate.
//!
//! These are returned from all fallible operations (parsing, ingestion,
//! locale-aware number formatting).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The source text violates the Fluent grammar in a way the parser
    /// cannot recover from in the current mode. Line and column are
    /// 1-based and computed from the failing byte offset.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("invalid locale identifier `{0}`")]
    Locale(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// No CLDR plural rules are available for the locale (nor for its
    /// base language).
    #[error("no plural rules for locale `{0}`")]
    PluralRules(String),

    /// The number cannot be rendered for the locale (for example a
    /// non-finite float). Callers fall back to language-neutral digits.
    #[error("cannot format number `{value}` for locale `{locale}`")]
    NumberFormat { locale: String, value: String },
}
