//! The process-wide static loader.
//!
//! Resources embedded at build time (via `ftlembed`) register themselves
//! here during application startup; later formatting calls are read-only.
//! The loader is created lazily on first use and lives for the rest of
//! the process.

use std::sync::RwLock;

use lazy_static::lazy_static;
use unic_langid::LanguageIdentifier;

use crate::error::Error;
use crate::loader::FluentLoader;
use crate::types::Arguments;

lazy_static! {
    static ref STATIC_LOADER: RwLock<FluentLoader> = RwLock::new(FluentLoader::new());
}

/// Adds a resource to the static loader. Generally called from code
/// generated by `ftlembed` rather than by hand.
pub fn add_static_resource(locale: LanguageIdentifier, source: &str) -> Result<(), Error> {
    let mut loader = STATIC_LOADER
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    loader.add_resource(locale, source)
}

/// As [`FluentLoader::format_message`], against the static loader.
pub fn format_static_message(
    fallback: &[LanguageIdentifier],
    id: &str,
    args: &Arguments,
) -> Option<String> {
    let loader = STATIC_LOADER
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    loader.format_message(fallback, id, args)
}
