//! Multi-locale resource storage and the public formatting entrypoint.
//!
//! A [`FluentLoader`] owns one [`FluentBundle`] per locale and resolves
//! messages through a caller-supplied locale fallback chain. The locale a
//! message was found under travels with it, so number formatting and
//! plural selection use the source locale rather than the caller's first
//! preference.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use log::{debug, warn};
use unic_langid::LanguageIdentifier;
use walkdir::WalkDir;

use crate::ast::{Entry, Message, Term};
use crate::bundle::FluentBundle;
use crate::error::Error;
use crate::parser;
use crate::resolver;
use crate::types::Arguments;

/// Mapping of canonical locale names to the bundle for that locale.
#[derive(Debug, Clone, Default)]
pub struct FluentLoader {
    bundles: HashMap<String, FluentBundle>,
}

impl FluentLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recursively ingests every `*.ftl` file below `root`. The locale is
    /// the file's parent directory stem (`root/en-GB/app.ftl` feeds the
    /// `en-GB` bundle).
    pub fn add_directory<P: AsRef<Path>>(&mut self, root: P) -> Result<(), Error> {
        self.scan_directory(root.as_ref(), None)
    }

    /// As [`add_directory`](Self::add_directory), but only files whose
    /// stem is in `resources` are ingested.
    pub fn add_directory_filtered<P: AsRef<Path>>(
        &mut self,
        root: P,
        resources: &HashSet<String>,
    ) -> Result<(), Error> {
        self.scan_directory(root.as_ref(), Some(resources))
    }

    fn scan_directory(
        &mut self,
        root: &Path,
        resources: Option<&HashSet<String>>,
    ) -> Result<(), Error> {
        for entry in WalkDir::new(root) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("ftl") {
                continue;
            }
            if let Some(resources) = resources {
                let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
                if !resources.contains(stem) {
                    continue;
                }
            }
            let locale_name = path
                .parent()
                .and_then(Path::file_stem)
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::Locale(path.display().to_string()))?;
            let locale: LanguageIdentifier = locale_name
                .parse()
                .map_err(|_| Error::Locale(locale_name.to_string()))?;
            let source = fs::read_to_string(path)?;
            self.add_resource(locale, &source)?;
        }
        Ok(())
    }

    /// Parses `source` leniently and ingests its messages and terms into
    /// the bundle for `locale`, creating it on demand. Ingesting another
    /// resource for the same locale merges; colliding ids overwrite.
    pub fn add_resource(&mut self, locale: LanguageIdentifier, source: &str) -> Result<(), Error> {
        let entries = parser::parse_resource(source)?;
        self.add_entries(locale, entries);
        Ok(())
    }

    /// Ingests already-parsed entries. Comments are dropped here; junk is
    /// dropped with a diagnostic.
    pub fn add_entries(&mut self, locale: LanguageIdentifier, entries: Vec<Entry>) {
        let bundle = self.bundles.entry(locale.to_string()).or_default();
        for entry in entries {
            match entry {
                Entry::Message(message) => bundle.add_message(message),
                Entry::Term(term) => bundle.add_term(term),
                Entry::Junk(junk) => {
                    debug!(
                        "dropping junk for locale {}: {:?}",
                        locale,
                        junk.content.trim_end_matches('\n')
                    );
                }
                Entry::Comment(_) | Entry::GroupComment(_) | Entry::ResourceComment(_) => {}
            }
        }
    }

    /// Registers a single message from a raw pattern. Fails when the
    /// pattern does not parse.
    pub fn add_message(
        &mut self,
        locale: LanguageIdentifier,
        id: &str,
        pattern_source: &str,
    ) -> Result<(), Error> {
        let pattern = parser::parse_pattern(pattern_source)?;
        self.bundles
            .entry(locale.to_string())
            .or_default()
            .add_message(Message {
                id: id.to_string(),
                comment: None,
                pattern,
                attributes: Vec::new(),
            });
        Ok(())
    }

    /// Looks `id` up through the fallback chain, returning the message
    /// together with the locale that defined it.
    fn message<'l>(
        &'l self,
        fallback: &'l [LanguageIdentifier],
        id: &str,
    ) -> Option<(&'l Message, &'l LanguageIdentifier)> {
        fallback.iter().find_map(|locale| {
            let message = self.bundles.get(&locale.to_string())?.message(id)?;
            Some((message, locale))
        })
    }

    fn term<'l>(&'l self, fallback: &[LanguageIdentifier], id: &str) -> Option<&'l Term> {
        fallback
            .iter()
            .find_map(|locale| self.bundles.get(&locale.to_string())?.term(id))
    }

    /// Formats the message addressed by `id` (either `name` or
    /// `name.attr`) using the first locale in `fallback` that defines it.
    /// Returns `None` when no locale does, when the requested attribute
    /// does not exist, or when an attribute-less message has no value
    /// pattern.
    ///
    /// Reference cycles between messages or terms are not detected;
    /// a cyclic resource recurses until the stack runs out.
    pub fn format_message(
        &self,
        fallback: &[LanguageIdentifier],
        id: &str,
        args: &Arguments,
    ) -> Option<String> {
        let (base, attribute) = match parser::parse_message_reference(id) {
            Ok(reference) => reference,
            Err(error) => {
                warn!("invalid message reference `{}`: {}", id, error);
                return None;
            }
        };
        let (message, locale) = self.message(fallback, &base)?;
        let pattern = match &attribute {
            Some(attribute) => &message.attribute(attribute)?.pattern,
            None => {
                if message.pattern.is_empty() {
                    return None;
                }
                &message.pattern
            }
        };
        let messages = |id: &str| self.message(fallback, id).map(|(message, _)| message);
        let terms = |id: &str| self.term(fallback, id);
        Some(resolver::format_pattern(
            locale, pattern, args, &messages, &terms,
        ))
    }
}
