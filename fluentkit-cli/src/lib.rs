//! Code generation for embedding `.ftl` resources.
//!
//! `ftlembed` turns a Fluent resource into a Rust source file exposing a
//! `register()` function that feeds the resource to fluentkit's static
//! loader. Applications include the generated file and call `register()`
//! during startup; after that, [`fluentkit::format_static_message`]
//! resolves the embedded messages.
//!
//! The input is parsed strictly at generation time, so malformed
//! resources fail the build instead of turning into junk at runtime.

use std::fs;
use std::path::Path;

use fluentkit::{Entry, Error};
use unic_langid::LanguageIdentifier;

/// Generates the embedding source for `input`, writing it to `output`.
///
/// The locale is taken from the input's parent directory stem
/// (`locales/en-GB/app.ftl` registers under `en-GB`) unless `locale`
/// overrides it.
pub fn generate(input: &Path, output: &Path, locale: Option<&str>) -> Result<(), Error> {
    let locale = canonical_locale(input, locale)?;
    let source = fs::read_to_string(input)?;
    fluentkit::parse_resource_strict(&source)?;

    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(output, render(&locale, input, &source))?;
    Ok(())
}

/// Renders the canonical `id = pattern` form of every message and term
/// in `input`, for inspecting a resource before embedding it. The input
/// is parsed strictly, like [`generate`]; comments are not part of the
/// canonical form and are omitted.
pub fn inspect(input: &Path) -> Result<String, Error> {
    let source = fs::read_to_string(input)?;
    let entries = fluentkit::parse_resource_strict(&source)?;
    let mut rendered = String::new();
    for entry in &entries {
        match entry {
            Entry::Message(message) => {
                rendered.push_str(&message.to_string());
                rendered.push('\n');
            }
            Entry::Term(term) => {
                rendered.push_str(&term.to_string());
                rendered.push('\n');
            }
            _ => {}
        }
    }
    Ok(rendered)
}

fn canonical_locale(input: &Path, locale: Option<&str>) -> Result<String, Error> {
    let name = match locale {
        Some(name) => name.to_string(),
        None => input
            .parent()
            .and_then(Path::file_stem)
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .ok_or_else(|| Error::Locale(input.display().to_string()))?
            .to_string(),
    };
    let parsed: LanguageIdentifier = name.parse().map_err(|_| Error::Locale(name.clone()))?;
    Ok(parsed.to_string())
}

fn render(locale: &str, input: &Path, source: &str) -> String {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let guard = raw_string_guard(source);
    format!(
        "// @generated by ftlembed from {file_name}. Do not edit.\n\
         \n\
         /// Registers the embedded `{locale}` resource with the\n\
         /// process-wide fluentkit loader. Call once during startup.\n\
         pub fn register() -> Result<(), fluentkit::Error> {{\n\
         {indent}let locale = \"{locale}\"\n\
         {indent}    .parse()\n\
         {indent}    .map_err(|_| fluentkit::Error::Locale(\"{locale}\".to_string()))?;\n\
         {indent}fluentkit::add_static_resource(locale, SOURCE)\n\
         }}\n\
         \n\
         static SOURCE: &str = r{guard}\"{source}\"{guard};\n",
        indent = "    ",
    )
}

/// Picks enough `#`s that the raw string delimiter cannot occur in the
/// embedded source.
fn raw_string_guard(source: &str) -> String {
    let mut hashes = 1;
    loop {
        let guard = "#".repeat(hashes);
        if !source.contains(&format!("\"{}", guard)) {
            return guard;
        }
        hashes += 1;
    }
}
