//! Tests for the ftlembed code generator, through the library entrypoint
//! and through the binary.

use std::fs;
use std::process::Command;

use tempfile::TempDir;

#[test]
fn test_generate_embeds_source_and_locale() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("locales/en-GB");
    fs::create_dir_all(&input_dir).unwrap();
    let input = input_dir.join("app.ftl");
    fs::write(&input, "cli-help = Print help message\n").unwrap();
    let output = dir.path().join("generated/app_ftl.rs");

    fluentkit_cli::generate(&input, &output, None).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("pub fn register() -> Result<(), fluentkit::Error>"));
    assert!(generated.contains("\"en-GB\""));
    assert!(generated.contains("cli-help = Print help message"));
}

#[test]
fn test_generate_honors_locale_override() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("strings.ftl");
    fs::write(&input, "hello = Hallo\n").unwrap();
    let output = dir.path().join("strings_ftl.rs");

    fluentkit_cli::generate(&input, &output, Some("de")).unwrap();

    let generated = fs::read_to_string(&output).unwrap();
    assert!(generated.contains("\"de\""));
}

#[test]
fn test_generate_rejects_malformed_resources() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("en");
    fs::create_dir_all(&input_dir).unwrap();
    let input = input_dir.join("bad.ftl");
    fs::write(&input, "= broken\n").unwrap();
    let output = dir.path().join("bad_ftl.rs");

    let error = fluentkit_cli::generate(&input, &output, None).unwrap_err();
    assert!(error.to_string().contains("parse error"));
    assert!(!output.exists());
}

#[test]
fn test_generate_rejects_invalid_locales() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("not a locale");
    fs::create_dir_all(&input_dir).unwrap();
    let input = input_dir.join("app.ftl");
    fs::write(&input, "hello = Hello\n").unwrap();

    let error = fluentkit_cli::generate(&input, &dir.path().join("out.rs"), None).unwrap_err();
    assert!(error.to_string().contains("invalid locale"));
}

#[test]
fn test_inspect_renders_canonical_form() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("app.ftl");
    fs::write(
        &input,
        "# translator note\ngreeting = Hello, { $name }!\n    .tooltip = Hi\n-brand = Acme\n",
    )
    .unwrap();

    let rendered = fluentkit_cli::inspect(&input).unwrap();

    assert!(rendered.contains("greeting = Hello, { $name }!"));
    assert!(rendered.contains("    .tooltip = Hi"));
    assert!(rendered.contains("-brand = Acme"));
    assert!(!rendered.contains("translator note"));
}

#[test]
fn test_inspect_rejects_malformed_resources() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("bad.ftl");
    fs::write(&input, "= broken\n").unwrap();

    let error = fluentkit_cli::inspect(&input).unwrap_err();
    assert!(error.to_string().contains("parse error"));
}

#[test]
fn test_binary_debug_prints_canonical_form() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("app.ftl");
    fs::write(&input, "bonjour = Bonjour\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ftlembed"))
        .arg("--debug")
        .arg(&input)
        .output()
        .expect("ftlembed should run");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "bonjour = Bonjour\n");
}

#[test]
fn test_binary_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input_dir = dir.path().join("fr");
    fs::create_dir_all(&input_dir).unwrap();
    let input = input_dir.join("app.ftl");
    fs::write(&input, "bonjour = Bonjour\n").unwrap();
    let output = dir.path().join("app_ftl.rs");

    let status = Command::new(env!("CARGO_BIN_EXE_ftlembed"))
        .arg(&input)
        .arg(&output)
        .status()
        .expect("ftlembed should run");
    assert!(status.success());
    assert!(fs::read_to_string(&output).unwrap().contains("\"fr\""));
}
