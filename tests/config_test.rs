//! Integration tests for Settings loading
//!
//! These tests run without a global config, so an explicit file layers
//! directly over the compiled defaults.

use std::fs;

use tempfile::TempDir;

use md2doc::application::{ApplicationError, Converter};
use md2doc::config::Settings;
use md2doc::domain::Paragraph;
use md2doc::infrastructure::MemoryDocument;

#[test]
fn given_config_file_when_loading_then_overrides_specified_fields_only() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("md2doc.toml");
    fs::write(
        &path,
        r#"
[bold]
marker = "_"

[list]
indent_width = 4
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.bold.marker, '_');
    assert_eq!(settings.list.indent_width, 4);
    assert_eq!(settings.heading.marker, '#');
    assert!(settings.heading.strip_overflow);
}

#[test]
fn given_missing_config_file_when_loading_then_config_error() {
    let temp = TempDir::new().unwrap();

    let result = Settings::load(Some(&temp.path().join("nope.toml")));

    assert!(matches!(result, Err(ApplicationError::Config { .. })));
}

#[test]
fn given_invalid_toml_when_loading_then_config_error_names_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[heading\nmarker = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();

    assert!(err.to_string().contains("broken.toml"));
}

#[test]
fn given_zero_indent_width_when_loading_then_rejected() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("md2doc.toml");
    fs::write(&path, "[list]\nindent_width = 0\n").unwrap();

    assert!(Settings::load(Some(&path)).is_err());
}

#[test]
fn given_custom_markers_when_converting_then_converter_uses_them() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("md2doc.toml");
    fs::write(
        &path,
        "[heading]\nmarker = \"=\"\n\n[bold]\nmarker = \"+\"\n",
    )
    .unwrap();
    let settings = Settings::load(Some(&path)).unwrap();
    let converter = Converter::from_settings(&settings).unwrap();
    let mut doc = MemoryDocument::from_text("==Title ++x++\n#not a heading");

    converter.convert(&mut doc);

    assert_eq!(doc.paragraphs()[0].text().unwrap(), "Title x");
    assert_eq!(doc.paragraphs()[1].text().unwrap(), "#not a heading");
}

#[test]
fn given_settings_when_serializing_then_round_trips_through_toml() {
    let settings = Settings::default();
    let rendered = settings.to_toml().unwrap();

    assert!(rendered.contains("[heading]"));
    assert!(rendered.contains("marker = \"#\""));
}
