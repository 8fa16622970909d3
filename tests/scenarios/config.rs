//! Test: YAML config changes how documents are converted

use crate::helpers::*;
use bettermd::{ConvertConfig, Converter, Format, SourceFormat};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_rendering() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        dir.path(),
        "config.yaml",
        r##"
html:
  indent: 2
rst:
  heading_chars: "#*=-^~"
"##,
    );

    let config = ConvertConfig::load(Some(path.as_path())).unwrap();
    assert_eq!(config.html.indent, 2);
    assert!(config.html.escape_text);

    let html = convert_with(&config, "<ul><li>x</li></ul>", SourceFormat::Html, Format::Html);
    assert_eq!(html, "<ul>\n  <li>x</li>\n</ul>");

    let rst = convert_with(&config, "# Hi\n\n## There", SourceFormat::Markdown, Format::Rst);
    assert_eq!(rst, "##\nHi\n##\n\nThere\n*****");
}

#[test]
fn test_strict_config_rejects_unknown_tags() {
    let config = ConvertConfig::from_yaml("strict: true").unwrap();
    let converter = Converter::new(config);

    assert!(converter
        .convert_str("<blink>x</blink>", SourceFormat::Html, Format::Markdown)
        .is_err());
    assert!(converter
        .convert_str("<b>x</b>", SourceFormat::Html, Format::Markdown)
        .is_ok());
}

#[test]
fn test_invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = write_file(dir.path(), "bad.yaml", "rst:\n  heading_chars: \"abc\"\n");

    let err = ConvertConfig::load(Some(path.as_path())).unwrap_err();
    assert!(err.to_string().contains("heading_chars"), "{}", err);
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    assert!(ConvertConfig::load(Some(dir.path().join("nope.yaml").as_path())).is_err());
}
