//! Test utility functions for bettermd

use bettermd::{ConvertConfig, Converter, Format, SourceFormat};
use std::path::{Path, PathBuf};

/// Convert HTML with the default config
pub fn html_to(input: &str, to: Format) -> String {
    convert_with(&ConvertConfig::default(), input, SourceFormat::Html, to)
}

/// Convert Markdown with the default config
pub fn md_to(input: &str, to: Format) -> String {
    convert_with(&ConvertConfig::default(), input, SourceFormat::Markdown, to)
}

pub fn convert_with(config: &ConvertConfig, input: &str, from: SourceFormat, to: Format) -> String {
    Converter::new(config.clone())
        .convert_str(input, from, to)
        .unwrap_or_else(|e| panic!("conversion from {:?} to {:?} failed: {}", from, to, e))
}

/// Write a file under `dir` and return its path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}

/// Assert that rendered output contains every fragment, in order
pub fn assert_in_order(output: &str, fragments: &[&str]) {
    let mut from = 0;
    for fragment in fragments {
        match output[from..].find(fragment) {
            Some(pos) => from += pos + fragment.len(),
            None => panic!("expected {:?} after byte {} in:\n{}", fragment, from, output),
        }
    }
}
