//! Conversion configuration from YAML

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use anyhow::Result;

const DEFAULT_HEADING_CHARS: &str = "=-~^\"'";

/// Top-level conversion configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ConvertConfig {
    /// Fail on tags missing from the collection instead of keeping them generic
    pub strict: bool,

    /// HTML output options
    pub html: HtmlOptions,

    /// reStructuredText output options
    pub rst: RstOptions,

    /// Markdown input options
    pub markdown: MarkdownOptions,
}

/// HTML output options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct HtmlOptions {
    /// Spaces per nesting level
    pub indent: usize,

    /// Escape `<`, `>` and `&` in text nodes
    pub escape_text: bool,
}

/// reStructuredText output options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RstOptions {
    /// Underline characters for heading levels 1 to 6
    pub heading_chars: String,
}

/// Markdown input options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MarkdownOptions {
    /// Parse emphasis, code spans and links inside text
    pub inline: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            strict: false,
            html: HtmlOptions::default(),
            rst: RstOptions::default(),
            markdown: MarkdownOptions::default(),
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            indent: 4,
            escape_text: true,
        }
    }
}

impl Default for RstOptions {
    fn default() -> Self {
        Self {
            heading_chars: DEFAULT_HEADING_CHARS.to_string(),
        }
    }
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self { inline: true }
    }
}

impl RstOptions {
    /// Underline character for a heading level (1-based, clamped to 6)
    pub fn heading_char(&self, level: u8) -> char {
        let idx = usize::from(level.clamp(1, 6)) - 1;
        self.heading_chars
            .chars()
            .nth(idx)
            .or_else(|| DEFAULT_HEADING_CHARS.chars().nth(idx))
            .unwrap_or('=')
    }
}

impl ConvertConfig {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document means "all defaults"
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ConvertConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let chars: Vec<char> = self.rst.heading_chars.chars().collect();
        if chars.len() != 6 {
            anyhow::bail!(
                "rst.heading_chars must have exactly 6 characters, got {}",
                chars.len()
            );
        }

        let mut seen = std::collections::HashSet::new();
        for c in &chars {
            if !c.is_ascii_punctuation() {
                anyhow::bail!("rst.heading_chars contains non-punctuation character '{}'", c);
            }
            if !seen.insert(c) {
                anyhow::bail!("rst.heading_chars contains duplicate character '{}'", c);
            }
        }

        if self.html.indent > 16 {
            anyhow::bail!("html.indent must be at most 16, got {}", self.html.indent);
        }

        Ok(())
    }

    /// Default config location: `<config dir>/bettermd/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("bettermd").join("config.yaml"))
    }

    /// Load from an explicit path, else the default path if it exists, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}
