//! Conversion front door - parse a source document, render it in another format

pub mod batch;

pub use batch::{BatchConverter, ConversionEvent, ConversionOutcome, ConversionStrategy};

use crate::core::{config::ConvertConfig, element::Collection, symbol::Symbol};
use crate::error::{BetterMdError, Result};
use crate::render::Format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Html,
    Markdown,
}

impl SourceFormat {
    /// Detect from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "html" | "htm" => Some(SourceFormat::Html),
            "md" | "markdown" => Some(SourceFormat::Markdown),
            _ => None,
        }
    }
}

/// One file to convert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub from: SourceFormat,
    pub to: Format,
}

impl ConversionJob {
    /// Build a job, detecting the source format from the input extension
    /// unless `from` is given
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        from: Option<SourceFormat>,
        to: Format,
    ) -> Result<Self> {
        let input = input.into();
        let from = match from {
            Some(from) => from,
            None => SourceFormat::from_path(&input)
                .ok_or_else(|| BetterMdError::UnknownFormat(input.clone()))?,
        };
        Ok(Self {
            input,
            output: output.into(),
            from,
            to,
        })
    }
}

/// Output path for `input` inside `dir`, with the extension of `to`
pub fn output_path_in(dir: &Path, input: &Path, to: Format) -> PathBuf {
    let mut name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    name.push(".");
    name.push(to.extension());
    dir.join(name)
}

/// Parses and renders documents with a shared config and element collection
#[derive(Debug, Clone, Default)]
pub struct Converter {
    config: ConvertConfig,
    collection: Collection,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self {
            config,
            collection: Collection::default(),
        }
    }

    pub fn with_collection(mut self, collection: Collection) -> Self {
        self.collection = collection;
        self
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Parse into a symbol tree
    pub fn parse(&self, input: &str, from: SourceFormat) -> Result<Symbol> {
        match from {
            SourceFormat::Html => Symbol::from_html_with(input, &self.config, &self.collection),
            SourceFormat::Markdown => Symbol::from_md_with(input, &self.config, &self.collection),
        }
    }

    /// Parse `input` and render it as `to`
    pub fn convert_str(&self, input: &str, from: SourceFormat, to: Format) -> Result<String> {
        let symbol = self.parse(input, from)?;
        let out = symbol.render(to, &self.config)?;
        debug!("Converted {} bytes of {:?} into {} bytes of {:?}", input.len(), from, out.len(), to);
        Ok(out)
    }

    /// Run one job: read, convert, write (creating parent directories)
    pub fn convert_file(&self, job: &ConversionJob) -> Result<()> {
        let bytes = std::fs::read(&job.input)?;
        let input = String::from_utf8(bytes).map_err(|_| {
            BetterMdError::MalformedInput(format!("{} is not valid UTF-8", job.input.display()))
        })?;

        let mut output = self.convert_str(&input, job.from, job.to)?;
        output.push('\n');

        if let Some(parent) = job.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&job.output, output)?;

        debug!("Wrote {}", job.output.display());
        Ok(())
    }
}
