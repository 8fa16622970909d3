//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{CheckConfigCommand, ConvertCommand, InspectCommand};
use std::ffi::OsString;
use std::path::PathBuf;

/// Convert between HTML, Markdown and reStructuredText
#[derive(Debug, Parser, Clone)]
#[command(name = "bettermd")]
#[command(version)]
#[command(about = "Convert between HTML, Markdown and reStructuredText", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a YAML conversion config
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Convert one or more documents
    Convert(ConvertCommand),

    /// Print the parsed node tree of a document as JSON
    Inspect(InspectCommand),

    /// Validate a conversion config
    CheckConfig(CheckConfigCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
