//! CLI command definitions

use crate::convert::{ConversionStrategy, SourceFormat};
use crate::render::Format;
use clap::Args;
use std::path::PathBuf;

/// Convert one or more documents
#[derive(Debug, Args, Clone)]
pub struct ConvertCommand {
    /// Input files
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Source format, detected from the extension when omitted
    #[arg(short, long, value_enum)]
    pub from: Option<FromArg>,

    /// Target format
    #[arg(short, long, value_enum)]
    pub to: ToArg,

    /// Output file for one input, output directory for several
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How many files to convert at once
    #[arg(long, value_enum, default_value_t = StrategyArg::Parallel)]
    pub strategy: StrategyArg,
}

/// Print the parsed node tree of a document
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Input file
    pub input: PathBuf,

    /// Source format, detected from the extension when omitted
    #[arg(short, long, value_enum)]
    pub from: Option<FromArg>,
}

/// Validate a conversion config
#[derive(Debug, Args, Clone)]
pub struct CheckConfigCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Source format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum FromArg {
    Html,
    #[clap(name = "md", alias = "markdown")]
    Markdown,
}

impl From<FromArg> for SourceFormat {
    fn from(arg: FromArg) -> Self {
        match arg {
            FromArg::Html => SourceFormat::Html,
            FromArg::Markdown => SourceFormat::Markdown,
        }
    }
}

/// Target format argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ToArg {
    Html,
    #[clap(name = "md", alias = "markdown")]
    Markdown,
    Rst,
}

impl From<ToArg> for Format {
    fn from(arg: ToArg) -> Self {
        match arg {
            ToArg::Html => Format::Html,
            ToArg::Markdown => Format::Markdown,
            ToArg::Rst => Format::Rst,
        }
    }
}

/// Batch strategy argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum StrategyArg {
    Sequential,
    Parallel,
    #[clap(name = "parallel-limited")]
    ParallelLimited,
}

impl From<StrategyArg> for ConversionStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Sequential => ConversionStrategy::Sequential,
            StrategyArg::Parallel => ConversionStrategy::Parallel,
            StrategyArg::ParallelLimited => ConversionStrategy::LimitedParallel(4),
        }
    }
}
