//! bettermd - convert between HTML, Markdown and reStructuredText through a typed element tree

pub mod cli;
pub mod convert;
pub mod core;
pub mod error;
pub mod parse;
pub mod render;

// Re-export commonly used types
pub use convert::{BatchConverter, ConversionJob, ConversionOutcome, ConversionStrategy, Converter, SourceFormat};
pub use core::{Collection, ConvertConfig, ElementKind, Node, Symbol};
pub use error::{BetterMdError, Result};
pub use render::{Format, Renderer};
