//! Core domain models
//!
//! The untyped node tree the parsers produce, the typed symbol tree the
//! renderers consume, the element registry, and conversion configuration.

pub mod config;
pub mod element;
pub mod node;
pub mod symbol;

pub use config::ConvertConfig;
pub use element::{Collection, ElementKind};
pub use node::{Attributes, ElementNode, Node, TextNode};
pub use symbol::Symbol;
