//! Parsers turning source text into an untyped node tree

pub mod html;
pub mod inline;
pub mod markdown;

pub use html::HtmlParser;
pub use markdown::MarkdownParser;

use crate::core::node::Node;
use crate::error::Result;

/// Trait for source-format parsers - allows swapping HTML/Markdown front ends
pub trait Parser {
    /// Parse the input into a list of root nodes
    fn parse(&mut self, input: &str) -> Result<Vec<Node>>;
}
