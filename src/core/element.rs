//! Element kinds and the tag-name collection

use crate::error::{BetterMdError, Result};

/// The typed kind of a symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    A,
    Blockquote,
    Body,
    Br,
    Code,
    Div,
    Em,
    /// Heading, level 1..=6
    H(u8),
    Head,
    Hr,
    Html,
    Img,
    Input,
    Li,
    Ol,
    P,
    Pre,
    Span,
    Strong,
    Table,
    TBody,
    Td,
    Th,
    THead,
    Title,
    Tr,
    Ul,
    /// Raw text content
    Text(String),
    /// Unknown tag kept in lenient mode
    Generic(String),
    /// Several top-level nodes with no wrapping tag; renders its children only
    Fragment,
}

const INPUT_PROPS: &[&str] = &[
    "type",
    "name",
    "value",
    "placeholder",
    "required",
    "disabled",
    "readonly",
    "min",
    "max",
    "pattern",
    "autocomplete",
    "autofocus",
    "checked",
    "multiple",
    "step",
];

impl ElementKind {
    /// Every kind the default collection knows about
    pub fn standard() -> Vec<ElementKind> {
        let mut kinds = vec![
            ElementKind::A,
            ElementKind::Blockquote,
            ElementKind::Body,
            ElementKind::Br,
            ElementKind::Code,
            ElementKind::Div,
            ElementKind::Em,
        ];
        kinds.extend((1..=6).map(ElementKind::H));
        kinds.extend([
            ElementKind::Head,
            ElementKind::Hr,
            ElementKind::Html,
            ElementKind::Img,
            ElementKind::Input,
            ElementKind::Li,
            ElementKind::Ol,
            ElementKind::P,
            ElementKind::Pre,
            ElementKind::Span,
            ElementKind::Strong,
            ElementKind::Table,
            ElementKind::TBody,
            ElementKind::Td,
            ElementKind::Th,
            ElementKind::THead,
            ElementKind::Title,
            ElementKind::Tr,
            ElementKind::Ul,
        ]);
        kinds
    }

    /// HTML tag name
    pub fn tag(&self) -> &str {
        match self {
            ElementKind::A => "a",
            ElementKind::Blockquote => "blockquote",
            ElementKind::Body => "body",
            ElementKind::Br => "br",
            ElementKind::Code => "code",
            ElementKind::Div => "div",
            ElementKind::Em => "em",
            ElementKind::H(1) => "h1",
            ElementKind::H(2) => "h2",
            ElementKind::H(3) => "h3",
            ElementKind::H(4) => "h4",
            ElementKind::H(5) => "h5",
            ElementKind::H(_) => "h6",
            ElementKind::Head => "head",
            ElementKind::Hr => "hr",
            ElementKind::Html => "html",
            ElementKind::Img => "img",
            ElementKind::Input => "input",
            ElementKind::Li => "li",
            ElementKind::Ol => "ol",
            ElementKind::P => "p",
            ElementKind::Pre => "pre",
            ElementKind::Span => "span",
            ElementKind::Strong => "strong",
            ElementKind::Table => "table",
            ElementKind::TBody => "tbody",
            ElementKind::Td => "td",
            ElementKind::Th => "th",
            ElementKind::THead => "thead",
            ElementKind::Title => "title",
            ElementKind::Tr => "tr",
            ElementKind::Ul => "ul",
            ElementKind::Text(_) => "text",
            ElementKind::Generic(name) => name,
            ElementKind::Fragment => "",
        }
    }

    /// Whether a tag name selects this kind
    pub fn matches(&self, name: &str) -> bool {
        match self {
            ElementKind::Code => name.eq_ignore_ascii_case("code"),
            ElementKind::Strong => name == "strong" || name == "b",
            ElementKind::Em => name == "em" || name == "i",
            _ => self.tag() == name,
        }
    }

    /// Elements with no closing tag
    pub fn is_void(&self) -> bool {
        matches!(
            self,
            ElementKind::Br | ElementKind::Hr | ElementKind::Img | ElementKind::Input
        )
    }

    /// Block-level elements are separated by blank lines in text formats
    pub fn is_block(&self) -> bool {
        matches!(
            self,
            ElementKind::Blockquote
                | ElementKind::Body
                | ElementKind::Div
                | ElementKind::H(_)
                | ElementKind::Head
                | ElementKind::Hr
                | ElementKind::Html
                | ElementKind::Ol
                | ElementKind::P
                | ElementKind::Pre
                | ElementKind::Table
                | ElementKind::Title
                | ElementKind::Ul
        )
    }

    /// Elements laid out inside a line of text
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            ElementKind::A
                | ElementKind::Br
                | ElementKind::Code
                | ElementKind::Em
                | ElementKind::Img
                | ElementKind::Input
                | ElementKind::Span
                | ElementKind::Strong
                | ElementKind::Text(_)
        )
    }

    pub fn is_list(&self) -> bool {
        matches!(self, ElementKind::Ul | ElementKind::Ol)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ElementKind::Text(_))
    }

    pub fn is_heading(&self) -> bool {
        matches!(self, ElementKind::H(_))
    }

    /// Properties this kind recognises on top of class/style
    pub fn prop_list(&self) -> &'static [&'static str] {
        match self {
            ElementKind::A => &["href"],
            ElementKind::Img => &["src", "alt"],
            ElementKind::Input => INPUT_PROPS,
            ElementKind::Code => &["language"],
            _ => &[],
        }
    }
}

/// Ordered registry mapping tag names to element kinds
#[derive(Debug, Clone)]
pub struct Collection {
    kinds: Vec<ElementKind>,
}

impl Default for Collection {
    fn default() -> Self {
        Self {
            kinds: ElementKind::standard(),
        }
    }
}

impl Collection {
    /// Empty collection
    pub fn new() -> Self {
        Self { kinds: Vec::new() }
    }

    pub fn add(&mut self, kind: ElementKind) {
        self.kinds.push(kind);
    }

    pub fn remove(&mut self, kind: &ElementKind) -> bool {
        match self.kinds.iter().position(|k| k == kind) {
            Some(pos) => {
                self.kinds.remove(pos);
                true
            }
            None => false,
        }
    }

    /// First kind matching the tag name
    pub fn find(&self, name: &str) -> Option<ElementKind> {
        self.kinds.iter().find(|k| k.matches(name)).cloned()
    }

    pub fn find_or_err(&self, name: &str) -> Result<ElementKind> {
        self.find(name)
            .ok_or_else(|| BetterMdError::UnknownElement(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}
