//! Symbol domain model - the typed element tree

use crate::core::{
    config::ConvertConfig,
    element::{Collection, ElementKind},
    node::{Attributes, Node},
};
use crate::error::{BetterMdError, Result};
use crate::parse::{HtmlParser, MarkdownParser, Parser};
use crate::render::{self, Format};
use tracing::{debug, warn};

/// A typed element and its subtree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// What kind of element this is
    pub kind: ElementKind,

    /// Inline CSS declarations, in order
    pub styles: Vec<(String, String)>,

    /// CSS classes
    pub classes: Vec<String>,

    /// Element properties (href, type, language, ...)
    pub props: Attributes,

    /// Child symbols
    pub children: Vec<Symbol>,
}

impl Symbol {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            styles: Vec::new(),
            classes: Vec::new(),
            props: Attributes::new(),
            children: Vec::new(),
        }
    }

    /// A raw text symbol
    pub fn text(content: impl Into<String>) -> Self {
        Self::new(ElementKind::Text(content.into()))
    }

    pub fn with_child(mut self, child: Symbol) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Symbol>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.set(name, value);
        self
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.push((property.into(), value.into()));
        self
    }

    /// Text content when this is a text symbol
    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn add_child(&mut self, child: Symbol) {
        self.children.push(child);
    }

    pub fn remove_child(&mut self, index: usize) -> Result<Symbol> {
        self.check_index(index)?;
        Ok(self.children.remove(index))
    }

    /// Replace the child at `index`, returning the old one
    pub fn replace_child(&mut self, index: usize, new: Symbol) -> Result<Symbol> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.children[index], new))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.children.len() {
            return Err(BetterMdError::ChildIndex {
                index,
                len: self.children.len(),
            });
        }
        Ok(())
    }

    /// First child whose kind satisfies the predicate
    pub fn has_child<F>(&self, pred: F) -> Option<&Symbol>
    where
        F: Fn(&ElementKind) -> bool,
    {
        self.children.iter().find(|c| pred(&c.kind))
    }

    pub fn contains<F>(&self, pred: F) -> bool
    where
        F: Fn(&ElementKind) -> bool,
    {
        self.has_child(pred).is_some()
    }

    /// Property value, empty when absent
    pub fn get_prop(&self, name: &str) -> &str {
        self.props.get(name).unwrap_or("")
    }

    pub fn get_prop_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.props.get(name).unwrap_or(default)
    }

    pub fn set_prop(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.props.set(name, value);
    }

    /// Concatenated text of the whole subtree
    pub fn text_content(&self) -> String {
        match &self.kind {
            ElementKind::Text(t) => t.clone(),
            _ => self.children.iter().map(Symbol::text_content).collect(),
        }
    }

    /// Convert a parsed node into a symbol tree
    pub fn from_node(node: &Node, collection: &Collection, config: &ConvertConfig) -> Result<Self> {
        let element = match node {
            Node::Text(t) => return Ok(Symbol::text(t.content.clone())),
            Node::Element(e) => e,
        };

        let kind = match collection.find(&element.name) {
            Some(kind) => kind,
            None if config.strict => {
                return Err(BetterMdError::UnknownElement(element.name.clone()));
            }
            None => {
                warn!("Unknown element <{}>, keeping it as a generic container", element.name);
                ElementKind::Generic(element.name.clone())
            }
        };

        let mut symbol = Symbol::new(kind);
        for (name, value) in element.attributes.iter() {
            match name {
                "class" => symbol
                    .classes
                    .extend(value.split_whitespace().map(str::to_string)),
                "style" => symbol.styles.extend(parse_style(value)),
                _ => symbol.props.set(name, value),
            }
        }

        // <code class="language-x"> carries its language as a class
        if symbol.kind == ElementKind::Code && !symbol.props.contains("language") {
            if let Some(pos) = symbol
                .classes
                .iter()
                .position(|c| c.starts_with("language-"))
            {
                let class = symbol.classes.remove(pos);
                symbol.set_prop("language", &class["language-".len()..]);
            }
        }

        for child in &element.children {
            symbol.add_child(Symbol::from_node(child, collection, config)?);
        }

        Ok(symbol)
    }

    /// Convert a list of roots, wrapping several in a fragment
    pub fn from_nodes(nodes: &[Node], collection: &Collection, config: &ConvertConfig) -> Result<Self> {
        if let [single] = nodes {
            return Symbol::from_node(single, collection, config);
        }

        let mut fragment = Symbol::new(ElementKind::Fragment);
        for node in nodes {
            fragment.add_child(Symbol::from_node(node, collection, config)?);
        }
        Ok(fragment)
    }

    /// Parse HTML with the default config and collection
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with(html, &ConvertConfig::default(), &Collection::default())
    }

    pub fn from_html_with(html: &str, config: &ConvertConfig, collection: &Collection) -> Result<Self> {
        let nodes = HtmlParser::new().parse(html)?;
        debug!("Parsed {} HTML root node(s)", nodes.len());
        Self::from_nodes(&nodes, collection, config)
    }

    /// Parse Markdown with the default config and collection
    pub fn from_md(markdown: &str) -> Result<Self> {
        Self::from_md_with(markdown, &ConvertConfig::default(), &Collection::default())
    }

    pub fn from_md_with(markdown: &str, config: &ConvertConfig, collection: &Collection) -> Result<Self> {
        let nodes = MarkdownParser::with_config(config).parse(markdown)?;
        Self::from_nodes(&nodes, collection, config)
    }

    /// Render to the given format
    pub fn render(&self, format: Format, config: &ConvertConfig) -> Result<String> {
        render::render(self, format, config)
    }

    pub fn to_html(&self) -> Result<String> {
        self.render(Format::Html, &ConvertConfig::default())
    }

    pub fn to_md(&self) -> Result<String> {
        self.render(Format::Markdown, &ConvertConfig::default())
    }

    pub fn to_rst(&self) -> Result<String> {
        self.render(Format::Rst, &ConvertConfig::default())
    }
}

/// Split a `style` attribute into (property, value) pairs
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (k, v) = decl.split_once(':')?;
            let (k, v) = (k.trim(), v.trim());
            if k.is_empty() {
                None
            } else {
                Some((k.to_string(), v.to_string()))
            }
        })
        .collect()
}
