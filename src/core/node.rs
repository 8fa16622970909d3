//! Untyped document tree produced by the parsers

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Insertion-ordered attribute list
///
/// Setting a name that already exists replaces the value in place, so
/// rendering keeps the order in which attributes were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        let pos = self.entries.iter().position(|(k, _)| k == name)?;
        Some(self.entries.remove(pos).1)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attrs = Attributes::new();
        for (k, v) in iter {
            attrs.set(k, v);
        }
        attrs
    }
}

impl Serialize for Attributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// An element with a tag name, attributes and children
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ElementNode {
    pub name: String,
    pub attributes: Attributes,
    pub children: Vec<Node>,
}

/// Raw text content
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TextNode {
    pub content: String,
}

/// A node of the parsed tree
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Element(ElementNode),
    Text(TextNode),
}

impl ElementNode {
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.set(name, value);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }
}

impl Node {
    pub fn element(name: impl Into<String>) -> ElementNode {
        ElementNode {
            name: name.into(),
            attributes: Attributes::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Node {
        Node::Text(TextNode {
            content: content.into(),
        })
    }

    /// Tag name, or "text" for text nodes
    pub fn name(&self) -> &str {
        match self {
            Node::Element(e) => &e.name,
            Node::Text(_) => "text",
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element(e) => &e.children,
            Node::Text(_) => &[],
        }
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        }
    }
}

impl From<ElementNode> for Node {
    fn from(e: ElementNode) -> Self {
        Node::Element(e)
    }
}
