//! HTML parser - a character-driven tokenizer/tree builder

use crate::core::node::{Attributes, ElementNode, Node};
use crate::error::Result;
use crate::parse::Parser;
use tracing::debug;

/// Elements that never have children or a closing tag
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "meta", "link"];

/// Tokenizer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    TagStart,
    TagName,
    BeforeAttributeName,
    AttributeName,
    AfterAttributeName,
    BeforeAttributeValue,
    AttributeValueDoubleQuoted,
    AttributeValueSingleQuoted,
    AttributeValueUnquoted,
    AfterAttributeValueQuoted,
    SelfClosingTag,
    ClosingTag,
    CommentOrDoctype,
}

/// Parses HTML into a list of root nodes
#[derive(Debug)]
pub struct HtmlParser {
    state: State,
    buffer: String,
    attr_name: String,
    current_tag: Option<ElementNode>,
    /// Open elements, innermost last
    tag_stack: Vec<ElementNode>,
    dom: Vec<Node>,
}

impl Default for HtmlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlParser {
    pub fn new() -> Self {
        Self {
            state: State::Text,
            buffer: String::new(),
            attr_name: String::new(),
            current_tag: None,
            tag_stack: Vec::new(),
            dom: Vec::new(),
        }
    }

    /// Reset all parsing state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn start_tag(&mut self) {
        let name = std::mem::take(&mut self.buffer).to_ascii_lowercase();
        self.current_tag = Some(ElementNode {
            name,
            attributes: Attributes::new(),
            children: Vec::new(),
        });
    }

    fn set_attribute(&mut self, value: &str) {
        if let Some(tag) = self.current_tag.as_mut() {
            let name = self.attr_name.to_ascii_lowercase();
            let value = html_escape::decode_html_entities(value).into_owned();
            tag.attributes.set(name, value);
        }
    }

    fn append(&mut self, node: Node) {
        match self.tag_stack.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.dom.push(node),
        }
    }

    fn in_pre(&self) -> bool {
        self.tag_stack.iter().any(|t| t.name == "pre")
    }

    fn handle_tag_open(&mut self) {
        let Some(tag) = self.current_tag.take() else {
            return;
        };
        if VOID_ELEMENTS.contains(&tag.name.as_str()) {
            self.append(Node::Element(tag));
        } else {
            self.tag_stack.push(tag);
        }
    }

    fn handle_tag_self_closing(&mut self) {
        if let Some(tag) = self.current_tag.take() {
            self.append(Node::Element(tag));
        }
    }

    fn handle_tag_close(&mut self, name: &str) {
        let name = name.trim().to_ascii_lowercase();
        let Some(pos) = self.tag_stack.iter().rposition(|t| t.name == name) else {
            debug!("Ignoring stray closing tag </{}>", name);
            return;
        };
        // Close everything opened after the matching tag as well
        while self.tag_stack.len() > pos {
            self.close_top();
        }
    }

    fn close_top(&mut self) {
        if let Some(mut tag) = self.tag_stack.pop() {
            if tag.name != "pre" && !self.in_pre() {
                trim_edges(&mut tag.children);
            }
            self.append(Node::Element(tag));
        }
    }

    fn handle_text(&mut self, raw: &str) {
        let decoded = html_escape::decode_html_entities(raw);
        let content = if self.in_pre() {
            decoded.into_owned()
        } else {
            collapse_whitespace(&decoded)
        };
        self.append(Node::text(content));
    }

    fn run(&mut self, html: &str) -> Vec<Node> {
        self.reset();

        let chars: Vec<char> = html.chars().collect();
        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];

            match self.state {
                State::Text => {
                    if c == '<' {
                        let text = std::mem::take(&mut self.buffer);
                        if !text.trim().is_empty() {
                            self.handle_text(&text);
                        }
                        self.state = State::TagStart;
                    } else {
                        self.buffer.push(c);
                    }
                }

                State::TagStart => {
                    if c == '/' {
                        self.state = State::ClosingTag;
                    } else if c == '!' {
                        self.state = State::CommentOrDoctype;
                    } else {
                        self.buffer = c.to_string();
                        self.state = State::TagName;
                    }
                }

                State::TagName => {
                    if c.is_whitespace() {
                        self.start_tag();
                        self.state = State::BeforeAttributeName;
                    } else if c == '>' {
                        self.start_tag();
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else if c == '/' {
                        self.start_tag();
                        self.state = State::SelfClosingTag;
                    } else {
                        self.buffer.push(c);
                    }
                }

                State::BeforeAttributeName => {
                    if c.is_whitespace() {
                    } else if c == '>' {
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else if c == '/' {
                        self.state = State::SelfClosingTag;
                    } else {
                        self.attr_name = c.to_string();
                        self.state = State::AttributeName;
                    }
                }

                State::AttributeName => {
                    if c.is_whitespace() {
                        self.set_attribute("");
                        self.state = State::AfterAttributeName;
                    } else if c == '=' {
                        self.state = State::BeforeAttributeValue;
                    } else if c == '>' {
                        self.set_attribute("");
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else if c == '/' {
                        self.set_attribute("");
                        self.state = State::SelfClosingTag;
                    } else {
                        self.attr_name.push(c);
                    }
                }

                State::AfterAttributeName => {
                    if c.is_whitespace() {
                    } else if c == '=' {
                        self.state = State::BeforeAttributeValue;
                    } else if c == '>' {
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else if c == '/' {
                        self.state = State::SelfClosingTag;
                    } else {
                        self.attr_name = c.to_string();
                        self.state = State::AttributeName;
                    }
                }

                State::BeforeAttributeValue => {
                    if c.is_whitespace() {
                    } else if c == '"' {
                        self.buffer.clear();
                        self.state = State::AttributeValueDoubleQuoted;
                    } else if c == '\'' {
                        self.buffer.clear();
                        self.state = State::AttributeValueSingleQuoted;
                    } else if c == '>' {
                        self.set_attribute("");
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else {
                        self.buffer = c.to_string();
                        self.state = State::AttributeValueUnquoted;
                    }
                }

                State::AttributeValueDoubleQuoted | State::AttributeValueSingleQuoted => {
                    let quote = if self.state == State::AttributeValueDoubleQuoted { '"' } else { '\'' };
                    if c == quote {
                        let value = std::mem::take(&mut self.buffer);
                        self.set_attribute(&value);
                        self.state = State::AfterAttributeValueQuoted;
                    } else {
                        self.buffer.push(c);
                    }
                }

                State::AttributeValueUnquoted => {
                    if c.is_whitespace() || c == '>' || c == '/' {
                        let value = std::mem::take(&mut self.buffer);
                        self.set_attribute(&value);
                        self.state = match c {
                            '>' => {
                                self.handle_tag_open();
                                State::Text
                            }
                            '/' => State::SelfClosingTag,
                            _ => State::BeforeAttributeName,
                        };
                    } else {
                        self.buffer.push(c);
                    }
                }

                State::AfterAttributeValueQuoted => {
                    if c.is_whitespace() {
                        self.state = State::BeforeAttributeName;
                    } else if c == '/' {
                        self.state = State::SelfClosingTag;
                    } else if c == '>' {
                        self.handle_tag_open();
                        self.state = State::Text;
                    } else {
                        // Reconsume as the start of the next attribute
                        self.state = State::BeforeAttributeName;
                        continue;
                    }
                }

                State::SelfClosingTag => {
                    if c == '>' {
                        self.handle_tag_self_closing();
                        self.state = State::Text;
                    }
                }

                State::ClosingTag => {
                    if c == '>' {
                        let name = std::mem::take(&mut self.buffer);
                        self.handle_tag_close(&name);
                        self.state = State::Text;
                    } else {
                        self.buffer.push(c);
                    }
                }

                State::CommentOrDoctype => {
                    let rest = &chars[i..];
                    let skip = if rest.starts_with(&['-', '-']) {
                        find_seq(rest, &['-', '-', '>']).map(|end| end + 3)
                    } else {
                        rest.iter().position(|&ch| ch == '>').map(|end| end + 1)
                    };
                    i += skip.unwrap_or(rest.len());
                    self.buffer.clear();
                    self.state = State::Text;
                    continue;
                }
            }

            i += 1;
        }

        if self.state == State::Text {
            let text = std::mem::take(&mut self.buffer);
            if !text.trim().is_empty() {
                self.handle_text(&text);
            }
        }

        // Close anything left open
        while !self.tag_stack.is_empty() {
            self.close_top();
        }

        trim_edges(&mut self.dom);
        std::mem::take(&mut self.dom)
    }
}

impl Parser for HtmlParser {
    fn parse(&mut self, input: &str) -> Result<Vec<Node>> {
        Ok(self.run(input))
    }
}

fn find_seq(haystack: &[char], needle: &[char]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}

/// Trim leading whitespace of the first text child and trailing of the last
fn trim_edges(children: &mut Vec<Node>) {
    if let Some(Node::Text(t)) = children.first_mut() {
        t.content = t.content.trim_start().to_string();
    }
    if let Some(Node::Text(t)) = children.last_mut() {
        t.content = t.content.trim_end().to_string();
    }
    children.retain(|c| !matches!(c, Node::Text(t) if t.content.is_empty()));
}
