//! Markdown parser - line-oriented block parsing with an inline pass

use crate::core::{config::ConvertConfig, node::{ElementNode, Node}};
use crate::error::Result;
use crate::parse::{inline::parse_inline, Parser};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})(?: (.*))?$").expect("valid heading regex"));
static HR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---+$").expect("valid hr regex"));
static UL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)[-+*](?: (.*))?$").expect("valid ul regex"));
static OL_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([ \t]*)(\d+)\.(?: (.*))?$").expect("valid ol regex"));
static TABLE_ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|(?:[^|\n]+\|)+$").expect("valid row regex"));
static TABLE_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\|(?::?-+:?\|)+$").expect("valid separator regex"));
static TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^title: (.+)$").expect("valid title regex"));

static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\((https?://[^\s)]+)\)").expect("valid link regex")
});
static AUTO_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(https?://[^\s>]+)>").expect("valid autolink regex"));
static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[([^\]]+)\]\[([^\]]+)\]\s*\n?\[([^\]]+)\]:\s*(https?://\S+)")
        .expect("valid reference link regex")
});

/// A list item marker found on a line
struct ListItem<'a> {
    indent: usize,
    ordered: bool,
    content: &'a str,
}

fn list_item(raw: &str) -> Option<ListItem<'_>> {
    // Expand tabs so indentation compares consistently
    if let Some(caps) = UL_ITEM.captures(raw) {
        return Some(ListItem {
            indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
            ordered: false,
            content: caps.get(2).map_or("", |m| m.as_str()),
        });
    }
    OL_ITEM.captures(raw).map(|caps| ListItem {
        indent: indent_width(caps.get(1).map_or("", |m| m.as_str())),
        ordered: true,
        content: caps.get(3).map_or("", |m| m.as_str()),
    })
}

fn indent_width(ws: &str) -> usize {
    ws.chars().map(|c| if c == '\t' { 4 } else { 1 }).sum()
}

/// Split a table row on unescaped pipes, unescaping `\|` inside cells
fn split_cells(row: &str) -> Vec<String> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);

    let mut cells = Vec::new();
    let mut cell = String::new();
    let mut chars = inner.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'|') => {
                chars.next();
                cell.push('|');
            }
            '|' => cells.push(std::mem::take(&mut cell)),
            _ => cell.push(c),
        }
    }
    cells.push(cell);
    cells
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```")
}

/// Whether a trimmed line starts a block other than a paragraph
fn is_block_start(line: &str) -> bool {
    HEADING.is_match(line)
        || line.starts_with('>')
        || is_fence(line)
        || HR.is_match(line)
        || list_item(line).is_some()
        || TABLE_ROW.is_match(line)
        || TITLE.is_match(line)
}

/// Parses Markdown into an `html > [head, body]` tree
#[derive(Debug, Clone)]
pub struct MarkdownParser {
    inline: bool,
    /// Buffered paragraph lines: (trimmed text, ends with a hard break)
    buffer: Vec<(String, bool)>,
    dom: Vec<Node>,
    head: Vec<Node>,
}

impl Default for MarkdownParser {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownParser {
    pub fn new() -> Self {
        Self::with_config(&ConvertConfig::default())
    }

    pub fn with_config(config: &ConvertConfig) -> Self {
        Self {
            inline: config.markdown.inline,
            buffer: Vec::new(),
            dom: Vec::new(),
            head: Vec::new(),
        }
    }

    /// Reset the parser's internal state
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.dom.clear();
        self.head.clear();
    }

    /// Whether text contains an inline link, an autolink, or a reference link with its definition
    pub fn has_link(text: &str) -> bool {
        INLINE_LINK.is_match(text) || AUTO_LINK.is_match(text) || REFERENCE_LINK.is_match(text)
    }

    fn inline_nodes(&self, text: &str) -> Vec<Node> {
        if text.is_empty() {
            Vec::new()
        } else if self.inline {
            parse_inline(text)
        } else {
            vec![Node::text(text)]
        }
    }

    fn element_with_text(&self, name: &str, text: &str) -> ElementNode {
        let mut elm = Node::element(name);
        elm.children = self.inline_nodes(text);
        elm
    }

    /// Flush buffered text as a paragraph
    fn end_block(&mut self) {
        if self.buffer.is_empty() {
            return;
        }

        let lines = std::mem::take(&mut self.buffer);
        let mut para = Node::element("p");
        let mut segment = String::new();
        for (idx, (text, hard_break)) in lines.iter().enumerate() {
            if !segment.is_empty() {
                segment.push('\n');
            }
            segment.push_str(text);

            let last = idx + 1 == lines.len();
            if *hard_break && !last {
                para.children.extend(self.inline_nodes(&segment));
                para.children.push(Node::element("br").into());
                segment.clear();
            }
        }
        para.children.extend(self.inline_nodes(&segment));

        if !para.children.is_empty() {
            self.dom.push(para.into());
        }
    }

    fn handle_text(&mut self, raw: &str) {
        let trimmed = raw.trim();
        let hard_break = raw.ends_with("  ") || trimmed.ends_with('\\');
        let text = trimmed.strip_suffix('\\').unwrap_or(trimmed).trim_end();
        self.buffer.push((text.to_string(), hard_break));
    }

    fn handle_h(&mut self, line: &str) {
        let Some(caps) = HEADING.captures(line) else {
            return;
        };
        let level = caps.get(1).map_or(1, |m| m.as_str().len());
        let content = caps.get(2).map_or("", |m| m.as_str().trim());
        let mut h = self.element_with_text(&format!("h{}", level), content);
        if h.children.is_empty() {
            h.children.push(Node::text(""));
        }
        self.dom.push(h.into());
    }

    fn handle_hr(&mut self) {
        self.dom.push(Node::element("hr").into());
    }

    fn handle_title(&mut self, line: &str) {
        let Some(caps) = TITLE.captures(line) else {
            return;
        };
        let raw = caps.get(1).map_or("", |m| m.as_str().trim());
        let title = raw
            .strip_prefix('"')
            .and_then(|t| t.strip_suffix('"'))
            .unwrap_or(raw);
        let title = Node::element("title").with_child(Node::text(title));
        self.head = vec![title.into()];
    }

    /// Returns the number of lines consumed
    fn handle_blockquote(&mut self, lines: &[&str], start: usize) -> Result<usize> {
        let mut inner: Vec<String> = Vec::new();
        let mut idx = start;

        while idx < lines.len() {
            // Trailing spaces stay so quoted lines keep their hard breaks
            let raw = lines[idx].trim_start();
            let line = raw.trim_end();
            if let Some(rest) = raw.strip_prefix('>') {
                inner.push(rest.strip_prefix(' ').unwrap_or(rest).to_string());
            } else if line.is_empty() {
                // A blank line only continues the quote if a marked line follows
                let continues = lines
                    .get(idx + 1)
                    .is_some_and(|next| next.trim().starts_with('>'));
                if !continues {
                    break;
                }
                inner.push(String::new());
            } else if inner.last().is_some_and(|l| !l.trim().is_empty()) && !is_block_start(line) {
                // Lazy continuation of the previous quoted paragraph
                inner.push(raw.to_string());
            } else {
                break;
            }
            idx += 1;
        }

        let mut nested = MarkdownParser {
            inline: self.inline,
            buffer: Vec::new(),
            dom: Vec::new(),
            head: Vec::new(),
        };
        let inner_lines: Vec<&str> = inner.iter().map(String::as_str).collect();
        nested.parse_blocks(&inner_lines)?;

        let mut quote = Node::element("blockquote");
        quote.children = nested.dom;
        self.dom.push(quote.into());

        Ok(idx - start)
    }

    fn handle_code(&mut self, lines: &[&str], start: usize) -> usize {
        let opening = lines[start].trim();
        let info = opening.trim_start_matches('`');

        // ```code``` on a single line
        if let Some(body) = info.strip_suffix("```") {
            if !body.is_empty() {
                self.push_code("", body);
                return 1;
            }
        }

        let language = info.split_whitespace().next().unwrap_or("");
        let mut idx = start + 1;
        let mut body: Vec<&str> = Vec::new();
        while idx < lines.len() && lines[idx].trim() != "```" {
            body.push(lines[idx]);
            idx += 1;
        }

        if idx >= lines.len() {
            debug!("Unclosed code fence at line {}, reading to end of input", start + 1);
        }

        self.push_code(language, &body.join("\n"));
        // Fences plus body, clamped when unclosed
        (idx + 1).min(lines.len()) - start
    }

    fn push_code(&mut self, language: &str, content: &str) {
        let mut code = Node::element("code");
        if !language.is_empty() {
            code = code.with_attribute("language", language);
        }
        code = code.with_child(Node::text(content));
        self.dom.push(Node::element("pre").with_child(code.into()).into());
    }

    /// Parse a list starting at `start`; returns the list and lines consumed
    fn parse_list(&self, lines: &[&str], start: usize) -> (ElementNode, usize) {
        let (base_indent, ordered) = match list_item(lines[start]) {
            Some(item) => (item.indent, item.ordered),
            None => return (Node::element("ul"), 0),
        };

        let mut list = Node::element(if ordered { "ol" } else { "ul" });
        let mut current: Option<(Vec<String>, Vec<Node>)> = None;
        let mut idx = start;

        while idx < lines.len() {
            let raw = lines[idx];

            if raw.trim().is_empty() {
                // Blank lines inside a list are skipped when another item follows
                let next_item = lines[idx + 1..]
                    .iter()
                    .find(|l| !l.trim().is_empty())
                    .and_then(|l| list_item(l));
                match next_item {
                    Some(item) if item.indent >= base_indent => {
                        idx += 1;
                        continue;
                    }
                    _ => break,
                }
            }

            if let Some(item) = list_item(raw) {
                if item.indent < base_indent {
                    break;
                }
                if item.indent > base_indent {
                    let (nested, used) = self.parse_list(lines, idx);
                    current
                        .get_or_insert_with(|| (Vec::new(), Vec::new()))
                        .1
                        .push(nested.into());
                    idx += used.max(1);
                    continue;
                }
                if item.ordered != ordered {
                    break;
                }
                if let Some(done) = current.take() {
                    list.children.push(self.list_item_node(done).into());
                }
                current = Some((vec![item.content.trim().to_string()], Vec::new()));
            } else if is_block_start(raw.trim()) || current.is_none() {
                break;
            } else if let Some((text, nested)) = current.as_mut() {
                if !nested.is_empty() {
                    break;
                }
                text.push(raw.trim().to_string());
            }

            idx += 1;
        }

        if let Some(done) = current.take() {
            list.children.push(self.list_item_node(done).into());
        }

        (list, idx - start)
    }

    fn list_item_node(&self, (text, nested): (Vec<String>, Vec<Node>)) -> ElementNode {
        let content = text.join(" ");
        let mut li = self.element_with_text("li", content.trim());
        li.children.extend(nested);
        li
    }

    /// Returns the number of lines consumed; zero when the rows are not a table
    fn handle_table(&mut self, lines: &[&str], start: usize) -> usize {
        let has_separator = lines
            .get(start + 1)
            .is_some_and(|l| TABLE_SEPARATOR.is_match(l.trim()));
        if !has_separator {
            return 0;
        }

        let mut thead = Node::element("thead");
        let mut tbody = Node::element("tbody");
        let mut in_body = false;
        let mut idx = start;

        while idx < lines.len() {
            let line = lines[idx].trim();
            if line.is_empty() {
                break;
            }
            if TABLE_SEPARATOR.is_match(line) && !in_body {
                in_body = true;
                idx += 1;
                continue;
            }
            if !TABLE_ROW.is_match(line) {
                break;
            }

            let cell_name = if in_body { "td" } else { "th" };
            let mut row = Node::element("tr");
            for cell in split_cells(line) {
                row.children
                    .push(self.element_with_text(cell_name, cell.trim()).into());
            }

            if in_body {
                tbody.children.push(row.into());
            } else {
                thead.children.push(row.into());
            }
            idx += 1;
        }

        let mut table = Node::element("table");
        if !thead.children.is_empty() {
            table.children.push(thead.into());
        }
        if !tbody.children.is_empty() {
            table.children.push(tbody.into());
        }
        self.dom.push(table.into());

        idx - start
    }

    /// Parse block structure of the given lines into `self.dom`
    fn parse_blocks(&mut self, lines: &[&str]) -> Result<()> {
        let mut i = 0;

        while i < lines.len() {
            let line = lines[i].trim();

            // Empty line ends current block
            if line.is_empty() {
                self.end_block();
                i += 1;
                continue;
            }

            if HEADING.is_match(line) {
                self.end_block();
                self.handle_h(line);
                i += 1;
            } else if line.starts_with('>') {
                self.end_block();
                i += self.handle_blockquote(lines, i)?.max(1);
            } else if is_fence(line) {
                self.end_block();
                i += self.handle_code(lines, i);
            } else if HR.is_match(line) {
                self.end_block();
                self.handle_hr();
                i += 1;
            } else if list_item(line).is_some() {
                self.end_block();
                let (list, used) = self.parse_list(lines, i);
                self.dom.push(list.into());
                i += used.max(1);
            } else if TABLE_ROW.is_match(line) {
                self.end_block();
                match self.handle_table(lines, i) {
                    0 => {
                        // Not a table, treat as regular text
                        self.handle_text(lines[i]);
                        i += 1;
                    }
                    used => i += used,
                }
            } else if TITLE.is_match(line) {
                self.end_block();
                self.handle_title(line);
                i += 1;
            } else {
                self.handle_text(lines[i]);
                i += 1;
            }
        }

        self.end_block();
        Ok(())
    }
}

impl Parser for MarkdownParser {
    fn parse(&mut self, input: &str) -> Result<Vec<Node>> {
        self.reset();
        let lines: Vec<&str> = input.lines().collect();
        self.parse_blocks(&lines)?;

        let mut head = Node::element("head");
        head.children = std::mem::take(&mut self.head);
        let mut body = Node::element("body");
        body.children = std::mem::take(&mut self.dom);

        let html = Node::element("html")
            .with_child(head.into())
            .with_child(body.into());
        Ok(vec![html.into()])
    }
}
