//! Renderers turning a symbol tree into HTML, Markdown or reStructuredText

pub mod html;
pub mod markdown;
pub mod rst;

pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use rst::RstRenderer;

use crate::core::{config::ConvertConfig, element::ElementKind, symbol::Symbol};
use crate::error::{BetterMdError, Result};
use serde::{Deserialize, Serialize};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Html,
    Markdown,
    Rst,
}

impl Format {
    /// Conventional file extension
    pub fn extension(&self) -> &'static str {
        match self {
            Format::Html => "html",
            Format::Markdown => "md",
            Format::Rst => "rst",
        }
    }
}

/// Trait for output renderers
pub trait Renderer {
    /// Render a symbol; `parent` is the kind of the enclosing symbol, if any
    fn render(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String>;
}

/// Render with the renderer for `format`
pub fn render(symbol: &Symbol, format: Format, config: &ConvertConfig) -> Result<String> {
    match format {
        Format::Html => HtmlRenderer::new(config).render(symbol, None),
        Format::Markdown => MarkdownRenderer::new(config).render(symbol, None),
        Format::Rst => RstRenderer::new(config).render(symbol, None),
    }
}

/// Lay out mixed children: consecutive inline children form one run,
/// blocks stand alone, and everything is separated by blank lines.
pub(crate) fn layout_children<I, B>(children: &[Symbol], mut inline: I, mut block: B) -> Result<String>
where
    I: FnMut(&Symbol) -> Result<String>,
    B: FnMut(&Symbol) -> Result<String>,
{
    let mut parts: Vec<String> = Vec::new();
    let mut run = String::new();

    for child in children {
        if child.kind.is_inline() {
            run.push_str(&inline(child)?);
            continue;
        }

        push_part(&mut parts, run.trim_matches(|c| c == '\n' || c == ' '));
        run.clear();
        // Blocks keep leading spaces: an indented quote starts with them
        push_part(&mut parts, block(child)?.trim_matches('\n'));
    }
    push_part(&mut parts, run.trim_matches(|c| c == '\n' || c == ' '));

    Ok(parts.join("\n\n"))
}

fn push_part(parts: &mut Vec<String>, part: &str) {
    if !part.trim().is_empty() {
        parts.push(part.to_string());
    }
}

/// Prefix every line; blank lines get the prefix with trailing space trimmed
pub(crate) fn prefix_lines(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                prefix.trim_end().to_string()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// A `title` must hold exactly one text child
pub(crate) fn title_text(symbol: &Symbol) -> Result<&str> {
    match symbol.children.as_slice() {
        [only] => only
            .as_text()
            .ok_or_else(|| BetterMdError::structure("title", "Title element must contain a single Text element")),
        _ => Err(BetterMdError::structure(
            "title",
            "Title element must contain a single Text element",
        )),
    }
}

/// Whether a `code` symbol renders as a block
pub(crate) fn is_code_block(symbol: &Symbol, parent: Option<&ElementKind>) -> bool {
    parent == Some(&ElementKind::Pre)
        || !symbol.get_prop("language").is_empty()
        || symbol.text_content().contains('\n')
}

/// Rows of a table as (cells, is_header), header rows first
///
/// Rows inside `thead` are headers. With no `thead`, the first row is.
pub(crate) fn table_rows(table: &Symbol) -> Vec<(Vec<&Symbol>, bool)> {
    let has_thead = table.contains(|k| *k == ElementKind::THead);
    let mut rows: Vec<(Vec<&Symbol>, bool)> = Vec::new();

    fn cells(row: &Symbol) -> Vec<&Symbol> {
        row.children.iter().collect()
    }

    for section in &table.children {
        match section.kind {
            ElementKind::THead => {
                rows.extend(section.children.iter().map(|r| (cells(r), true)));
            }
            ElementKind::TBody => {
                rows.extend(section.children.iter().map(|r| (cells(r), false)));
            }
            ElementKind::Tr => rows.push((cells(section), false)),
            _ => {}
        }
    }

    if !has_thead {
        if let Some(first) = rows.first_mut() {
            first.1 = true;
        }
    }

    // Keep header rows ahead of body rows even if sections were out of order
    rows.sort_by_key(|(_, is_header)| !is_header);
    rows
}
