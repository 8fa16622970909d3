//! Markdown renderer

use crate::core::{config::ConvertConfig, element::ElementKind, symbol::Symbol};
use crate::error::Result;
use crate::render::{
    html::HtmlRenderer, is_code_block, layout_children, prefix_lines, table_rows, title_text,
    Renderer,
};

pub struct MarkdownRenderer<'a> {
    config: &'a ConvertConfig,
}

impl<'a> MarkdownRenderer<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    fn children(&self, symbol: &Symbol) -> Result<String> {
        layout_children(
            &symbol.children,
            |c| self.inline(c, Some(&symbol.kind)),
            |c| self.block(c, Some(&symbol.kind)),
        )
    }

    fn inline_children(&self, symbol: &Symbol) -> Result<String> {
        symbol
            .children
            .iter()
            .map(|c| self.inline(c, Some(&symbol.kind)))
            .collect()
    }

    fn inline(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        Ok(match &symbol.kind {
            ElementKind::Text(t) => t.clone(),
            ElementKind::Strong => format!("**{}**", self.inline_children(symbol)?),
            ElementKind::Em => format!("*{}*", self.inline_children(symbol)?),
            ElementKind::A => format!(
                "[{}]({})",
                self.inline_children(symbol)?,
                symbol.get_prop("href")
            ),
            ElementKind::Code if is_code_block(symbol, parent) => self.code_block(symbol),
            ElementKind::Code => {
                let content = symbol.text_content();
                if content.contains('`') {
                    format!("`` {} ``", content)
                } else {
                    format!("`{}`", content)
                }
            }
            ElementKind::Img => format!(
                "![{}]({})",
                symbol.get_prop("alt"),
                symbol.get_prop("src")
            ),
            ElementKind::Br => "  \n".to_string(),
            ElementKind::Input => self.input(symbol, parent)?,
            ElementKind::Span => self.inline_children(symbol)?,
            _ => self.block(symbol, parent)?,
        })
    }

    fn input(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        if symbol.get_prop("type") != "checkbox" {
            return HtmlRenderer::new(self.config).render(symbol, parent);
        }
        let mark = if is_checked(symbol) { "x" } else { " " };
        let inner = self.inline_children(symbol)?;
        if parent == Some(&ElementKind::Li) {
            Ok(format!("[{}] {}", mark, inner))
        } else {
            Ok(format!("- [{}] {}", mark, inner))
        }
    }

    fn code_block(&self, code: &Symbol) -> String {
        let content = code.text_content();
        format!(
            "```{}\n{}\n```",
            code.get_prop("language"),
            content.trim_matches('\n')
        )
    }

    fn block(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        Ok(match &symbol.kind {
            kind if kind.is_inline() => self.inline(symbol, parent)?,
            ElementKind::H(level) => format!(
                "{} {}",
                "#".repeat(usize::from(*level)),
                self.inline_children(symbol)?.replace('\n', " ")
            ),
            ElementKind::P => self.children(symbol)?,
            ElementKind::Blockquote => prefix_lines(&self.children(symbol)?, "> "),
            ElementKind::Pre => match symbol.has_child(|k| *k == ElementKind::Code) {
                Some(code) => self.code_block(code),
                None => format!("```\n{}\n```", symbol.text_content().trim_matches('\n')),
            },
            ElementKind::Ul | ElementKind::Ol => self.list(symbol, 0)?,
            ElementKind::Li => format!("- {}", self.children(symbol)?),
            ElementKind::Table => self.table(symbol)?,
            ElementKind::Hr => "---".to_string(),
            ElementKind::Title => format!("title: \"{}\"", title_text(symbol)?),
            ElementKind::Head => match symbol.has_child(|k| *k == ElementKind::Title) {
                Some(title) => self.block(title, Some(&symbol.kind))?,
                None => String::new(),
            },
            _ => self.children(symbol)?,
        })
    }

    /// List items, nested lists indented to the item's text
    fn list(&self, list: &Symbol, indent: usize) -> Result<String> {
        let pad = " ".repeat(indent);
        let ordered = list.kind == ElementKind::Ol;
        let mut lines: Vec<String> = Vec::new();

        for (n, item) in list.children.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", n + 1)
            } else {
                "- ".to_string()
            };
            let content_pad = " ".repeat(indent + marker.len());

            let (nested, own): (Vec<&Symbol>, Vec<&Symbol>) = if item.kind == ElementKind::Li {
                item.children.iter().partition(|c| c.kind.is_list())
            } else {
                (Vec::new(), vec![item])
            };

            let owner = Symbol::new(ElementKind::Li).with_children(own.into_iter().cloned());
            let text = self.children(&owner)?;
            let mut text_lines = text.lines();
            lines.push(format!("{}{}{}", pad, marker, text_lines.next().unwrap_or("")));
            for line in text_lines {
                if line.is_empty() {
                    lines.push(String::new());
                } else {
                    lines.push(format!("{}{}", content_pad, line));
                }
            }

            for sub in nested {
                lines.push(self.list(sub, indent + marker.len())?);
            }
        }

        Ok(lines.join("\n"))
    }

    fn table(&self, table: &Symbol) -> Result<String> {
        let rows = table_rows(table);
        if rows.is_empty() {
            return Ok(String::new());
        }

        let mut rendered: Vec<(Vec<String>, bool)> = Vec::new();
        for (cells, is_header) in rows {
            let cells = cells
                .into_iter()
                .map(|cell| {
                    self.inline_children(cell)
                        .map(|s| s.replace('\n', " ").replace('|', "\\|"))
                })
                .collect::<Result<Vec<_>>>()?;
            rendered.push((cells, is_header));
        }

        let columns = rendered.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
        let mut widths = vec![3usize; columns];
        for (cells, _) in &rendered {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let row_line = |cells: &[String]| {
            let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
            padded.resize(columns, "");
            format!("|{}|", padded.join("|"))
        };
        let separator = format!(
            "|{}|",
            widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("|")
        );

        let mut lines: Vec<String> = Vec::new();
        let mut separator_written = false;
        for (cells, is_header) in &rendered {
            if !is_header && !separator_written {
                lines.push(separator.clone());
                separator_written = true;
            }
            lines.push(row_line(cells));
        }
        if !separator_written {
            lines.push(separator);
        }

        Ok(lines.join("\n"))
    }
}

fn is_checked(symbol: &Symbol) -> bool {
    symbol.props.get("checked").is_some_and(|v| v != "false")
}

impl Renderer for MarkdownRenderer<'_> {
    fn render(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        let out = self.block(symbol, parent)?;
        Ok(out.trim_matches('\n').to_string())
    }
}
