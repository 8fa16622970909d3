//! reStructuredText renderer

use crate::core::{config::ConvertConfig, element::ElementKind, symbol::Symbol};
use crate::error::Result;
use crate::render::{is_code_block, layout_children, prefix_lines, table_rows, title_text, Renderer};

pub struct RstRenderer<'a> {
    config: &'a ConvertConfig,
}

impl<'a> RstRenderer<'a> {
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
                "`{} <{}>`_",
                self.inline_children(symbol)?,
                symbol.get_prop("href")
            ),
            ElementKind::Code if is_code_block(symbol, parent) => code_block(symbol),
            ElementKind::Code => format!("``{}``", symbol.text_content()),
            ElementKind::Img => image(symbol),
            ElementKind::Br => "\n".to_string(),
            ElementKind::Input => {
                if symbol.get_prop("type") != "checkbox" {
                    return Ok(String::new());
                }
                let checked = symbol.props.get("checked").is_some_and(|v| v != "false");
                let mark = if checked { "x" } else { " " };
                format!("[{}] {}", mark, self.inline_children(symbol)?)
            }
            ElementKind::Span => self.inline_children(symbol)?,
            _ => self.block(symbol, parent)?,
        })
    }

    fn block(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        Ok(match &symbol.kind {
            kind if kind.is_inline() => self.inline(symbol, parent)?,
            ElementKind::H(level) => self.heading(symbol, *level)?,
            ElementKind::P => self.children(symbol)?,
            ElementKind::Blockquote => prefix_lines(&self.children(symbol)?, "    "),
            ElementKind::Pre => match symbol.has_child(|k| *k == ElementKind::Code) {
                Some(code) => code_block(code),
                None => literal_block("::", &symbol.text_content()),
            },
            ElementKind::Ul | ElementKind::Ol => self.list(symbol)?,
            ElementKind::Li => format!("- {}", self.children(symbol)?),
            ElementKind::Table => self.table(symbol)?,
            ElementKind::Hr => "----".to_string(),
            ElementKind::Title => format!(":title: {}", title_text(symbol)?),
            ElementKind::Head => match symbol.has_child(|k| *k == ElementKind::Title) {
                Some(title) => self.block(title, Some(&symbol.kind))?,
                None => String::new(),
            },
            _ => self.children(symbol)?,
        })
    }

    fn heading(&self, symbol: &Symbol, level: u8) -> Result<String> {
        let text = self.inline_children(symbol)?.replace('\n', " ");
        let text = text.trim();
        let line: String = self
            .config
            .rst
            .heading_char(level)
            .to_string()
            .repeat(text.chars().count());

        if level == 1 {
            Ok(format!("{}\n{}\n{}", line, text, line))
        } else {
            Ok(format!("{}\n{}", text, line))
        }
    }

    /// Nested lists sit under the item text, set off by blank lines
    fn list(&self, list: &Symbol) -> Result<String> {
        let ordered = list.kind == ElementKind::Ol;
        let mut items: Vec<String> = Vec::new();

        for (n, item) in list.children.iter().enumerate() {
            let marker = if ordered {
                format!("{}. ", n + 1)
            } else {
                "- ".to_string()
            };
            let pad = " ".repeat(marker.len());

            let (nested, own): (Vec<&Symbol>, Vec<&Symbol>) = if item.kind == ElementKind::Li {
                item.children.iter().partition(|c| c.kind.is_list())
            } else {
                (Vec::new(), vec![item])
            };

            let owner = Symbol::new(ElementKind::Li).with_children(own.into_iter().cloned());
            let mut text = indent_after_first(&self.children(&owner)?, &pad);
            for sub in nested {
                text.push_str("\n\n");
                text.push_str(&prefix_lines(&self.list(sub)?, &pad));
                text.push('\n');
            }
            items.push(format!("{}{}", marker, text));
        }

        Ok(items.join("\n"))
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
                .map(|cell| self.inline_children(cell).map(|s| s.replace('\n', " ")))
                .collect::<Result<Vec<_>>>()?;
            rendered.push((cells, is_header));
        }

        let columns = rendered.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
        if columns == 0 {
            return Ok(String::new());
        }
        let mut widths = vec![0usize; columns];
        for (cells, _) in &rendered {
            for (w, cell) in widths.iter_mut().zip(cells) {
                *w = (*w).max(cell.chars().count());
            }
        }

        let border = |fill: char| {
            let segments: Vec<String> = widths
                .iter()
                .map(|w| fill.to_string().repeat(w + 2))
                .collect();
            format!("+{}+", segments.join("+"))
        };

        let mut lines = vec![border('-')];
        for (cells, is_header) in &rendered {
            let padded: Vec<String> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let cell = cells.get(i).map(String::as_str).unwrap_or("");
                    format!("{}{}", cell, " ".repeat(w - cell.chars().count()))
                })
                .collect();
            lines.push(format!("| {} |", padded.join(" | ")));
            lines.push(border(if *is_header { '=' } else { '-' }));
        }

        Ok(lines.join("\n"))
    }
}

fn code_block(code: &Symbol) -> String {
    let language = code.get_prop("language");
    let directive = if language.is_empty() {
        "::".to_string()
    } else {
        format!(".. code-block:: {}", language)
    };
    literal_block(&directive, &code.text_content())
}

fn literal_block(directive: &str, content: &str) -> String {
    format!(
        "{}\n\n{}",
        directive,
        prefix_lines(content.trim_matches('\n'), "   ")
    )
}

fn image(img: &Symbol) -> String {
    let alt = img.get_prop("alt");
    let mut out = format!(".. image:: {}", img.get_prop("src"));
    if !alt.is_empty() {
        out.push_str(&format!("\n   :alt: {}", alt));
    }
    out
}

fn indent_after_first(text: &str, pad: &str) -> String {
    let mut lines = text.lines();
    let mut out = lines.next().unwrap_or("").to_string();
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(pad);
            out.push_str(line);
        }
    }
    out
}

impl Renderer for RstRenderer<'_> {
    fn render(&self, symbol: &Symbol, parent: Option<&ElementKind>) -> Result<String> {
        let out = self.block(symbol, parent)?;
        Ok(out.trim_matches('\n').to_string())
    }
}
