//! HTML renderer

use crate::core::{config::ConvertConfig, element::ElementKind, symbol::Symbol};
use crate::error::Result;
use crate::render::Renderer;

pub struct HtmlRenderer<'a> {
    config: &'a ConvertConfig,
}

impl<'a> HtmlRenderer<'a> {
    pub fn new(config: &'a ConvertConfig) -> Self {
        Self { config }
    }

    fn text(&self, text: &str) -> String {
        if self.config.html.escape_text {
            html_escape::encode_text(text).into_owned()
        } else {
            text.to_string()
        }
    }

    /// ` class=".." style=".." name="value"...` for a symbol
    fn attributes(&self, symbol: &Symbol) -> String {
        let mut out = String::new();

        let mut classes: Vec<String> = Vec::new();
        let language = symbol.get_prop("language");
        if symbol.kind == ElementKind::Code && !language.is_empty() {
            classes.push(format!("language-{}", language));
        }
        classes.extend(symbol.classes.iter().cloned());
        if !classes.is_empty() {
            out.push_str(&format!(" class=\"{}\"", quote(&classes.join(" "))));
        }

        if !symbol.styles.is_empty() {
            let style: String = symbol
                .styles
                .iter()
                .map(|(k, v)| format!("{}:{};", k, v))
                .collect();
            out.push_str(&format!(" style=\"{}\"", quote(&style)));
        }

        for (name, value) in symbol.props.iter() {
            if symbol.kind == ElementKind::Code && name == "language" {
                continue;
            }
            match value {
                "false" => {}
                "" | "true" => {
                    out.push(' ');
                    out.push_str(name);
                }
                _ => out.push_str(&format!(" {}=\"{}\"", name, quote(value))),
            }
        }

        out
    }

    /// Everything on one line, whitespace inside text preserved
    fn render_inline(&self, symbol: &Symbol) -> String {
        match &symbol.kind {
            ElementKind::Text(t) => self.text(t),
            ElementKind::Fragment => self.inline_children(symbol),
            kind if kind.is_void() => format!("<{}{} />", kind.tag(), self.attributes(symbol)),
            kind => format!(
                "<{tag}{attrs}>{inner}</{tag}>",
                tag = kind.tag(),
                attrs = self.attributes(symbol),
                inner = self.inline_children(symbol)
            ),
        }
    }

    fn inline_children(&self, symbol: &Symbol) -> String {
        symbol.children.iter().map(|c| self.render_inline(c)).collect()
    }

    fn render_at(&self, symbol: &Symbol, depth: usize) -> String {
        let pad = " ".repeat(depth * self.config.html.indent);

        match &symbol.kind {
            ElementKind::Text(t) => format!("{}{}", pad, self.text(t)),
            ElementKind::Fragment => symbol
                .children
                .iter()
                .map(|c| self.render_at(c, depth))
                .collect::<Vec<_>>()
                .join("\n"),
            kind if kind.is_void() => format!("{}{}", pad, self.render_inline(symbol)),
            ElementKind::Pre => format!("{}{}", pad, self.render_inline(symbol)),
            kind => {
                let all_inline = symbol.children.iter().all(|c| c.kind.is_inline());
                if all_inline {
                    return format!("{}{}", pad, self.render_inline(symbol));
                }

                let tag = kind.tag();
                let inner = symbol
                    .children
                    .iter()
                    .map(|c| self.render_at(c, depth + 1))
                    .collect::<Vec<_>>()
                    .join("\n");
                format!(
                    "{pad}<{tag}{attrs}>\n{inner}\n{pad}</{tag}>",
                    attrs = self.attributes(symbol)
                )
            }
        }
    }
}

fn quote(value: &str) -> String {
    html_escape::encode_double_quoted_attribute(value).into_owned()
}

impl Renderer for HtmlRenderer<'_> {
    fn render(&self, symbol: &Symbol, _parent: Option<&ElementKind>) -> Result<String> {
        Ok(self.render_at(symbol, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn html(symbol: &Symbol) -> String {
        HtmlRenderer::new(&ConvertConfig::default()).render(symbol, None).unwrap()
    }

    #[test]
    fn test_heading() {
        let h1 = Symbol::new(ElementKind::H(1)).with_child(Symbol::text("Hi"));
        assert_eq!(html(&h1), "<h1>Hi</h1>");
    }

    #[test]
    fn test_inputs() {
        let text = Symbol::new(ElementKind::Input)
            .with_prop("type", "text")
            .with_prop("placeholder", "Enter your name")
            .with_prop("required", "true");
        assert_eq!(
            html(&text),
            r#"<input type="text" placeholder="Enter your name" required />"#
        );

        let checkbox = Symbol::new(ElementKind::Input)
            .with_prop("type", "checkbox")
            .with_prop("name", "subscribe")
            .with_prop("checked", "true")
            .with_prop("disabled", "false");
        assert_eq!(
            html(&checkbox),
            r#"<input type="checkbox" name="subscribe" checked />"#
        );
    }

    #[test]
    fn test_nested_blocks_are_indented() {
        let ul = Symbol::new(ElementKind::Ul).with_children([
            Symbol::new(ElementKind::Li).with_child(Symbol::text("One")),
            Symbol::new(ElementKind::Li).with_child(Symbol::text("Two")),
        ]);
        assert_eq!(html(&ul), "<ul>\n    <li>One</li>\n    <li>Two</li>\n</ul>");
    }

    #[test]
    fn test_inline_children_stay_on_one_line() {
        let p = Symbol::new(ElementKind::P).with_children([
            Symbol::text("A "),
            Symbol::new(ElementKind::Strong).with_child(Symbol::text("bold")),
            Symbol::text(" word"),
        ]);
        assert_eq!(html(&p), "<p>A <strong>bold</strong> word</p>");
    }

    #[test]
    fn test_class_style_and_code_language() {
        let div = Symbol::new(ElementKind::Div)
            .with_class("note")
            .with_style("color", "red")
            .with_child(Symbol::new(ElementKind::P).with_child(Symbol::text("x")));
        assert_eq!(
            html(&div),
            "<div class=\"note\" style=\"color:red;\">\n    <p>x</p>\n</div>"
        );

        let code = Symbol::new(ElementKind::Code)
            .with_prop("language", "rust")
            .with_child(Symbol::text("let x = 1;"));
        assert_eq!(html(&code), r#"<code class="language-rust">let x = 1;</code>"#);
    }

    #[test]
    fn test_pre_keeps_newlines() {
        let pre = Symbol::new(ElementKind::Pre).with_child(
            Symbol::new(ElementKind::Code).with_child(Symbol::text("a\n    b")),
        );
        assert_eq!(html(&pre), "<pre><code>a\n    b</code></pre>");
    }

    #[test]
    fn test_text_escaping() {
        let p = Symbol::new(ElementKind::P).with_child(Symbol::text("1 < 2 & 3"));
        assert_eq!(html(&p), "<p>1 &lt; 2 &amp; 3</p>");

        let config = ConvertConfig {
            html: crate::core::config::HtmlOptions {
                escape_text: false,
                ..Default::default()
            },
            ..Default::default()
        };
        let raw = HtmlRenderer::new(&config).render(&p, None).unwrap();
        assert_eq!(raw, "<p>1 < 2 & 3</p>");
    }

    #[test]
    fn test_attribute_values_escaped() {
        let a = Symbol::new(ElementKind::A)
            .with_prop("href", "https://x.test/?a=1&b=\"2\"")
            .with_child(Symbol::text("x"));
        assert_eq!(
            html(&a),
            "<a href=\"https://x.test/?a=1&amp;b=&quot;2&quot;\">x</a>"
        );
    }

    #[test]
    fn test_empty_element() {
        assert_eq!(html(&Symbol::new(ElementKind::Div)), "<div></div>");
    }
}
