//! Test: Markdown sources rendered to HTML and back to Markdown

use crate::helpers::*;
use bettermd::{ConvertConfig, Format, SourceFormat, Symbol};
use pretty_assertions::assert_eq;

#[test]
fn test_document_to_html() {
    let md = "title: \"Notes\"\n# Title\n\nSome **bold** text.";

    let expected = "\
<html>
    <head>
        <title>Notes</title>
    </head>
    <body>
        <h1>Title</h1>
        <p>Some <strong>bold</strong> text.</p>
    </body>
</html>";
    assert_eq!(md_to(md, Format::Html), expected);
}

#[test]
fn test_markdown_round_trip() {
    let md = "\
# Title

Some **bold** and *italic* text with `code`.

- a
  - a1
- b

1. first
2. second

> quoted

---";
    assert_eq!(md_to(md, Format::Markdown), md);
}

#[test]
fn test_table_round_trip() {
    let md = "|Header 1|Header 2|\n|---|---|\n|Cell 1|Cell 2|";
    let expected = "|Header 1|Header 2|\n|--------|--------|\n|Cell 1|Cell 2|";
    assert_eq!(md_to(md, Format::Markdown), expected);
}

#[test]
fn test_table_with_escaped_pipe_round_trips() {
    let md = "|expr|\n|---|\n|a\\|b|";
    assert_eq!(md_to(md, Format::Markdown), md);

    let html = md_to(md, Format::Html);
    assert!(html.contains("<td>a|b</td>"), "{}", html);
}

#[test]
fn test_fenced_code_keeps_language_and_body() {
    let md = "```python\ndef f():\n    return 1\n```";
    assert_eq!(md_to(md, Format::Markdown), md);

    let html = md_to(md, Format::Html);
    assert_in_order(
        &html,
        &["<pre><code class=\"language-python\">", "def f():\n    return 1", "</code></pre>"],
    );
}

#[test]
fn test_hard_break() {
    let html = md_to("line one  \nline two", Format::Html);
    assert!(html.contains("<p>line one<br />line two</p>"), "{}", html);
}

#[test]
fn test_links_and_images() {
    let html = md_to(
        "See [the docs](https://example.com/docs) and ![logo](logo.png).",
        Format::Html,
    );
    assert!(html.contains(r#"<a href="https://example.com/docs">the docs</a>"#), "{}", html);
    assert!(html.contains(r#"<img src="logo.png" alt="logo" />"#), "{}", html);
}

#[test]
fn test_inline_parsing_can_be_disabled() {
    let mut config = ConvertConfig::default();
    config.markdown.inline = false;

    let html = convert_with(&config, "a **b**", SourceFormat::Markdown, Format::Html);
    assert!(html.contains("<p>a **b**</p>"), "{}", html);
}

#[test]
fn test_symbol_api_from_markdown() {
    let symbol = Symbol::from_md("# Hi\n\n- one\n- two").unwrap();
    assert_eq!(symbol.to_md().unwrap(), "# Hi\n\n- one\n- two");
    assert!(symbol.to_rst().unwrap().starts_with("==\nHi\n=="));
}
