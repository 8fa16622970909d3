//! Test: HTML sources rendered to every format

use crate::helpers::*;
use bettermd::{BetterMdError, ConvertConfig, Converter, Format, SourceFormat};
use pretty_assertions::assert_eq;

#[test]
fn test_heading_round_trip() {
    assert_eq!(html_to("<h1>Hi</h1>", Format::Html), "<h1>Hi</h1>");
    assert_eq!(html_to("<h1>Hi</h1>", Format::Markdown), "# Hi");
}

/// Nested divs holding a heading, links and both list kinds
#[test]
fn test_mixed_div_to_markdown() {
    let html = concat!(
        "<div>",
        "<div><h1>Hi this is a H1</h1></div>",
        "<a href=\"https://www.google.com\">Link</a>",
        "<div>",
        "<ol><li>LI1</li><li>LI2</li><li>LI3</li></ol>",
        "<a href=\"https://www.google.com\">Link</a>",
        "</div>",
        "<ul><li>LI1</li><li>LI2</li><li>LI3</li></ul>",
        "</div>"
    );

    let expected = "\
# Hi this is a H1

[Link](https://www.google.com)

1. LI1
2. LI2
3. LI3

[Link](https://www.google.com)

- LI1
- LI2
- LI3";
    assert_eq!(html_to(html, Format::Markdown), expected);
}

#[test]
fn test_blockquote_with_formatting() {
    let html = "<blockquote>A quote with <strong>bold</strong> and <em>italic</em> text.</blockquote>";
    assert_eq!(
        html_to(html, Format::Markdown),
        "> A quote with **bold** and *italic* text."
    );
}

#[test]
fn test_inputs_keep_their_attributes() {
    let cases = [
        (
            r#"<input type="text" placeholder="Enter your name" required>"#,
            r#"<input type="text" placeholder="Enter your name" required />"#,
        ),
        (
            r#"<input type="password" name="password" autocomplete="off">"#,
            r#"<input type="password" name="password" autocomplete="off" />"#,
        ),
        (
            r#"<input type="checkbox" name="subscribe" checked>"#,
            r#"<input type="checkbox" name="subscribe" checked />"#,
        ),
        (
            r#"<input type="number" min="0" max="100" step="5" />"#,
            r#"<input type="number" min="0" max="100" step="5" />"#,
        ),
    ];

    for (input, expected) in cases {
        assert_eq!(html_to(input, Format::Html), expected, "input: {}", input);
    }
}

#[test]
fn test_full_document_to_markdown() {
    let html = r#"<!DOCTYPE html>
<html>
  <head><title>Guide</title></head>
  <body>
    <!-- generated -->
    <h2>Install</h2>
    <p>Run <code>cargo install</code> &amp; enjoy.</p>
  </body>
</html>"#;

    let expected = "title: \"Guide\"\n\n## Install\n\nRun `cargo install` & enjoy.";
    assert_eq!(html_to(html, Format::Markdown), expected);
}

#[test]
fn test_code_block_language_from_class() {
    let html = r#"<pre><code class="language-rust">fn main() {}</code></pre>"#;
    assert_eq!(html_to(html, Format::Markdown), "```rust\nfn main() {}\n```");
    assert_eq!(html_to(html, Format::Html), html);
}

#[test]
fn test_stray_closing_tag_is_ignored() {
    assert_eq!(html_to("<p>text</span></p>", Format::Html), "<p>text</p>");
}

#[test]
fn test_unknown_tags_lenient_and_strict() {
    let html = "<div><marquee>hi</marquee></div>";
    assert_eq!(html_to(html, Format::Markdown), "hi");

    let strict = ConvertConfig {
        strict: true,
        ..ConvertConfig::default()
    };
    let err = Converter::new(strict)
        .convert_str(html, SourceFormat::Html, Format::Markdown)
        .unwrap_err();
    assert!(matches!(err, BetterMdError::UnknownElement(ref tag) if tag == "marquee"));
}

#[test]
fn test_several_roots_render_in_sequence() {
    let out = html_to("<h1>A</h1><p>B</p><hr>", Format::Markdown);
    assert_eq!(out, "# A\n\nB\n\n---");
}

#[test]
fn test_text_is_escaped_again_on_output() {
    let out = html_to("<p>1 &lt; 2</p>", Format::Html);
    assert_eq!(out, "<p>1 &lt; 2</p>");
}
