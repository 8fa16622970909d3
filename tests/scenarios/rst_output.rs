//! Test: reStructuredText output

use crate::helpers::*;
use bettermd::Format;
use pretty_assertions::assert_eq;

#[test]
fn test_html_table_to_grid_table() {
    let html = concat!(
        "<table>",
        "<thead><tr><th>Header 1</th><th>Header 2</th></tr></thead>",
        "<tr><td>Cell 1</td><td>Cell 2</td></tr>",
        "</table>"
    );

    let expected = "\
+----------+----------+
| Header 1 | Header 2 |
+==========+==========+
| Cell 1   | Cell 2   |
+----------+----------+";
    assert_eq!(html_to(html, Format::Rst), expected);
}

#[test]
fn test_markdown_table_to_grid_table() {
    let md = "|Name|Role|\n|---|---|\n|Ada|Engineer|\n|Bob|Ops|";

    let expected = "\
+------+----------+
| Name | Role     |
+======+==========+
| Ada  | Engineer |
+------+----------+
| Bob  | Ops      |
+------+----------+";
    assert_eq!(md_to(md, Format::Rst), expected);
}

#[test]
fn test_headings_and_paragraphs() {
    let md = "# Title\n\n## Section\n\nBody text.";
    let expected = "=====\nTitle\n=====\n\nSection\n-------\n\nBody text.";
    assert_eq!(md_to(md, Format::Rst), expected);
}

#[test]
fn test_links_and_code() {
    let md = "See [docs](https://example.com) and <https://rust-lang.org>, run `make`.";
    assert_eq!(
        md_to(md, Format::Rst),
        "See `docs <https://example.com>`_ and `https://rust-lang.org <https://rust-lang.org>`_, run ``make``."
    );

    let fenced = "```python\nprint(1)\n```";
    assert_eq!(md_to(fenced, Format::Rst), ".. code-block:: python\n\n   print(1)");
}

#[test]
fn test_title_blockquote_and_lists() {
    let md = "title: Manual\n\n> quoted **text**\n\n- one\n- two";
    assert_eq!(
        md_to(md, Format::Rst),
        ":title: Manual\n\n    quoted **text**\n\n- one\n- two"
    );
}
