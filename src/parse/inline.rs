//! Inline Markdown: emphasis, strong, code spans, links, images

use crate::core::node::Node;

/// Split a run of text into text, `strong`, `em`, `code`, `a` and `img` nodes
///
/// Markers without a matching closer are kept as literal text.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut out = Vec::new();
    let mut buf = String::new();
    let mut prev: Option<char> = None;
    let mut i = 0;

    while i < text.len() {
        let rest = &text[i..];
        if let Some((node, used)) = match_span(rest, prev) {
            flush(&mut buf, &mut out);
            out.push(node);
            prev = text[..i + used].chars().next_back();
            i += used;
            continue;
        }

        let Some(ch) = rest.chars().next() else {
            break;
        };
        buf.push(ch);
        prev = Some(ch);
        i += ch.len_utf8();
    }

    flush(&mut buf, &mut out);
    out
}

fn flush(buf: &mut String, out: &mut Vec<Node>) {
    if !buf.is_empty() {
        out.push(Node::text(std::mem::take(buf)));
    }
}

fn match_span(rest: &str, prev: Option<char>) -> Option<(Node, usize)> {
    let first = rest.as_bytes().first().copied()?;
    match first {
        b'`' => code_span(rest),
        b'*' | b'_' => {
            let word_char_before = prev.is_some_and(char::is_alphanumeric);
            if first == b'_' && word_char_before {
                return None;
            }
            if rest.len() > 1 && rest.as_bytes()[1] == first {
                strong(rest, first)
            } else {
                emphasis(rest, first)
            }
        }
        b'!' if rest.starts_with("![") => {
            let (label, href, used) = link_parts(&rest[1..])?;
            let img = Node::element("img")
                .with_attribute("src", href)
                .with_attribute("alt", label);
            Some((img.into(), used + 1))
        }
        b'[' => {
            let (label, href, used) = link_parts(rest)?;
            let mut a = Node::element("a").with_attribute("href", href);
            a.children = parse_inline(label);
            Some((a.into(), used))
        }
        b'<' => autolink(rest),
        _ => None,
    }
}

fn code_span(rest: &str) -> Option<(Node, usize)> {
    let ticks = rest.bytes().take_while(|&b| b == b'`').count();
    let fence = &rest[..ticks];
    let close = rest[ticks..].find(fence)?;
    let content = &rest[ticks..ticks + close];
    if content.is_empty() {
        return None;
    }
    let content = if ticks > 1 { content.trim() } else { content };
    let code = Node::element("code").with_child(Node::text(content));
    Some((code.into(), ticks + close + ticks))
}

fn strong(rest: &str, delim: u8) -> Option<(Node, usize)> {
    let marker = if delim == b'*' { "**" } else { "__" };
    let body = &rest[2..];
    if body.starts_with(char::is_whitespace) {
        return None;
    }
    let close = body.find(marker)?;
    if close == 0 {
        return None;
    }
    let mut node = Node::element("strong");
    node.children = parse_inline(&body[..close]);
    Some((node.into(), close + 4))
}

fn emphasis(rest: &str, delim: u8) -> Option<(Node, usize)> {
    let body = &rest[1..];
    if body.is_empty() || body.starts_with(char::is_whitespace) {
        return None;
    }

    let bytes = body.as_bytes();
    let mut j = 0;
    while j < bytes.len() {
        if bytes[j] == delim {
            // Skip doubled markers so `*a **b** c*` closes at the last star
            if bytes.get(j + 1) == Some(&delim) {
                j += 2;
                continue;
            }
            let followed_by_word = body[j + 1..].starts_with(char::is_alphanumeric);
            if j > 0 && !(delim == b'_' && followed_by_word) {
                let mut node = Node::element("em");
                node.children = parse_inline(&body[..j]);
                return Some((node.into(), j + 2));
            }
        }
        j += 1;
    }
    None
}

/// `[label](href)` -> (label, href, bytes consumed)
fn link_parts(rest: &str) -> Option<(&str, &str, usize)> {
    let label_end = rest.find(']')?;
    let after = &rest[label_end + 1..];
    if !after.starts_with('(') {
        return None;
    }
    let href_end = after.find(')')?;
    let label = &rest[1..label_end];
    let href = after[1..href_end].trim();
    if href.is_empty() {
        return None;
    }
    Some((label, href, label_end + 1 + href_end + 1))
}

fn autolink(rest: &str) -> Option<(Node, usize)> {
    let end = rest.find('>')?;
    let url = &rest[1..end];
    let is_url = (url.starts_with("http://") || url.starts_with("https://"))
        && !url.contains(char::is_whitespace);
    if !is_url {
        return None;
    }
    let a = Node::element("a")
        .with_attribute("href", url)
        .with_child(Node::text(url));
    Some((a.into(), end + 1))
}
