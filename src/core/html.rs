// src/core/html.rs
//
// Tolerant HTML fragment parser feeding `dom::Document`.
// Not a conforming HTML5 tree builder: unknown close tags are dropped, unclosed
// elements are closed at the end of input, comments/doctype are skipped and
// <script>/<style> bodies are discarded.

use super::dom::{Document, NodeId, NodeKind};
use super::sanitize::normalize_entities;

const VOID_TAGS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input",
    "link", "meta", "param", "source", "track", "wbr",
];
const RAW_TEXT_TAGS: [&str; 2] = ["script", "style"];

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii() { c.to_ascii_lowercase() } else { c })
        .collect()
}

#[derive(Debug, PartialEq, Eq)]
enum Token {
    Open { tag: String, attrs: Vec<(String, String)>, self_closing: bool },
    Close(String),
    Text(String),
}

/// Parse `markup` and link it under `parent` without recording mutations.
pub(crate) fn parse_into(doc: &mut Document, parent: NodeId, markup: &str) {
    for n in parse_detached(doc, markup) {
        doc.link(parent, n);
    }
}

/// Parse `markup` into detached top-level nodes.
pub(crate) fn parse_detached(doc: &mut Document, markup: &str) -> Vec<NodeId> {
    let mut top: Vec<NodeId> = Vec::new();
    let mut stack: Vec<(NodeId, String)> = Vec::new();

    for tok in tokenize(markup) {
        match tok {
            Token::Text(t) => {
                if t.is_empty() { continue; }
                let n = doc.alloc(NodeKind::Text(t));
                attach(doc, &mut top, &stack, n);
            }
            Token::Open { tag, attrs, self_closing } => {
                let void = self_closing || VOID_TAGS.contains(&tag.as_str());
                let n = doc.alloc(NodeKind::Element { tag: tag.clone(), attrs });
                attach(doc, &mut top, &stack, n);
                if !void { stack.push((n, tag)); }
            }
            Token::Close(tag) => {
                // Pop to the nearest matching open element; stray closers are ignored.
                if let Some(pos) = stack.iter().rposition(|(_, t)| *t == tag) {
                    stack.truncate(pos);
                }
            }
        }
    }
    top
}

fn attach(doc: &mut Document, top: &mut Vec<NodeId>, stack: &[(NodeId, String)], n: NodeId) {
    match stack.last() {
        Some((parent, _)) => doc.link(*parent, n),
        None => top.push(n),
    }
}

fn tokenize(s: &str) -> Vec<Token> {
    let b = s.as_bytes();
    let n = b.len();
    let mut i = 0usize;
    let mut out = Vec::new();
    let mut text_start = 0usize;

    let flush = |out: &mut Vec<Token>, from: usize, to: usize| {
        if to > from {
            out.push(Token::Text(normalize_entities(&s[from..to])));
        }
    };

    while i < n {
        if b[i] != b'<' { i += 1; continue; }

        // Comments, doctype, processing instructions
        if s[i..].starts_with("<!--") {
            flush(&mut out, text_start, i);
            i = s[i + 4..].find("-->").map_or(n, |e| i + 4 + e + 3);
            text_start = i;
            continue;
        }
        if s[i..].starts_with("<!") || s[i..].starts_with("<?") {
            flush(&mut out, text_start, i);
            i = s[i..].find('>').map_or(n, |e| i + e + 1);
            text_start = i;
            continue;
        }

        // Close tag
        if s[i..].starts_with("</") {
            flush(&mut out, text_start, i);
            let end = s[i..].find('>').map_or(n, |e| i + e);
            let name = to_lower(s[i + 2..end].trim());
            out.push(Token::Close(name));
            i = (end + 1).min(n);
            text_start = i;
            continue;
        }

        // Open tag must start with a letter, otherwise '<' is literal text
        if i + 1 >= n || !b[i + 1].is_ascii_alphabetic() { i += 1; continue; }

        flush(&mut out, text_start, i);
        let (tok, next) = read_open_tag(s, i + 1);
        i = next;

        if let Token::Open { tag, self_closing: false, .. } = &tok {
            if RAW_TEXT_TAGS.contains(&tag.as_str()) {
                let close = join!("</", tag);
                let lc = to_lower(&s[i..]);
                let body_end = lc.find(&close).map_or(n, |e| i + e);
                let tag = tag.clone();
                out.push(tok);
                out.push(Token::Close(tag));
                i = s[body_end..].find('>').map_or(n, |e| body_end + e + 1);
                text_start = i;
                continue;
            }
        }
        out.push(tok);
        text_start = i;
    }
    flush(&mut out, text_start, n);
    out
}

/// `from` points just past '<'. Returns the token and the index after '>'.
fn read_open_tag(s: &str, from: usize) -> (Token, usize) {
    let b = s.as_bytes();
    let n = b.len();
    let mut i = from;

    while i < n && (b[i].is_ascii_alphanumeric() || b[i] == b'-' || b[i] == b':') { i += 1; }
    let tag = to_lower(&s[from..i]);

    let mut attrs: Vec<(String, String)> = Vec::new();
    let mut self_closing = false;

    loop {
        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        if i >= n { break; }
        match b[i] {
            b'>' => { i += 1; break; }
            b'/' => {
                if i + 1 < n && b[i + 1] == b'>' { self_closing = true; i += 2; break; }
                i += 1;
                continue;
            }
            _ => {}
        }

        let name_start = i;
        while i < n && !b[i].is_ascii_whitespace() && !matches!(b[i], b'=' | b'>' | b'/') { i += 1; }
        let name = to_lower(&s[name_start..i]);

        while i < n && b[i].is_ascii_whitespace() { i += 1; }
        let mut value = s!();
        if i < n && b[i] == b'=' {
            i += 1;
            while i < n && b[i].is_ascii_whitespace() { i += 1; }
            if i < n && (b[i] == b'"' || b[i] == b'\'') {
                let q = b[i];
                let v_start = i + 1;
                let v_end = s[v_start..].find(q as char).map_or(n, |e| v_start + e);
                value = normalize_entities(&s[v_start..v_end]);
                i = (v_end + 1).min(n);
            } else {
                let v_start = i;
                while i < n && !b[i].is_ascii_whitespace() && b[i] != b'>' { i += 1; }
                value = normalize_entities(&s[v_start..i]);
            }
        }
        if !name.is_empty() && !attrs.iter().any(|(k, _)| *k == name) {
            attrs.push((name, value));
        }
    }

    (Token::Open { tag, attrs, self_closing }, i)
}
