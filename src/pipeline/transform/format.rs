//! Whitespace normalization.
//!
//! Only text nodes change: whitespace runs collapse to one space, and
//! elements holding block children get one child per line with two-space
//! indentation. Preformatted and raw-text content is left as written.

use anyhow::Result;

use crate::dom::{Document, Element, Node};
use crate::pipeline::Transform;
use crate::utils::html::{is_block_element, is_preformatted, is_raw_text_element};

const INDENT: &str = "  ";

pub struct Formatter;

impl Transform for Formatter {
    fn transform(self, mut doc: Document) -> Result<Document> {
        format_element(&mut doc.root, 0);
        Ok(doc)
    }
}

fn format_element(elem: &mut Element, depth: usize) {
    if is_preformatted(&elem.tag) || is_raw_text_element(&elem.tag) {
        return;
    }

    for child in &mut elem.children {
        match child {
            Node::Text(text) => collapse_whitespace(text),
            Node::Element(child) => format_element(child, depth + 1),
            Node::Raw(_) => {}
        }
    }

    if !elem.children.iter().any(is_block_node) {
        return;
    }

    // Block children each get a line; consecutive inline nodes share one.
    let children = std::mem::take(&mut elem.children);
    let mut out = Vec::with_capacity(children.len() * 2 + 1);
    let mut run = Vec::new();
    for child in children {
        if is_block_node(&child) {
            flush_inline_run(&mut run, &mut out, depth + 1);
            out.push(newline(depth + 1));
            out.push(child);
        } else {
            run.push(child);
        }
    }
    flush_inline_run(&mut run, &mut out, depth + 1);
    out.push(newline(depth));
    elem.children = out;
}

fn flush_inline_run(run: &mut Vec<Node>, out: &mut Vec<Node>, depth: usize) {
    let mut nodes = std::mem::take(run);
    if let Some(Node::Text(first)) = nodes.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        *last = last.trim_end().to_string();
    }
    nodes.retain(|node| !matches!(node, Node::Text(t) if t.is_empty()));
    if nodes.is_empty() {
        return;
    }
    out.push(newline(depth));
    out.extend(nodes);
}

fn is_block_node(node: &Node) -> bool {
    node.as_element().is_some_and(|e| is_block_element(&e.tag))
}

fn newline(depth: usize) -> Node {
    Node::Text(format!("\n{}", INDENT.repeat(depth)))
}

fn collapse_whitespace(text: &mut String) {
    let needs_work = text
        .as_bytes()
        .windows(2)
        .any(|w| w[0].is_ascii_whitespace() && w[1].is_ascii_whitespace())
        || text.bytes().any(|b| b.is_ascii_whitespace() && b != b' ');
    if !needs_work {
        return;
    }

    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    *text = out;
}
