//! Tree → HTML markup.
//!
//! Serialization is literal: whitespace is emitted exactly as stored, so
//! layout decisions belong to the format transform.

use super::{Document, Element, Node};
use crate::utils::html::{escape, escape_attr, is_raw_text_element, is_void_element};

/// Serialize a whole document, including the doctype when present.
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);
    if doc.doctype {
        out.push_str("<!doctype html>\n");
    }
    write_element(&doc.root, &mut out);
    if doc.doctype {
        out.push('\n');
    }
    out
}

/// Serialize only the children of `elem` (inner HTML).
pub fn serialize_children(elem: &Element) -> String {
    let mut out = String::new();
    let raw_text = is_raw_text_element(&elem.tag);
    for child in &elem.children {
        write_node(child, raw_text, &mut out);
    }
    out
}

fn write_element(elem: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&elem.tag);
    for (key, value) in &elem.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }
    out.push('>');

    if is_void_element(&elem.tag) {
        return;
    }

    let raw_text = is_raw_text_element(&elem.tag);
    for child in &elem.children {
        write_node(child, raw_text, out);
    }

    out.push_str("</");
    out.push_str(&elem.tag);
    out.push('>');
}

fn write_node(node: &Node, raw_text: bool, out: &mut String) {
    match node {
        Node::Element(elem) => write_element(elem, out),
        Node::Text(text) if raw_text => out.push_str(text),
        Node::Text(text) => out.push_str(&escape(text)),
        Node::Raw(raw) => out.push_str(raw),
    }
}
