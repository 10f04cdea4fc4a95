//! Minimal document shell.

use anyhow::Result;

use crate::config::SiteConfig;
use crate::dom::{Document, Element, Node};
use crate::pipeline::Transform;

/// Wraps a body fragment in `<html><head>..</head><body>..</body></html>`.
///
/// The `<title>` is a fixed placeholder; the page layout supplies the real
/// title from frontmatter.
pub struct DocumentShell<'a> {
    lang: &'a str,
    title: &'a str,
}

impl<'a> DocumentShell<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            lang: &config.site.lang,
            title: &config.site.placeholder_title,
        }
    }

    fn head(&self) -> Element {
        Element::new("head")
            .with_child(Node::element(Element::new("meta").with_attr("charset", "utf-8")))
            .with_child(Node::element(
                Element::new("meta")
                    .with_attr("name", "viewport")
                    .with_attr("content", "width=device-width, initial-scale=1"),
            ))
            .with_child(Node::element(
                Element::new("title").with_child(Node::text(self.title)),
            ))
    }
}

impl Transform for DocumentShell<'_> {
    fn transform(self, doc: Document) -> Result<Document> {
        if doc.doctype {
            return Ok(doc);
        }

        let body = if doc.root.tag == "body" {
            doc.root
        } else {
            Element::new("body").with_child(Node::element(doc.root))
        };

        let html = Element::new("html")
            .with_attr("lang", self.lang)
            .with_child(Node::element(self.head()))
            .with_child(Node::element(body));

        Ok(Document {
            doctype: true,
            root: html,
        })
    }
}
