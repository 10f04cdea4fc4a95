//! Document transform pipeline.
//!
//! Takes the tree produced by the Markdown converter through the fixed
//! post-processing chain:
//!
//! ```text
//! fragment ─▶ DocumentShell ─▶ Formatter ─▶ HeadingIds ─▶ HeadingAnchors ─▶ CodeHighlighter
//! ```
//!
//! Each step is a [`Transform`]; [`Pipeline`] threads the document through
//! them and stops at the first failure.

pub mod transform;

use anyhow::Result;

use crate::config::SiteConfig;
use crate::dom::Document;

pub use transform::{
    CodeHighlighter, DocumentShell, Formatter, HeadingAnchors, HeadingIds, has_theme, theme_names,
};

/// One document-to-document step.
pub trait Transform {
    fn transform(self, doc: Document) -> Result<Document>;
}

/// Chains transforms over a document.
pub struct Pipeline {
    doc: Result<Document>,
}

impl Pipeline {
    pub fn new(doc: Document) -> Self {
        Self { doc: Ok(doc) }
    }

    /// Apply `transform` unless an earlier step failed.
    pub fn pipe<T: Transform>(self, transform: T) -> Self {
        Self {
            doc: self.doc.and_then(|doc| transform.transform(doc)),
        }
    }

    pub fn finish(self) -> Result<Document> {
        self.doc
    }
}

/// Run the full post-processing chain over a converted Markdown fragment.
pub fn process(fragment: Document, config: &SiteConfig) -> Result<Document> {
    Pipeline::new(fragment)
        .pipe(DocumentShell::new(config))
        .pipe(Formatter)
        .pipe(HeadingIds::new(config.build.slug.anchor.clone()))
        .pipe(HeadingAnchors)
        .pipe(CodeHighlighter::new(&config.build.highlight))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{Element, Node};

    struct Rename(&'static str);

    impl Transform for Rename {
        fn transform(self, mut doc: Document) -> Result<Document> {
            doc.root.tag = self.0.to_string();
            Ok(doc)
        }
    }

    struct Fail;

    impl Transform for Fail {
        fn transform(self, _doc: Document) -> Result<Document> {
            anyhow::bail!("step failed")
        }
    }

    fn fragment() -> Document {
        Document::fragment(Element::new("body").with_child(Node::text("x")))
    }

    #[test]
    fn test_pipeline_applies_in_order() {
        let doc = Pipeline::new(fragment())
            .pipe(Rename("a"))
            .pipe(Rename("b"))
            .finish()
            .unwrap();
        assert_eq!(doc.root.tag, "b");
    }

    #[test]
    fn test_pipeline_stops_at_failure() {
        let result = Pipeline::new(fragment())
            .pipe(Fail)
            .pipe(Rename("never"))
            .finish();
        assert_eq!(result.unwrap_err().to_string(), "step failed");
    }

    #[test]
    fn test_process_full_chain() {
        let body = Element::new("body")
            .with_child(Node::element(
                Element::new("h2").with_child(Node::text("Getting started")),
            ))
            .with_child(Node::element(
                Element::new("pre").with_child(Node::element(
                    Element::new("code")
                        .with_attr("class", "language-rust")
                        .with_child(Node::text("fn main() {}\n")),
                )),
            ));
        let doc = process(Document::fragment(body), &SiteConfig::default()).unwrap();
        let html = crate::dom::serialize_document(&doc);

        assert!(html.starts_with("<!doctype html>\n<html lang=\"en\">"));
        assert!(html.contains("<h2 id=\"getting-started\">"));
        assert!(html.contains("href=\"#getting-started\""));
        assert!(html.contains("<figure data-code-block=\"\" data-language=\"rust\">"));
    }
}
