//! Markdown rendering.
//!
//! - [`frontmatter`] - `---`/`+++` metadata blocks
//! - [`image`] - image path prefixing on the event stream
//! - [`convert`] - pulldown-cmark events → tree conversion
//!
//! [`render_markdown`] ties them to the transform pipeline.

pub mod convert;
pub mod frontmatter;
pub mod image;

use anyhow::Result;
use pulldown_cmark::Parser;

use crate::config::SiteConfig;
use crate::dom::{serialize_children, serialize_document};
use crate::page::PageMeta;
use crate::pipeline;

pub use convert::{MarkdownOptions, from_events, from_markdown};
pub use frontmatter::MarkdownMetaExtractor;

/// Output of [`render_markdown`].
#[derive(Debug, Clone)]
pub struct RenderedMarkdown {
    pub meta: PageMeta,
    /// Complete HTML document, shell included.
    pub document: String,
    /// Inner markup of the document's `<body>`.
    pub body: String,
}

/// Render a Markdown source (with optional frontmatter) to HTML.
pub fn render_markdown(source: &str, config: &SiteConfig) -> Result<RenderedMarkdown> {
    let (meta, content) = MarkdownMetaExtractor.extract(source)?;

    let options = MarkdownOptions::all();
    let events = Parser::new_ext(content, options.to_pulldown_options());
    let fragment = from_events(image::prefix_images(events, &config.build.images));

    let doc = pipeline::process(fragment, config)?;
    let body = doc
        .body()
        .map(serialize_children)
        .unwrap_or_default()
        .trim()
        .to_string();

    Ok(RenderedMarkdown {
        meta,
        document: serialize_document(&doc),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::extract_headings;

    const POST: &str = "---\ntitle: Hello\nauthor: Ada\n---\n\n## Intro\n\nSee ![cat](cat.png).\n\n## Setup\n\n```rust\nfn main() {}\n```\n";

    #[test]
    fn test_render_markdown_end_to_end() {
        let rendered = render_markdown(POST, &SiteConfig::default()).unwrap();

        assert_eq!(rendered.meta.title.as_deref(), Some("Hello"));
        assert!(rendered.document.starts_with("<!doctype html>\n<html lang=\"en\">\n  <head>"));
        assert!(rendered.document.contains("<title>👋🌍</title>"));
        assert!(rendered.body.contains("src=\"/images/cat.png\""));
        assert!(rendered.body.contains("href=\"#intro\""));
        assert!(rendered.body.contains("<figure data-code-block"));
        assert!(!rendered.body.contains("<body"));
    }

    #[test]
    fn test_outline_derived_from_body() {
        let rendered = render_markdown(POST, &SiteConfig::default()).unwrap();
        let ids: Vec<_> = extract_headings(&rendered.body, 2)
            .into_iter()
            .map(|h| (h.id, h.text))
            .collect();
        assert_eq!(
            ids,
            [
                ("intro".to_string(), "Intro".to_string()),
                ("setup".to_string(), "Setup".to_string()),
            ]
        );
    }

    #[test]
    fn test_repeated_and_empty_heading_ids_made_unique() {
        let source = "## First {#dup}\n\ntext\n\n## Second {#dup}\n\n<h2 id=\"\">Raw</h2>\n";
        let rendered = render_markdown(source, &SiteConfig::default()).unwrap();
        let ids: Vec<_> = extract_headings(&rendered.body, 2)
            .into_iter()
            .map(|h| (h.id, h.text))
            .collect();
        assert_eq!(
            ids,
            [
                ("dup".to_string(), "First".to_string()),
                ("second".to_string(), "Second".to_string()),
                ("raw".to_string(), "Raw".to_string()),
            ]
        );
        assert!(!rendered.body.contains("id=\"\""));
    }

    #[test]
    fn test_custom_image_prefix() {
        let mut config = SiteConfig::default();
        config.build.images = "/static/img".to_string();
        let rendered = render_markdown("![a](a.png) ![b](https://x.test/b.png)", &config).unwrap();
        assert!(rendered.body.contains("src=\"/static/img/a.png\""));
        assert!(rendered.body.contains("src=\"https://x.test/b.png\""));
    }

    #[test]
    fn test_bad_frontmatter_fails() {
        assert!(render_markdown("+++\n= broken\n+++\n", &SiteConfig::default()).is_err());
    }
}
