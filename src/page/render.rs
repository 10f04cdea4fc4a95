//! Page composition: Markdown body, outline sidebar and layout shell.

use serde::Serialize;

use super::meta::display;
use super::{ContentSource, PageError, PageMeta};
use crate::compiler::render_markdown;
use crate::config::SiteConfig;
use crate::embed::page::{NOT_FOUND_HTML, NotFoundVars, OUTLINE_JS, PAGE_HTML, PageVars};
use crate::outline::{OutlineState, extract_headings, render_outline};
use crate::utils::html::escape;

/// A fully composed page.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub slug: String,
    pub meta: PageMeta,
    /// Processed article markup, without the layout.
    #[serde(skip)]
    pub body: String,
    pub outline: OutlineState,
    /// Complete document: layout, article and outline sidebar.
    #[serde(skip)]
    pub html: String,
}

pub struct PageRenderer<'a> {
    config: &'a SiteConfig,
    source: ContentSource,
}

impl<'a> PageRenderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self {
            config,
            source: ContentSource::from_config(config),
        }
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Render the page for `slug`.
    ///
    /// Either the whole page renders or an error is returned; there is no
    /// partial output.
    pub fn render(&self, slug: &str) -> Result<RenderedPage, PageError> {
        let markdown = self.source.read(slug)?;
        let rendered = render_markdown(&markdown, self.config)
            .map_err(|err| PageError::Pipeline(slug.to_string(), err))?;

        let outline = OutlineState::new(extract_headings(&rendered.body, self.config.outline.level));
        let html = self.compose(slug, &rendered.meta, &rendered.body, &outline);

        Ok(RenderedPage {
            slug: slug.to_string(),
            meta: rendered.meta,
            body: rendered.body,
            outline,
            html,
        })
    }

    fn compose(&self, slug: &str, meta: &PageMeta, body: &str, outline: &OutlineState) -> String {
        let site = &self.config.site;
        let title = meta.title.as_deref().unwrap_or(slug);
        let doc_title = if site.title.is_empty() {
            title.to_string()
        } else {
            format!("{title} | {}", site.title)
        };
        let sidebar = render_outline(
            outline,
            &site.outline_title,
            &self.config.outline.tracker_options(),
        );

        PAGE_HTML.render(&PageVars {
            lang: &escape(&site.lang),
            doc_title: &escape(&doc_title),
            title: &escape(title),
            description: &escape(display(&meta.description)),
            author: &escape(display(&meta.author)),
            date: &escape(display(&meta.date)),
            outline: &sidebar,
            body,
            script: OUTLINE_JS,
        })
    }

    /// The not-found page, naming `slug` when the request had one.
    pub fn render_not_found(&self, slug: Option<&str>) -> String {
        let site = &self.config.site;
        let title = if site.title.is_empty() { "Not Found" } else { site.title.as_str() };
        let message = match slug {
            Some(slug) => format!("No page named <code>{}</code>.", escape(slug)),
            None => "This page does not exist.".to_string(),
        };
        NOT_FOUND_HTML.render(&NotFoundVars {
            lang: &escape(&site.lang),
            title: &escape(title),
            message: &message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const POST: &str = "---\n\
title: Tips & Tricks\n\
description: Short <and> sweet\n\
author: Ada\n\
date: 2024-05-01\n\
---\n\
\n\
## Intro\n\
\n\
Hello.\n\
\n\
## Setup\n\
\n\
Install it.\n";

    fn site(files: &[(&str, &str)]) -> (TempDir, SiteConfig) {
        let dir = TempDir::new().unwrap();
        for (name, body) in files {
            fs::write(dir.path().join(name), body).unwrap();
        }
        let mut config = SiteConfig::default();
        config.build.content = dir.path().to_path_buf();
        config.site.title = "Docs".to_string();
        (dir, config)
    }

    #[test]
    fn test_render_composes_layout() {
        let (_dir, config) = site(&[("tips.md", POST)]);
        let page = PageRenderer::new(&config).render("tips").unwrap();

        assert_eq!(page.slug, "tips");
        assert!(page.html.contains("<title>Tips &amp; Tricks | Docs</title>"));
        assert!(page.html.contains("<h1>Tips &amp; Tricks</h1>"));
        assert!(page.html.contains("Short &lt;and&gt; sweet"));
        assert!(page.html.contains("By Ada<time>2024-05-01</time>"));
        assert!(page.html.contains(r#"<nav class="on-this-page""#));
        assert!(page.html.contains(r#"<h2 id="intro">"#));
        assert!(!page.html.contains("__BODY__"));
    }

    #[test]
    fn test_outline_matches_headings() {
        let (_dir, config) = site(&[("tips.md", POST)]);
        let page = PageRenderer::new(&config).render("tips").unwrap();

        let ids: Vec<_> = page.outline.headings().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["intro", "setup"]);
        assert_eq!(page.outline.active_id(), None);
    }

    #[test]
    fn test_page_ships_tracking_script_with_config() {
        let (_dir, mut config) = site(&[("tips.md", POST)]);
        config.outline.threshold = 0.3;
        config.outline.bottom_tolerance = 4.0;
        let page = PageRenderer::new(&config).render("tips").unwrap();

        assert!(page.html.contains(r#"data-threshold="0.3""#));
        assert!(page.html.contains(r#"data-bottom-tolerance="4""#));
        assert!(page.html.contains(r#"data-root-margin-bottom="0.6""#));
        assert!(page.html.contains("new IntersectionObserver("));
        assert!(!page.html.contains("__OUTLINE_SCRIPT__"));
    }

    #[test]
    fn test_outline_level_follows_config() {
        let (_dir, mut config) = site(&[("deep.md", "## Top\n\n### Inner\n")]);
        config.outline.level = 3;
        let page = PageRenderer::new(&config).render("deep").unwrap();
        let ids: Vec<_> = page.outline.headings().iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["inner"]);
    }

    #[test]
    fn test_missing_title_falls_back_to_slug() {
        let (_dir, config) = site(&[("plain.md", "Just text.\n")]);
        let page = PageRenderer::new(&config).render("plain").unwrap();
        assert!(page.html.contains("<title>plain | Docs</title>"));
        assert!(page.outline.is_empty());
    }

    #[test]
    fn test_unknown_slug_is_not_found() {
        let (_dir, config) = site(&[]);
        let err = PageRenderer::new(&config).render("nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_pipeline_failure_has_no_page() {
        let (_dir, config) = site(&[("bad.md", "+++\n= broken\n+++\n")]);
        let err = PageRenderer::new(&config).render("bad").unwrap_err();
        assert!(matches!(err, PageError::Pipeline(ref slug, _) if slug == "bad"));
    }

    #[test]
    fn test_not_found_page_escapes_slug() {
        let (_dir, config) = site(&[]);
        let html = PageRenderer::new(&config).render_not_found(Some("<x>"));
        assert!(html.contains("<code>&lt;x&gt;</code>"));
        assert!(html.contains("Not Found | Docs"));
    }

    #[test]
    fn test_not_found_page_without_slug() {
        let (_dir, config) = site(&[]);
        let html = PageRenderer::new(&config).render_not_found(None);
        assert!(html.contains("This page does not exist."));
        assert!(!html.contains("__MESSAGE__"));
    }
}
