//! Embedded HTML templates.
//!
//! # Module Structure
//!
//! - `template` - Template types for typed variable injection
//! - `page` - Page layout, outline script and 404 page
//! - `serve` - Dev server page index
//!
//! # Usage
//!
//! ```ignore
//! use embed::page::{NOT_FOUND_HTML, NotFoundVars};
//!
//! let html = NOT_FOUND_HTML.render(&NotFoundVars { lang: "en", title: "Blog", message: "Nothing here." });
//! ```
//!
//! Callers pass already-escaped values; templates insert them verbatim.

mod template;

pub use template::{Template, TemplateVars, substitute};

pub mod page {
    use super::{Template, TemplateVars, substitute};

    /// Variables for page.html.
    pub struct PageVars<'a> {
        pub lang: &'a str,
        /// Document `<title>`.
        pub doc_title: &'a str,
        pub title: &'a str,
        pub description: &'a str,
        pub author: &'a str,
        pub date: &'a str,
        pub outline: &'a str,
        pub body: &'a str,
        /// Inline script tracking the active outline entry.
        pub script: &'a str,
    }

    impl TemplateVars for PageVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(
                content,
                &[
                    ("__LANG__", self.lang),
                    ("__DOC_TITLE__", self.doc_title),
                    ("__TITLE__", self.title),
                    ("__DESCRIPTION__", self.description),
                    ("__AUTHOR__", self.author),
                    ("__DATE__", self.date),
                    ("__OUTLINE__", self.outline),
                    ("__BODY__", self.body),
                    ("__OUTLINE_SCRIPT__", self.script),
                ],
            )
        }
    }

    /// Two-region page layout: article plus outline sidebar.
    pub const PAGE_HTML: Template<PageVars<'static>> = Template::new(include_str!("page/page.html"));

    /// Scroll tracking for the outline sidebar, inlined into page.html.
    pub const OUTLINE_JS: &str = include_str!("page/outline.js");

    /// Variables for 404.html.
    pub struct NotFoundVars<'a> {
        pub lang: &'a str,
        pub title: &'a str,
        /// Pre-rendered explanation line.
        pub message: &'a str,
    }

    impl TemplateVars for NotFoundVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(
                content,
                &[
                    ("__LANG__", self.lang),
                    ("__TITLE__", self.title),
                    ("__MESSAGE__", self.message),
                ],
            )
        }
    }

    pub const NOT_FOUND_HTML: Template<NotFoundVars<'static>> =
        Template::new(include_str!("page/404.html"));
}

pub mod serve {
    use super::{Template, TemplateVars, substitute};

    /// Variables for index.html.
    pub struct IndexVars<'a> {
        pub lang: &'a str,
        pub title: &'a str,
        /// Pre-rendered `<li>` entries.
        pub items: &'a str,
    }

    impl TemplateVars for IndexVars<'_> {
        fn apply(&self, content: &str) -> String {
            substitute(
                content,
                &[
                    ("__LANG__", self.lang),
                    ("__TITLE__", self.title),
                    ("__ITEMS__", self.items),
                ],
            )
        }
    }

    /// Page list served at `/`.
    pub const INDEX_HTML: Template<IndexVars<'static>> =
        Template::new(include_str!("serve/index.html"));
}
