//! Code block highlighting with copy buttons.
//!
//! Every `pre > code` becomes
//!
//! ```html
//! <figure data-code-block data-language="rust">
//!   <pre class="highlight" style="background-color:..."><code>..spans..</code></pre>
//!   <button class="copy" data-code="..raw source..">..</button>
//! </figure>
//! ```
//!
//! The language comes from the `language-*` class on `<code>`. Unknown or
//! missing languages are highlighted as plain text.

use std::sync::LazyLock;

use anyhow::{Result, anyhow};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::{IncludeBackground, styled_line_to_highlighted_html};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::config::HighlightConfig;
use crate::dom::{Document, Element, Node};
use crate::pipeline::Transform;

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const PLAIN_TEXT: &str = "plaintext";

/// Whether `name` is a bundled highlight theme.
pub fn has_theme(name: &str) -> bool {
    THEMES.themes.contains_key(name)
}

/// Names of all bundled highlight themes, sorted.
pub fn theme_names() -> Vec<&'static str> {
    THEMES.themes.keys().map(String::as_str).collect()
}

pub struct CodeHighlighter<'a> {
    theme: &'a str,
    feedback_ms: u64,
}

impl<'a> CodeHighlighter<'a> {
    pub fn new(config: &'a HighlightConfig) -> Self {
        Self {
            theme: &config.theme,
            feedback_ms: config.copy_feedback_ms,
        }
    }

    fn highlight_children(&self, theme: &Theme, elem: &mut Element) -> Result<()> {
        for child in &mut elem.children {
            let Node::Element(inner) = child else {
                continue;
            };
            if let Some(figure) = self.code_block(theme, inner)? {
                *child = Node::element(figure);
            } else {
                self.highlight_children(theme, inner)?;
            }
        }
        Ok(())
    }

    /// Build the replacement for a `pre > code` block, or `None` for other elements.
    fn code_block(&self, theme: &Theme, pre: &Element) -> Result<Option<Element>> {
        if pre.tag != "pre" {
            return Ok(None);
        }
        let Some(code) = pre
            .children
            .iter()
            .filter_map(Node::as_element)
            .find(|e| e.tag == "code")
        else {
            return Ok(None);
        };

        let requested = code.get_attr("class").and_then(|class| {
            class
                .split_whitespace()
                .find_map(|c| c.strip_prefix("language-"))
        });
        let (syntax, language) = requested
            .and_then(|lang| Some((SYNTAXES.find_syntax_by_token(lang)?, lang)))
            .unwrap_or_else(|| (SYNTAXES.find_syntax_plain_text(), PLAIN_TEXT));

        let source = code.text_content();
        let markup = highlight(&source, syntax, theme)?;

        let mut pre = Element::new("pre")
            .with_attr("class", "highlight")
            .with_attr("data-language", language);
        if let Some(bg) = theme.settings.background {
            pre.set_attr(
                "style",
                format!("background-color:#{:02x}{:02x}{:02x};", bg.r, bg.g, bg.b),
            );
        }
        let pre = pre.with_child(Node::element(
            Element::new("code")
                .with_attr("data-language", language)
                .with_child(Node::Raw(markup)),
        ));

        let figure = Element::new("figure")
            .with_attr("data-code-block", "")
            .with_attr("data-language", language)
            .with_child(Node::element(pre))
            .with_child(Node::element(self.copy_button(source)));

        Ok(Some(figure))
    }

    fn copy_button(&self, source: String) -> Element {
        let onclick = format!(
            "navigator.clipboard.writeText(this.dataset.code);\
             this.classList.add('copied');\
             setTimeout(() => this.classList.remove('copied'), {})",
            self.feedback_ms
        );
        Element::new("button")
            .with_attr("type", "button")
            .with_attr("class", "copy")
            .with_attr("title", "Copy code")
            .with_attr("aria-label", "Copy code")
            .with_attr("data-code", source)
            .with_attr("data-feedback-ms", self.feedback_ms.to_string())
            .with_attr("onclick", onclick)
            .with_child(Node::element(
                Element::new("span")
                    .with_attr("class", "ready")
                    .with_child(Node::text("Copy")),
            ))
            .with_child(Node::element(
                Element::new("span")
                    .with_attr("class", "success")
                    .with_child(Node::text("Copied")),
            ))
    }
}

impl Transform for CodeHighlighter<'_> {
    fn transform(self, mut doc: Document) -> Result<Document> {
        let theme = THEMES
            .themes
            .get(self.theme)
            .ok_or_else(|| anyhow!("unknown highlight theme `{}`", self.theme))?;
        self.highlight_children(theme, &mut doc.root)?;
        Ok(doc)
    }
}

/// Highlight `source` line by line into inline-styled spans.
fn highlight(source: &str, syntax: &SyntaxReference, theme: &Theme) -> Result<String> {
    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut out = String::with_capacity(source.len() * 4);
    for line in LinesWithEndings::from(source) {
        let ranges = highlighter.highlight_line(line, &SYNTAXES)?;
        let html = styled_line_to_highlighted_html(&ranges[..], IncludeBackground::No)?;
        out.push_str(&html);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::serialize_children;

    fn code_block(lang: Option<&str>, source: &str) -> Element {
        let mut code = Element::new("code");
        if let Some(lang) = lang {
            code.set_attr("class", format!("language-{lang}"));
        }
        let code = code.with_child(Node::text(source));
        Element::new("body").with_child(Node::element(
            Element::new("pre").with_child(Node::element(code)),
        ))
    }

    fn run(body: Element) -> Element {
        let config = HighlightConfig::default();
        CodeHighlighter::new(&config)
            .transform(Document::fragment(body))
            .unwrap()
            .root
    }

    #[test]
    fn test_default_theme_is_bundled() {
        assert!(has_theme(&HighlightConfig::default().theme));
        assert!(!has_theme("no-such-theme"));
        assert!(theme_names().contains(&"base16-ocean.dark"));
    }

    #[test]
    fn test_known_language_highlighted() {
        let root = run(code_block(Some("rust"), "fn main() {}\n"));
        let figure = root.find("figure").unwrap();
        assert_eq!(figure.get_attr("data-language"), Some("rust"));

        let html = serialize_children(&root);
        assert!(html.contains("<span style="));
        assert!(html.contains("background-color:#"));
    }

    #[test]
    fn test_unknown_language_falls_back_to_plain_text() {
        let root = run(code_block(Some("klingon"), "a < b\n"));
        let figure = root.find("figure").unwrap();
        assert_eq!(figure.get_attr("data-language"), Some(PLAIN_TEXT));
        assert!(serialize_children(&root).contains("a &lt; b"));
    }

    #[test]
    fn test_missing_language_falls_back_to_plain_text() {
        let root = run(code_block(None, "plain\n"));
        assert_eq!(
            root.find("figure").unwrap().get_attr("data-language"),
            Some(PLAIN_TEXT)
        );
    }

    #[test]
    fn test_copy_button_carries_source_and_feedback() {
        let source = "let x = \"quoted\";\n";
        let root = run(code_block(Some("rust"), source));
        let button = root.find("button").unwrap();
        assert_eq!(button.get_attr("data-code"), Some(source));
        assert_eq!(button.get_attr("data-feedback-ms"), Some("3000"));
        assert!(button.get_attr("onclick").unwrap().contains(", 3000)"));
    }

    #[test]
    fn test_unknown_theme_fails() {
        let config = HighlightConfig {
            theme: "missing".into(),
            ..Default::default()
        };
        let result = CodeHighlighter::new(&config).transform(Document::fragment(code_block(None, "x")));
        assert!(result.is_err());
    }

    #[test]
    fn test_pre_without_code_untouched() {
        let body = Element::new("body").with_child(Node::element(
            Element::new("pre").with_child(Node::text("ascii art")),
        ));
        let root = run(body);
        assert!(root.find("figure").is_none());
        assert!(root.find("pre").is_some());
    }
}
