//! Heading derivation from rendered HTML.

use serde::Serialize;

use crate::utils::html::unescape;

/// One outline entry: anchor id plus display text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub id: String,
    pub text: String,
}

impl HeadingEntry {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Extract every `h{level}` heading with a non-empty id, in document order.
///
/// The markup is only scanned; scripts are never run and nothing is fetched.
/// Unparseable input yields an empty outline.
pub fn extract_headings(html: &str, level: u8) -> Vec<HeadingEntry> {
    let Ok(dom) = tl::parse(html, tl::ParserOptions::default()) else {
        return Vec::new();
    };
    let parser = dom.parser();
    let selector = format!("h{level}");

    let Some(handles) = dom.query_selector(&selector) else {
        return Vec::new();
    };

    handles
        .filter_map(|handle| handle.get(parser)?.as_tag())
        .filter_map(|tag| {
            let id = tag
                .attributes()
                .iter()
                .find(|(key, _)| key.as_ref() == "id")
                .and_then(|(_, value)| value)
                .map(|value| unescape(&value).into_owned())
                .filter(|id| !id.is_empty())?;
            let text = normalize_text(&unescape(&tag.inner_text(parser)));
            Some(HeadingEntry { id, text })
        })
        .collect()
}

/// Collapse whitespace runs and trim, as rendered text would read.
fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_document_order() {
        let html = r#"<h2 id="intro">Intro</h2><p>..</p><h2 id="setup">Setup</h2>"#;
        let headings = extract_headings(html, 2);
        assert_eq!(
            headings,
            vec![
                HeadingEntry::new("intro", "Intro"),
                HeadingEntry::new("setup", "Setup"),
            ]
        );
    }

    #[test]
    fn test_extract_is_idempotent() {
        let html = r#"<h1>Title</h1><h2 id="a">A</h2><div><h2 id="b">B <em>b</em></h2></div>"#;
        assert_eq!(extract_headings(html, 2), extract_headings(html, 2));
    }

    #[test]
    fn test_extract_ignores_other_levels_and_missing_ids() {
        let html = r#"<h1 id="t">T</h1><h2>No id</h2><h2 id="">Empty</h2><h3 id="c">C</h3><h2 id="d">D</h2>"#;
        let headings = extract_headings(html, 2);
        assert_eq!(headings, vec![HeadingEntry::new("d", "D")]);
    }

    #[test]
    fn test_extract_strips_markup_and_decodes_entities() {
        let html = concat!(
            r##"<h2 id="qa"><a aria-hidden="true" tabindex="-1" href="#qa">"##,
            r#"<span class="icon icon-link"></span></a>Q&amp;A <code>fn</code></h2>"#,
        );
        let headings = extract_headings(html, 2);
        assert_eq!(headings, vec![HeadingEntry::new("qa", "Q&A fn")]);
    }

    #[test]
    fn test_extract_nested_in_document_shell() {
        let html = "<!doctype html>\n<html>\n  <head>\n    <title>x</title>\n  </head>\n  <body>\n    <h2 id=\"deep\">\n      Deep\n    </h2>\n  </body>\n</html>";
        assert_eq!(extract_headings(html, 2), vec![HeadingEntry::new("deep", "Deep")]);
    }

    #[test]
    fn test_extract_other_level() {
        let html = r#"<h2 id="a">A</h2><h3 id="b">B</h3>"#;
        assert_eq!(extract_headings(html, 3), vec![HeadingEntry::new("b", "B")]);
    }

    #[test]
    fn test_extract_empty() {
        assert!(extract_headings("", 2).is_empty());
        assert!(extract_headings("<p>no headings</p>", 2).is_empty());
    }
}
