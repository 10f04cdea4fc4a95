//! Outline markup.

use super::state::OutlineState;
use super::tracker::TrackerOptions;
use crate::dom::{Element, Node, serialize_children};

/// Render the outline as a `<nav class="on-this-page">` list.
///
/// The entry named by the active id is marked with `class="active"` and
/// `aria-current`. Only the first matching entry is marked, so duplicate
/// ids never produce two highlights.
///
/// `options` are written as `data-*` attributes; the page script reads them
/// to track the active entry while scrolling.
pub fn render_outline(state: &OutlineState, title: &str, options: &TrackerOptions) -> String {
    let mut list = Element::new("ul");
    let mut marked = false;

    for heading in state.headings() {
        let mut link = Element::new("a").with_attr("href", format!("#{}", heading.id));
        if !marked && state.active_id() == Some(heading.id.as_str()) {
            link.set_attr("class", "active");
            link.set_attr("aria-current", "true");
            marked = true;
        }
        link.children.push(Node::text(&heading.text));
        list.children
            .push(Node::element(Element::new("li").with_child(Node::element(link))));
    }

    let nav = Element::new("nav")
        .with_attr("class", "on-this-page")
        .with_attr("aria-label", title)
        .with_attr(
            "data-root-margin-bottom",
            options.observer.root_margin_bottom.to_string(),
        )
        .with_attr("data-threshold", options.observer.threshold.to_string())
        .with_attr("data-bottom-tolerance", options.bottom_tolerance.to_string())
        .with_child(Node::element(
            Element::new("p")
                .with_attr("class", "on-this-page-title")
                .with_child(Node::text(title)),
        ))
        .with_child(Node::element(list));

    serialize_children(&Element::new("div").with_child(Node::element(nav)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{HeadingEntry, ObserverOptions, VisibilityEntry};

    fn render(state: &OutlineState, title: &str) -> String {
        render_outline(state, title, &TrackerOptions::default())
    }

    fn state() -> OutlineState {
        OutlineState::new(vec![
            HeadingEntry::new("intro", "Intro"),
            HeadingEntry::new("q-a", "Q&A"),
        ])
    }

    #[test]
    fn test_render_lists_entries() {
        let html = render(&state(), "On This Page");
        assert!(html.starts_with(concat!(
            r#"<nav class="on-this-page" aria-label="On This Page" "#,
            r#"data-root-margin-bottom="0.6" data-threshold="0.1" data-bottom-tolerance="10">"#,
        )));
        assert!(html.contains(r##"<li><a href="#intro">Intro</a></li>"##));
        assert!(html.contains(r##"<a href="#q-a">Q&amp;A</a>"##));
        assert!(!html.contains("active"));
    }

    #[test]
    fn test_render_marks_active() {
        let mut state = state();
        state.apply_visibility(&[VisibilityEntry::new("q-a", true, 0.0)]);
        let html = render(&state, "On This Page");
        assert!(html.contains(r##"<a href="#q-a" class="active" aria-current="true">"##));
        assert_eq!(html.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_render_single_highlight_with_duplicate_ids() {
        let mut state = OutlineState::new(vec![
            HeadingEntry::new("dup", "First"),
            HeadingEntry::new("dup", "Second"),
        ]);
        state.activate_last();
        let html = render(&state, "Contents");
        assert_eq!(html.matches("aria-current").count(), 1);
        assert!(html.contains(r##"aria-current="true">First</a>"##));
    }

    #[test]
    fn test_render_empty() {
        let html = render(&OutlineState::default(), "On This Page");
        assert!(html.contains("<ul></ul>"));
    }

    #[test]
    fn test_render_carries_tracking_options() {
        let options = TrackerOptions {
            level: 2,
            bottom_tolerance: 24.5,
            observer: ObserverOptions {
                root_margin_bottom: 0.5,
                threshold: 0.25,
            },
        };
        let html = render_outline(&state(), "On This Page", &options);
        assert!(html.contains(r#"data-root-margin-bottom="0.5""#));
        assert!(html.contains(r#"data-threshold="0.25""#));
        assert!(html.contains(r#"data-bottom-tolerance="24.5""#));
    }
}
