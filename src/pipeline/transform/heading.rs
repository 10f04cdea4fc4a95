//! Heading ids and self-link anchors.

use anyhow::Result;
use rustc_hash::FxHashSet;

use crate::config::SlugMode;
use crate::dom::{Document, Element, Node};
use crate::pipeline::Transform;
use crate::utils::slug::Slugger;

/// Gives every `h1`-`h6` a unique id.
///
/// The first element carrying a given id keeps it and the id is reserved,
/// so generated slugs never collide with it. Headings whose id is empty or
/// repeats an earlier one are slugged like headings without an id.
pub struct HeadingIds {
    slugger: Slugger,
}

impl HeadingIds {
    pub fn new(mode: SlugMode) -> Self {
        Self {
            slugger: Slugger::new(mode),
        }
    }
}

impl Transform for HeadingIds {
    fn transform(mut self, mut doc: Document) -> Result<Document> {
        let mut seen = FxHashSet::default();
        doc.root.walk_mut(&mut |elem| {
            let Some(id) = elem.get_attr("id").map(str::to_string) else {
                return;
            };
            if !id.is_empty() && seen.insert(id.clone()) {
                self.slugger.reserve(&id);
            } else if elem.heading_level().is_some() {
                elem.remove_attr("id");
            }
        });

        doc.root.walk_mut(&mut |elem| {
            if elem.heading_level().is_none() || elem.has_attr("id") {
                return;
            }
            let id = self.slugger.slug(&elem.text_content());
            elem.set_attr("id", id);
        });

        Ok(doc)
    }
}

/// Prepends `<a aria-hidden tabindex="-1" href="#id">` to headings with an id.
pub struct HeadingAnchors;

impl HeadingAnchors {
    fn anchor(id: &str) -> Element {
        Element::new("a")
            .with_attr("aria-hidden", "true")
            .with_attr("tabindex", "-1")
            .with_attr("href", format!("#{id}"))
            .with_child(Node::element(
                Element::new("span").with_attr("class", "icon icon-link"),
            ))
    }
}

impl Transform for HeadingAnchors {
    fn transform(self, mut doc: Document) -> Result<Document> {
        doc.root.walk_mut(&mut |elem| {
            if elem.heading_level().is_none() {
                return;
            }
            let Some(id) = elem.get_attr("id").filter(|id| !id.is_empty()) else {
                return;
            };
            let anchor = Self::anchor(id);
            elem.children.insert(0, Node::element(anchor));
        });
        Ok(doc)
    }
}
