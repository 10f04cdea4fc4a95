//! Outline state and its transitions.

use serde::Serialize;

use super::heading::HeadingEntry;
use super::observer::VisibilityEntry;

/// Headings of the current page plus the highlighted one.
///
/// `active_id`, when set, always names one of `headings`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OutlineState {
    headings: Vec<HeadingEntry>,
    active_id: Option<String>,
}

impl OutlineState {
    pub fn new(headings: Vec<HeadingEntry>) -> Self {
        Self {
            headings,
            active_id: None,
        }
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        &self.headings
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    /// Replace the heading list.
    ///
    /// The active id survives only if the new list still contains it.
    pub fn replace_headings(&mut self, headings: Vec<HeadingEntry>) {
        self.headings = headings;
        if let Some(active) = &self.active_id
            && !self.contains(active)
        {
            self.active_id = None;
        }
    }

    /// Apply one visibility batch. Returns whether the active id changed.
    ///
    /// The intersecting entry closest to the top of the viewport wins, ties
    /// going to the earlier heading. A batch with nothing intersecting leaves
    /// the active id as it was.
    pub fn apply_visibility(&mut self, entries: &[VisibilityEntry]) -> bool {
        let winner = entries
            .iter()
            .filter(|entry| entry.is_intersecting)
            .filter_map(|entry| Some((entry, self.position(&entry.id)?)))
            .min_by(|(a, a_idx), (b, b_idx)| a.top.total_cmp(&b.top).then(a_idx.cmp(b_idx)))
            .map(|(entry, _)| entry.id.clone());

        match winner {
            Some(id) => self.set_active(id),
            None => false,
        }
    }

    /// Activate the last heading. Returns whether the active id changed.
    pub fn activate_last(&mut self) -> bool {
        match self.headings.last() {
            Some(last) => {
                let id = last.id.clone();
                self.set_active(id)
            }
            None => false,
        }
    }

    fn set_active(&mut self, id: String) -> bool {
        if self.active_id.as_deref() == Some(id.as_str()) {
            return false;
        }
        self.active_id = Some(id);
        true
    }

    fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.headings.iter().position(|h| h.id == id)
    }
}
