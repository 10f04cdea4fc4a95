//! Per-page outline tracker.
//!
//! One [`OutlineTracker`] lives as long as the page view. The host forwards
//! three kinds of events:
//!
//! - [`on_html_changed`](OutlineTracker::on_html_changed) when the rendered
//!   body changes; headings are re-derived and observation restarts
//! - [`tick`](OutlineTracker::tick) to sample visibility (or
//!   [`on_visibility_batch`](OutlineTracker::on_visibility_batch) with a
//!   batch delivered from elsewhere)
//! - [`on_scroll`](OutlineTracker::on_scroll) for the bottom-of-page override
//!
//! [`teardown`](OutlineTracker::teardown) releases the observer and stops
//! all further updates. Dropping the tracker has the same effect.

use super::heading::{HeadingEntry, extract_headings};
use super::observer::{ObserverOptions, VisibilityEntry, VisibilityObserver};
use super::state::OutlineState;
use super::viewport::Viewport;
use crate::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerOptions {
    /// Heading level listed in the outline.
    pub level: u8,
    /// Distance from the document end, in px, that counts as the bottom.
    pub bottom_tolerance: f64,
    pub observer: ObserverOptions,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            level: 2,
            bottom_tolerance: 10.0,
            observer: ObserverOptions::default(),
        }
    }
}

#[derive(Debug)]
pub struct OutlineTracker {
    options: TrackerOptions,
    state: OutlineState,
    observer: Option<VisibilityObserver>,
    /// Last HTML seen, to skip re-deriving an unchanged body.
    source: Option<String>,
    /// Bottom override in force; visibility batches are ignored meanwhile.
    pinned_to_bottom: bool,
    torn_down: bool,
}

impl Default for OutlineTracker {
    fn default() -> Self {
        Self::new(TrackerOptions::default())
    }
}

impl OutlineTracker {
    pub fn new(options: TrackerOptions) -> Self {
        Self {
            options,
            state: OutlineState::default(),
            observer: None,
            source: None,
            pinned_to_bottom: false,
            torn_down: false,
        }
    }

    pub fn state(&self) -> &OutlineState {
        &self.state
    }

    pub fn headings(&self) -> &[HeadingEntry] {
        self.state.headings()
    }

    pub fn active_id(&self) -> Option<&str> {
        self.state.active_id()
    }

    pub fn is_observing(&self) -> bool {
        self.observer
            .as_ref()
            .is_some_and(VisibilityObserver::is_observing)
    }

    /// Re-derive headings from `html` and restart observation.
    ///
    /// The previous observer is released before a new one is attached, so
    /// at most one observation set is active. Identical HTML is a no-op.
    pub fn on_html_changed(&mut self, html: &str, viewport: &dyn Viewport) {
        if self.torn_down || self.source.as_deref() == Some(html) {
            return;
        }

        let headings = extract_headings(html, self.options.level);
        debug!("outline"; "derived {} heading(s)", headings.len());
        self.state.replace_headings(headings);
        self.source = Some(html.to_owned());
        self.pinned_to_bottom = false;

        if let Some(mut old) = self.observer.take() {
            old.disconnect();
        }
        let mut observer = VisibilityObserver::new(self.options.observer);
        observer.observe(self.state.headings().iter().map(|h| h.id.as_str()), viewport);
        self.observer = Some(observer);
    }

    /// Apply a batch of visibility entries. Returns whether the active id changed.
    pub fn on_visibility_batch(&mut self, entries: &[VisibilityEntry]) -> bool {
        if self.torn_down || self.pinned_to_bottom || self.observer.is_none() {
            return false;
        }
        self.state.apply_visibility(entries)
    }

    /// Sample the observer and apply the resulting batch, if any.
    pub fn tick(&mut self, viewport: &dyn Viewport) -> bool {
        let Some(observer) = self.observer.as_mut() else {
            return false;
        };
        let batch = observer.poll(viewport);
        if batch.is_empty() {
            return false;
        }
        self.on_visibility_batch(&batch)
    }

    /// Handle a scroll event. Returns whether the active id changed.
    ///
    /// Within `bottom_tolerance` of the document end the last heading is
    /// forced active and stays so until the reader scrolls back up.
    pub fn on_scroll(&mut self, viewport: &dyn Viewport) -> bool {
        if self.torn_down || self.observer.is_none() || self.state.is_empty() {
            return false;
        }

        let at_bottom = viewport
            .metrics()
            .is_near_bottom(self.options.bottom_tolerance);
        self.pinned_to_bottom = at_bottom;

        if at_bottom {
            self.state.activate_last()
        } else {
            false
        }
    }

    /// Release the observer and ignore every later event.
    pub fn teardown(&mut self) {
        if let Some(mut observer) = self.observer.take() {
            observer.disconnect();
        }
        self.pinned_to_bottom = false;
        self.torn_down = true;
    }
}

impl Drop for OutlineTracker {
    fn drop(&mut self) {
        self.teardown();
    }
}
