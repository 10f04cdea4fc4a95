//! Polling visibility observer.
//!
//! Mirrors intersection-observer semantics over a [`Viewport`]: the root
//! region is the viewport shrunk from the bottom by `root_margin_bottom`,
//! and a target counts as visible once at least `threshold` of its height
//! lies inside that region. Each [`poll`](VisibilityObserver::poll) returns
//! the batch of targets whose visibility changed since the last poll.

use super::viewport::{Rect, Viewport};
use crate::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Fraction of the viewport height excluded from the bottom.
    pub root_margin_bottom: f64,
    /// Minimum visible fraction of a target.
    pub threshold: f64,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            root_margin_bottom: 0.6,
            threshold: 0.1,
        }
    }
}

/// Visibility report for one observed heading.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityEntry {
    pub id: String,
    pub is_intersecting: bool,
    /// Viewport-relative top of the target, in px.
    pub top: f64,
    /// Visible fraction of the target inside the root region.
    pub ratio: f64,
}

impl VisibilityEntry {
    pub fn new(id: impl Into<String>, is_intersecting: bool, top: f64) -> Self {
        Self {
            id: id.into(),
            is_intersecting,
            top,
            ratio: if is_intersecting { 1.0 } else { 0.0 },
        }
    }
}

impl ObserverOptions {
    /// Compute `(is_intersecting, ratio)` of `rect` for a viewport of `height`.
    pub fn intersect(&self, rect: Rect, height: f64) -> (bool, f64) {
        let root_bottom = height * (1.0 - self.root_margin_bottom);
        let overlap = (rect.bottom().min(root_bottom) - rect.top.max(0.0)).max(0.0);

        let ratio = if rect.height > 0.0 {
            (overlap / rect.height).min(1.0)
        } else if (0.0..=root_bottom).contains(&rect.top) {
            1.0
        } else {
            0.0
        };

        let inside = overlap > 0.0 || (rect.height <= 0.0 && ratio > 0.0);
        (inside && ratio >= self.threshold, ratio)
    }
}

#[derive(Debug)]
struct Target {
    id: String,
    last: Option<bool>,
}

/// Watches a set of heading ids and reports visibility changes.
#[derive(Debug, Default)]
pub struct VisibilityObserver {
    options: ObserverOptions,
    targets: Vec<Target>,
}

impl VisibilityObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    /// Observe every id currently present in the viewport.
    ///
    /// Ids without a matching element are skipped. Returns the number of
    /// targets attached.
    pub fn observe<'a>(
        &mut self,
        ids: impl IntoIterator<Item = &'a str>,
        viewport: &dyn Viewport,
    ) -> usize {
        let mut skipped = 0usize;
        for id in ids {
            if viewport.element_rect(id).is_none() {
                skipped += 1;
                continue;
            }
            if self.targets.iter().any(|t| t.id == id) {
                continue;
            }
            self.targets.push(Target {
                id: id.to_owned(),
                last: None,
            });
        }
        if skipped > 0 {
            debug!("outline"; "skipped {} heading(s) missing from the page", skipped);
        }
        self.targets.len()
    }

    /// Stop observing every target.
    pub fn disconnect(&mut self) {
        self.targets.clear();
    }

    pub fn is_observing(&self) -> bool {
        !self.targets.is_empty()
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.id.as_str())
    }

    /// Sample the viewport and return entries whose visibility changed.
    ///
    /// The first poll after [`observe`](Self::observe) reports every target.
    /// A target whose element disappeared reports as not intersecting.
    pub fn poll(&mut self, viewport: &dyn Viewport) -> Vec<VisibilityEntry> {
        let height = viewport.metrics().viewport_height;
        let mut batch = Vec::new();

        for target in &mut self.targets {
            let (is_intersecting, top, ratio) = match viewport.element_rect(&target.id) {
                Some(rect) => {
                    let (visible, ratio) = self.options.intersect(rect, height);
                    (visible, rect.top, ratio)
                }
                None => (false, f64::INFINITY, 0.0),
            };

            if target.last == Some(is_intersecting) {
                continue;
            }
            target.last = Some(is_intersecting);
            batch.push(VisibilityEntry {
                id: target.id.clone(),
                is_intersecting,
                top,
                ratio,
            });
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::SimulatedViewport;

    fn options() -> ObserverOptions {
        ObserverOptions::default()
    }

    #[test]
    fn test_intersect_top_region_only() {
        // 800px viewport, root region is [0, 320]
        assert!(options().intersect(Rect::new(100.0, 40.0), 800.0).0);
        assert!(!options().intersect(Rect::new(400.0, 40.0), 800.0).0);
        assert!(!options().intersect(Rect::new(-50.0, 40.0), 800.0).0);
    }

    #[test]
    fn test_intersect_threshold() {
        // 2px of a 40px heading inside the region: 5% < 10%
        let (visible, ratio) = options().intersect(Rect::new(318.0, 40.0), 800.0);
        assert!(!visible);
        assert!((ratio - 0.05).abs() < 1e-9);

        // 8px of 40px: 20%
        assert!(options().intersect(Rect::new(312.0, 40.0), 800.0).0);
    }

    #[test]
    fn test_tall_element_never_reaches_threshold() {
        // Root region is 320px, element is 4000px: at most 8% visible
        let (visible, ratio) = options().intersect(Rect::new(0.0, 4000.0), 800.0);
        assert!(!visible);
        assert!(ratio < 0.1);
    }

    #[test]
    fn test_zero_height_element() {
        assert!(options().intersect(Rect::new(10.0, 0.0), 800.0).0);
        assert!(!options().intersect(Rect::new(500.0, 0.0), 800.0).0);
    }

    #[test]
    fn test_observe_skips_missing() {
        let viewport = SimulatedViewport::new(800.0, 2000.0).with_element("a", 0.0, 40.0);
        let mut observer = VisibilityObserver::new(options());
        assert_eq!(observer.observe(["a", "ghost"], &viewport), 1);
        assert_eq!(observer.targets().collect::<Vec<_>>(), vec!["a"]);
    }

    #[test]
    fn test_poll_reports_changes_only() {
        let mut viewport = SimulatedViewport::new(800.0, 3000.0)
            .with_element("a", 100.0, 40.0)
            .with_element("b", 1000.0, 40.0);
        let mut observer = VisibilityObserver::new(options());
        observer.observe(["a", "b"], &viewport);

        let first = observer.poll(&viewport);
        assert_eq!(first.len(), 2);
        assert!(first[0].is_intersecting);
        assert!(!first[1].is_intersecting);

        assert!(observer.poll(&viewport).is_empty());

        viewport.scroll_to(900.0);
        let batch = observer.poll(&viewport);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "a");
        assert!(!batch[0].is_intersecting);
        assert_eq!(batch[1].id, "b");
        assert!(batch[1].is_intersecting);
        assert_eq!(batch[1].top, 100.0);
    }

    #[test]
    fn test_removed_element_reports_hidden() {
        let mut viewport = SimulatedViewport::new(800.0, 2000.0).with_element("a", 0.0, 40.0);
        let mut observer = VisibilityObserver::new(options());
        observer.observe(["a"], &viewport);
        assert!(observer.poll(&viewport)[0].is_intersecting);

        viewport.remove("a");
        let batch = observer.poll(&viewport);
        assert_eq!(batch.len(), 1);
        assert!(!batch[0].is_intersecting);
    }

    #[test]
    fn test_disconnect() {
        let viewport = SimulatedViewport::new(800.0, 2000.0).with_element("a", 0.0, 40.0);
        let mut observer = VisibilityObserver::new(options());
        observer.observe(["a"], &viewport);
        observer.disconnect();
        assert!(!observer.is_observing());
        assert!(observer.poll(&viewport).is_empty());
    }
}
