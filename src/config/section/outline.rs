//! `[outline]` section configuration.
//!
//! Heuristics of the scroll-tracked outline. The defaults match common
//! blog layouts; retuning keeps the tracker's guarantees (sticky active
//! heading, bottom override, topmost-visible wins).
//!
//! ```toml
//! [outline]
//! level = 2                  # heading level listed in the outline
//! root_margin_bottom = 0.6   # fraction of viewport height cut from the bottom
//! threshold = 0.1            # minimum visible fraction of a heading
//! bottom_tolerance = 10.0    # px from the end of the page that count as "bottom"
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::outline::{ObserverOptions, TrackerOptions};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineConfig {
    pub level: u8,
    pub root_margin_bottom: f64,
    pub threshold: f64,
    pub bottom_tolerance: f64,
}

impl Default for OutlineConfig {
    fn default() -> Self {
        let options = TrackerOptions::default();
        Self {
            level: options.level,
            root_margin_bottom: options.observer.root_margin_bottom,
            threshold: options.observer.threshold,
            bottom_tolerance: options.bottom_tolerance,
        }
    }
}

impl OutlineConfig {
    const LEVEL: FieldPath = FieldPath::new("outline.level");
    const MARGIN: FieldPath = FieldPath::new("outline.root_margin_bottom");
    const THRESHOLD: FieldPath = FieldPath::new("outline.threshold");
    const TOLERANCE: FieldPath = FieldPath::new("outline.bottom_tolerance");

    /// Options for an [`OutlineTracker`](crate::outline::OutlineTracker).
    pub fn tracker_options(&self) -> TrackerOptions {
        TrackerOptions {
            level: self.level,
            bottom_tolerance: self.bottom_tolerance,
            observer: ObserverOptions {
                root_margin_bottom: self.root_margin_bottom,
                threshold: self.threshold,
            },
        }
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(1..=6).contains(&self.level) {
            diag.error(Self::LEVEL, format!("heading level {} is not 1-6", self.level));
        }
        if !(0.0..1.0).contains(&self.root_margin_bottom) {
            diag.error_with_hint(
                Self::MARGIN,
                "margin must be in [0, 1)",
                "0.6 keeps headings in the top 40% of the viewport",
            );
        }
        if !(self.threshold > 0.0 && self.threshold <= 1.0) {
            diag.error(Self::THRESHOLD, "threshold must be in (0, 1]");
        }
        if !(self.bottom_tolerance >= 0.0) {
            diag.error(Self::TOLERANCE, "tolerance must not be negative");
        }
    }
}
