//! Scroll-tracked page outline ("On This Page").
//!
//! The outline lists the second-level headings of a rendered page and keeps
//! one of them marked as active while the reader scrolls.
//!
//! # Modules
//!
//! - `heading`: derive [`HeadingEntry`] values from rendered HTML
//! - `state`: [`OutlineState`] and its pure transitions
//! - `viewport`: the [`Viewport`] capability plus [`SimulatedViewport`]
//! - `observer`: polling [`VisibilityObserver`] producing visibility batches
//! - `tracker`: [`OutlineTracker`], the per-page event handler
//! - `render`: outline markup
//!
//! # Event flow
//!
//! ```text
//! html ──on_html_changed──▶ headings ──observe──▶ VisibilityObserver
//!                                                     │ tick (poll)
//! scroll ──on_scroll──▶ bottom override               ▼
//!                   └──────────────▶ OutlineState ◀── on_visibility_batch
//! ```

mod heading;
mod observer;
mod render;
mod state;
mod tracker;
mod viewport;

pub use heading::{HeadingEntry, extract_headings};
pub use observer::{ObserverOptions, VisibilityEntry, VisibilityObserver};
pub use render::render_outline;
pub use state::OutlineState;
pub use tracker::{OutlineTracker, TrackerOptions};
pub use viewport::{Rect, ScrollMetrics, SimulatedViewport, Viewport};
