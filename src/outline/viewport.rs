//! Viewport capability consumed by the outline tracker.
//!
//! The tracker never touches a real browser. A host (a rendering shell, a
//! test) implements [`Viewport`] and forwards scroll and content events.

use rustc_hash::FxHashMap;

/// Element bounds relative to the top of the viewport, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Scroll position and extents of the scrolling document, in px.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub viewport_height: f64,
    pub scroll_height: f64,
}

impl ScrollMetrics {
    /// Whether the viewport bottom is within `tolerance` of the document end.
    pub fn is_near_bottom(&self, tolerance: f64) -> bool {
        self.viewport_height + self.scroll_y >= self.scroll_height - tolerance
    }
}

/// What the tracker needs to know about the page being read.
pub trait Viewport {
    fn metrics(&self) -> ScrollMetrics;

    /// Bounds of the element with `id`, or `None` when it is not in the page.
    fn element_rect(&self, id: &str) -> Option<Rect>;
}

/// In-memory page with absolutely positioned elements.
///
/// Element positions are document offsets; [`Viewport::element_rect`]
/// translates them by the current scroll position.
#[derive(Debug, Clone)]
pub struct SimulatedViewport {
    viewport_height: f64,
    scroll_height: f64,
    scroll_y: f64,
    elements: FxHashMap<String, Rect>,
}

impl SimulatedViewport {
    pub fn new(viewport_height: f64, scroll_height: f64) -> Self {
        Self {
            viewport_height,
            scroll_height: scroll_height.max(viewport_height),
            scroll_y: 0.0,
            elements: FxHashMap::default(),
        }
    }

    /// Builder: place an element at document offset `top`.
    pub fn with_element(mut self, id: impl Into<String>, top: f64, height: f64) -> Self {
        self.place(id, top, height);
        self
    }

    pub fn place(&mut self, id: impl Into<String>, top: f64, height: f64) {
        self.elements.insert(id.into(), Rect::new(top, height));
    }

    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
    }

    pub fn max_scroll(&self) -> f64 {
        (self.scroll_height - self.viewport_height).max(0.0)
    }

    /// Scroll to `y`, clamped to the scrollable range.
    pub fn scroll_to(&mut self, y: f64) {
        self.scroll_y = y.clamp(0.0, self.max_scroll());
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_y = self.max_scroll();
    }
}

impl Viewport for SimulatedViewport {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            scroll_y: self.scroll_y,
            viewport_height: self.viewport_height,
            scroll_height: self.scroll_height,
        }
    }

    fn element_rect(&self, id: &str) -> Option<Rect> {
        self.elements
            .get(id)
            .map(|rect| Rect::new(rect.top - self.scroll_y, rect.height))
    }
}
