//! Page types: metadata, content lookup, and composition.
//!
//! ```text
//! slug ──► ContentSource::read ──► render_markdown ──► PageRenderer
//!                                                        │
//!                     extract_headings ◄── body ◄────────┤
//!                     render_outline  ──► sidebar ──► PAGE_HTML
//! ```

mod error;
mod meta;
mod render;
mod source;

pub use error::PageError;
pub use meta::PageMeta;
pub use render::{PageRenderer, RenderedPage};
pub use source::ContentSource;

/// A JSON object map for storing arbitrary metadata fields.
pub type JsonMap = serde_json::Map<String, serde_json::Value>;
