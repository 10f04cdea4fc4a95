//! Minimal HTML tree used by the page pipeline.
//!
//! - [`Element`], [`Node`] - owned tree built from Markdown events
//! - [`Document`] - optional doctype plus a root element
//! - [`serialize`] - tree → markup

mod node;
mod serialize;

pub use node::{Document, Element, Node};
pub use serialize::{serialize_children, serialize_document};
