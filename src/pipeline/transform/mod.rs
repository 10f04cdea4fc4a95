//! Post-processing transforms, in pipeline order.
//!
//! - `shell`: wrap the fragment in a minimal HTML document
//! - `format`: whitespace normalization and indentation
//! - `heading`: heading ids and self-link anchors
//! - `highlight`: syntax highlighting and copy buttons for code blocks

mod format;
mod heading;
mod highlight;
mod shell;

pub use format::Formatter;
pub use heading::{HeadingAnchors, HeadingIds};
pub use highlight::{CodeHighlighter, has_theme, theme_names};
pub use shell::DocumentShell;
