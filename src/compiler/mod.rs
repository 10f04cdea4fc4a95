//! Content compilation.
//!
//! Markdown is the only source format: [`markdown::render_markdown`] turns
//! a file's text into metadata plus an HTML document.

pub mod markdown;

pub use markdown::{RenderedMarkdown, render_markdown};
