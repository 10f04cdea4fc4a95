//! Utility modules shared across the renderer.

pub mod html;
pub mod mime;
pub mod slug;
