//! Page rendering errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a slug produced no page.
#[derive(Debug, Error)]
pub enum PageError {
    /// No source exists for the slug, or the slug is not a valid name.
    #[error("page `{0}` not found")]
    NotFound(String),

    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("failed to render page `{0}`")]
    Pipeline(String, #[source] anyhow::Error),
}

impl PageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
