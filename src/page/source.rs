//! Slug to Markdown source mapping.
//!
//! One file `<root>/<slug>.md` per page. Slugs are plain file stems, so
//! anything that could address another directory is rejected up front.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::PageError;
use crate::config::SiteConfig;

const EXTENSION: &str = "md";

#[derive(Debug, Clone)]
pub struct ContentSource {
    root: PathBuf,
}

impl ContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn from_config(config: &SiteConfig) -> Self {
        Self::new(&config.build.content)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether `slug` names a single file inside the content root.
    pub fn is_valid_slug(slug: &str) -> bool {
        !slug.is_empty() && !slug.starts_with('.') && !slug.contains(['/', '\\', '\0'])
    }

    /// Path of the source file for `slug`, if it exists.
    pub fn resolve(&self, slug: &str) -> Option<PathBuf> {
        if !Self::is_valid_slug(slug) {
            return None;
        }
        let path = self.root.join(format!("{slug}.{EXTENSION}"));
        path.is_file().then_some(path)
    }

    /// Read the Markdown source for `slug`.
    pub fn read(&self, slug: &str) -> Result<String, PageError> {
        let path = self
            .resolve(slug)
            .ok_or_else(|| PageError::NotFound(slug.to_string()))?;
        fs::read_to_string(&path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PageError::NotFound(slug.to_string()),
            _ => PageError::Read(path, err),
        })
    }

    /// Every slug in the content root, sorted.
    ///
    /// A missing content directory has no pages.
    pub fn enumerate(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to list {}", self.root.display()))?;

        let mut slugs = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if !path.is_file() || path.extension().is_none_or(|ext| ext != EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str())
                && Self::is_valid_slug(stem)
            {
                slugs.push(stem.to_string());
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}
