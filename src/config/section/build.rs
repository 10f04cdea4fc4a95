//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! content = "content"        # one <slug>.md per page
//! output = "public"          # static output directory
//! assets = "public/images"   # served under /images/ by `serve`
//! images = "/images/"        # prefix for relative Markdown image paths
//!
//! [build.slug]
//! anchor = "safe"            # safe | ascii
//!
//! [build.highlight]
//! theme = "base16-ocean.dark"
//! copy_feedback_ms = 3000
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Heading anchor slug mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SlugMode {
    /// Remove punctuation, preserve Unicode letters (default).
    #[default]
    Safe,
    /// Transliterate Unicode → ASCII first.
    Ascii,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Slug mode for generated heading ids.
    pub anchor: SlugMode,
}

/// Code block highlighting settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name.
    pub theme: String,
    /// How long the copy button shows its "copied" state.
    pub copy_feedback_ms: u64,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            copy_feedback_ms: 3_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    pub content: PathBuf,
    pub output: PathBuf,
    pub assets: PathBuf,
    /// Prefix joined onto relative image references.
    pub images: String,
    pub slug: SlugConfig,
    pub highlight: HighlightConfig,

    /// Remove the output directory before building (CLI only).
    #[serde(skip)]
    pub clean: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            assets: "public/images".into(),
            images: "/images/".to_string(),
            slug: SlugConfig::default(),
            highlight: HighlightConfig::default(),
            clean: false,
        }
    }
}

impl BuildSectionConfig {
    const IMAGES: FieldPath = FieldPath::new("build.images");
    const THEME: FieldPath = FieldPath::new("build.highlight.theme");

    /// Resolve relative directories against the project root.
    pub fn normalize(&mut self, root: &Path) {
        self.content = crate::config::normalize_path(&root.join(&self.content));
        self.output = crate::config::normalize_path(&root.join(&self.output));
        self.assets = crate::config::normalize_path(&root.join(&self.assets));
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.images.trim().is_empty() {
            diag.error_with_hint(
                Self::IMAGES,
                "image prefix must not be empty",
                "use \"/images/\" or \"./\" to keep paths as written",
            );
        }

        if !crate::pipeline::has_theme(&self.highlight.theme) {
            diag.error_with_hint(
                Self::THEME,
                format!("unknown highlight theme `{}`", self.highlight.theme),
                format!(
                    "available: {}",
                    crate::pipeline::theme_names().join(", ")
                ),
            );
        }
    }
}
