//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Blog"               # appended to every page <title>
//! lang = "en"                     # <html lang>
//! placeholder_title = "👋🌍"      # title of the bare Markdown document shell
//! outline_title = "On This Page"  # sidebar heading
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    pub title: String,
    pub lang: String,
    pub placeholder_title: String,
    pub outline_title: String,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            lang: "en".to_string(),
            placeholder_title: "👋🌍".to_string(),
            outline_title: "On This Page".to_string(),
        }
    }
}
