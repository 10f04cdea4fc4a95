//! Configuration section definitions.
//!
//! Each module corresponds to a section in `site.toml`:
//!
//! | Module    | TOML Section | Purpose                                 |
//! |-----------|--------------|-----------------------------------------|
//! | `build`   | `[build]`    | Content/output paths, slugs, highlight  |
//! | `outline` | `[outline]`  | Scroll-tracked outline heuristics       |
//! | `serve`   | `[serve]`    | Development server                      |
//! | `site`    | `[site]`     | Site title, language, labels            |

mod build;
mod outline;
mod serve;
mod site;

pub use build::{BuildSectionConfig, HighlightConfig, SlugConfig, SlugMode};
pub use outline::OutlineConfig;
pub use serve::ServeConfig;
pub use site::SiteSectionConfig;
