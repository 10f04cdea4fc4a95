//! Request URL routing and file resolution.

use std::path::{Path, PathBuf};

/// Prefix under which `build.assets` is served.
const IMAGES: &str = "images";

/// What a request URL addresses.
#[derive(Debug, PartialEq, Eq)]
pub enum Route {
    /// `/`: list of pages
    Index,
    /// `/images/<path>`: file under the assets directory
    Image(String),
    /// `/<slug>` or `/<slug>/`
    Page(String),
    NotFound,
}

impl Route {
    pub fn from_url(url: &str) -> Self {
        let clean = normalize_url(url);
        if clean.is_empty() {
            return Self::Index;
        }
        if let Some(rest) = clean.strip_prefix(IMAGES).and_then(|r| r.strip_prefix('/')) {
            return Self::Image(rest.to_string());
        }
        if clean.contains('/') {
            return Self::NotFound;
        }
        Self::Page(clean)
    }
}

/// Resolve a relative URL path to a file under `serve_root`.
pub fn resolve_path(rel: &str, serve_root: &Path) -> Option<PathBuf> {
    // Reject paths with suspicious patterns early
    if rel.contains("..") {
        return None;
    }

    let local = serve_root.join(rel);

    // Canonicalize to resolve symlinks and verify path is under serve_root
    let canonical = local.canonicalize().ok()?;
    let root_canonical = serve_root.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    canonical.is_file().then_some(canonical)
}

/// Normalize URL: decode, strip query string and fragment, trim slashes
fn normalize_url(url: &str) -> String {
    use percent_encoding::percent_decode_str;

    let path = url.split(['?', '#']).next().unwrap_or(url);
    let decoded = percent_decode_str(path)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .unwrap_or_default();

    decoded.trim_matches('/').to_string()
}
