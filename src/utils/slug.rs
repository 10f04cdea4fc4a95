//! Heading anchor slugs.
//!
//! GitHub-compatible: lowercase, strip everything except letters, marks,
//! numbers, connector punctuation, spaces and hyphens, then spaces → `-`.
//! Repeated slugs in one document get `-1`, `-2`, ... suffixes.

use std::sync::LazyLock;

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::config::SlugMode;

/// Characters removed from anchors.
static STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{M}\p{N}\p{Pc} \-]").expect("valid slug pattern"));

/// Fallback for headings whose text slugifies to nothing.
const EMPTY_SLUG: &str = "heading";

/// Slugify a single piece of text (no de-duplication).
pub fn slugify(text: &str, mode: &SlugMode) -> String {
    let text = match mode {
        SlugMode::Safe => text.trim().to_lowercase(),
        SlugMode::Ascii => deunicode::deunicode(text.trim()).to_lowercase(),
    };
    STRIP.replace_all(&text, "").replace(' ', "-")
}

/// Per-document slug generator that keeps anchors unique.
#[derive(Debug, Default)]
pub struct Slugger {
    occurrences: FxHashMap<String, usize>,
    mode: SlugMode,
}

impl Slugger {
    pub fn new(mode: SlugMode) -> Self {
        Self {
            occurrences: FxHashMap::default(),
            mode,
        }
    }

    /// Mark an id that already exists in the document as taken.
    pub fn reserve(&mut self, id: &str) {
        self.occurrences.entry(id.to_string()).or_insert(0);
    }

    /// Generate a unique slug for `text`.
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = slugify(text, &self.mode);
        if base.is_empty() {
            base = EMPTY_SLUG.to_string();
        }

        let mut result = base.clone();
        while self.occurrences.contains_key(&result) {
            let count = self.occurrences.entry(base.clone()).or_insert(0);
            *count += 1;
            result = format!("{base}-{count}");
        }
        self.occurrences.insert(result.clone(), 0);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Hello World", &SlugMode::Safe), "hello-world");
        assert_eq!(slugify("What's new?", &SlugMode::Safe), "whats-new");
        assert_eq!(slugify("snake_case stays", &SlugMode::Safe), "snake_case-stays");
    }

    #[test]
    fn test_slugify_unicode_modes() {
        assert_eq!(slugify("Café Crème", &SlugMode::Safe), "café-crème");
        assert_eq!(slugify("Café Crème", &SlugMode::Ascii), "cafe-creme");
    }

    #[test]
    fn test_slugger_dedupes() {
        let mut slugger = Slugger::new(SlugMode::Safe);
        assert_eq!(slugger.slug("Setup"), "setup");
        assert_eq!(slugger.slug("Setup"), "setup-1");
        assert_eq!(slugger.slug("Setup"), "setup-2");
        assert_eq!(slugger.slug("Setup 1"), "setup-1-1");
    }

    #[test]
    fn test_slugger_respects_reserved() {
        let mut slugger = Slugger::new(SlugMode::Safe);
        slugger.reserve("intro");
        assert_eq!(slugger.slug("Intro"), "intro-1");
    }

    #[test]
    fn test_slugger_empty_text() {
        let mut slugger = Slugger::new(SlugMode::Safe);
        assert_eq!(slugger.slug("!!!"), "heading");
        assert_eq!(slugger.slug(""), "heading-1");
    }
}
