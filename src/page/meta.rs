//! Page metadata from Markdown frontmatter.

use serde::{Deserialize, Serialize};

use super::JsonMap;

/// Frontmatter of one page.
///
/// # Standard Fields
///
/// | Field         | Description                      |
/// |---------------|----------------------------------|
/// | `title`       | Page heading and `<title>`       |
/// | `description` | Quoted summary under the title   |
/// | `author`      | Byline ("By ...")                |
/// | `date`        | Display date, kept as written    |
///
/// Values are opaque display strings. Any other key lands in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap,
}

impl PageMeta {
    /// Set a standard field by name. Returns `false` for non-standard keys.
    pub fn set_standard(&mut self, key: &str, value: String) -> bool {
        let slot = match key {
            "title" => &mut self.title,
            "description" => &mut self.description,
            "author" => &mut self.author,
            "date" => &mut self.date,
            _ => return false,
        };
        *slot = Some(value);
        true
    }
}

/// Display form of an optional field: absent renders as empty.
pub fn display(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_meta_default() {
        let meta = PageMeta::default();
        assert!(meta.title.is_none());
        assert_eq!(display(&meta.author), "");
        assert!(meta.extra.is_empty());
    }

    #[test]
    fn test_set_standard() {
        let mut meta = PageMeta::default();
        assert!(meta.set_standard("author", "Ada".into()));
        assert!(!meta.set_standard("tags", "x".into()));
        assert_eq!(display(&meta.author), "Ada");
    }

    #[test]
    fn test_page_meta_serializes_extra_inline() {
        let mut meta = PageMeta {
            title: Some("Hello".to_string()),
            ..Default::default()
        };
        meta.extra.insert("draft".into(), serde_json::Value::Bool(true));
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["title"], "Hello");
        assert_eq!(json["draft"], true);
    }
}
