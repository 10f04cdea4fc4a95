//! Frontmatter extraction from YAML-like (`---`) or TOML (`+++`) blocks.

use anyhow::{Context, Result};
use serde_json::Value;

use crate::page::{JsonMap, PageMeta};

/// Markdown metadata extractor.
pub struct MarkdownMetaExtractor;

impl MarkdownMetaExtractor {
    /// Split `content` into metadata and Markdown body.
    ///
    /// Content without a frontmatter block yields default metadata and the
    /// whole input as body. Malformed TOML is an error.
    pub fn extract<'a>(&self, content: &'a str) -> Result<(PageMeta, &'a str)> {
        match Self::detect_frontmatter(content) {
            Some((fm, body, true)) => Ok((Self::parse_toml(fm)?, body)),
            Some((fm, body, false)) => Ok((Self::parse_yaml_like(fm), body)),
            None => Ok((PageMeta::default(), content)),
        }
    }

    /// Parse simple YAML-like frontmatter (`key: value`, optional quotes).
    fn parse_yaml_like(content: &str) -> PageMeta {
        let mut meta = PageMeta::default();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            if !meta.set_standard(&key.to_lowercase(), unquote(value).to_string()) {
                meta.extra.insert(key.to_string(), parse_yaml_value(value));
            }
        }

        meta
    }

    /// Parse TOML frontmatter. Standard fields accept any scalar.
    fn parse_toml(content: &str) -> Result<PageMeta> {
        let table: toml::Table = toml::from_str(content).context("invalid TOML frontmatter")?;
        let mut meta = PageMeta::default();

        for (key, value) in table {
            let display = match &value {
                toml::Value::String(s) => Some(s.clone()),
                toml::Value::Datetime(d) => Some(d.to_string()),
                toml::Value::Integer(_) | toml::Value::Float(_) | toml::Value::Boolean(_) => {
                    Some(value.to_string())
                }
                toml::Value::Array(_) | toml::Value::Table(_) => None,
            };
            let standard = display.is_some_and(|d| meta.set_standard(&key.to_lowercase(), d));
            if !standard {
                meta.extra.insert(key, toml_to_json(value));
            }
        }

        Ok(meta)
    }

    /// Detect and extract frontmatter.
    /// Returns `(frontmatter, body, is_toml)` if found.
    ///
    /// Both fences must be lines of their own: `----` or `---foo` neither
    /// open nor close a block.
    fn detect_frontmatter(content: &str) -> Option<(&str, &str, bool)> {
        let trimmed = content.trim_start_matches('\u{feff}').trim_start();

        for (fence, is_toml) in [("---", false), ("+++", true)] {
            let Some(rest) = trimmed.strip_prefix(fence) else {
                continue;
            };
            let (opening, block) = rest.split_once('\n').unwrap_or((rest, ""));
            if !opening.trim().is_empty() {
                return None;
            }

            let mut offset = 0;
            for line in block.split_inclusive('\n') {
                if line.trim_end() == fence {
                    let fm = block[..offset].trim();
                    let body = block[offset + line.len()..].trim_start_matches(['\r', '\n']);
                    return Some((fm, body, is_toml));
                }
                offset += line.len();
            }
            return None;
        }

        None
    }
}

/// Strip one pair of matching surrounding quotes.
fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if s.len() >= 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}

/// Parse a YAML-like value string to a JSON value.
///
/// Supports booleans, `null`/`~`, numbers, quoted strings, `[a, b]` and
/// bare `a, b` lists; everything else is a string.
fn parse_yaml_value(s: &str) -> Value {
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if s.eq_ignore_ascii_case("null") || s == "~" || s.is_empty() {
        return Value::Null;
    }
    if s.starts_with(['"', '\'']) {
        return Value::String(unquote(s).to_string());
    }
    if let Ok(n) = s.parse::<i64>() {
        return Value::Number(n.into());
    }
    if let Ok(n) = s.parse::<f64>()
        && let Some(num) = serde_json::Number::from_f64(n)
    {
        return Value::Number(num);
    }

    let list = s
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .or_else(|| s.contains(',').then_some(s));
    if let Some(items) = list {
        return Value::Array(
            items
                .split(',')
                .map(|item| unquote(item.trim()))
                .filter(|item| !item.is_empty())
                .map(|item| Value::String(item.to_string()))
                .collect(),
        );
    }

    Value::String(s.to_string())
}

fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(i) => Value::Number(i.into()),
        toml::Value::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::String(d.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect::<JsonMap>(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn extract(content: &str) -> (PageMeta, &str) {
        MarkdownMetaExtractor.extract(content).unwrap()
    }

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntitle: \"Hello: World\"\ndescription: 'A post'\nauthor: Ada\ndate: 2024-01-01\n---\n\n# Body";
        let (meta, body) = extract(content);

        assert_eq!(meta.title.as_deref(), Some("Hello: World"));
        assert_eq!(meta.description.as_deref(), Some("A post"));
        assert_eq!(meta.author.as_deref(), Some("Ada"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntitle = \"Hello\"\ndate = 2024-01-01\ntags = [\"a\", \"b\"]\n+++\n\n# Body";
        let (meta, body) = extract(content);

        assert_eq!(meta.title.as_deref(), Some("Hello"));
        assert_eq!(meta.date.as_deref(), Some("2024-01-01"));
        assert_eq!(meta.extra.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_malformed_toml_fails() {
        let content = "+++\ntitle = \n+++\nbody";
        assert!(MarkdownMetaExtractor.extract(content).is_err());
    }

    #[test]
    fn test_no_frontmatter() {
        let (meta, body) = extract("# Just content");
        assert_eq!(meta, PageMeta::default());
        assert_eq!(body, "# Just content");
    }

    #[test]
    fn test_unclosed_frontmatter_is_body() {
        let (meta, body) = extract("---\ntitle: x\n\n# Body");
        assert!(meta.title.is_none());
        assert!(body.starts_with("---"));
    }

    #[test]
    fn test_fence_must_be_whole_line() {
        let content = "---\ntitle: Rules\n----\nnote: ---inline\n---foo\n---\nBody";
        let (meta, body) = extract(content);
        assert_eq!(meta.title.as_deref(), Some("Rules"));
        assert_eq!(meta.extra.get("note"), Some(&json!("---inline")));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_thematic_break_is_not_frontmatter() {
        let (meta, body) = extract("----\ntitle: x\n---\n");
        assert!(meta.title.is_none());
        assert!(body.starts_with("----"));
    }

    #[test]
    fn test_crlf_fences() {
        let (meta, body) = extract("---\r\ntitle: Win\r\n---\r\n\r\nBody");
        assert_eq!(meta.title.as_deref(), Some("Win"));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_yaml_extra_fields() {
        let content = "---\ntitle: Hello\ncustom: world\ncount: 42\nflag: true\nitems: [x, y, z]\nquoted: \"7\"\n---\n";
        let (meta, _) = extract(content);

        assert_eq!(meta.extra.get("custom"), Some(&json!("world")));
        assert_eq!(meta.extra.get("count"), Some(&json!(42)));
        assert_eq!(meta.extra.get("flag"), Some(&json!(true)));
        assert_eq!(meta.extra.get("items"), Some(&json!(["x", "y", "z"])));
        assert_eq!(meta.extra.get("quoted"), Some(&json!("7")));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let (meta, _) = extract("---\ntitle: Only a title\n---\ntext");
        assert!(meta.description.is_none());
        assert!(meta.author.is_none());
        assert!(meta.date.is_none());
    }
}
