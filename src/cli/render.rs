//! Single-page commands: `render` and `outline`.

use crate::{
    config::SiteConfig,
    log,
    outline::OutlineState,
    page::PageRenderer,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Render `slug` and print the page, or write it to `file`.
pub fn render_page(config: &SiteConfig, slug: &str, file: Option<&Path>) -> Result<()> {
    let page = PageRenderer::new(config).render(slug)?;

    match file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &page.html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log!("render"; "{} -> {}", slug, path.display());
        }
        None => println!("{}", page.html),
    }
    Ok(())
}

/// Print the outline of `slug` as JSON.
pub fn print_outline(config: &SiteConfig, slug: &str, pretty: bool) -> Result<()> {
    let page = PageRenderer::new(config).render(slug)?;
    println!("{}", outline_json(&page.outline, pretty)?);
    Ok(())
}

fn outline_json(outline: &OutlineState, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(outline)?
    } else {
        serde_json::to_string(outline)?
    };
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::HeadingEntry;
    use tempfile::TempDir;

    #[test]
    fn test_outline_json() {
        let outline = OutlineState::new(vec![
            HeadingEntry::new("intro", "Intro"),
            HeadingEntry::new("setup", "Setup"),
        ]);
        assert_eq!(
            outline_json(&outline, false).unwrap(),
            r#"{"headings":[{"id":"intro","text":"Intro"},{"id":"setup","text":"Setup"}],"active_id":null}"#
        );
        assert!(outline_json(&outline, true).unwrap().contains("\n  \"headings\""));
    }

    #[test]
    fn test_render_to_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("intro.md"), "## Hi\n").unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().to_path_buf();

        let out = dir.path().join("out/intro.html");
        render_page(&config, "intro", Some(&out)).unwrap();
        assert!(fs::read_to_string(out).unwrap().contains(r#"<h2 id="hi">"#));
    }

    #[test]
    fn test_unknown_slug_errors() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().to_path_buf();

        let err = render_page(&config, "missing", None).unwrap_err();
        assert_eq!(err.to_string(), "page `missing` not found");
        assert!(print_outline(&config, "missing", false).is_err());
    }
}
