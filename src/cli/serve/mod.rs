//! Development server rendering pages on request.
//!
//! | URL               | Response                                  |
//! |-------------------|-------------------------------------------|
//! | `/`               | list of pages                             |
//! | `/<slug>`         | freshly rendered page, 404 if unknown     |
//! | `/images/<path>`  | file under `build.assets`                 |
//! | anything else     | 404 page                                  |
//!
//! Requests are handled one at a time on the calling thread.

mod path;
mod response;

use crate::{
    compiler::markdown::MarkdownMetaExtractor,
    config::SiteConfig,
    core::{is_shutdown, register_server},
    debug,
    embed::serve::{INDEX_HTML, IndexVars},
    log,
    page::{ContentSource, PageError, PageRenderer},
    utils::html::{escape, escape_attr},
};
use anyhow::Result;
use path::Route;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tiny_http::{Request, Server};

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Bind, then serve until Ctrl+C.
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "http://{}", addr);

    let renderer = PageRenderer::new(config);
    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &renderer, config) {
            log!("serve"; "request error: {e}");
        }
    }
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    let mut last_error = None;
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(e) => last_error = Some(e),
        }
    }
    Err(anyhow::anyhow!(
        "Failed to bind after {} attempts (ports {}-{}): {}",
        MAX_PORT_RETRIES,
        base_port,
        base_port.saturating_add(MAX_PORT_RETRIES - 1),
        last_error.map(|e| e.to_string()).unwrap_or_default()
    ))
}

/// Handle a single HTTP request
fn handle_request(request: Request, renderer: &PageRenderer, config: &SiteConfig) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    let route = Route::from_url(request.url());
    debug!("serve"; "{} {} -> {:?}", request.method(), request.url(), route);

    match route {
        Route::Index => response::respond_html(request, 200, render_index(renderer, config)?),
        Route::Image(rel) => match path::resolve_path(&rel, &config.build.assets) {
            Some(file) => response::respond_file(request, &file),
            None => respond_not_found(request, renderer, None),
        },
        Route::Page(slug) => match renderer.render(&slug) {
            Ok(page) => response::respond_html(request, 200, page.html),
            Err(PageError::NotFound(_)) => respond_not_found(request, renderer, Some(&slug)),
            Err(err) => {
                let err = anyhow::Error::new(err);
                log!("serve"; "{err:#}");
                response::respond_render_error(request, &err)
            }
        },
        Route::NotFound => respond_not_found(request, renderer, None),
    }
}

fn respond_not_found(request: Request, renderer: &PageRenderer, slug: Option<&str>) -> Result<()> {
    response::respond_html(request, 404, renderer.render_not_found(slug))
}

/// Page list for `/`, titled from each page's frontmatter.
fn render_index(renderer: &PageRenderer, config: &SiteConfig) -> Result<String> {
    let source = renderer.source();
    let mut items = String::new();

    for slug in source.enumerate()? {
        let title = index_title(source, &slug).unwrap_or_else(|| slug.clone());
        items.push_str(&format!(
            "<li><a href=\"/{}\">{}</a></li>\n",
            escape_attr(&slug),
            escape(&title)
        ));
    }
    if items.is_empty() {
        items.push_str("<li class=\"empty\">No pages yet.</li>\n");
    }

    let site = &config.site;
    let title = if site.title.is_empty() { "Pages" } else { site.title.as_str() };
    Ok(INDEX_HTML.render(&IndexVars {
        lang: &escape(&site.lang),
        title: &escape(title),
        items: &items,
    }))
}

/// Frontmatter title of `slug`. Unreadable pages are listed by slug.
fn index_title(source: &ContentSource, slug: &str) -> Option<String> {
    let markdown = source
        .read(slug)
        .map_err(|err| debug!("serve"; "index: {err}"))
        .ok()?;
    match MarkdownMetaExtractor.extract(&markdown) {
        Ok((meta, _)) => meta.title,
        Err(err) => {
            debug!("serve"; "index: {slug}: {err:#}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_index_lists_titles() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.md"), "---\ntitle: Beta & Co\n---\n").unwrap();
        fs::write(dir.path().join("a.md"), "no frontmatter").unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().to_path_buf();

        let html = render_index(&PageRenderer::new(&config), &config).unwrap();
        let a = html.find(r#"<li><a href="/a">a</a></li>"#).unwrap();
        let b = html.find(r#"<li><a href="/b">Beta &amp; Co</a></li>"#).unwrap();
        assert!(a < b);
        assert!(html.contains("<title>Pages</title>"));
    }

    #[test]
    fn test_index_lists_unparsable_page_by_slug() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.md"), "+++\n= broken\n+++\n").unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().to_path_buf();

        let renderer = PageRenderer::new(&config);
        assert_eq!(index_title(renderer.source(), "broken"), None);
        assert_eq!(index_title(renderer.source(), "gone"), None);

        let html = render_index(&renderer, &config).unwrap();
        assert!(html.contains(r#"<li><a href="/broken">broken</a></li>"#));
    }

    #[test]
    fn test_index_empty() {
        let dir = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.build.content = dir.path().join("missing");

        let html = render_index(&PageRenderer::new(&config), &config).unwrap();
        assert!(html.contains("No pages yet."));
    }
}
