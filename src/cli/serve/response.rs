//! HTTP response handlers.

use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a static file.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a rendered HTML document.
pub fn respond_html(request: Request, status: u16, html: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, status, HTML);
    }
    send_body(request, status, HTML, html.into_bytes())
}

/// Respond with a render failure (500). Nothing of the page is sent.
pub fn respond_render_error(request: Request, error: &anyhow::Error) -> Result<()> {
    let error_str = format!("{error:#}");
    let msg = crate::utils::html::escape(&error_str);
    let body = format!("<html><body><h1>Render Error</h1><pre>{msg}</pre></body></html>");
    respond_html(request, 500, body)
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response = Response::empty(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
