//! Image path prefixing for Markdown image syntax.

use pulldown_cmark::{Event, Tag};

/// Whether `url` must be left as written (scheme, protocol-relative,
/// root-absolute, fragment or `data:` URI).
fn is_absolute(url: &str) -> bool {
    if url.starts_with('/') || url.starts_with('#') {
        return true;
    }
    // scheme ":" per RFC 3986, checked before the first path separator
    match url.find(':') {
        Some(pos) => {
            let scheme = &url[..pos];
            !scheme.is_empty()
                && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Join `prefix` and a relative image `url`.
///
/// Returns `None` when the url is absolute and must stay untouched.
pub fn prefix_image_url(url: &str, prefix: &str) -> Option<String> {
    if url.is_empty() || is_absolute(url) {
        return None;
    }
    let relative = url.trim_start_matches("./");
    if prefix.ends_with('/') {
        Some(format!("{prefix}{relative}"))
    } else {
        Some(format!("{prefix}/{relative}"))
    }
}

/// Rewrite the destination of every image start event.
pub fn prefix_images<'a>(
    events: impl Iterator<Item = Event<'a>>,
    prefix: &str,
) -> impl Iterator<Item = Event<'a>> {
    events.map(move |event| match event {
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => {
            let dest_url = prefix_image_url(&dest_url, prefix)
                .map(Into::into)
                .unwrap_or(dest_url);
            Event::Start(Tag::Image {
                link_type,
                dest_url,
                title,
                id,
            })
        }
        other => other,
    })
}
