//! MIME type detection based on file extensions.

use std::path::Path;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const OCTET_STREAM: &str = "application/octet-stream";

static MIME_TYPES: &[(&str, &str)] = &[
    ("html", TEXT_HTML),
    ("htm", TEXT_HTML),
    ("txt", TEXT_PLAIN),
    ("css", "text/css"),
    ("js", "text/javascript"),
    ("json", "application/json"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("pdf", "application/pdf"),
];

/// Returns the content type for `path`, judged by its extension alone.
///
/// Unknown or missing extensions fall back to `application/octet-stream`.
///
/// # Example
///
/// ```
/// # use depot::http::mime::content_type_for;
/// assert_eq!(content_type_for("public/notes.TXT"), "text/plain");
/// assert_eq!(content_type_for("public/archive"), "application/octet-stream");
/// ```
pub fn content_type_for(path: impl AsRef<Path>) -> &'static str {
    let Some(ext) = path.as_ref().extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };
    let ext = ext.to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
        .unwrap_or(OCTET_STREAM)
}

pub fn is_plain_text(path: impl AsRef<Path>) -> bool {
    content_type_for(path) == TEXT_PLAIN
}
