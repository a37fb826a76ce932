use crate::http::request::{header_value, Method, Request};
use percent_encoding::percent_decode_str;
use url::Url;

/// Header blocks may grow to this many bytes before the terminator shows up.
pub const DEFAULT_MAX_HEADER_BYTES: usize = 64 * 1024;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const BASE_URL: &str = "http://localhost/";

#[derive(Debug)]
pub enum ParseError {
    /// Header block not terminated yet, or the announced body is still short.
    Incomplete,
    HeadersTooLarge,
}

pub fn parse_http_request(buf: &[u8]) -> Result<(Request, usize), ParseError> {
    parse_http_request_limited(buf, DEFAULT_MAX_HEADER_BYTES)
}

/// Parses one request from the start of `buf`.
///
/// Returns the request and the number of bytes it occupied. Callers keep
/// appending deliveries to `buf` and retry while this returns `Incomplete`.
pub fn parse_http_request_limited(
    buf: &[u8],
    max_header_bytes: usize,
) -> Result<(Request, usize), ParseError> {

    // Look for header/body separator
    let headers_end = match find_headers_end(buf) {
        Some(end) => end,
        None if buf.len() > max_header_bytes => return Err(ParseError::HeadersTooLarge),
        None => return Err(ParseError::Incomplete),
    };
    let header_bytes = &buf[..headers_end];
    let body_start = headers_end + HEADER_TERMINATOR.len();
    let body_bytes = &buf[body_start..];

    // Non-UTF-8 bytes (obs-text in header values) decode lossily
    let headers_str = String::from_utf8_lossy(header_bytes);

    let mut lines = headers_str.split("\r\n");

    // Request line; a short line leaves the method empty and the target at "/"
    let request_line = lines.next().unwrap_or("");
    let mut parts = request_line.split(' ');
    let method = Method::from_token(parts.next().unwrap_or(""));
    let target = parts.next().unwrap_or("").to_string();

    let header_lines: Vec<String> = lines.map(str::to_string).collect();

    // Body: framed by a numeric Content-Length, else whatever has arrived
    let content_length = header_value(&header_lines, "Content-Length")
        .and_then(|v| v.parse::<usize>().ok());

    let body_len = match content_length {
        Some(len) if body_bytes.len() < len => return Err(ParseError::Incomplete),
        Some(len) => len,
        None => body_bytes.len(),
    };

    let (path, query) = split_target(&target);

    let request = Request {
        method,
        target,
        path,
        query,
        header_lines,
        body: body_bytes[..body_len].to_vec(),
    };

    Ok((request, body_start + body_len))
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

/// Splits a request target into its percent-decoded path and raw query.
fn split_target(target: &str) -> (String, Option<String>) {
    match Url::parse(BASE_URL).and_then(|base| base.join(target)) {
        Ok(url) => (decode_path(url.path()), url.query().map(str::to_string)),
        Err(_) => {
            let (path, query) = match target.split_once('?') {
                Some((path, query)) => (path, Some(query.to_string())),
                None => (target, None),
            };
            let path = if path.is_empty() { "/" } else { path };
            (decode_path(path), query)
        }
    }
}

fn decode_path(path: &str) -> String {
    percent_decode_str(path).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let (parsed, consumed) = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.header("Host"), Some("example.com"));
        assert_eq!(consumed, req.len());
    }

    #[test]
    fn split_target_strips_query_and_decodes() {
        let (path, query) = split_target("/my%20notes.txt?v=2");
        assert_eq!(path, "/my notes.txt");
        assert_eq!(query.as_deref(), Some("v=2"));
    }

    #[test]
    fn split_target_empty_is_root() {
        assert_eq!(split_target(""), ("/".to_string(), None));
    }
}
