use crate::http::mime::TEXT_PLAIN;

/// HTTP status codes the store can answer with.
///
/// - `Ok` (200): Request successful
/// - `NotFound` (404): File absent, unreadable, or outside the root
/// - `MethodNotAllowed` (405): Method not recognised
/// - `UnsupportedMediaType` (415): POST to a file that is not plain text
/// - `InternalServerError` (500): Write or append failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 404 Not Found
    NotFound,
    /// 405 Method Not Allowed
    MethodNotAllowed,
    /// 415 Unsupported Media Type
    UnsupportedMediaType,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use depot::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::UnsupportedMediaType.as_u16(), 415);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::NotFound => 404,
            StatusCode::MethodNotAllowed => 405,
            StatusCode::UnsupportedMediaType => 415,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::NotFound => "Not Found",
            StatusCode::MethodNotAllowed => "Method Not Allowed",
            StatusCode::UnsupportedMediaType => "Unsupported Media Type",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// A response ready to be serialized.
///
/// There is no Content-Length field: the writer derives it from `body`, so
/// the announced length always matches the bytes that follow.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub content_type: String,
    /// Headers written after Content-Type and Content-Length, in order
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Announce the body's length but do not send it (HEAD)
    pub omit_body: bool,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```
/// # use depot::http::response::{ResponseBuilder, StatusCode};
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Allow", "GET, HEAD")
///     .build();
/// assert_eq!(response.header("Allow"), Some("GET, HEAD"));
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    content_type: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    omit_body: bool,
}

impl ResponseBuilder {
    /// Creates a new builder; the content type starts as `text/plain`.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN.to_string(),
            headers: Vec::new(),
            body: Vec::new(),
            omit_body: false,
        }
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Adds or replaces an extra header.
    ///
    /// `Content-Type` is routed to [`ResponseBuilder::content_type`];
    /// `Content-Length` is ignored since it always comes from the body.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let key = key.into();
        let value = value.into();

        if key.eq_ignore_ascii_case("Content-Type") {
            self.content_type = value;
        } else if !key.eq_ignore_ascii_case("Content-Length") {
            self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&key));
            self.headers.push((key, value));
        }
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    pub fn omit_body(mut self) -> Self {
        self.omit_body = true;
        self
    }

    pub fn build(self) -> Response {
        Response {
            status: self.status,
            content_type: self.content_type,
            headers: self.headers,
            body: self.body,
            omit_body: self.omit_body,
        }
    }
}

impl Response {
    /// 200 OK with the given content type and body.
    pub fn ok(content_type: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        ResponseBuilder::new(StatusCode::Ok)
            .content_type(content_type)
            .body(body)
            .build()
    }

    /// 200 OK with a short plain-text message.
    pub fn text(message: &str) -> Self {
        Self::ok(TEXT_PLAIN, message.as_bytes())
    }

    /// Value of the Content-Length header this response will carry.
    pub fn content_length(&self) -> usize {
        self.body.len()
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
