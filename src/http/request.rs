use std::fmt;

/// HTTP request methods.
///
/// The store acts on six methods. Any other token, including an empty one
/// from a truncated request line, is kept as `Other` so it can be answered
/// with 405 Method Not Allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Read a file
    GET,
    /// HEAD - Like GET but without the response body
    HEAD,
    /// PUT - Create or overwrite a file
    PUT,
    /// POST - Append to a plain-text file
    POST,
    /// DELETE - Remove a file
    DELETE,
    /// OPTIONS - List the methods allowed on a path
    OPTIONS,
    /// Anything else, verbatim
    Other(String),
}

/// Represents a parsed HTTP request from a client.
///
/// Built once per connection by the parser and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Request {
    /// The HTTP method
    pub method: Method,
    /// The request target exactly as sent (e.g. "/my%20notes.txt?v=2")
    pub target: String,
    /// Percent-decoded path without the query (e.g. "/my notes.txt")
    pub path: String,
    /// Query string, if the target had one
    pub query: Option<String>,
    /// Header lines after the request line, unparsed and in order
    pub header_lines: Vec<String>,
    /// Request body
    pub body: Vec<u8>,
}

/// Builder for constructing Request objects.
pub struct RequestBuilder {
    method: Option<Method>,
    target: Option<String>,
    path: Option<String>,
    query: Option<String>,
    header_lines: Vec<String>,
    body: Vec<u8>,
}

impl Method {
    /// Maps a request-line token to a method.
    ///
    /// Matching is case-sensitive, as HTTP method names are.
    ///
    /// # Example
    ///
    /// ```
    /// # use depot::http::request::Method;
    /// assert_eq!(Method::from_token("GET"), Method::GET);
    /// assert_eq!(Method::from_token("get"), Method::Other("get".to_string()));
    /// ```
    pub fn from_token(s: &str) -> Self {
        match s {
            "GET" => Method::GET,
            "HEAD" => Method::HEAD,
            "PUT" => Method::PUT,
            "POST" => Method::POST,
            "DELETE" => Method::DELETE,
            "OPTIONS" => Method::OPTIONS,
            other => Method::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Method::GET => "GET",
            Method::HEAD => "HEAD",
            Method::PUT => "PUT",
            Method::POST => "POST",
            Method::DELETE => "DELETE",
            Method::OPTIONS => "OPTIONS",
            Method::Other(token) => token,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            method: None,
            target: None,
            path: None,
            query: None,
            header_lines: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn header_line(mut self, line: impl Into<String>) -> Self {
        self.header_lines.push(line.into());
        self
    }

    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Target defaults to the path (plus query) when not given.
    pub fn build(self) -> Result<Request, &'static str> {
        let path = self.path.ok_or("path missing")?;
        let target = self.target.unwrap_or_else(|| match &self.query {
            Some(q) => format!("{}?{}", path, q),
            None => path.clone(),
        });

        Ok(Request {
            method: self.method.ok_or("method missing")?,
            target,
            path,
            query: self.query,
            header_lines: self.header_lines,
            body: self.body,
        })
    }
}

impl Request {
    /// Looks up a header value by case-insensitive name.
    ///
    /// Only framing uses this; the dispatcher never reads headers.
    pub fn header(&self, name: &str) -> Option<&str> {
        header_value(&self.header_lines, name)
    }
}

pub(crate) fn header_value<'a>(lines: &'a [String], name: &str) -> Option<&'a str> {
    lines.iter().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(name)
            .then(|| value.trim())
    })
}
