//! Decorative HTML bodies for non-success responses.

use crate::http::mime::TEXT_HTML;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// Renders error pages that embed an image keyed by status code.
#[derive(Debug, Clone)]
pub struct ErrorPages {
    image_base_url: String,
}

impl Default for ErrorPages {
    fn default() -> Self {
        Self::new("https://http.cat")
    }
}

impl ErrorPages {
    pub fn new(image_base_url: impl Into<String>) -> Self {
        let mut image_base_url = image_base_url.into();
        while image_base_url.ends_with('/') {
            image_base_url.pop();
        }
        Self { image_base_url }
    }

    pub fn image_url(&self, status: StatusCode) -> String {
        format!("{}/{}.jpg", self.image_base_url, status.as_u16())
    }

    pub fn body(&self, status: StatusCode) -> Vec<u8> {
        format!(
            "<!DOCTYPE html><html lang=\"en\"><body><img src=\"{}\" /></body></html>",
            self.image_url(status)
        )
        .into_bytes()
    }

    /// A `text/html` response carrying the page for `status`.
    pub fn response(&self, status: StatusCode) -> Response {
        ResponseBuilder::new(status)
            .content_type(TEXT_HTML)
            .body(self.body(status))
            .build()
    }
}
