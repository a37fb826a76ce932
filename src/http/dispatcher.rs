use std::path::Path;

use tracing::{debug, info, warn};

use crate::http::error_page::ErrorPages;
use crate::http::mime::{content_type_for, is_plain_text};
use crate::http::request::{Method, Request};
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::storage::{PathResolver, Storage, StoreError, WriteMode};

/// Turns one parsed request into one response by acting on the store.
///
/// Holds no per-request state; every call stands alone.
pub struct Dispatcher<S> {
    store: S,
    resolver: PathResolver,
    error_pages: ErrorPages,
}

/// Methods allowed on `path`: the base set, plus POST for plain-text files.
pub fn allowed_methods(path: impl AsRef<Path>) -> Vec<Method> {
    let mut methods = vec![Method::GET, Method::HEAD, Method::PUT, Method::DELETE];
    if is_plain_text(path) {
        methods.push(Method::POST);
    }
    methods
}

/// Status for a failed storage call made on behalf of `method`.
///
/// Reads and deletes report every failure as 404, writes as 500. Paths
/// outside the root are 404 whatever the method.
pub fn failure_status(method: &Method, err: &StoreError) -> StatusCode {
    match (method, err) {
        (_, StoreError::OutsideRoot) => StatusCode::NotFound,
        (Method::PUT | Method::POST, _) => StatusCode::InternalServerError,
        _ => StatusCode::NotFound,
    }
}

impl<S: Storage> Dispatcher<S> {
    pub fn new(store: S, resolver: PathResolver, error_pages: ErrorPages) -> Self {
        Self {
            store,
            resolver,
            error_pages,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn dispatch(&self, request: &Request) -> Response {
        let response = match self.handle(request).await {
            Ok(response) => response,
            Err(err) => {
                let status = failure_status(&request.method, &err);
                warn!(
                    method = %request.method,
                    path = %request.path,
                    error = %err,
                    "Storage operation failed"
                );
                self.failure_response(&request.method, &request.path, status)
            }
        };

        info!(
            method = %request.method,
            path = %request.path,
            status = response.status.as_u16(),
            "Request handled"
        );

        response
    }

    async fn handle(&self, request: &Request) -> Result<Response, StoreError> {
        match &request.method {
            Method::GET => {
                let file = self.resolver.resolve(&request.path)?;
                let data = self.store.read(&file).await?;
                Ok(Response::ok(content_type_for(&file), data))
            }

            // Reads the whole file so Content-Length can come from the body;
            // memory use for HEAD equals that of GET.
            Method::HEAD => {
                let file = self.resolver.resolve(&request.path)?;
                let data = self.store.read(&file).await?;
                Ok(ResponseBuilder::new(StatusCode::Ok)
                    .content_type(content_type_for(&file))
                    .body(data)
                    .omit_body()
                    .build())
            }

            Method::PUT => {
                let file = self.resolver.resolve(&request.path)?;
                self.store.write(&file, &request.body, WriteMode::Overwrite).await?;
                debug!(path = %file.display(), bytes = request.body.len(), "File written");
                Ok(Response::text("File created or overwritten"))
            }

            Method::POST => {
                let file = self.resolver.resolve(&request.path)?;
                if !is_plain_text(&file) {
                    return Ok(self.error_pages.response(StatusCode::UnsupportedMediaType));
                }
                self.store.write(&file, &request.body, WriteMode::Append).await?;
                debug!(path = %file.display(), bytes = request.body.len(), "Data appended");
                Ok(Response::text("Data appended"))
            }

            Method::DELETE => {
                let file = self.resolver.resolve(&request.path)?;
                self.store.delete(&file).await?;
                Ok(Response::text("File deleted"))
            }

            Method::OPTIONS => {
                let file = self.resolver.resolve(&request.path)?;
                let allow = allowed_methods(&file)
                    .iter()
                    .map(Method::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                Ok(ResponseBuilder::new(StatusCode::Ok).header("Allow", allow).build())
            }

            Method::Other(_) => Ok(self.error_pages.response(StatusCode::MethodNotAllowed)),
        }
    }

    /// HEAD failures carry no body; everything else gets the error page.
    fn failure_response(&self, method: &Method, request_path: &str, status: StatusCode) -> Response {
        match method {
            Method::HEAD => ResponseBuilder::new(status)
                .content_type(content_type_for(request_path))
                .build(),
            _ => self.error_pages.response(status),
        }
    }
}
