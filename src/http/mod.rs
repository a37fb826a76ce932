//! HTTP protocol implementation.
//!
//! A small HTTP/1.1 server that answers exactly one request per connection.
//!
//! # Architecture
//!
//! The HTTP layer is organized into several submodules:
//!
//! - **`connection`**: Per-connection state machine, buffers bytes until a request is complete
//! - **`parser`**: Parses incoming HTTP requests from byte buffers
//! - **`request`**: HTTP request representation and method tokens
//! - **`dispatcher`**: Maps method + path onto a storage operation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: Serializes and writes HTTP responses to the client
//! - **`error_page`**: HTML bodies for 404, 405, 415 and 500
//! - **`mime`**: MIME type detection based on file extensions
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer deliveries until "\r\n\r\n" (+ body)
//!        └──────┬──────┘
//!               │ Request received
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Dispatch to storage
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response, shut down write half
//!        └──────┬───────────┘
//!               ▼
//!             Closed
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use depot::http::connection::Connection;
//! use depot::http::dispatcher::Dispatcher;
//! use depot::http::error_page::ErrorPages;
//! use depot::storage::{FileStore, PathResolver};
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = FileStore::open("public").await?;
//!     let resolver = PathResolver::new(store.root());
//!     let dispatcher = Arc::new(Dispatcher::new(store, resolver, ErrorPages::default()));
//!     let listener = TcpListener::bind("127.0.0.1:3000").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let dispatcher = dispatcher.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, dispatcher);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod request;
pub mod response;
pub mod parser;
pub mod connection;
pub mod writer;
pub mod mime;
pub mod dispatcher;
pub mod error_page;
