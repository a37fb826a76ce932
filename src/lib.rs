//! Depot - HTTP file store
//!
//! Exposes a directory over a small HTTP/1.1 subset: every URL path names a
//! file under a fixed root, and the request method decides what happens to it.

pub mod config;
pub mod http;
pub mod server;
pub mod storage;
