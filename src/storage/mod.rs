//! File storage behind the HTTP layer.
//!
//! - **`resolver`**: maps decoded URL paths onto paths under the root, rejecting `..`
//! - **`store`**: the [`Storage`] trait and its filesystem implementation
//!
//! Concurrent writers to the same file are not serialized. Two PUTs or POSTs
//! racing on one path leave whatever interleaving the OS produced.

pub mod resolver;
pub mod store;

pub use resolver::PathResolver;
pub use store::{FileStore, Storage, StoreError, WriteMode};
