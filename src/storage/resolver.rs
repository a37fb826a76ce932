use std::path::{Path, PathBuf};

use crate::storage::store::StoreError;

/// Maps request paths to filesystem paths under a fixed root.
///
/// Resolution is lexical and does no I/O. Symlinks pointing out of the root
/// are caught later by [`FileStore`](crate::storage::FileStore).
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Joins a decoded request path onto the root.
    ///
    /// Empty and `.` segments are dropped; any `..` segment is rejected.
    ///
    /// # Example
    ///
    /// ```
    /// # use depot::storage::PathResolver;
    /// # use std::path::Path;
    /// let resolver = PathResolver::new("public");
    /// assert_eq!(resolver.resolve("/docs/a.txt").unwrap(), Path::new("public/docs/a.txt"));
    /// assert!(resolver.resolve("/../etc/passwd").is_err());
    /// ```
    pub fn resolve(&self, request_path: &str) -> Result<PathBuf, StoreError> {
        let mut resolved = self.root.clone();

        for segment in request_path.split('/') {
            match segment {
                "" | "." => continue,
                ".." => return Err(StoreError::OutsideRoot),
                _ if segment.contains('\\') || segment.contains('\0') => {
                    return Err(StoreError::OutsideRoot);
                }
                _ => resolved.push(segment),
            }
        }

        Ok(resolved)
    }
}
