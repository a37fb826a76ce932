use std::fmt;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

/// How [`Storage::write`] treats an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate, then write
    Overwrite,
    /// Create if missing, then write at the end
    Append,
}

/// Failure of a storage operation.
///
/// Callers currently collapse these into one status per method. Telling
/// more kinds apart means adding a variant here and extending the
/// `From<io::Error>` mapping.
#[derive(Debug)]
pub enum StoreError {
    /// Target does not exist
    NotFound,
    /// Target resolves outside the storage root
    OutsideRoot,
    /// Any other I/O failure
    Io(io::Error),
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => StoreError::NotFound,
            _ => StoreError::Io(err),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::NotFound => f.write_str("file not found"),
            StoreError::OutsideRoot => f.write_str("path escapes the storage root"),
            StoreError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(err) => Some(err),
            _ => None,
        }
    }
}

/// File operations the dispatcher relies on.
///
/// Operations on the same path from different connections are not ordered
/// against each other.
pub trait Storage: Send + Sync + 'static {
    fn read(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>, StoreError>> + Send;

    fn write(
        &self,
        path: &Path,
        data: &[u8],
        mode: WriteMode,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    fn delete(&self, path: &Path) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// [`Storage`] on the local filesystem, confined to one root directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates `root` if needed and pins it to its canonical form.
    pub async fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        tokio::fs::create_dir_all(root).await?;
        let root = tokio::fs::canonicalize(root).await?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Checks that `path`, with symlinks followed as far as it exists, stays
    /// under the root.
    async fn confine(&self, path: &Path) -> Result<(), StoreError> {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            if let Ok(real) = tokio::fs::canonicalize(ancestor).await {
                return if real.starts_with(&self.root) {
                    Ok(())
                } else {
                    Err(StoreError::OutsideRoot)
                };
            }
        }
        Err(StoreError::OutsideRoot)
    }
}

impl Storage for FileStore {
    async fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        self.confine(path).await?;
        Ok(tokio::fs::read(path).await?)
    }

    async fn write(&self, path: &Path, data: &[u8], mode: WriteMode) -> Result<(), StoreError> {
        self.confine(path).await?;
        match mode {
            WriteMode::Overwrite => tokio::fs::write(path, data).await?,
            WriteMode::Append => {
                let mut file = tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await?;
                file.write_all(data).await?;
                file.flush().await?;
            }
        }
        Ok(())
    }

    async fn delete(&self, path: &Path) -> Result<(), StoreError> {
        self.confine(path).await?;
        Ok(tokio::fs::remove_file(path).await?)
    }
}
