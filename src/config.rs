use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Names the YAML file to load; unset means built-in defaults.
pub const CONFIG_ENV: &str = "DEPOT_CONFIG";
/// Overrides `server.listen_addr`.
pub const LISTEN_ENV: &str = "LISTEN";
/// Overrides `storage.root`.
pub const ROOT_ENV: &str = "DEPOT_ROOT";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub error_pages: ErrorPageConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Bytes requested from the socket per read call.
    pub read_buffer_size: usize,
    /// Upper bound on buffered bytes while waiting for the header terminator.
    pub max_header_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub root: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ErrorPageConfig {
    pub image_base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_string(),
            read_buffer_size: 4096,
            max_header_bytes: 64 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public"),
        }
    }
}

impl Default for ErrorPageConfig {
    fn default() -> Self {
        Self {
            image_base_url: "https://http.cat".to_string(),
        }
    }
}

impl Config {
    /// Loads the file named by `DEPOT_CONFIG` (or the defaults), then applies
    /// `LISTEN` and `DEPOT_ROOT` from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var(CONFIG_ENV) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        cfg.apply_overrides(|key| std::env::var(key).ok());
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        Self::from_yaml_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }

    pub fn from_yaml_str(raw: &str) -> anyhow::Result<Self> {
        let cfg: Config = serde_yaml::from_str(raw)?;
        url::Url::parse(&cfg.error_pages.image_base_url)
            .context("error_pages.image_base_url is not a valid URL")?;
        Ok(cfg)
    }

    /// Applies environment-style overrides through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup(LISTEN_ENV) {
            self.server.listen_addr = addr;
        }
        if let Some(root) = lookup(ROOT_ENV) {
            self.storage.root = PathBuf::from(root);
        }
    }
}
