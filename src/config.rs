//! Layered configuration loading.
//!
//! Sources, lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. A TOML file (`notelite.toml` in the working directory unless another
//!    path is given)
//! 3. Environment variables prefixed `NOTELITE_`, with `__` separating the
//!    section from the key (`NOTELITE_DATABASE__PATH` sets `database.path`)

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "notelite.toml";

/// Prefix for environment variable overrides.
pub const ENV_PREFIX: &str = "NOTELITE_";

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or a value has the wrong type.
    #[error("configuration error: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NoteliteConfig {
    /// Local task database settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Image host settings.
    #[serde(default)]
    pub upload: UploadConfig,
}

impl NoteliteConfig {
    /// Loads configuration using [`DEFAULT_CONFIG_FILE`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(DEFAULT_CONFIG_FILE))
    }

    /// Loads configuration with `file` as the TOML layer.
    ///
    /// A missing file is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a source is malformed.
    pub fn load_from(file: &Path) -> Result<Self, ConfigError> {
        Ok(Self::figment(file).extract()?)
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment(file: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}

/// Local database settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the `SQLite` database file.
    pub path: PathBuf,
    /// Maximum pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database, in milliseconds.
    pub busy_timeout_ms: u32,
    /// How long opening a connection may take, in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("notelite.db"),
            pool_size: 4,
            busy_timeout_ms: 5_000,
            connect_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    /// Returns default settings pointed at `path`.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Returns `true` when `path` names a private in-memory database.
    ///
    /// Each connection to such a database sees its own empty copy.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path
            .to_str()
            .is_some_and(|path| path == IN_MEMORY_PATH || path.starts_with("file::memory:"))
    }
}

/// Path that opens an in-memory `SQLite` database.
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Image host settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Explicit upload URL; derived from `cloud_name` when unset.
    pub endpoint: Option<String>,
    /// Account identifier on the image host.
    pub cloud_name: String,
    /// Unsigned upload preset name.
    pub upload_preset: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            cloud_name: "dccobi5fz".to_owned(),
            upload_preset: "notelite".to_owned(),
            timeout_secs: 30,
        }
    }
}

impl UploadConfig {
    /// Returns the upload URL.
    #[must_use]
    pub fn resolved_endpoint(&self) -> String {
        self.endpoint.clone().unwrap_or_else(|| {
            format!(
                "https://api.cloudinary.com/v1_1/{}/image/upload",
                self.cloud_name
            )
        })
    }
}
