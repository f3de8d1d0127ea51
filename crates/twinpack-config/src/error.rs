//! Error types for settings loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("project root not found: {0}")]
    RootNotFound(PathBuf),

    // Layered settings extraction (defaults <- twinpack.toml)
    #[error("failed to extract settings: {0}")]
    Extract(#[from] Box<figment::Error>),

    #[error("invalid package.json at {path}: {source}")]
    InvalidPackage {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Extract(Box::new(err))
    }
}
