//! Error types for schema loading, configuration and explorer mounting.
//!
//! Only [`ExplorerError`] is fatal.  Schema and config failures are
//! reported and then folded into state (an errored schema, default config).
use std::path::PathBuf;

use thiserror::Error;

/// Raised when a documentation explorer cannot be mounted.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// The explorer was mounted without a navigation history to read from.
    #[error("doc explorer mounted without a navigation history")]
    MissingNavigation,
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("schema is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("introspection result has no `__schema` object")]
    MissingSchema,
    #[error("introspection result reported errors: {0}")]
    Reported(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
