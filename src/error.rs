//! Error types for the build pipeline, the query engine and the CLI layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the persisted graph
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Graph artifact not found: {0}")]
    ArtifactNotFound(PathBuf),
}

/// Fatal errors that abort a build
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Content root not found: {0}")]
    ContentRootNotFound(PathBuf),

    #[error("Discovery failed: {0}")]
    Discovery(String),

    #[error("Failed to materialize {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Build task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Per-record enrichment failure; never aborts a build
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrichmentError {
    #[error("failed to read document: {0}")]
    Read(String),

    #[error("unterminated front matter block")]
    UnterminatedFrontMatter,

    #[error("malformed front matter: {0}")]
    FrontMatter(String),

    #[error("front matter must be a mapping, found {0}")]
    FrontMatterShape(String),
}

/// Rejected queries and graph integrity violations detected at query time
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Unknown filter field: {0}")]
    UnknownField(String),

    #[error("Operator '{operator}' is not supported for field '{field}'")]
    UnsupportedOperator { field: String, operator: String },

    #[error("Malformed filter key: {0} (expected <field>__<operator>)")]
    MalformedFilterKey(String),

    #[error("Invalid value for '{key}': expected {expected}")]
    InvalidValue { key: String, expected: String },

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    #[error("Graph integrity error: {0}")]
    Integrity(String),
}

/// Top-level error surfaced by the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    StorageError(#[from] StorageError),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
