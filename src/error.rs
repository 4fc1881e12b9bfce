//! Error types for the treehash node model and its outer layers.

use crate::snapshot::LeafKind;
use thiserror::Error;

/// Errors raised by the node model itself
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NodeError {
    #[error("Invalid priority: {0}")]
    InvalidPriority(String),

    #[error("Cannot compare {left:?} leaf against {right:?} leaf")]
    LeafKindMismatch { left: LeafKind, right: LeafKind },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Unsupported value: {0}")]
    UnsupportedValue(String),

    #[error("Unknown hash version: {0} (expected 'v1' or 'v2')")]
    UnknownHashVersion(String),

    #[error("Unknown digest algorithm: {0} (expected 'sha256' or 'blake3')")]
    UnknownDigest(String),
}

/// Errors surfaced by configuration, logging and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Node error: {0}")]
    NodeError(#[from] NodeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
