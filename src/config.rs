//! Configuration System
//!
//! Layered configuration for hashing and logging: built-in defaults, then the
//! global config file, then workspace config files, then `TREEHASH__*`
//! environment variables.

use crate::error::ApiError;
use crate::logging::LoggingConfig;
use crate::snapshot::{DigestAlgorithm, HashVersion, NodeHasher};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

mod merge;
mod sources;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreehashConfig {
    /// Hash version and digest
    #[serde(default)]
    pub hash: HashConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which encoding and digest produce subtree hashes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    #[serde(default)]
    pub version: HashVersion,

    #[serde(default)]
    pub digest: DigestAlgorithm,
}

impl HashConfig {
    pub fn hasher(&self) -> NodeHasher<DigestAlgorithm> {
        NodeHasher::new(self.version, self.digest)
    }
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Logging(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Logging(msg) => write!(f, "Logging: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TreehashConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.logging.validate() {
            errors.push(ValidationError::Logging(e));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate, folding all problems into one `ApiError`.
    pub fn validated(self) -> Result<Self, ApiError> {
        self.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                error_msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads [`TreehashConfig`] from the layered sources
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace root.
    pub fn load(workspace_root: &Path) -> Result<TreehashConfig, ApiError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let builder = sources::environment::add_to_builder(builder);

        let config: TreehashConfig = builder.build()?.try_deserialize()?;
        debug!(
            workspace = %workspace_root.display(),
            version = %config.hash.version,
            digest = %config.hash.digest,
            "Loaded configuration"
        );
        config.validated()
    }

    /// Load configuration from one explicit file (environment still applies).
    pub fn load_from_file(path: &Path) -> Result<TreehashConfig, ApiError> {
        if !path.exists() {
            return Err(ApiError::ConfigError(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
        let builder = merge::merge_policy::builder_with_defaults()?
            .add_source(config::File::from(path.to_path_buf()).required(true));
        let builder = sources::environment::add_to_builder(builder);

        let config: TreehashConfig = builder.build()?.try_deserialize()?;
        config.validated()
    }

    /// Location of the user-level config file, if a home directory is known.
    pub fn global_config_path() -> Option<PathBuf> {
        sources::global_file::global_config_path()
    }
}
