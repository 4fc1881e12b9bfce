//! CLI route: single route table and run context. Loads documents and dispatches
//! to the snapshot model and output formatting.

use crate::cli::help::command_name;
use crate::cli::output::{format_divergences, format_hashes};
use crate::cli::parse::Commands;
use crate::config::{ConfigLoader, TreehashConfig};
use crate::error::ApiError;
use crate::snapshot::walker::{find_divergent, subtree_hashes};
use crate::snapshot::{node_from_json, DigestAlgorithm, HashVersion, Node, NodeHasher, Path};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path as FsPath, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

/// Runtime context for CLI execution: resolved configuration and hasher.
/// Built from workspace path and optional config path using ConfigLoader only.
pub struct RunContext {
    config: TreehashConfig,
    hasher: NodeHasher<DigestAlgorithm>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Ok(Self::from_config(config))
    }

    pub fn from_config(config: TreehashConfig) -> Self {
        let hasher = config.hash.hasher();
        Self { config, hasher }
    }

    /// Apply `--hash-version` / `--digest` on top of the loaded configuration.
    pub fn with_overrides(
        mut self,
        hash_version: Option<&str>,
        digest: Option<&str>,
    ) -> Result<Self, ApiError> {
        if let Some(version) = hash_version {
            self.config.hash.version = version.parse::<HashVersion>()?;
        }
        if let Some(digest) = digest {
            self.config.hash.digest = digest.parse::<DigestAlgorithm>()?;
        }
        self.hasher = self.config.hash.hasher();
        Ok(self)
    }

    pub fn config(&self) -> &TreehashConfig {
        &self.config
    }

    pub fn hasher(&self) -> &NodeHasher<DigestAlgorithm> {
        &self.hasher
    }

    /// Run one command and return its stdout text.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        info!(
            command = command_name(command),
            ok = result.is_ok(),
            duration_ms = started.elapsed().as_millis() as u64,
            "Command finished"
        );
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Hash {
                file,
                path,
                all,
                max_depth,
                format,
            } => {
                let path = Path::parse(path);
                let node = load_document(file)?.get_child(&path);
                if !*all {
                    return Ok(self.hasher.hash(&node));
                }
                let hashes: BTreeMap<Path, String> =
                    subtree_hashes(&node, &self.hasher, *max_depth)
                        .into_iter()
                        .map(|(relative, hash)| (join(&path, &relative), hash))
                        .collect();
                Ok(format_hashes(&hashes, *format))
            }
            Commands::Repr { file, path } => {
                let node = load_document(file)?.get_child(&Path::parse(path));
                Ok(self.hasher.representation(&node))
            }
            Commands::Show { file, path, export } => {
                let node = load_document(file)?.get_child(&Path::parse(path));
                Ok(serde_json::to_string_pretty(&node.to_json(*export))?)
            }
            Commands::Diff { file, reported } => {
                let local = load_document(file)?;
                let reported = load_reported_hashes(reported)?;
                let divergent = find_divergent(&local, &reported, &self.hasher);
                Ok(format_divergences(&divergent))
            }
            Commands::Config => toml::to_string_pretty(&self.config).map_err(|e| {
                ApiError::ConfigError(format!("Failed to serialize configuration: {}", e))
            }),
        }
    }
}

fn load_document(file: &FsPath) -> Result<Node, ApiError> {
    let text = std::fs::read_to_string(file)?;
    let value: Value = serde_json::from_str(&text)?;
    debug!(file = %file.display(), "Loaded document");
    Ok(node_from_json(&value)?)
}

/// Reported hashes are a JSON object of `"/path": "hash"` entries.
fn load_reported_hashes(file: &FsPath) -> Result<BTreeMap<Path, String>, ApiError> {
    let text = std::fs::read_to_string(file)?;
    let entries: BTreeMap<String, String> = serde_json::from_str(&text)?;
    Ok(entries
        .into_iter()
        .map(|(path, hash)| (Path::parse(&path), hash))
        .collect())
}

fn join(base: &Path, relative: &Path) -> Path {
    relative.iter().fold(base.clone(), |path, key| path.child(key))
}
