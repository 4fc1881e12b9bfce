//! Digests over hash representations
//!
//! Nodes only produce pre-digest strings. A [`NodeHasher`] pairs a
//! [`HashVersion`] with a [`NodeDigest`] and turns those strings into the
//! comparable hash text exchanged with the remote store.

use crate::error::NodeError;
use crate::snapshot::node::Node;
use crate::snapshot::version::HashVersion;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Digest primitive applied to a hash representation.
pub trait NodeDigest: Send + Sync {
    fn name(&self) -> &'static str;

    fn digest(&self, input: &str) -> String;
}

/// Base64 of the SHA-256 of the representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Digest;

impl NodeDigest for Sha256Digest {
    fn name(&self) -> &'static str {
        "sha256"
    }

    fn digest(&self, input: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(input.as_bytes());
        STANDARD.encode(hasher.finalize())
    }
}

/// Lowercase hex of the BLAKE3 hash of the representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blake3Digest;

impl NodeDigest for Blake3Digest {
    fn name(&self) -> &'static str {
        "blake3"
    }

    fn digest(&self, input: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(input.as_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }
}

/// Digest selected by name, e.g. from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    #[default]
    Sha256,
    Blake3,
}

impl NodeDigest for DigestAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => Sha256Digest.name(),
            DigestAlgorithm::Blake3 => Blake3Digest.name(),
        }
    }

    fn digest(&self, input: &str) -> String {
        match self {
            DigestAlgorithm::Sha256 => Sha256Digest.digest(input),
            DigestAlgorithm::Blake3 => Blake3Digest.digest(input),
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(DigestAlgorithm::Sha256),
            "blake3" => Ok(DigestAlgorithm::Blake3),
            other => Err(NodeError::UnknownDigest(other.to_string())),
        }
    }
}

/// Hash version plus digest: everything needed to hash a subtree.
#[derive(Debug, Clone, Copy)]
pub struct NodeHasher<D: NodeDigest = DigestAlgorithm> {
    version: HashVersion,
    digest: D,
}

impl<D: NodeDigest> NodeHasher<D> {
    pub fn new(version: HashVersion, digest: D) -> Self {
        Self { version, digest }
    }

    pub fn version(&self) -> HashVersion {
        self.version
    }

    pub fn digest_name(&self) -> &'static str {
        self.digest.name()
    }

    /// Pre-digest string of `node`.
    pub fn representation(&self, node: &Node) -> String {
        node.hash_representation(self)
    }

    /// Digest of `node`'s representation; the empty node hashes to `""`.
    pub fn hash(&self, node: &Node) -> String {
        let repr = node.hash_representation(self);
        if repr.is_empty() {
            return String::new();
        }
        self.digest.digest(&repr)
    }
}

impl Default for NodeHasher<DigestAlgorithm> {
    fn default() -> Self {
        Self::new(HashVersion::CURRENT, DigestAlgorithm::default())
    }
}
