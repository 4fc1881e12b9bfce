//! Snapshot Node Model
//!
//! Immutable, priority-annotated JSON-like trees and their canonical hashes.
//! Any subtree hashes to the same text on every machine that holds the same
//! data, which is what lets a client and a remote store detect divergence
//! without exchanging the subtree itself.

pub mod builder;
pub mod hasher;
pub mod index;
pub mod key;
pub mod leaf;
pub mod node;
pub mod number;
pub mod path;
pub mod priority;
pub mod version;
pub mod walker;

pub use builder::{node_from_json, node_to_json};
pub use hasher::{Blake3Digest, DigestAlgorithm, NodeDigest, NodeHasher, Sha256Digest};
pub use index::Index;
pub use key::ChildKey;
pub use leaf::{LeafKind, LeafNode, LeafValue};
pub use node::{ChildrenNode, NamedNode, Node, NodeRank};
pub use path::Path;
pub use priority::{compare_priorities, is_valid_priority, parse_priority};
pub use version::HashVersion;
