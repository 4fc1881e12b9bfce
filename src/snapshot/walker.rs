//! Depth-first traversal of node trees and hash divergence checks

use crate::snapshot::hasher::{NodeDigest, NodeHasher};
use crate::snapshot::node::Node;
use crate::snapshot::path::Path;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

/// A subtree visited by the walker
#[derive(Debug, Clone)]
pub struct Entry {
    pub path: Path,
    pub node: Node,
    pub depth: usize,
}

/// Walker configuration
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Maximum depth to descend (None = unlimited, 0 = root only)
    pub max_depth: Option<usize>,
    /// Whether leaf entries are reported alongside composites
    pub skip_leaves: bool,
}

/// Pre-order walker over a node tree; children are visited in key order.
pub struct Walker {
    root: Node,
    config: WalkerConfig,
}

impl Walker {
    pub fn new(root: Node) -> Self {
        Self {
            root,
            config: WalkerConfig::default(),
        }
    }

    pub fn with_config(root: Node, config: WalkerConfig) -> Self {
        Self { root, config }
    }

    /// Collect every reachable subtree, root first.
    pub fn walk(&self) -> Vec<Entry> {
        let mut entries = Vec::new();
        let mut stack = vec![Entry {
            path: Path::root(),
            node: self.root.clone(),
            depth: 0,
        }];

        while let Some(entry) = stack.pop() {
            let descend = self.config.max_depth.map_or(true, |max| entry.depth < max);
            if descend {
                // Reverse so the smallest key is popped first
                let children: Vec<_> = entry.node.children().collect();
                for (key, child) in children.into_iter().rev() {
                    stack.push(Entry {
                        path: entry.path.child(key),
                        node: child.clone(),
                        depth: entry.depth + 1,
                    });
                }
            }
            if !(self.config.skip_leaves && entry.node.is_leaf()) {
                entries.push(entry);
            }
        }

        entries
    }
}

/// Hash of every subtree down to `max_depth`, keyed by path.
#[instrument(skip(root, hasher), fields(version = %hasher.version()))]
pub fn subtree_hashes<D: NodeDigest>(
    root: &Node,
    hasher: &NodeHasher<D>,
    max_depth: Option<usize>,
) -> BTreeMap<Path, String> {
    let walker = Walker::with_config(
        root.clone(),
        WalkerConfig {
            max_depth,
            skip_leaves: false,
        },
    );
    let hashes: BTreeMap<Path, String> = walker
        .walk()
        .into_iter()
        .map(|entry| {
            let hash = hasher.hash(&entry.node);
            (entry.path, hash)
        })
        .collect();
    debug!(subtrees = hashes.len(), "Computed subtree hashes");
    hashes
}

/// A path whose local hash differs from the one the remote reported
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Divergence {
    pub path: Path,
    pub local: String,
    pub remote: String,
}

/// Compare remotely reported subtree hashes against the local tree.
///
/// Returns the diverging paths in path order. A path the remote reports that
/// does not exist locally diverges unless the remote hash is also `""`.
#[instrument(skip_all, fields(reported = reported.len()))]
pub fn find_divergent<D: NodeDigest>(
    local: &Node,
    reported: &BTreeMap<Path, String>,
    hasher: &NodeHasher<D>,
) -> Vec<Divergence> {
    let divergent: Vec<Divergence> = reported
        .iter()
        .filter_map(|(path, remote)| {
            let local_hash = hasher.hash(&local.get_child(path));
            if &local_hash == remote {
                None
            } else {
                Some(Divergence {
                    path: path.clone(),
                    local: local_hash,
                    remote: remote.clone(),
                })
            }
        })
        .collect();
    info!(divergent = divergent.len(), "Compared reported hashes");
    divergent
}
