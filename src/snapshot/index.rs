//! Sibling orderings
//!
//! An [`Index`] decides the order in which the children of a composite are
//! visited. Every index breaks ties on the child key, so each one is a total
//! order over the children of a single node.

use crate::snapshot::key::ChildKey;
use crate::snapshot::node::{NamedNode, Node};
use crate::snapshot::path::Path;
use crate::snapshot::priority;
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Index {
    /// Child key order
    Key,
    /// Explicit priorities first, then by priority value, then key
    Priority,
    /// By the child's own value
    Value,
    /// By the value found at a path below each child
    Child(Path),
}

impl Index {
    pub fn compare(&self, a: &NamedNode, b: &NamedNode) -> Ordering {
        let ordering = match self {
            Index::Key => Ordering::Equal,
            Index::Priority => priority::compare_priorities(a.node.priority(), b.node.priority()),
            Index::Value => a.node.compare(&b.node),
            Index::Child(path) => a.node.get_child(path).compare(&b.node.get_child(path)),
        };
        ordering.then_with(|| a.key.cmp(&b.key))
    }

    /// Whether `node` carries anything this index orders by.
    pub fn is_defined_on(&self, node: &Node) -> bool {
        match self {
            Index::Key | Index::Value => true,
            Index::Priority => !node.priority().is_empty(),
            Index::Child(path) => !node.get_child(path).is_empty(),
        }
    }

    /// Smallest possible entry under this index.
    pub fn min_post(&self) -> NamedNode {
        NamedNode::new(ChildKey::min_key(), Node::empty())
    }

    /// Name used by query layers, e.g. `.priority` or `a/b`.
    pub fn query_name(&self) -> String {
        match self {
            Index::Key => ".key".to_string(),
            Index::Priority => ".priority".to_string(),
            Index::Value => ".value".to_string(),
            Index::Child(path) => path.to_string().trim_start_matches('/').to_string(),
        }
    }
}
