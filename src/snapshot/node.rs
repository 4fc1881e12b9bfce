//! The node sum type and composite nodes
//!
//! A [`Node`] is either a leaf or a composite. Both are immutable and held
//! behind an `Arc`, so cloning a node is cheap and every update returns a new
//! node that shares all untouched subtrees with the old one. The empty
//! composite doubles as the "no value" node.

use crate::error::NodeError;
use crate::snapshot::hasher::{NodeDigest, NodeHasher};
use crate::snapshot::index::Index;
use crate::snapshot::key::ChildKey;
use crate::snapshot::leaf::{LeafKind, LeafNode, LeafValue};
use crate::snapshot::path::Path;
use crate::snapshot::priority;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, OnceLock};
use tracing::trace;

/// Cross-kind sort order of nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeRank {
    Empty,
    DeferredValue,
    Boolean,
    Number,
    String,
    Children,
}

/// A key paired with the child stored under it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamedNode {
    pub key: ChildKey,
    pub node: Node,
}

impl NamedNode {
    pub fn new(key: ChildKey, node: Node) -> Self {
        Self { key, node }
    }
}

/// Immutable tree node.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Node {
    Leaf(Arc<LeafNode>),
    Children(Arc<ChildrenNode>),
}

/// Ordered named children plus a priority.
///
/// Never holds an empty child; a composite without children is only ever the
/// shared empty node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ChildrenNode {
    children: BTreeMap<ChildKey, Node>,
    priority: Option<Node>,
}

fn empty_node() -> &'static Node {
    static EMPTY: OnceLock<Node> = OnceLock::new();
    EMPTY.get_or_init(|| Node::Children(Arc::new(ChildrenNode::default())))
}

impl Node {
    /// The shared "no value" node.
    pub fn empty() -> Node {
        empty_node().clone()
    }

    pub(crate) fn empty_ref() -> &'static Node {
        empty_node()
    }

    pub fn leaf(value: LeafValue) -> Node {
        Node::Leaf(Arc::new(LeafNode::new(value)))
    }

    pub fn boolean(value: bool) -> Node {
        Node::leaf(LeafValue::Boolean(value))
    }

    pub fn long(value: i64) -> Node {
        Node::leaf(LeafValue::Long(value))
    }

    pub fn double(value: f64) -> Node {
        Node::leaf(LeafValue::Double(value))
    }

    pub fn string(value: &str) -> Node {
        Node::leaf(LeafValue::String(value.to_string()))
    }

    /// Server-resolved placeholder such as `{".sv": "timestamp"}`.
    pub fn deferred(value: &Value) -> Node {
        Node::leaf(LeafValue::DeferredValue(value.to_string()))
    }

    /// Composite from a child map; empty children are dropped and an empty
    /// result collapses to [`Node::empty`].
    pub fn from_children(
        children: BTreeMap<ChildKey, Node>,
        priority: Node,
    ) -> Result<Node, NodeError> {
        let priority = priority::checked_priority(priority)?;
        let children: BTreeMap<ChildKey, Node> = children
            .into_iter()
            .filter(|(key, child)| !child.is_empty() && !key.is_priority_key())
            .collect();
        if children.is_empty() {
            return Ok(Node::empty());
        }
        Ok(Node::Children(Arc::new(ChildrenNode { children, priority })))
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Node::Leaf(_) => false,
            Node::Children(c) => c.children.is_empty(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    pub fn as_leaf(&self) -> Option<&LeafNode> {
        match self {
            Node::Leaf(leaf) => Some(leaf.as_ref()),
            Node::Children(_) => None,
        }
    }

    pub fn rank(&self) -> NodeRank {
        match self {
            Node::Leaf(leaf) => match leaf.kind() {
                LeafKind::DeferredValue => NodeRank::DeferredValue,
                LeafKind::Boolean => NodeRank::Boolean,
                LeafKind::Number => NodeRank::Number,
                LeafKind::String => NodeRank::String,
            },
            Node::Children(_) if self.is_empty() => NodeRank::Empty,
            Node::Children(_) => NodeRank::Children,
        }
    }

    pub fn priority(&self) -> &Node {
        match self {
            Node::Leaf(leaf) => leaf.priority(),
            Node::Children(c) => c.priority.as_ref().unwrap_or(Node::empty_ref()),
        }
    }

    /// Same value under a new priority.
    ///
    /// Fails with [`NodeError::InvalidPriority`] for anything
    /// [`priority::is_valid_priority`] rejects. The empty node has nowhere to
    /// keep a priority and stays empty.
    pub fn update_priority(&self, priority: Node) -> Result<Node, NodeError> {
        match self {
            Node::Leaf(leaf) => Ok(Node::Leaf(Arc::new(leaf.update_priority(priority)?))),
            Node::Children(c) => {
                let priority = priority::checked_priority(priority)?;
                if c.children.is_empty() {
                    return Ok(Node::empty());
                }
                Ok(Node::Children(Arc::new(ChildrenNode {
                    children: c.children.clone(),
                    priority,
                })))
            }
        }
    }

    /// Total order across node kinds.
    ///
    /// Ranks compare first (`Empty < DeferredValue < Boolean < Number <
    /// String < Children`); leaves of the same kind then compare by value.
    /// Non-empty composites are all equal to each other.
    pub fn compare(&self, other: &Node) -> Ordering {
        match (self, other) {
            (Node::Leaf(a), Node::Leaf(b)) => a.compare_to(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    pub fn child_count(&self) -> usize {
        match self {
            Node::Leaf(_) => 0,
            Node::Children(c) => c.children.len(),
        }
    }

    pub fn has_child(&self, key: &ChildKey) -> bool {
        !self.get_immediate_child(key).is_empty()
    }

    /// Child under `key`, the priority for `.priority`, or the empty node.
    pub fn get_immediate_child(&self, key: &ChildKey) -> Node {
        if key.is_priority_key() {
            return self.priority().clone();
        }
        match self {
            Node::Leaf(_) => Node::empty(),
            Node::Children(c) => c.children.get(key).cloned().unwrap_or_else(Node::empty),
        }
    }

    pub fn get_child(&self, path: &Path) -> Node {
        match path.front() {
            None => self.clone(),
            Some(front) => self.get_immediate_child(front).get_child(&path.pop_front()),
        }
    }

    /// Replace (or with an empty node, remove) one child.
    ///
    /// Writing a child under a leaf turns it into a composite that keeps the
    /// leaf's priority; removing the last child of a composite yields the
    /// empty node.
    pub fn update_immediate_child(&self, key: &ChildKey, child: Node) -> Result<Node, NodeError> {
        if key.is_priority_key() {
            return self.update_priority(child);
        }
        match self {
            Node::Leaf(_) => {
                if child.is_empty() {
                    return Ok(self.clone());
                }
                Node::empty()
                    .update_immediate_child(key, child)?
                    .update_priority(self.priority().clone())
            }
            Node::Children(c) => {
                let mut children = c.children.clone();
                children.remove(key);
                if !child.is_empty() {
                    children.insert(key.clone(), child);
                }
                if children.is_empty() {
                    return Ok(Node::empty());
                }
                Ok(Node::Children(Arc::new(ChildrenNode {
                    children,
                    priority: c.priority.clone(),
                })))
            }
        }
    }

    /// Replace the subtree at `path`.
    ///
    /// `.priority` may only appear as the last segment.
    pub fn update_child(&self, path: &Path, child: Node) -> Result<Node, NodeError> {
        let front = match path.front() {
            None => return Ok(child),
            Some(front) => front,
        };
        if front.is_priority_key() {
            if path.len() != 1 {
                return Err(NodeError::InvalidPath(format!(
                    "{}: .priority must be the last segment",
                    path
                )));
            }
            return self.update_priority(child);
        }
        let updated = self
            .get_immediate_child(front)
            .update_child(&path.pop_front(), child)?;
        self.update_immediate_child(front, updated)
    }

    /// Children in key order (nothing for leaves).
    pub fn children(&self) -> impl Iterator<Item = (&ChildKey, &Node)> {
        let children = match self {
            Node::Leaf(_) => None,
            Node::Children(c) => Some(c.children.iter()),
        };
        children.into_iter().flatten()
    }

    /// Children sorted by `index`.
    pub fn children_by(&self, index: &Index) -> Vec<NamedNode> {
        let mut named: Vec<NamedNode> = self
            .children()
            .map(|(key, node)| NamedNode::new(key.clone(), node.clone()))
            .collect();
        if *index != Index::Key {
            named.sort_by(|a, b| index.compare(a, b));
        }
        named
    }

    /// Key of the child immediately before `key` in key order.
    pub fn predecessor_child_key(&self, key: &ChildKey) -> Option<ChildKey> {
        match self {
            Node::Leaf(_) => None,
            Node::Children(c) => c
                .children
                .range::<ChildKey, _>(..key)
                .next_back()
                .map(|(k, _)| k.clone()),
        }
    }

    /// Key of the child immediately after `key` in key order.
    pub fn successor_child_key(&self, key: &ChildKey) -> Option<ChildKey> {
        use std::ops::Bound;
        match self {
            Node::Leaf(_) => None,
            Node::Children(c) => c
                .children
                .range::<ChildKey, _>((Bound::Excluded(key), Bound::Unbounded))
                .next()
                .map(|(k, _)| k.clone()),
        }
    }

    /// Pre-digest string for this node under `hasher`'s version.
    ///
    /// Composites embed their children's digests, so the digest is needed
    /// even here; leaves only use the version.
    pub fn hash_representation<D: NodeDigest>(&self, hasher: &NodeHasher<D>) -> String {
        match self {
            Node::Leaf(leaf) => leaf.hash_representation(hasher.version()),
            Node::Children(c) => c.hash_representation(hasher),
        }
    }

    /// Digest of the hash representation, `""` for the empty node.
    pub fn hash<D: NodeDigest>(&self, hasher: &NodeHasher<D>) -> String {
        hasher.hash(self)
    }

    /// Plain JSON value; with `export` set, priorities are kept as
    /// `.priority` / `.value` entries.
    pub fn to_json(&self, export: bool) -> Value {
        crate::snapshot::builder::node_to_json(self, export)
    }
}

impl ChildrenNode {
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ChildKey, &Node)> {
        self.children.iter()
    }

    pub fn priority(&self) -> &Node {
        self.priority.as_ref().unwrap_or(Node::empty_ref())
    }

    /// Priority prefix followed by `:<key>:<child hash>` per non-empty child.
    ///
    /// Children are visited in key order unless one of them carries a
    /// priority, in which case priority order is used.
    pub fn hash_representation<D: NodeDigest>(&self, hasher: &NodeHasher<D>) -> String {
        let version = hasher.version();
        let priority_repr = match &self.priority {
            Some(Node::Leaf(p)) => p.hash_representation(version),
            _ => String::new(),
        };
        let mut out = version.priority_prefix(&priority_repr);

        let saw_priority = self.children.values().any(|c| !c.priority().is_empty());
        let mut ordered: Vec<(&ChildKey, &Node)> = self.children.iter().collect();
        if saw_priority {
            ordered.sort_by(|(ka, a), (kb, b)| {
                priority::compare_priorities(a.priority(), b.priority()).then_with(|| ka.cmp(kb))
            });
        }

        for (key, child) in ordered {
            let child_hash = hasher.hash(child);
            trace!(key = %key, hash = %child_hash, "Hashed child");
            if !child_hash.is_empty() {
                out.push(':');
                out.push_str(key.as_str());
                out.push(':');
                out.push_str(&child_hash);
            }
        }
        out
    }
}

impl From<LeafNode> for Node {
    fn from(leaf: LeafNode) -> Self {
        Node::Leaf(Arc::new(leaf))
    }
}
