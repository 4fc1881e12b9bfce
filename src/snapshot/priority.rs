//! Priority validation, parsing, and ordering

use crate::error::NodeError;
use crate::snapshot::leaf::LeafKind;
use crate::snapshot::node::Node;
use serde_json::Value;
use std::cmp::Ordering;
use tracing::warn;

/// True if `node` may be attached to another node as its priority.
///
/// Only the empty node and boolean, number or string leaves qualify, and the
/// candidate must not carry a priority of its own.
pub fn is_valid_priority(node: &Node) -> bool {
    if !node.priority().is_empty() {
        return false;
    }
    match node {
        Node::Children(_) => node.is_empty(),
        Node::Leaf(leaf) => matches!(
            leaf.kind(),
            LeafKind::Boolean | LeafKind::Number | LeafKind::String
        ),
    }
}

/// Validate a priority and normalize the empty node to `None`.
pub(crate) fn checked_priority(priority: Node) -> Result<Option<Node>, NodeError> {
    if !is_valid_priority(&priority) {
        warn!(rank = ?priority.rank(), "Rejected invalid priority");
        let reason = if priority.priority().is_empty() {
            format!("{:?} nodes cannot be used as a priority", priority.rank())
        } else {
            "a priority cannot carry a priority of its own".to_string()
        };
        return Err(NodeError::InvalidPriority(reason));
    }
    if priority.is_empty() {
        Ok(None)
    } else {
        Ok(Some(priority))
    }
}

/// Build a priority node from a raw JSON value.
pub fn parse_priority(value: &Value) -> Result<Node, NodeError> {
    match value {
        Value::Null => Ok(Node::empty()),
        Value::Bool(b) => Ok(Node::boolean(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Node::long(i))
            } else if let Some(f) = n.as_f64() {
                Ok(Node::double(f))
            } else {
                Err(NodeError::InvalidPriority(format!("unrepresentable number {}", n)))
            }
        }
        Value::String(s) => Ok(Node::string(s)),
        Value::Array(_) | Value::Object(_) => Err(NodeError::InvalidPriority(format!(
            "priority must be null, a boolean, a number or a string, got {}",
            value
        ))),
    }
}

/// Order two priorities: any explicit priority sorts before an empty one;
/// explicit priorities compare by kind precedence, then by value.
pub fn compare_priorities(a: &Node, b: &Node) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => Ordering::Equal,
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        (false, false) => a.compare(b),
    }
}
