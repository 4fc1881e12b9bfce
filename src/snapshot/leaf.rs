//! Leaf nodes: a scalar value plus a priority

use crate::error::NodeError;
use crate::snapshot::node::Node;
use crate::snapshot::number;
use crate::snapshot::priority;
use crate::snapshot::version::HashVersion;
use serde_json::Value;
use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

/// Kind of scalar a leaf holds, in cross-kind sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LeafKind {
    DeferredValue,
    Boolean,
    Number,
    String,
}

/// Scalar payload of a leaf.
///
/// `Long` and `Double` are distinct variants (so `Long(1) != Double(1.0)`) but
/// share the `Number` kind: they compare numerically against each other and
/// encode identically for hashing.
#[derive(Debug, Clone)]
pub enum LeafValue {
    /// Placeholder resolved by the server, e.g. `{".sv":"timestamp"}`,
    /// held as canonical JSON text.
    DeferredValue(String),
    Boolean(bool),
    Long(i64),
    Double(f64),
    String(String),
}

impl LeafValue {
    pub fn kind(&self) -> LeafKind {
        match self {
            LeafValue::DeferredValue(_) => LeafKind::DeferredValue,
            LeafValue::Boolean(_) => LeafKind::Boolean,
            LeafValue::Long(_) | LeafValue::Double(_) => LeafKind::Number,
            LeafValue::String(_) => LeafKind::String,
        }
    }

    /// Tag written before the value in a hash representation.
    pub fn type_tag(&self) -> &'static str {
        match self.kind() {
            LeafKind::DeferredValue => "deferredValue",
            LeafKind::Boolean => "boolean",
            LeafKind::Number => "number",
            LeafKind::String => "string",
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            LeafValue::DeferredValue(json) => serde_json::from_str(json).unwrap_or(Value::Null),
            LeafValue::Boolean(b) => Value::Bool(*b),
            LeafValue::Long(n) => Value::from(*n),
            LeafValue::Double(d) => serde_json::Number::from_f64(*d)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            LeafValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl PartialEq for LeafValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (LeafValue::DeferredValue(a), LeafValue::DeferredValue(b)) => a == b,
            (LeafValue::Boolean(a), LeafValue::Boolean(b)) => a == b,
            (LeafValue::Long(a), LeafValue::Long(b)) => a == b,
            (LeafValue::Double(a), LeafValue::Double(b)) => {
                number::canonical_bits(*a) == number::canonical_bits(*b)
            }
            (LeafValue::String(a), LeafValue::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for LeafValue {}

impl Hash for LeafValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            LeafValue::DeferredValue(json) => json.hash(state),
            LeafValue::Boolean(b) => b.hash(state),
            LeafValue::Long(n) => n.hash(state),
            LeafValue::Double(d) => number::canonical_bits(*d).hash(state),
            LeafValue::String(s) => s.hash(state),
        }
    }
}

/// Immutable scalar node.
///
/// The priority is `None` when empty, so two leaves built with and without an
/// explicit empty priority are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeafNode {
    value: LeafValue,
    priority: Option<Node>,
}

impl LeafNode {
    /// Leaf without a priority.
    pub fn new(value: LeafValue) -> Self {
        Self {
            value,
            priority: None,
        }
    }

    /// Leaf with a priority; rejects anything `is_valid_priority` refuses.
    pub fn with_priority(value: LeafValue, priority: Node) -> Result<Self, NodeError> {
        Ok(Self {
            value,
            priority: priority::checked_priority(priority)?,
        })
    }

    pub fn value(&self) -> &LeafValue {
        &self.value
    }

    pub fn kind(&self) -> LeafKind {
        self.value.kind()
    }

    pub fn priority(&self) -> &Node {
        self.priority.as_ref().unwrap_or(Node::empty_ref())
    }

    /// New leaf with the same value and a different priority.
    pub fn update_priority(&self, priority: Node) -> Result<LeafNode, NodeError> {
        LeafNode::with_priority(self.value.clone(), priority)
    }

    /// `<priority prefix><type tag>:<value text>` under `version`.
    pub fn hash_representation(&self, version: HashVersion) -> String {
        let priority_repr = match &self.priority {
            Some(Node::Leaf(p)) => p.hash_representation(version),
            _ => String::new(),
        };
        let mut out = version.priority_prefix(&priority_repr);
        out.push_str(&version.encode_leaf(&self.value));
        out
    }

    /// Natural order between two leaves of the same kind.
    ///
    /// Numbers compare exactly across `Long` and `Double`; deferred
    /// values never order against each other.
    pub fn compare_leaf_values(&self, other: &LeafNode) -> Result<Ordering, NodeError> {
        let ordering = match (&self.value, &other.value) {
            (LeafValue::DeferredValue(_), LeafValue::DeferredValue(_)) => Ordering::Equal,
            (LeafValue::Boolean(a), LeafValue::Boolean(b)) => a.cmp(b),
            (LeafValue::Long(a), LeafValue::Long(b)) => a.cmp(b),
            (LeafValue::String(a), LeafValue::String(b)) => a.cmp(b),
            (LeafValue::Double(a), LeafValue::Double(b)) => number::compare_doubles(*a, *b),
            (LeafValue::Long(a), LeafValue::Double(b)) => number::compare_long_double(*a, *b),
            (LeafValue::Double(a), LeafValue::Long(b)) => {
                number::compare_long_double(*b, *a).reverse()
            }
            _ => {
                return Err(NodeError::LeafKindMismatch {
                    left: self.kind(),
                    right: other.kind(),
                })
            }
        };
        Ok(ordering)
    }

    /// Order against any leaf: kind precedence first, then value.
    pub fn compare_to(&self, other: &LeafNode) -> Ordering {
        match self.kind().cmp(&other.kind()) {
            Ordering::Equal => self
                .compare_leaf_values(other)
                .unwrap_or(Ordering::Equal),
            unequal => unequal,
        }
    }
}
