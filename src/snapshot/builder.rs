//! Building node trees from JSON and exporting them back
//!
//! Objects may carry metadata keys: `.priority` sets the node's priority,
//! `.value` supplies the node's value, and `.sv` marks a server-resolved
//! placeholder. Any other key starting with `.` is ignored.

use crate::error::NodeError;
use crate::snapshot::key::{try_parse_int, ChildKey};
use crate::snapshot::node::Node;
use crate::snapshot::priority;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

const PRIORITY_KEY: &str = ".priority";
const VALUE_KEY: &str = ".value";
const SERVER_VALUE_KEY: &str = ".sv";

/// Build a node tree from a JSON value.
#[instrument(skip(value))]
pub fn node_from_json(value: &Value) -> Result<Node, NodeError> {
    let node = build(value, Node::empty())?;
    debug!(rank = ?node.rank(), children = node.child_count(), "Built node from JSON");
    Ok(node)
}

/// Build a node tree, attaching `priority` unless the value carries its own.
pub fn node_from_json_with_priority(value: &Value, priority: Node) -> Result<Node, NodeError> {
    build(value, priority)
}

fn build(value: &Value, priority: Node) -> Result<Node, NodeError> {
    let (value, priority) = match value {
        Value::Object(map) => {
            let priority = match map.get(PRIORITY_KEY) {
                Some(raw) => priority::parse_priority(raw)?,
                None => priority,
            };
            (map.get(VALUE_KEY).unwrap_or(value), priority)
        }
        _ => (value, priority),
    };

    let leaf = match value {
        Value::Null => return Ok(Node::empty()),
        Value::Bool(b) => Node::boolean(*b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Node::long(i)
            } else if let Some(f) = n.as_f64() {
                Node::double(f)
            } else {
                return Err(NodeError::UnsupportedValue(format!("number {}", n)));
            }
        }
        Value::String(s) => Node::string(s),
        Value::Object(map) if map.contains_key(SERVER_VALUE_KEY) => {
            let mut placeholder = Map::new();
            placeholder.insert(SERVER_VALUE_KEY.to_string(), map[SERVER_VALUE_KEY].clone());
            Node::deferred(&Value::Object(placeholder))
        }
        Value::Object(map) => {
            let mut children = BTreeMap::new();
            for (key, child) in map {
                if key.starts_with('.') {
                    continue;
                }
                let child = build(child, Node::empty())?;
                if !child.is_empty() {
                    children.insert(ChildKey::new(key), child);
                }
            }
            return Node::from_children(children, priority);
        }
        Value::Array(items) => {
            let mut children = BTreeMap::new();
            for (i, item) in items.iter().enumerate() {
                let child = build(item, Node::empty())?;
                if !child.is_empty() {
                    children.insert(ChildKey::new(&i.to_string()), child);
                }
            }
            return Node::from_children(children, priority);
        }
    };
    leaf.update_priority(priority)
}

/// JSON value of a node tree.
///
/// Without `export`, composites whose keys are all small non-negative
/// integers come back as arrays and priorities are dropped. With `export`,
/// every priority is written as `.priority` (leaves become
/// `{".value": v, ".priority": p}`).
pub fn node_to_json(node: &Node, export: bool) -> Value {
    match node {
        Node::Leaf(leaf) => {
            let value = leaf.value().to_json();
            if export && !leaf.priority().is_empty() {
                let mut map = Map::new();
                map.insert(VALUE_KEY.to_string(), value);
                map.insert(PRIORITY_KEY.to_string(), node_to_json(leaf.priority(), false));
                Value::Object(map)
            } else {
                value
            }
        }
        Node::Children(_) if node.is_empty() => Value::Null,
        Node::Children(_) => children_to_json(node, export),
    }
}

fn children_to_json(node: &Node, export: bool) -> Value {
    let mut map = Map::new();
    let mut all_integer_keys = true;
    let mut max_key: i64 = 0;
    let mut count: i64 = 0;

    for (key, child) in node.children() {
        let name = key.as_str();
        map.insert(name.to_string(), node_to_json(child, export));
        count += 1;
        if all_integer_keys {
            match try_parse_int(name) {
                // "-0" and "01" parse as integers but are not array slots
                Some(i) if i >= 0 && name == i.to_string() => {
                    max_key = max_key.max(i64::from(i));
                }
                _ => all_integer_keys = false,
            }
        }
    }

    if !export && all_integer_keys && max_key < 2 * count {
        let items = (0..=max_key)
            .map(|i| map.remove(&i.to_string()).unwrap_or(Value::Null))
            .collect();
        return Value::Array(items);
    }

    if export && !node.priority().is_empty() {
        map.insert(
            PRIORITY_KEY.to_string(),
            node_to_json(node.priority(), false),
        );
    }
    Value::Object(map)
}
