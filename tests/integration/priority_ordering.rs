//! Priority validation and sibling ordering

use serde_json::json;
use std::cmp::Ordering;
use treehash::error::NodeError;
use treehash::snapshot::{
    compare_priorities, is_valid_priority, node_from_json, parse_priority, Index, LeafNode,
    LeafValue, Node, Path,
};

#[test]
fn test_only_scalar_priorities_are_accepted() {
    assert!(is_valid_priority(&Node::empty()));
    assert!(is_valid_priority(&Node::string("p")));
    assert!(!is_valid_priority(&Node::deferred(&json!({".sv": "timestamp"}))));
    assert!(!is_valid_priority(&node_from_json(&json!({"a": 1})).unwrap()));

    let nested = Node::long(1).update_priority(Node::long(2)).unwrap();
    assert!(!is_valid_priority(&nested));
    assert!(matches!(
        Node::string("x").update_priority(nested),
        Err(NodeError::InvalidPriority(_))
    ));
}

#[test]
fn test_leaf_constructor_gates_priority() {
    let composite = node_from_json(&json!({"a": 1})).unwrap();
    assert!(LeafNode::with_priority(LeafValue::Boolean(true), composite).is_err());
    let leaf = LeafNode::with_priority(LeafValue::Boolean(true), Node::double(2.5)).unwrap();
    assert_eq!(leaf.priority(), &Node::double(2.5));
}

#[test]
fn test_parse_priority_rejects_structures() {
    assert_eq!(parse_priority(&json!(null)).unwrap(), Node::empty());
    assert_eq!(parse_priority(&json!(7)).unwrap(), Node::long(7));
    assert!(parse_priority(&json!([1])).is_err());
    assert!(parse_priority(&json!({"a": 1})).is_err());
}

#[test]
fn test_explicit_priorities_sort_before_missing() {
    assert_eq!(compare_priorities(&Node::long(9), &Node::empty()), Ordering::Less);
    assert_eq!(compare_priorities(&Node::empty(), &Node::empty()), Ordering::Equal);
    // numbers before strings, then by value
    assert_eq!(
        compare_priorities(&Node::long(100), &Node::string("a")),
        Ordering::Less
    );
    assert_eq!(
        compare_priorities(&Node::double(1.5), &Node::long(2)),
        Ordering::Less
    );
}

#[test]
fn test_children_by_priority_index() {
    let node = node_from_json(&json!({
        "a": 1,
        "b": {".value": 2, ".priority": "z"},
        "c": {".value": 3, ".priority": 5},
        "d": 4
    }))
    .unwrap();
    let keys: Vec<String> = node
        .children_by(&Index::Priority)
        .into_iter()
        .map(|named| named.key.to_string())
        .collect();
    assert_eq!(keys, vec!["c", "b", "a", "d"]);
}

#[test]
fn test_children_by_child_index() {
    let node = node_from_json(&json!({
        "alice": {"score": 30},
        "bob": {"score": 10},
        "carol": {"name": "no score"}
    }))
    .unwrap();
    let keys: Vec<String> = node
        .children_by(&Index::Child(Path::parse("score")))
        .into_iter()
        .map(|named| named.key.to_string())
        .collect();
    assert_eq!(keys, vec!["carol", "bob", "alice"]);
}

#[test]
fn test_value_order_across_kinds() {
    let ordered = [
        Node::empty(),
        Node::deferred(&json!({".sv": "timestamp"})),
        Node::boolean(false),
        Node::boolean(true),
        Node::double(f64::NEG_INFINITY),
        Node::double(-0.0),
        Node::long(0),
        Node::double(f64::NAN),
        Node::string(""),
        Node::string("a"),
        node_from_json(&json!({"x": 1})).unwrap(),
    ];
    for pair in ordered.windows(2) {
        assert_ne!(
            pair[0].compare(&pair[1]),
            Ordering::Greater,
            "{:?} should not sort after {:?}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn test_cross_kind_leaf_comparison_is_an_error() {
    let a = LeafNode::new(LeafValue::Boolean(true));
    let b = LeafNode::new(LeafValue::String("t".to_string()));
    assert!(matches!(
        a.compare_leaf_values(&b),
        Err(NodeError::LeafKindMismatch { .. })
    ));
}
