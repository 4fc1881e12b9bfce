//! Composite hashing and persistent updates

use serde_json::json;
use treehash::snapshot::{
    node_from_json, ChildKey, HashVersion, Node, NodeHasher, Path, Sha256Digest,
};

fn hasher() -> NodeHasher<Sha256Digest> {
    NodeHasher::new(HashVersion::V1, Sha256Digest)
}

#[test]
fn test_composite_layout_in_key_order() {
    let node = node_from_json(&json!({"b": 2, "a": 1})).unwrap();
    let h = hasher();
    let expected = format!(
        ":a:{}:b:{}",
        h.hash(&Node::long(1)),
        h.hash(&Node::long(2))
    );
    assert_eq!(h.representation(&node), expected);
    assert_eq!(h.hash(&node), "fg3O8fr5EE5L1lISUJ+N0VELwb1nIMPNpzVvpiV/c6E=");
}

#[test]
fn test_prioritized_children_hash_first() {
    let node = node_from_json(&json!({
        "a": 1,
        "b": {".value": 2, ".priority": 1}
    }))
    .unwrap();
    let repr = hasher().representation(&node);
    assert!(repr.starts_with(":b:"), "prioritized child first: {}", repr);
    assert!(repr.contains(":a:"));
}

#[test]
fn test_composite_priority_prefix() {
    let node = node_from_json(&json!({"x": "y", ".priority": "p"})).unwrap();
    let h = hasher();
    assert_eq!(
        h.representation(&node),
        format!("priority:string:p::x:{}", h.hash(&Node::string("y")))
    );
}

#[test]
fn test_updates_leave_original_untouched() {
    let original = node_from_json(&json!({"users": {"alice": 1, "bob": 2}})).unwrap();
    let before = hasher().hash(&original);

    let updated = original
        .update_child(&Path::parse("/users/carol"), Node::long(3))
        .unwrap();

    assert_eq!(hasher().hash(&original), before);
    assert_ne!(hasher().hash(&updated), before);
    assert_eq!(updated.get_child(&Path::parse("/users")).child_count(), 3);
    assert_eq!(original.get_child(&Path::parse("/users")).child_count(), 2);
}

#[test]
fn test_removing_last_child_collapses_to_empty() {
    let node = node_from_json(&json!({"only": {"leaf": true}})).unwrap();
    let removed = node
        .update_child(&Path::parse("/only/leaf"), Node::empty())
        .unwrap();
    assert!(removed.is_empty());
    assert_eq!(hasher().hash(&removed), "");
}

#[test]
fn test_setting_priority_through_path() {
    let node = node_from_json(&json!({"a": 1})).unwrap();
    let updated = node
        .update_child(&Path::parse("/a/.priority"), Node::string("p"))
        .unwrap();
    assert_eq!(
        updated.get_child(&Path::parse("/a")).priority(),
        &Node::string("p")
    );
    assert!(node
        .update_child(&Path::parse("/.priority/x"), Node::long(1))
        .is_err());
}

#[test]
fn test_leaf_replaced_by_child_write() {
    let leaf = Node::long(5).update_priority(Node::long(1)).unwrap();
    let updated = leaf
        .update_immediate_child(&ChildKey::new("x"), Node::boolean(true))
        .unwrap();
    assert!(!updated.is_leaf());
    assert_eq!(updated.priority(), &Node::long(1));
    assert_eq!(updated.child_count(), 1);
}

#[test]
fn test_integer_keys_sort_numerically() {
    let node = node_from_json(&json!({"10": "a", "9": "b", "x": "c", "-1": "d"})).unwrap();
    let keys: Vec<&str> = node.children().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["-1", "9", "10", "x"]);
}

#[test]
fn test_neighbouring_keys() {
    let node = node_from_json(&json!({"a": 1, "b": 2, "c": 3})).unwrap();
    assert_eq!(
        node.predecessor_child_key(&ChildKey::new("b")),
        Some(ChildKey::new("a"))
    );
    assert_eq!(
        node.successor_child_key(&ChildKey::new("b")),
        Some(ChildKey::new("c"))
    );
    assert_eq!(node.successor_child_key(&ChildKey::new("c")), None);
}
