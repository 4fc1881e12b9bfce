//! JSON import and export

use serde_json::json;
use treehash::snapshot::{node_from_json, node_to_json, Node, NodeRank, Path};

#[test]
fn test_plain_document_roundtrips() {
    let doc = json!({
        "users": {
            "alice": {"age": 30, "admin": true, "name": "Alice"},
            "bob": {"age": 25.5, "tags": ["a", "b"]}
        }
    });
    let node = node_from_json(&doc).unwrap();
    assert_eq!(node_to_json(&node, false), doc);
}

#[test]
fn test_export_roundtrips_priorities() {
    let doc = json!({
        "list": {
            "x": {".value": "first", ".priority": 1},
            "y": {"n": 2, ".priority": "second"}
        },
        ".priority": true
    });
    let node = node_from_json(&doc).unwrap();
    assert_eq!(node.to_json(true), doc);
    assert_eq!(node_from_json(&node.to_json(true)).unwrap(), node);
}

#[test]
fn test_nulls_and_empty_objects_vanish() {
    let node = node_from_json(&json!({"a": null, "b": {}, "c": {"d": null}})).unwrap();
    assert!(node.is_empty());
    assert_eq!(node.to_json(false), serde_json::Value::Null);
}

#[test]
fn test_server_values_are_deferred() {
    let node = node_from_json(&json!({"at": {".sv": "timestamp", "ignored": 1}})).unwrap();
    let at = node.get_child(&Path::parse("at"));
    assert_eq!(at.rank(), NodeRank::DeferredValue);
    assert_eq!(at.to_json(false), json!({".sv": "timestamp"}));
}

#[test]
fn test_numbers_keep_their_form() {
    let node = node_from_json(&json!({"i": 3, "f": 3.0})).unwrap();
    assert_eq!(node.get_child(&Path::parse("i")), Node::long(3));
    assert_eq!(node.get_child(&Path::parse("f")), Node::double(3.0));
}
