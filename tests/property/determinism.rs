//! Property-based tests for determinism guarantees

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use treehash::snapshot::{node_from_json, HashVersion, Node, NodeHasher, Sha256Digest};

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        (-1.0e6f64..1.0e6)
            .prop_filter("integral doubles hash like longs", |f| f.fract() != 0.0)
            .prop_map(|f| json!(f)),
        "[a-z]{0,8}".prop_map(Value::String),
    ]
}

fn arb_document() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop::collection::btree_map("[a-z0-9]{1,4}", inner, 0..4)
            .prop_map(|map| Value::Object(map.into_iter().collect::<Map<String, Value>>()))
    })
}

fn std_hash(node: &Node) -> u64 {
    let mut hasher = DefaultHasher::new();
    Hash::hash(node, &mut hasher);
    hasher.finish()
}

proptest! {
    /// Building the same document twice yields equal trees with equal hashes
    #[test]
    fn test_hash_is_deterministic(doc in arb_document()) {
        let a = node_from_json(&doc).unwrap();
        let b = node_from_json(&doc).unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(std_hash(&a), std_hash(&b));
        for version in HashVersion::ALL {
            let hasher = NodeHasher::new(version, Sha256Digest);
            prop_assert_eq!(hasher.hash(&a), hasher.hash(&b));
        }
    }

    /// Export then import preserves the tree
    #[test]
    fn test_export_import_preserves_tree(doc in arb_document()) {
        let node = node_from_json(&doc).unwrap();
        let back = node_from_json(&node.to_json(true)).unwrap();
        prop_assert_eq!(back, node);
    }

    /// Distinct trees hash differently under the current version
    #[test]
    fn test_distinct_trees_hash_differently(a in arb_document(), b in arb_document()) {
        let left = node_from_json(&a).unwrap();
        let right = node_from_json(&b).unwrap();
        let hasher = NodeHasher::new(HashVersion::CURRENT, Sha256Digest);
        if left != right {
            prop_assert_ne!(hasher.hash(&left), hasher.hash(&right));
        } else {
            prop_assert_eq!(hasher.hash(&left), hasher.hash(&right));
        }
    }

    /// Only the empty tree hashes to ""
    #[test]
    fn test_empty_hash_iff_empty_tree(doc in arb_document()) {
        let node = node_from_json(&doc).unwrap();
        let hasher = NodeHasher::new(HashVersion::V1, Sha256Digest);
        prop_assert_eq!(hasher.hash(&node).is_empty(), node.is_empty());
    }

    /// Scalar priorities are accepted and reflected in the hash
    #[test]
    fn test_priority_changes_hash(doc in arb_scalar(), priority in arb_scalar()) {
        let node = node_from_json(&doc).unwrap();
        let priority = node_from_json(&priority).unwrap();
        let prioritized = node.update_priority(priority.clone()).unwrap();
        prop_assert_eq!(prioritized.priority(), &priority);
        let hasher = NodeHasher::new(HashVersion::V2, Sha256Digest);
        prop_assert_ne!(hasher.hash(&prioritized), hasher.hash(&node));
    }
}
