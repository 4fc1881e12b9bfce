//! Subtree hash listings and divergence against a remote report

use serde_json::json;
use std::collections::BTreeMap;
use treehash::snapshot::walker::{find_divergent, subtree_hashes, Walker, WalkerConfig};
use treehash::snapshot::{node_from_json, HashVersion, Node, NodeHasher, Path, Sha256Digest};

fn hasher() -> NodeHasher<Sha256Digest> {
    NodeHasher::new(HashVersion::CURRENT, Sha256Digest)
}

fn local() -> Node {
    node_from_json(&json!({
        "rooms": {
            "r1": {"title": "one", "members": {"alice": true}},
            "r2": {"title": "two"}
        },
        "version": 4
    }))
    .unwrap()
}

#[test]
fn test_subtree_hashes_cover_every_path() {
    let hashes = subtree_hashes(&local(), &hasher(), None);
    let paths: Vec<String> = hashes.keys().map(|p| p.to_string()).collect();
    assert_eq!(
        paths,
        vec![
            "/",
            "/rooms",
            "/rooms/r1",
            "/rooms/r1/members",
            "/rooms/r1/members/alice",
            "/rooms/r1/title",
            "/rooms/r2",
            "/rooms/r2/title",
            "/version",
        ]
    );
    assert_eq!(hashes[&Path::root()], hasher().hash(&local()));
}

#[test]
fn test_max_depth_limits_listing() {
    let hashes = subtree_hashes(&local(), &hasher(), Some(1));
    assert_eq!(hashes.len(), 3);
}

#[test]
fn test_remote_edit_is_localized() {
    let remote = local()
        .update_child(&Path::parse("/rooms/r2/title"), Node::string("TWO"))
        .unwrap();
    let reported = subtree_hashes(&remote, &hasher(), None);
    let divergent: Vec<String> = find_divergent(&local(), &reported, &hasher())
        .into_iter()
        .map(|d| d.path.to_string())
        .collect();
    assert_eq!(divergent, vec!["/", "/rooms", "/rooms/r2", "/rooms/r2/title"]);
}

#[test]
fn test_version_mismatch_diverges_everywhere() {
    let legacy = NodeHasher::new(HashVersion::LEGACY, Sha256Digest);
    let reported = subtree_hashes(&local(), &legacy, Some(0));
    assert_eq!(find_divergent(&local(), &reported, &hasher()).len(), 1);
    assert!(find_divergent(&local(), &reported, &legacy).is_empty());
}

#[test]
fn test_remote_deletion_reported_as_empty_hash() {
    let mut reported = BTreeMap::new();
    reported.insert(Path::parse("/rooms/r2"), String::new());
    let divergent = find_divergent(&local(), &reported, &hasher());
    assert_eq!(divergent.len(), 1);
    assert_eq!(divergent[0].remote, "");
    assert!(!divergent[0].local.is_empty());
}

#[test]
fn test_walker_skips_leaves() {
    let config = WalkerConfig {
        max_depth: None,
        skip_leaves: true,
    };
    let entries = Walker::with_config(local(), config).walk();
    assert!(entries.iter().all(|e| !e.node.is_leaf()));
    assert_eq!(entries.len(), 5);
}
