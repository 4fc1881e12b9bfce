//! Hash version verification
//!
//! Pins the leaf encodings of both versions and the SHA-256 text they digest to.

use serde_json::json;
use treehash::snapshot::{
    node_from_json, Blake3Digest, HashVersion, Node, NodeHasher, Sha256Digest,
};

fn v1() -> NodeHasher<Sha256Digest> {
    NodeHasher::new(HashVersion::V1, Sha256Digest)
}

fn v2() -> NodeHasher<Sha256Digest> {
    NodeHasher::new(HashVersion::V2, Sha256Digest)
}

#[test]
fn test_v1_number_leaf_matches_sha256_base64() {
    let node = Node::double(3.14);
    assert_eq!(v1().representation(&node), "number:3.14");
    assert_eq!(
        v1().hash(&node),
        "de+tZR4XjP/QTK+jsm95avtCgjIuXDIG2cqM8RzJsU0="
    );
}

#[test]
fn test_v2_number_leaf_uses_ieee_bits() {
    let node = Node::double(3.14);
    assert_eq!(v2().representation(&node), "number:40091eb851eb851f");
    assert_eq!(
        v2().hash(&node),
        "aDovOCuhY7K4hxSWmoGlJiA/xSugm1xQaiOyVbMU0jY="
    );
}

#[test]
fn test_integer_forms_hash_alike() {
    for hasher in [v1(), v2()] {
        assert_eq!(hasher.hash(&Node::long(1)), hasher.hash(&Node::double(1.0)));
    }
    assert_eq!(
        v1().hash(&Node::long(1)),
        "iDEiPNogKPRC1bBpmOR7x0ixFXS7qElpnTIkT9d9cyk="
    );
}

#[test]
fn test_versions_disagree_on_strings_and_numbers() {
    let string = Node::string("hello");
    assert_eq!(v1().representation(&string), "string:hello");
    assert_eq!(v2().representation(&string), "string:\"hello\"");
    assert_eq!(
        v1().hash(&string),
        "LNRTHuuYQ7Lt/WwcrZz12BZGO96fiATyUV/ZFBrLLcg="
    );
    assert_ne!(v1().hash(&Node::double(0.5)), v2().hash(&Node::double(0.5)));
}

#[test]
fn test_versions_agree_on_booleans() {
    let node = Node::boolean(true);
    assert_eq!(v1().hash(&node), v2().hash(&node));
    assert_eq!(v1().hash(&node), "miFqL0ogPplNeyEuBDSEaS3Hu/fRqr186hgWjuMiydM=");
}

#[test]
fn test_v2_quotes_and_escapes_strings() {
    assert_eq!(
        v2().representation(&Node::string("a\"b\\")),
        "string:\"a\\\"b\\\\\""
    );
    assert_ne!(
        v2().representation(&Node::string("x\"")),
        v2().representation(&Node::string("x\\\""))
    );
}

#[test]
fn test_negative_zero_only_distinct_in_v2() {
    assert_eq!(v1().hash(&Node::double(-0.0)), v1().hash(&Node::double(0.0)));
    assert_ne!(v2().hash(&Node::double(-0.0)), v2().hash(&Node::double(0.0)));
}

#[test]
fn test_nan_payloads_share_one_hash() {
    let other_nan = f64::from_bits(0x7ff8_0000_0000_0001);
    assert_eq!(
        v2().representation(&Node::double(other_nan)),
        "number:7ff8000000000000"
    );
    assert_eq!(v1().representation(&Node::double(f64::NAN)), "number:NaN");
}

#[test]
fn test_empty_node_hashes_to_empty_string_everywhere() {
    let blake = NodeHasher::new(HashVersion::V2, Blake3Digest);
    assert_eq!(v1().hash(&Node::empty()), "");
    assert_eq!(v2().hash(&Node::empty()), "");
    assert_eq!(blake.hash(&node_from_json(&json!({"a": null})).unwrap()), "");
}

#[test]
fn test_blake3_digest_is_hex() {
    let hasher = NodeHasher::new(HashVersion::V1, Blake3Digest);
    let expected = blake3::hash(b"number:3.14").to_hex().to_string();
    assert_eq!(hasher.hash(&Node::double(3.14)), expected);
}

#[test]
fn test_legacy_and_current_constants() {
    assert_eq!(HashVersion::LEGACY, HashVersion::V1);
    assert_eq!(HashVersion::CURRENT, HashVersion::V2);
    assert_eq!(HashVersion::default(), HashVersion::CURRENT);
}
