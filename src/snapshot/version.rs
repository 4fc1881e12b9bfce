//! Hash versions and their leaf encodings
//!
//! Every hash representation is produced under exactly one [`HashVersion`].
//! Leaf encodings are `<type tag>:<value text>`; the value text rules per
//! version are:
//!
//! | value    | v1                                  | v2                                   |
//! |----------|-------------------------------------|--------------------------------------|
//! | boolean  | `true` / `false`                    | same as v1                           |
//! | number   | shortest decimal, `-0` → `0`        | 16 hex digits of the IEEE-754 bits   |
//! | string   | raw text                            | quoted, `\` and `"` escaped          |
//! | deferred | canonical JSON                      | same as v1                           |
//!
//! The priority prefix (`priority:<repr>:`) and the composite layout are shared
//! by all versions.

use crate::error::NodeError;
use crate::snapshot::leaf::LeafValue;
use crate::snapshot::number;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of hash encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashVersion {
    V1,
    V2,
}

impl HashVersion {
    /// Version still accepted when verifying previously stored hashes
    pub const LEGACY: HashVersion = HashVersion::V1;

    /// Version used for new writes
    pub const CURRENT: HashVersion = HashVersion::V2;

    pub const ALL: [HashVersion; 2] = [HashVersion::V1, HashVersion::V2];

    pub fn as_str(self) -> &'static str {
        match self {
            HashVersion::V1 => "v1",
            HashVersion::V2 => "v2",
        }
    }

    /// Encode a leaf value (without its priority) under this version.
    pub fn encode_leaf(self, value: &LeafValue) -> String {
        match self {
            HashVersion::V1 => encode_v1(value),
            HashVersion::V2 => encode_v2(value),
        }
    }

    /// Prefix contributed by a non-empty priority's representation.
    ///
    /// An empty priority contributes nothing; callers pass the already
    /// rendered priority representation.
    pub fn priority_prefix(self, priority_repr: &str) -> String {
        match self {
            HashVersion::V1 | HashVersion::V2 => {
                if priority_repr.is_empty() {
                    String::new()
                } else {
                    format!("priority:{}:", priority_repr)
                }
            }
        }
    }
}

impl Default for HashVersion {
    fn default() -> Self {
        HashVersion::CURRENT
    }
}

impl fmt::Display for HashVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashVersion {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(HashVersion::V1),
            "v2" | "2" => Ok(HashVersion::V2),
            other => Err(NodeError::UnknownHashVersion(other.to_string())),
        }
    }
}

/// Legacy leaf encoding.
pub fn encode_v1(value: &LeafValue) -> String {
    let text = match value {
        LeafValue::DeferredValue(json) => json.clone(),
        LeafValue::Boolean(b) => b.to_string(),
        LeafValue::Long(n) => number::to_decimal_string(*n as f64),
        LeafValue::Double(d) => number::to_decimal_string(*d),
        LeafValue::String(s) => s.clone(),
    };
    format!("{}:{}", value.type_tag(), text)
}

/// Current leaf encoding.
pub fn encode_v2(value: &LeafValue) -> String {
    let text = match value {
        LeafValue::DeferredValue(json) => json.clone(),
        LeafValue::Boolean(b) => b.to_string(),
        LeafValue::Long(n) => number::to_hex_string(*n as f64),
        LeafValue::Double(d) => number::to_hex_string(*d),
        LeafValue::String(s) => quote_string(s),
    };
    format!("{}:{}", value.type_tag(), text)
}

/// Wrap in double quotes, escaping backslashes and quotes.
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
