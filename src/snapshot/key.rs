//! Child keys and their canonical sibling order

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

const MIN_NAME: &str = "[MIN_NAME]";
const MAX_NAME: &str = "[MAX_NAME]";
const PRIORITY_NAME: &str = ".priority";
const INFO_NAME: &str = ".info";

/// Longest text that can still parse as an `i32` ("-2147483648").
const MAX_INT_KEY_LEN: usize = 11;

/// Name of a child within a composite node.
///
/// Keys that read as 32-bit integers order numerically and before every
/// other key; `[MIN_NAME]` and `[MAX_NAME]` bound the whole key space.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ChildKey {
    name: Arc<str>,
    int_value: Option<i32>,
}

impl ChildKey {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            int_value: try_parse_int(name),
        }
    }

    /// Sentinel that sorts before every other key
    pub fn min_key() -> Self {
        Self::new(MIN_NAME)
    }

    /// Sentinel that sorts after every other key
    pub fn max_key() -> Self {
        Self::new(MAX_NAME)
    }

    /// The pseudo-child that addresses a node's priority
    pub fn priority_key() -> Self {
        Self::new(PRIORITY_NAME)
    }

    pub fn info_key() -> Self {
        Self::new(INFO_NAME)
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }

    pub fn is_priority_key(&self) -> bool {
        &*self.name == PRIORITY_NAME
    }

    /// Integer value when the key reads as an `i32`.
    pub fn int_value(&self) -> Option<i32> {
        self.int_value
    }

    pub fn is_int(&self) -> bool {
        self.int_value.is_some()
    }

    fn is_min(&self) -> bool {
        &*self.name == MIN_NAME
    }

    fn is_max(&self) -> bool {
        &*self.name == MAX_NAME
    }
}

/// Parse keys like `"12"`, `"-3"` or `"007"` as `i32`.
///
/// Leading zeros are accepted; `+`, whitespace, and anything outside the
/// `i32` range are not.
pub(crate) fn try_parse_int(text: &str) -> Option<i32> {
    if text.is_empty() || text.len() > MAX_INT_KEY_LEN {
        return None;
    }
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    if digits.is_empty() {
        return None;
    }

    let mut number: i64 = 0;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            return None;
        }
        number = number * 10 + i64::from(byte - b'0');
    }
    if negative {
        number = -number;
    }
    i32::try_from(number).ok()
}

impl Ord for ChildKey {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.name == other.name {
            return Ordering::Equal;
        }
        if self.is_min() || other.is_max() {
            return Ordering::Less;
        }
        if other.is_min() || self.is_max() {
            return Ordering::Greater;
        }
        match (self.int_value, other.int_value) {
            (Some(a), Some(b)) => a
                .cmp(&b)
                .then_with(|| self.name.len().cmp(&other.name.len()))
                .then_with(|| self.name.cmp(&other.name)),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => self.name.cmp(&other.name),
        }
    }
}

impl PartialOrd for ChildKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Debug for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChildKey({:?})", &*self.name)
    }
}

impl From<&str> for ChildKey {
    fn from(name: &str) -> Self {
        ChildKey::new(name)
    }
}

impl From<String> for ChildKey {
    fn from(name: String) -> Self {
        ChildKey::new(&name)
    }
}
