//! Slash-separated paths into a node tree

use crate::snapshot::key::ChildKey;
use std::fmt;

/// Location of a subtree, as a sequence of child keys from some root.
#[derive(Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path {
    segments: Vec<ChildKey>,
}

impl Path {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse `"/users/alice"` style text.
    ///
    /// Empty segments are skipped, so `"a//b/"` and `"/a/b"` are the same path
    /// and `""` or `"/"` is the root.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(ChildKey::new)
                .collect(),
        }
    }

    pub fn from_keys(segments: Vec<ChildKey>) -> Self {
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn front(&self) -> Option<&ChildKey> {
        self.segments.first()
    }

    pub fn back(&self) -> Option<&ChildKey> {
        self.segments.last()
    }

    /// Everything after the first segment (root stays root).
    pub fn pop_front(&self) -> Path {
        Self {
            segments: self.segments.iter().skip(1).cloned().collect(),
        }
    }

    /// Parent path, or `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.segments.is_empty() {
            return None;
        }
        Some(Self {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }

    pub fn child(&self, key: &ChildKey) -> Path {
        let mut segments = self.segments.clone();
        segments.push(key.clone());
        Self { segments }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChildKey> {
        self.segments.iter()
    }

    /// True if `other` equals this path or lies below it.
    pub fn contains(&self, other: &Path) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Path({})", self)
    }
}

impl From<&str> for Path {
    fn from(text: &str) -> Self {
        Path::parse(text)
    }
}
