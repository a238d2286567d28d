use serde::{Serialize, Serializer};
use serde_yaml::Value;
use std::fmt;

/// One step into a document: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Location inside a document, rendered as `pipeline.stages[0].stage`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<PathSegment>,
}

impl KeyPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push_key<T: Into<String>>(&mut self, key: T) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn child_key<T: Into<String>>(&self, key: T) -> Self {
        let mut child = self.clone();
        child.push_key(key);
        child
    }

    pub fn child_index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.push_index(index);
        child
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "<root>");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if position == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

impl Serialize for KeyPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Borrow the value at `path`, if every segment resolves.
pub fn value_at<'a>(doc: &'a Value, path: &KeyPath) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(doc, |current, segment| match segment {
            PathSegment::Key(key) => current.get(key.as_str()),
            PathSegment::Index(index) => current.get(*index),
        })
}

/// Mutable counterpart of [`value_at`].
pub fn value_at_mut<'a>(doc: &'a mut Value, path: &KeyPath) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(doc, |current, segment| match segment {
            PathSegment::Key(key) => current.get_mut(key.as_str()),
            PathSegment::Index(index) => current.get_mut(*index),
        })
}
