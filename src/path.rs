//! Paths locating a cursor inside a nested [`Value`](crate::Value).
//!
//! This module provides [`ValuePath`] and [`PathSegment`]. Paths are immutable:
//! every navigation method returns a new path.

use std::fmt::{self, Display};

use crate::value::Value;

/// A segment of a value path.
///
/// Paths are built from segments that represent either keyed access or
/// positional access.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A map key given by name (a string or keyword key, without its sigil).
    Field(String),
    /// A position in a vector, list or set, or a non-negative integer map key.
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }

    /// Derives the segment that locates `key` inside a map.
    ///
    /// Strings and keywords become fields, non-negative integers become
    /// indexes, and any other key is rendered into a field.
    pub fn from_key(key: &Value) -> Self {
        match key {
            Value::Str(name) | Value::Keyword(name) => PathSegment::Field(name.clone()),
            Value::Int(i) => match usize::try_from(*i) {
                Ok(idx) => PathSegment::Index(idx),
                Err(_) => PathSegment::Field(i.to_string()),
            },
            other => PathSegment::Field(other.to_string()),
        }
    }
}

impl Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(idx) => write!(f, "{}", idx),
        }
    }
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<usize> for PathSegment {
    fn from(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A path to a value in a nested structure.
///
/// `ValuePath` represents locations like `users[0].email`. Its [`Display`]
/// uses that bracketed form; [`ValuePath::dotted`] renders the flat
/// `users.0.email` form used by [`errors_to_string`](crate::errors_to_string).
///
/// # Example
///
/// ```rust
/// use autopsy::ValuePath;
///
/// let path = ValuePath::root()
///     .push_field("users")
///     .push_index(0)
///     .push_field("email");
///
/// assert_eq!(path.to_string(), "users[0].email");
/// assert_eq!(path.dotted(), "users.0.email");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ValuePath {
    segments: Vec<PathSegment>,
}

impl ValuePath {
    /// Creates an empty path representing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Creates a path from a single field segment.
    pub fn from_field(name: impl Into<String>) -> Self {
        Self {
            segments: vec![PathSegment::Field(name.into())],
        }
    }

    /// Creates a path from a single index segment.
    pub fn from_index(idx: usize) -> Self {
        Self {
            segments: vec![PathSegment::Index(idx)],
        }
    }

    /// Returns a new path with `segment` appended.
    pub fn push(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.push(PathSegment::Field(name.into()))
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        self.push(PathSegment::Index(index))
    }

    /// Returns a new path holding only the first `len` segments.
    pub fn truncate(&self, len: usize) -> Self {
        Self {
            segments: self.segments[..len.min(self.segments.len())].to_vec(),
        }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the segments as a slice.
    pub fn as_slice(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Returns the parent path (all segments except the last), or None if this is root.
    pub fn parent(&self) -> Option<Self> {
        if self.segments.is_empty() {
            None
        } else {
            Some(self.truncate(self.segments.len() - 1))
        }
    }

    /// Returns the last segment, or None if this is root.
    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Renders the path as dot-joined segments, `(root)` for the empty path.
    pub fn dotted(&self) -> String {
        if self.is_root() {
            return "(root)".to_string();
        }
        self.segments
            .iter()
            .map(PathSegment::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl Display for ValuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl FromIterator<PathSegment> for ValuePath {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_path_is_empty() {
        let path = ValuePath::root();
        assert!(path.is_root());
        assert!(path.is_empty());
        assert_eq!(path.len(), 0);
        assert_eq!(path.to_string(), "");
        assert_eq!(path.dotted(), "(root)");
    }

    #[test]
    fn test_field_with_index() {
        let path = ValuePath::root().push_field("users").push_index(0);
        assert_eq!(path.to_string(), "users[0]");
        assert_eq!(path.dotted(), "users.0");
    }

    #[test]
    fn test_truncate() {
        let path = ValuePath::root()
            .push_field("a")
            .push_index(1)
            .push_field("b");

        assert_eq!(path.truncate(1).to_string(), "a");
        assert!(path.truncate(0).is_root());
        assert_eq!(path.truncate(10), path);
    }

    #[test]
    fn test_path_immutability() {
        let base = ValuePath::root().push_field("users");
        let path_a = base.push_index(0);
        let path_b = base.push_index(1);

        assert_eq!(base.to_string(), "users");
        assert_eq!(path_a.to_string(), "users[0]");
        assert_eq!(path_b.to_string(), "users[1]");
    }

    #[test]
    fn test_parent_path() {
        let path = ValuePath::root()
            .push_field("users")
            .push_index(0)
            .push_field("email");

        let parent = path.parent().unwrap();
        assert_eq!(parent.to_string(), "users[0]");

        let root = parent.parent().unwrap().parent().unwrap();
        assert!(root.is_root());
        assert!(root.parent().is_none());
    }

    #[test]
    fn test_segment_from_key() {
        assert_eq!(
            PathSegment::from_key(&Value::keyword("name")),
            PathSegment::Field("name".to_string())
        );
        assert_eq!(
            PathSegment::from_key(&Value::from("name")),
            PathSegment::Field("name".to_string())
        );
        assert_eq!(PathSegment::from_key(&Value::Int(3)), PathSegment::Index(3));
        assert_eq!(
            PathSegment::from_key(&Value::Int(-3)),
            PathSegment::Field("-3".to_string())
        );
        assert_eq!(
            PathSegment::from_key(&Value::Bool(true)),
            PathSegment::Field("true".to_string())
        );
    }
}
