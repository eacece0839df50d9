//! Field paths into the form value tree.
//!
//! Paths use the notation form fields are named with: object members joined
//! by dots, array offsets in brackets (`extras.blog[0].title`). Writing
//! through a path creates missing intermediate objects and arrays; reading a
//! path that does not exist yields `None`, which the editor treats as
//! "undefined".

#[cfg(test)]
#[path = "path_test.rs"]
mod path_test;

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

/// Error returned when parsing or writing through a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The path has no segments.
    #[error("empty field path")]
    Empty,
    /// The path text is not valid path notation.
    #[error("malformed field path `{path}` at byte {offset}")]
    Malformed { path: String, offset: usize },
    /// A segment tried to descend into a value of the wrong shape.
    #[error("cannot descend into {found} at `{at}`")]
    NotAContainer { at: String, found: &'static str },
    /// An array offset points past the end of the array (appending is allowed).
    #[error("index {index} out of range at `{at}` (len {len})")]
    IndexOutOfRange { at: String, index: usize, len: usize },
}

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Object member name.
    Key(String),
    /// Array offset.
    Index(usize),
}

/// A parsed path into a JSON value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

impl FieldPath {
    /// An empty path. Extend it with [`FieldPath::key`] and [`FieldPath::index`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of a kind value: `<parent>.<kind>`.
    #[must_use]
    pub fn for_kind(parent: &str, kind: &str) -> Self {
        Self::new().key(parent).key(kind)
    }

    /// Append an object member segment.
    #[must_use]
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.segments.push(Segment::Key(key.into()));
        self
    }

    /// Append an array offset segment.
    #[must_use]
    pub fn index(mut self, index: usize) -> Self {
        self.segments.push(Segment::Index(index));
        self
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Parse path notation.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::Empty`] for an empty string and
    /// [`PathError::Malformed`] when a key is empty, a bracket is unbalanced,
    /// or an offset is not a decimal number.
    pub fn parse(input: &str) -> Result<Self, PathError> {
        if input.is_empty() {
            return Err(PathError::Empty);
        }
        let malformed = |offset: usize| PathError::Malformed { path: input.to_owned(), offset };
        let bytes = input.as_bytes();
        let mut segments = Vec::new();
        let mut pos = 0;

        loop {
            let start = pos;
            while pos < bytes.len() && !matches!(bytes[pos], b'.' | b'[' | b']') {
                pos += 1;
            }
            if pos == start {
                return Err(malformed(start));
            }
            segments.push(Segment::Key(input[start..pos].to_owned()));

            loop {
                match bytes.get(pos) {
                    None => return Ok(Self { segments }),
                    Some(b'.') => {
                        pos += 1;
                        break;
                    }
                    Some(b'[') => {
                        let open = pos;
                        let close = input[open..]
                            .find(']')
                            .map(|offset| open + offset)
                            .ok_or_else(|| malformed(open))?;
                        let digits = &input[open + 1..close];
                        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                            return Err(malformed(open + 1));
                        }
                        let index = digits.parse::<usize>().map_err(|_| malformed(open + 1))?;
                        segments.push(Segment::Index(index));
                        pos = close + 1;
                    }
                    Some(_) => return Err(malformed(pos)),
                }
            }
        }
    }

    /// Read the value at this path, or `None` when any segment is missing.
    #[must_use]
    pub fn get<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.segments.iter().try_fold(root, |node, segment| match segment {
            Segment::Key(key) => node.get(key.as_str()),
            Segment::Index(index) => node.get(*index),
        })
    }

    /// Write `value` at this path, creating intermediate containers.
    ///
    /// A `null` node on the way is replaced by the container the next segment
    /// needs. An offset equal to the array length appends.
    ///
    /// # Errors
    ///
    /// Returns [`PathError::NotAContainer`] when a segment meets a scalar (or
    /// the wrong container type) and [`PathError::IndexOutOfRange`] when an
    /// offset skips past the end of an array.
    pub fn set(&self, root: &mut Value, value: Value) -> Result<(), PathError> {
        if self.segments.is_empty() {
            return Err(PathError::Empty);
        }
        let mut node = root;
        for (depth, segment) in self.segments.iter().enumerate() {
            node = self.child_mut(node, segment, depth)?;
        }
        *node = value;
        Ok(())
    }

    /// Remove the value at this path, returning it if it was present.
    ///
    /// Removing an object member deletes the key; removing an array element
    /// shifts the following elements down.
    pub fn remove(&self, root: &mut Value) -> Option<Value> {
        let (last, parents) = self.segments.split_last()?;
        let parent = parents.iter().try_fold(root, |node, segment| match segment {
            Segment::Key(key) => node.get_mut(key.as_str()),
            Segment::Index(index) => node.get_mut(*index),
        })?;
        match (last, parent) {
            (Segment::Key(key), Value::Object(map)) => map.remove(key),
            (Segment::Index(index), Value::Array(items)) if *index < items.len() => Some(items.remove(*index)),
            _ => None,
        }
    }

    fn child_mut<'v>(&self, node: &'v mut Value, segment: &Segment, depth: usize) -> Result<&'v mut Value, PathError> {
        match segment {
            Segment::Key(key) => {
                if node.is_null() {
                    *node = Value::Object(Map::new());
                }
                match node {
                    Value::Object(map) => Ok(map.entry(key.clone()).or_insert(Value::Null)),
                    other => Err(PathError::NotAContainer { at: self.prefix(depth), found: value_type_name(other) }),
                }
            }
            Segment::Index(index) => {
                if node.is_null() {
                    *node = Value::Array(Vec::new());
                }
                match node {
                    Value::Array(items) => {
                        let len = items.len();
                        if *index == len {
                            items.push(Value::Null);
                        }
                        items
                            .get_mut(*index)
                            .ok_or_else(|| PathError::IndexOutOfRange { at: self.prefix(depth), index: *index, len })
                    }
                    other => Err(PathError::NotAContainer { at: self.prefix(depth), found: value_type_name(other) }),
                }
            }
        }
    }

    /// Text form of the first `depth` segments, for error messages.
    fn prefix(&self, depth: usize) -> String {
        Self { segments: self.segments[..depth].to_vec() }.to_string()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Key(key) if i == 0 => write!(f, "{key}")?,
                Segment::Key(key) => write!(f, ".{key}")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Short JSON type name used in error messages.
#[must_use]
pub fn value_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
