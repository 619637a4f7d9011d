// src/core/resolver.rs

//! Resolves a single path segment against a single JSON node.
//!
//! Mapping keys are selected by a regular expression that must match at the start of the
//! key, though not necessarily the whole key (a literal key is just a pattern that
//! matches itself). Sequence elements are selected by a slice expression, see
//! [`SliceDescriptor`].

use crate::core::TraverseError;
use crate::core::slice::SliceDescriptor;
use indexmap::IndexMap;
use once_cell::unsync::OnceCell;
use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value};
use std::fmt;

/// The key under which a resolver reports a matched child.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChildKey {
    Key(String),
    Index(usize),
}

impl fmt::Display for ChildKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildKey::Key(key) => f.write_str(key),
            ChildKey::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for ChildKey {
    fn from(key: &str) -> Self {
        ChildKey::Key(key.to_string())
    }
}

impl From<usize> for ChildKey {
    fn from(index: usize) -> Self {
        ChildKey::Index(index)
    }
}

/// The matches of one segment within one node.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// Matched children keyed by their key or original index, in match order.
    Named(IndexMap<ChildKey, &'a Value>),
    /// Matched children only, in match order.
    Values(Vec<&'a Value>),
}

impl<'a> Resolved<'a> {
    pub fn len(&self) -> usize {
        match self {
            Resolved::Named(map) => map.len(),
            Resolved::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the keys, keeping the matched values in order.
    pub fn into_values(self) -> Vec<&'a Value> {
        match self {
            Resolved::Named(map) => map.into_values().collect(),
            Resolved::Values(values) => values,
        }
    }
}

/// A path segment prepared for resolution.
///
/// The key pattern and the slice are both compiled lazily and at most once, so one
/// `Segment` can be applied to every node of a traversal step. A segment that only ever
/// meets sequences is never compiled as a regular expression, and vice versa.
#[derive(Debug)]
pub struct Segment<'s> {
    raw: &'s str,
    ignore_case: bool,
    pattern: OnceCell<Regex>,
    slice: OnceCell<SliceDescriptor>,
}

impl<'s> Segment<'s> {
    pub fn new(raw: &'s str, ignore_case: bool) -> Self {
        Self {
            raw,
            ignore_case,
            pattern: OnceCell::new(),
            slice: OnceCell::new(),
        }
    }

    pub fn as_str(&self) -> &'s str {
        self.raw
    }

    /// The segment compiled as a key pattern.
    pub fn pattern(&self) -> Result<&Regex, TraverseError> {
        self.pattern.get_or_try_init(|| {
            RegexBuilder::new(self.raw)
                .case_insensitive(self.ignore_case)
                .build()
                .map_err(TraverseError::from)
        })
    }

    /// Whether the key pattern matches at the very start of `key`.
    /// The match need not cover the whole key.
    pub fn matches_key(&self, key: &str) -> Result<bool, TraverseError> {
        Ok(starts_with_match(self.pattern()?, key))
    }

    /// The segment parsed as a sequence selector.
    pub fn slice(&self) -> Result<&SliceDescriptor, TraverseError> {
        self.slice.get_or_try_init(|| SliceDescriptor::parse(self.raw))
    }

    /// Resolves this segment against an object node.
    pub fn resolve_mapping<'a>(
        &self,
        node: &'a Value,
        named: bool,
    ) -> Result<Resolved<'a>, TraverseError> {
        if !node.is_object() {
            return Err(TraverseError::WrongType(
                "cannot match a key pattern against a non-object value".to_string(),
            ));
        }
        self.resolve(node, named)
    }

    /// Resolves this segment against an array node.
    pub fn resolve_sequence<'a>(
        &self,
        node: &'a Value,
        named: bool,
    ) -> Result<Resolved<'a>, TraverseError> {
        if !node.is_array() {
            return Err(TraverseError::WrongType(
                "cannot apply a slice to a non-array value".to_string(),
            ));
        }
        self.resolve(node, named)
    }

    /// Dispatches on the shape of `node`: objects match keys, arrays apply slices,
    /// and anything else cannot be descended into.
    pub fn resolve<'a>(
        &self,
        node: &'a Value,
        named: bool,
    ) -> Result<Resolved<'a>, TraverseError> {
        if named {
            self.resolve_named(node).map(Resolved::Named)
        } else {
            self.resolve_values(node).map(Resolved::Values)
        }
    }

    /// Like [`Segment::resolve`], keying every match by its key or original index.
    pub fn resolve_named<'a>(
        &self,
        node: &'a Value,
    ) -> Result<IndexMap<ChildKey, &'a Value>, TraverseError> {
        match node {
            Value::Object(map) => {
                let pattern = self.pattern()?;
                Ok(matching_entries(map, pattern)
                    .map(|(key, value)| (ChildKey::Key(key.clone()), value))
                    .collect())
            }
            Value::Array(items) => {
                let indices = self.slice()?.indices(items.len())?;
                Ok(indices
                    .into_iter()
                    .map(|i| (ChildKey::Index(i), &items[i]))
                    .collect())
            }
            _ => Err(self.leaf_error()),
        }
    }

    /// Like [`Segment::resolve`], keeping only the matched values.
    pub fn resolve_values<'a>(&self, node: &'a Value) -> Result<Vec<&'a Value>, TraverseError> {
        match node {
            Value::Object(map) => {
                let pattern = self.pattern()?;
                Ok(matching_entries(map, pattern)
                    .map(|(_, value)| value)
                    .collect())
            }
            Value::Array(items) => {
                let indices = self.slice()?.indices(items.len())?;
                Ok(indices.into_iter().map(|i| &items[i]).collect())
            }
            _ => Err(self.leaf_error()),
        }
    }

    fn leaf_error(&self) -> TraverseError {
        TraverseError::Traversal(format!(
            "cannot descend into a leaf value with segment '{}'",
            self.raw
        ))
    }
}

// The leftmost match starts at 0 whenever any match does.
fn starts_with_match(pattern: &Regex, key: &str) -> bool {
    pattern.find(key).is_some_and(|m| m.start() == 0)
}

fn matching_entries<'a, 'p>(
    map: &'a Map<String, Value>,
    pattern: &'p Regex,
) -> impl Iterator<Item = (&'a String, &'a Value)> {
    map.iter()
        .filter(move |(key, _)| starts_with_match(pattern, key))
}

/// Selects the children of an object whose keys start with a match of `segment`.
pub fn resolve_mapping<'a>(
    node: &'a Value,
    segment: &str,
    ignore_case: bool,
    named: bool,
) -> Result<Resolved<'a>, TraverseError> {
    Segment::new(segment, ignore_case).resolve_mapping(node, named)
}

/// Selects the elements of an array addressed by the slice expression `segment`.
pub fn resolve_sequence<'a>(
    node: &'a Value,
    segment: &str,
    named: bool,
) -> Result<Resolved<'a>, TraverseError> {
    Segment::new(segment, false).resolve_sequence(node, named)
}
