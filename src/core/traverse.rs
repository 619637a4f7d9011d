// src/core/traverse.rs

//! Walks a full path through a JSON document, fanning out over every match of every segment.

use crate::core::TraverseError;
use crate::core::resolver::Segment;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::trace;

/// How paths are split and how mapping keys are compared.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TraverseOptions {
    /// The string that separates path segments.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// If true, key patterns match regardless of case.
    #[serde(default = "default_ignore_case")]
    pub ignore_case: bool,
}

fn default_separator() -> String {
    "/".to_string()
}

fn default_ignore_case() -> bool {
    true
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            ignore_case: default_ignore_case(),
        }
    }
}

impl TraverseOptions {
    pub fn new(separator: impl Into<String>, ignore_case: bool) -> Result<Self, TraverseError> {
        let options = Self {
            separator: separator.into(),
            ignore_case,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), TraverseError> {
        if self.separator.is_empty() {
            return Err(TraverseError::Validation(
                "path separator cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The outcome of a traversal.
#[derive(Debug, Clone, PartialEq)]
pub enum Traversal<'a> {
    /// Every match keyed by its full resolved path.
    Named(IndexMap<String, &'a Value>),
    /// Every matched value, in fan-out order.
    Values(Vec<&'a Value>),
}

impl<'a> Traversal<'a> {
    pub fn len(&self) -> usize {
        match self {
            Traversal::Named(map) => map.len(),
            Traversal::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_named(&self) -> Option<&IndexMap<String, &'a Value>> {
        match self {
            Traversal::Named(map) => Some(map),
            Traversal::Values(_) => None,
        }
    }

    /// Drops the paths, keeping the matched values in order.
    pub fn into_values(self) -> Vec<&'a Value> {
        match self {
            Traversal::Named(map) => map.into_values().collect(),
            Traversal::Values(values) => values,
        }
    }

    /// Copies the matches into an owned JSON value: an object for named results,
    /// an array otherwise.
    pub fn to_value(&self) -> Value {
        match self {
            Traversal::Named(map) => Value::Object(
                map.iter()
                    .map(|(path, value)| (path.clone(), (*value).clone()))
                    .collect::<Map<String, Value>>(),
            ),
            Traversal::Values(values) => {
                Value::Array(values.iter().map(|value| (*value).clone()).collect())
            }
        }
    }
}

/// Traverses `root` along `path`, returning either named or plain matches.
pub fn traverse<'a>(
    root: &'a Value,
    path: &str,
    options: &TraverseOptions,
    named: bool,
) -> Result<Traversal<'a>, TraverseError> {
    if named {
        traverse_named(root, path, options).map(Traversal::Named)
    } else {
        traverse_values(root, path, options).map(Traversal::Values)
    }
}

/// Traverses `root` along `path`, keying every match by its full resolved path.
///
/// The frontier starts as `{"": root}`. For each segment, every frontier entry is resolved
/// and each child is stored under `parent + separator + child_key`, trimmed of separator
/// characters at both ends. Entries are produced in frontier order, then match order.
/// When two children trim to the same path, the later one overwrites the earlier value
/// and the entry keeps the position of its first insertion.
pub fn traverse_named<'a>(
    root: &'a Value,
    path: &str,
    options: &TraverseOptions,
) -> Result<IndexMap<String, &'a Value>, TraverseError> {
    options.validate()?;
    let separator = options.separator.as_str();

    let mut frontier: IndexMap<String, &'a Value> = IndexMap::from([(String::new(), root)]);
    for raw in path.split(separator) {
        let segment = Segment::new(raw, options.ignore_case);
        let mut next = IndexMap::with_capacity(frontier.len());
        for (parent, node) in &frontier {
            for (child, value) in segment.resolve_named(*node)? {
                next.insert(join_path(parent, separator, &child.to_string()), value);
            }
        }
        trace!("Segment '{}' resolved to {} path(s)", raw, next.len());
        frontier = next;
    }
    Ok(frontier)
}

/// Traverses `root` along `path`, collecting the matched values in fan-out order.
pub fn traverse_values<'a>(
    root: &'a Value,
    path: &str,
    options: &TraverseOptions,
) -> Result<Vec<&'a Value>, TraverseError> {
    options.validate()?;

    let mut frontier: Vec<&'a Value> = vec![root];
    for raw in path.split(options.separator.as_str()) {
        let segment = Segment::new(raw, options.ignore_case);
        let mut next = Vec::with_capacity(frontier.len());
        for node in frontier {
            next.extend(segment.resolve_values(node)?);
        }
        trace!("Segment '{}' resolved to {} value(s)", raw, next.len());
        frontier = next;
    }
    Ok(frontier)
}

/// Appends `child` to `parent` and strips every separator character from both ends.
pub fn join_path(parent: &str, separator: &str, child: &str) -> String {
    let joined = format!("{parent}{separator}{child}");
    joined
        .trim_matches(|c: char| separator.contains(c))
        .to_string()
}
