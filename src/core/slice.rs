// src/core/slice.rs

//! Parses sequence selectors such as `"3"`, `"2:"` or `"::-1"` and resolves them
//! against a sequence length using conventional slice semantics.

use crate::core::TraverseError;
use std::fmt;
use std::str::FromStr;

/// The parsed `(start, stop, step)` form of a sequence selector.
/// A `None` component is unbounded in that position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceDescriptor {
    pub start: Option<i64>,
    pub stop: Option<i64>,
    pub step: Option<i64>,
}

impl SliceDescriptor {
    /// The full range, equivalent to `":"`.
    pub const FULL: SliceDescriptor = SliceDescriptor {
        start: None,
        stop: None,
        step: None,
    };

    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self { start, stop, step }
    }

    /// Builds the one-element descriptor for a bare index.
    /// `-1` has no finite `stop` that keeps it negative, so its stop is left unbounded.
    pub fn single(index: i64) -> Self {
        let stop = if index == -1 {
            None
        } else {
            Some(index.saturating_add(1))
        };
        Self {
            start: Some(index),
            stop,
            step: None,
        }
    }

    /// Parses a selector string.
    ///
    /// Accepted forms are `"<a>"`, `"<a>:"`, `":<b>"`, `"<a>:<b>"` and `"<a>:<b>:<c>"`,
    /// where every component is empty or an optionally signed integer. Whitespace around
    /// a component is ignored. An empty selector is rejected.
    pub fn parse(selector: &str) -> Result<Self, TraverseError> {
        if selector.trim().is_empty() {
            return Err(TraverseError::Validation(
                "empty sequence selector".to_string(),
            ));
        }

        let parts: Vec<&str> = selector.split(':').map(str::trim).collect();
        let mut components = Vec::with_capacity(parts.len());
        for part in &parts {
            components.push(parse_component(part)?);
        }
        if components.len() > 3 {
            return Err(TraverseError::Validation(format!(
                "too many components in sequence selector '{selector}'"
            )));
        }

        match components.as_slice() {
            [Some(index)] => Ok(Self::single(*index)),
            [None] => Ok(Self::FULL),
            [start, stop] => Ok(Self::new(*start, *stop, None)),
            [start, stop, step] => Ok(Self::new(*start, *stop, *step)),
            _ => unreachable!("selector has between one and three components"),
        }
    }

    /// Returns the original indices selected from a sequence of `len` elements, in slice order.
    pub fn indices(&self, len: usize) -> Result<Vec<usize>, TraverseError> {
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(TraverseError::Validation(
                "slice step cannot be zero".to_string(),
            ));
        }

        let len = i64::try_from(len).unwrap_or(i64::MAX);
        let (lower, upper) = if step < 0 { (-1, len - 1) } else { (0, len) };
        let clamp = |bound: Option<i64>, default: i64| match bound {
            None => default,
            Some(b) if b < 0 => b.saturating_add(len).max(lower),
            Some(b) => b.min(upper),
        };

        let start = clamp(self.start, if step < 0 { upper } else { lower });
        let stop = clamp(self.stop, if step < 0 { lower } else { upper });

        let mut selected = Vec::new();
        let mut i = start;
        while (step > 0 && i < stop) || (step < 0 && i > stop) {
            // `i` stays within `lower..=upper` here, so it is a valid index.
            selected.push(i as usize);
            match i.checked_add(step) {
                Some(next) => i = next,
                None => break,
            }
        }
        Ok(selected)
    }
}

/// Parses one colon-delimited component. Literals beyond the `i64` range saturate,
/// which selects the same elements as the unbounded literal would.
fn parse_component(part: &str) -> Result<Option<i64>, TraverseError> {
    if part.is_empty() {
        return Ok(None);
    }
    let digits = part.strip_prefix(['+', '-']).unwrap_or(part);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TraverseError::Validation(format!(
            "only integers and colons are allowed in a sequence selector, got '{part}'"
        )));
    }
    match part.parse::<i64>() {
        Ok(n) => Ok(Some(n)),
        Err(_) if part.starts_with('-') => Ok(Some(i64::MIN)),
        Err(_) => Ok(Some(i64::MAX)),
    }
}

impl FromStr for SliceDescriptor {
    type Err = TraverseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SliceDescriptor::parse(s)
    }
}

impl fmt::Display for SliceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |c: Option<i64>| c.map(|n| n.to_string()).unwrap_or_default();
        write!(f, "{}:{}", show(self.start), show(self.stop))?;
        if let Some(step) = self.step {
            write!(f, ":{step}")?;
        }
        Ok(())
    }
}
