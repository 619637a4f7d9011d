// src/lib.rs

//! Traverse a parsed JSON document as if it were a file system.

pub mod config;
pub mod core;

// Re-export
pub use crate::core::{JsonTraverse, Traversal, TraverseError, TraverseOptions};
