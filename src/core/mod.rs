// src/core/mod.rs

//! The traversal engine and the loaders that feed it.

pub mod errors;
pub mod loader;
pub mod resolver;
pub mod session;
pub mod slice;
pub mod traverse;

pub use errors::TraverseError;
pub use loader::{HttpOptions, Source};
pub use resolver::{ChildKey, Resolved, Segment, resolve_mapping, resolve_sequence};
pub use session::JsonTraverse;
pub use slice::SliceDescriptor;
pub use traverse::{Traversal, TraverseOptions, traverse, traverse_named, traverse_values};
