// src/core/session.rs

//! A loaded document bound to its traversal options.

use crate::core::TraverseError;
use crate::core::loader::{self, HttpOptions, Source};
use crate::core::traverse::{self, Traversal, TraverseOptions};
use indexmap::IndexMap;
use serde_json::Value;
use std::path::Path;

/// Traverses one JSON document as if it were a file system.
///
/// The document and the options are fixed at construction; every call to
/// [`JsonTraverse::traverse`] builds a fresh result that borrows from the document.
///
/// ```
/// use jsontraverse::core::JsonTraverse;
/// use serde_json::json;
///
/// let doc = JsonTraverse::new(json!({"a": {"b": [10, 20, 30]}}), Default::default()).unwrap();
/// let found = doc.traverse_named("a/b/1").unwrap();
/// assert_eq!(found["a/b/1"], &json!(20));
/// ```
#[derive(Debug, Clone)]
pub struct JsonTraverse {
    document: Value,
    options: TraverseOptions,
}

impl JsonTraverse {
    pub fn new(document: Value, options: TraverseOptions) -> Result<Self, TraverseError> {
        options.validate()?;
        Ok(Self { document, options })
    }

    /// Loads the document from a `.json` file.
    pub fn from_file(
        path: impl AsRef<Path>,
        options: TraverseOptions,
    ) -> Result<Self, TraverseError> {
        options.validate()?;
        let document = loader::load_from_file(path)?;
        Ok(Self { document, options })
    }

    /// Loads the document from an HTTP(S) URL.
    pub async fn from_url(
        url: &str,
        options: TraverseOptions,
        http: &HttpOptions,
    ) -> Result<Self, TraverseError> {
        options.validate()?;
        let document = loader::load_from_url(url, http).await?;
        Ok(Self { document, options })
    }

    /// Loads the document from whichever source is given.
    pub async fn load(
        source: Source,
        options: TraverseOptions,
        http: &HttpOptions,
    ) -> Result<Self, TraverseError> {
        options.validate()?;
        let document = source.load(http).await?;
        Ok(Self { document, options })
    }

    pub fn document(&self) -> &Value {
        &self.document
    }

    pub fn options(&self) -> &TraverseOptions {
        &self.options
    }

    /// Resolves `path` against the document. With `named`, matches are keyed by their
    /// full resolved path; otherwise only the values are returned.
    pub fn traverse(&self, path: &str, named: bool) -> Result<Traversal<'_>, TraverseError> {
        traverse::traverse(&self.document, path, &self.options, named)
    }

    pub fn traverse_named(&self, path: &str) -> Result<IndexMap<String, &Value>, TraverseError> {
        traverse::traverse_named(&self.document, path, &self.options)
    }

    pub fn traverse_values(&self, path: &str) -> Result<Vec<&Value>, TraverseError> {
        traverse::traverse_values(&self.document, path, &self.options)
    }
}
