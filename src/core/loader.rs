// src/core/loader.rs

//! Loads a JSON document from a file or an HTTP(S) URL.
//!
//! Loaders fail fast: a document that cannot be read or parsed is reported as an error
//! and never handed to the traversal engine.

use crate::core::TraverseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    File(PathBuf),
    Url(String),
    Inline(Value),
}

impl Source {
    /// Interprets a command line argument: `http://` and `https://` arguments are URLs,
    /// everything else is a file path.
    pub fn from_arg(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Source::Url(arg.to_string())
        } else {
            Source::File(PathBuf::from(arg))
        }
    }

    /// Produces the document, fetching or reading it as needed.
    pub async fn load(self, http: &HttpOptions) -> Result<Value, TraverseError> {
        match self {
            Source::File(path) => load_from_file(path),
            Source::Url(url) => load_from_url(&url, http).await,
            Source::Inline(value) => Ok(value),
        }
    }
}

/// Settings for the URL loader.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct HttpOptions {
    /// Total time allowed for the request, body included.
    #[serde(with = "humantime_serde", default = "default_timeout")]
    pub timeout: Duration,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extra request headers, sent in order.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("jsontraverse/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: default_user_agent(),
            headers: IndexMap::new(),
        }
    }
}

/// Reads and parses a `.json` file.
///
/// A leading `~` is expanded to the home directory and the path is canonicalized, so
/// symbolic links and `.`/`..` components are resolved before any check is made.
pub fn load_from_file(path: impl AsRef<Path>) -> Result<Value, TraverseError> {
    let path = path.as_ref();
    let resolved = resolve_file_path(path)?;

    if !resolved.is_file() {
        return Err(TraverseError::InvalidFile(format!(
            "'{}' is not a regular file",
            resolved.display()
        )));
    }
    if resolved.extension().and_then(|ext| ext.to_str()) != Some("json") {
        return Err(TraverseError::InvalidFile(format!(
            "'{}' does not have a .json extension",
            resolved.display()
        )));
    }

    let file = File::open(&resolved)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    debug!("Loaded JSON document from '{}'", resolved.display());
    Ok(value)
}

fn resolve_file_path(path: &Path) -> Result<PathBuf, TraverseError> {
    let expanded = expand_home(path);
    fs::canonicalize(&expanded).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TraverseError::InvalidFile(format!(
            "'{}' does not exist",
            expanded.display()
        )),
        _ => TraverseError::from(e),
    })
}

/// Replaces a leading `~` component with `$HOME`. `~user` forms are left untouched.
fn expand_home(path: &Path) -> PathBuf {
    let mut components = path.components();
    match components.next() {
        Some(Component::Normal(first)) if first == "~" => match env::var_os("HOME") {
            Some(home) => PathBuf::from(home).join(components.as_path()),
            None => path.to_path_buf(),
        },
        _ => path.to_path_buf(),
    }
}

/// Fetches `url` with an HTTP GET and parses the response body as JSON.
pub async fn load_from_url(url: &str, http: &HttpOptions) -> Result<Value, TraverseError> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TraverseError::InvalidUrl(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    let client = reqwest::Client::builder()
        .timeout(http.timeout)
        .user_agent(http.user_agent.as_str())
        .build()?;

    let mut request = client.get(parsed);
    for (name, value) in &http.headers {
        request = request.header(name.as_str(), value.as_str());
    }

    info!("Fetching JSON document from {}", url);
    let res = request
        .send()
        .await
        .map_err(|e| TraverseError::HttpClientError(format!("Failed to fetch '{url}': {e}")))?;

    if !res.status().is_success() {
        return Err(TraverseError::HttpClientError(format!(
            "'{url}' responded with status {}",
            res.status()
        )));
    }

    let body = res.text().await.map_err(|e| {
        TraverseError::HttpClientError(format!("Failed to read response body: {e}"))
    })?;
    let value: Value = serde_json::from_str(&body)?;
    debug!("Loaded {} byte JSON document from {}", body.len(), url);
    Ok(value)
}
