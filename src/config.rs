// src/config.rs

//! Manages command line configuration: loading from TOML, defaults and validation.

use crate::core::{HttpOptions, TraverseOptions};
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use tracing::warn;

/// The configuration of the `jsontraverse` binary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Default log filter, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub traverse: TraverseOptions,
    #[serde(default)]
    pub http: HttpOptions,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            traverse: TraverseOptions::default(),
            http: HttpOptions::default(),
        }
    }
}

impl Config {
    /// Loads and validates the configuration stored at `path`.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file '{path}'"))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        self.traverse
            .validate()
            .map_err(|e| anyhow!("traverse.separator: {e}"))?;
        if self.http.timeout.is_zero() {
            return Err(anyhow!("http.timeout cannot be 0"));
        }
        if self.http.user_agent.trim().is_empty() {
            return Err(anyhow!("http.user_agent cannot be empty"));
        }
        if self.traverse.separator.chars().any(char::is_whitespace) {
            warn!(
                "separator {:?} contains whitespace; paths may be hard to type",
                self.traverse.separator
            );
        }
        Ok(())
    }
}
