//! Run configuration for intersecting two delimited files.
//!
//! A configuration can be assembled in code, loaded from a TOML file, or
//! built from command-line flags by the CLI. Every field has a default so a
//! partial TOML file is accepted and completed by flags afterwards.
//!
//! ```toml
//! first_source = "data/customers.csv"
//! second_source = "data/orders.csv"
//! key = "email"
//! buffer_size = 64
//! ```

use crate::error::{IntersectError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Keys buffered per queue when nothing else is configured
pub const DEFAULT_BUFFER_SIZE: usize = 64;

// Environment variable names read by the CLI
pub const ENV_FIRST_FILE: &str = "FIRST_FILE";
pub const ENV_SECOND_FILE: &str = "SECOND_FILE";
pub const ENV_KEY: &str = "KEY";
pub const ENV_BUFFER_SIZE: &str = "BUFFER_SIZE";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntersectConfig {
    /// Path of the first delimited file
    pub first_source: PathBuf,
    /// Path of the second delimited file
    pub second_source: PathBuf,
    /// Header name of the key column, matched exactly
    pub key: String,
    /// Capacity of each key queue
    pub buffer_size: usize,
}

impl Default for IntersectConfig {
    fn default() -> Self {
        Self {
            first_source: PathBuf::new(),
            second_source: PathBuf::new(),
            key: String::new(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl IntersectConfig {
    pub fn new(
        first_source: impl Into<PathBuf>,
        second_source: impl Into<PathBuf>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            first_source: first_source.into(),
            second_source: second_source.into(),
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Load a configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading configuration from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|e| {
            IntersectError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| IntersectError::config(format!("Failed to parse config: {}", e)))
    }

    /// Check the configuration is runnable. The key may be empty; whether
    /// it exists is decided by each file's header row.
    pub fn validate(&self) -> Result<()> {
        if self.buffer_size == 0 {
            return Err(IntersectError::config(format!(
                "invalid buffer size (buffer-size): {}",
                self.buffer_size
            )));
        }
        if self.first_source.as_os_str().is_empty() {
            return Err(IntersectError::config("first source file is empty"));
        }
        if self.second_source.as_os_str().is_empty() {
            return Err(IntersectError::config("second source file is empty"));
        }
        Ok(())
    }
}
