//! Configuration loading and representation.
//!
//! Read from environment variables:
//! - `STOCKROOM_STORE`: `memory` or `json` (default `json`)
//! - `STOCKROOM_DATA`: path of the JSON snapshot (default `stockroom.json`)

use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

pub const STORE_VAR: &str = "STOCKROOM_STORE";
pub const DATA_VAR: &str = "STOCKROOM_DATA";
pub const DEFAULT_DATA_PATH: &str = "stockroom.json";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown store kind '{0}' (expected 'memory' or 'json')")]
    UnknownStore(String),

    #[error("{0} is set but empty")]
    Empty(&'static str),
}

/// Which repository backs the inventory service.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum StoreKind {
    /// Process-local, lost on exit.
    Memory,
    /// JSON snapshot file, rewritten after every mutation.
    #[default]
    Json,
}

impl FromStr for StoreKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "json" | "file" => Ok(Self::Json),
            other => Err(ConfigError::UnknownStore(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfraConfig {
    pub store: StoreKind,
    pub data_path: PathBuf,
}

impl Default for InfraConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

impl InfraConfig {
    /// Load from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup; unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(store) = lookup(STORE_VAR) {
            config.store = store.parse()?;
        }
        if let Some(path) = lookup(DATA_VAR) {
            if path.trim().is_empty() {
                return Err(ConfigError::Empty(DATA_VAR));
            }
            config.data_path = PathBuf::from(path);
        }

        Ok(config)
    }
}
