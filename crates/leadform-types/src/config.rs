//! Configuration types for the lead form.
//!
//! `FormConfig` is the top-level `config.toml`. Every field has a default, so
//! an empty or missing file yields a working (file-backed, US-restricted)
//! configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Debounce window shared by draft writes and address suggestions.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub address: AddressConfig,
}

/// Which slot store backs the draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per slot in the data directory.
    #[default]
    File,
    /// A `form_slots` table in a SQLite database.
    Sqlite,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory (file backend) or database file (sqlite backend).
    /// Defaults to a location under the data directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Coalescing window for draft writes, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressConfig {
    /// ISO 3166-1 alpha-2 country the suggestions are restricted to.
    #[serde(default = "default_country")]
    pub country: String,

    /// Debounce window for suggestion requests, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Environment variable holding the service API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Service base URL (overridable for proxies and tests).
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for AddressConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            debounce_ms: default_debounce_ms(),
            api_key_env: default_api_key_env(),
            base_url: default_base_url(),
        }
    }
}

fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_country() -> String {
    "us".to_string()
}

fn default_api_key_env() -> String {
    "GOOGLE_MAPS_API_KEY".to_string()
}

fn default_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}
