//! Form configuration loader.
//!
//! Reads `config.toml` from the data directory (`~/.leadform/` in production)
//! and deserializes it into [`FormConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use leadform_types::config::{FormConfig, StorageBackend};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "LEADFORM_DATA_DIR";

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`FormConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> FormConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return FormConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return FormConfig::default();
        }
    };

    match toml::from_str::<FormConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            FormConfig::default()
        }
    }
}

/// Data directory: `LEADFORM_DATA_DIR`, else `~/.leadform`, else `./.leadform`.
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".leadform")
}

/// Where the configured storage backend keeps its data.
///
/// An explicit `storage.path` wins (relative paths are resolved against the
/// data directory); otherwise `drafts/` for the file backend and
/// `leadform.db` for SQLite.
pub fn storage_path(config: &FormConfig, data_dir: &Path) -> PathBuf {
    match &config.storage.path {
        Some(path) if path.is_absolute() => path.clone(),
        Some(path) => data_dir.join(path),
        None => match config.storage.backend {
            StorageBackend::File => data_dir.join("drafts"),
            StorageBackend::Sqlite => data_dir.join("leadform.db"),
        },
    }
}
