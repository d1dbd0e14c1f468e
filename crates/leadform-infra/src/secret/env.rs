//! Environment variable secret source.
//!
//! Credentials are only ever read from the process environment. Values come
//! back wrapped in [`SecretString`] so they never reach `Debug` output or logs.

use secrecy::SecretString;

/// Read-only secret source backed by environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSecretSource;

impl EnvSecretSource {
    pub fn new() -> Self {
        Self
    }

    /// Look up `key` as an environment variable name.
    ///
    /// Missing, blank and non-Unicode values are all treated as absent.
    pub fn get(&self, key: &str) -> Option<SecretString> {
        match std::env::var(key) {
            Ok(value) if !value.trim().is_empty() => Some(SecretString::from(value)),
            Ok(_) => None,
            Err(std::env::VarError::NotPresent) => None,
            Err(std::env::VarError::NotUnicode(_)) => {
                tracing::warn!(key, "ignoring non-unicode secret in environment");
                None
            }
        }
    }
}
