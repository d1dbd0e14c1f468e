//! Infrastructure layer for the lead form.
//!
//! Implements the ports defined in `leadform-core`: file and SQLite slot
//! storage for drafts and the Google Maps address service. Also loads
//! `config.toml` and resolves service credentials from the environment.

pub mod config;
pub mod google;
pub mod secret;
pub mod sqlite;
pub mod storage;
