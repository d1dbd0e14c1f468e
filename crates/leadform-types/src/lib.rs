//! Shared domain types for the lead-capture form.
//!
//! Field names, the persisted draft, step/tab selection, address
//! autocomplete types, configuration and the error enums used across the
//! workspace.
//!
//! Zero infrastructure dependencies -- only serde, serde_json, thiserror.

pub mod address;
pub mod config;
pub mod draft;
pub mod error;
pub mod field;
pub mod step;
