//! Secret resolution for service credentials.

pub mod env;

pub use env::EnvSecretSource;
