//! Google Maps address service and its factory.

pub mod client;
pub mod types;

use leadform_core::address::resolver::AddressResolver;
use leadform_types::config::AddressConfig;
use leadform_types::error::AddressError;

use crate::secret::EnvSecretSource;

pub use client::GoogleAddressService;

/// Build the Google address service from config.
///
/// The API key is read from the environment variable named by
/// `address.api_key_env`. Without one the service is `Unavailable`, so the
/// host can show an error state instead of silently offering no suggestions.
pub fn build_address_service(
    config: &AddressConfig,
    secrets: &EnvSecretSource,
) -> Result<GoogleAddressService, AddressError> {
    let api_key = secrets.get(&config.api_key_env).ok_or_else(|| {
        AddressError::Unavailable(format!("{} is not set", config.api_key_env))
    })?;
    Ok(GoogleAddressService::new(api_key).with_base_url(&config.base_url))
}

/// Build a resolver over the Google service, using the configured country
/// and debounce window.
pub fn build_address_resolver(
    config: &AddressConfig,
    secrets: &EnvSecretSource,
) -> Result<AddressResolver<GoogleAddressService>, AddressError> {
    let service = build_address_service(config, secrets)?;
    Ok(AddressResolver::from_config(service, config))
}
