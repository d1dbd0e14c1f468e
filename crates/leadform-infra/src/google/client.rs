//! GoogleAddressService: [`AddressService`] over the Google Maps web services.
//!
//! Suggestions come from Places Autocomplete
//! (`/maps/api/place/autocomplete/json`, restricted to street addresses in
//! one country), structured components from the Geocoding API
//! (`/maps/api/geocode/json`). The API key is held as a [`SecretString`]
//! and only exposed when building the request query.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use leadform_core::address::service::AddressService;
use leadform_types::address::{AddressComponent, Suggestion};
use leadform_types::error::AddressError;

use super::types::{AutocompleteResponse, GeocodeResponse, STATUS_OK, STATUS_ZERO_RESULTS};

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

const AUTOCOMPLETE_PATH: &str = "/maps/api/place/autocomplete/json";
const GEOCODE_PATH: &str = "/maps/api/geocode/json";

/// Google Maps address service.
///
/// Does not derive `Debug`; the key must never be printed.
pub struct GoogleAddressService {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl GoogleAddressService {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the base URL (tests, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AddressError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .query(&[("key", self.api_key.expose_secret())])
            .send()
            .await
            .map_err(|e| AddressError::Resolution(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AddressError::Resolution(format!("HTTP {status}")));
        }

        response
            .json()
            .await
            .map_err(|e| AddressError::Resolution(format!("failed to parse response: {e}")))
    }
}

/// Map a service status onto "has results", "no results" or an error.
fn check_status(status: &str, error_message: Option<String>) -> Result<bool, AddressError> {
    match status {
        STATUS_OK => Ok(true),
        STATUS_ZERO_RESULTS => Ok(false),
        other => Err(AddressError::Resolution(match error_message {
            Some(message) => format!("{other}: {message}"),
            None => other.to_string(),
        })),
    }
}

impl AddressService for GoogleAddressService {
    async fn autocomplete(
        &self,
        query: &str,
        country: &str,
    ) -> Result<Vec<Suggestion>, AddressError> {
        let components = format!("country:{country}");
        let response: AutocompleteResponse = self
            .get_json(
                AUTOCOMPLETE_PATH,
                &[
                    ("input", query),
                    ("types", "address"),
                    ("components", components.as_str()),
                ],
            )
            .await?;

        if !check_status(&response.status, response.error_message)? {
            return Ok(Vec::new());
        }
        Ok(response.predictions.into_iter().map(Suggestion::from).collect())
    }

    async fn geocode(&self, description: &str) -> Result<Vec<AddressComponent>, AddressError> {
        let response: GeocodeResponse = self
            .get_json(GEOCODE_PATH, &[("address", description)])
            .await?;

        if !check_status(&response.status, response.error_message)? {
            return Ok(Vec::new());
        }
        Ok(response
            .results
            .into_iter()
            .next()
            .map(|result| result.address_components)
            .unwrap_or_default())
    }
}
