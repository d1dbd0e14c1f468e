//! Debounced suggestions and structured resolution over an [`AddressService`].
//!
//! Every `suggest` call takes a ticket, waits out the debounce window and
//! only then checks whether it is still the latest call. Superseded calls
//! never reach the service, so a burst of keystrokes issues one request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use leadform_types::address::{AddressSelection, Suggestion};
use leadform_types::config::{AddressConfig, DEFAULT_DEBOUNCE_MS};
use leadform_types::error::AddressError;

use super::parser::parse_address_components;
use super::service::AddressService;

/// Country addresses are restricted to when nothing else is configured.
pub const DEFAULT_COUNTRY: &str = "us";

/// Result of a debounced suggestion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestOutcome {
    /// The call was still the latest when the window closed.
    Ready(Vec<Suggestion>),
    /// A newer call arrived inside the window; its result replaces this one.
    Superseded,
}

impl SuggestOutcome {
    /// Suggestions if ready, empty otherwise.
    pub fn into_suggestions(self) -> Vec<Suggestion> {
        match self {
            SuggestOutcome::Ready(suggestions) => suggestions,
            SuggestOutcome::Superseded => Vec::new(),
        }
    }
}

pub struct AddressResolver<A> {
    service: A,
    country: String,
    debounce: Duration,
    latest: AtomicU64,
}

impl<A: AddressService> AddressResolver<A> {
    pub fn new(service: A) -> Self {
        Self {
            service,
            country: DEFAULT_COUNTRY.to_string(),
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
            latest: AtomicU64::new(0),
        }
    }

    /// Build a resolver using the country and debounce from config.
    pub fn from_config(service: A, config: &AddressConfig) -> Self {
        Self::new(service)
            .with_country(&config.country)
            .with_debounce(Duration::from_millis(config.debounce_ms))
    }

    pub fn with_country(mut self, country: &str) -> Self {
        self.country = country.to_lowercase();
        self
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn service(&self) -> &A {
        &self.service
    }

    /// Suggestions for partial input.
    ///
    /// Blank input resolves immediately to no suggestions (and still
    /// supersedes any call waiting in the window). Service failures are
    /// logged and yield an empty list.
    pub async fn suggest(&self, query: &str) -> SuggestOutcome {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let query = query.trim();
        if query.is_empty() {
            return SuggestOutcome::Ready(Vec::new());
        }

        tokio::time::sleep(self.debounce).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            tracing::trace!(ticket, "suggestion request superseded");
            return SuggestOutcome::Superseded;
        }

        match self.service.autocomplete(query, &self.country).await {
            Ok(suggestions) => {
                tracing::debug!(count = suggestions.len(), "address suggestions received");
                SuggestOutcome::Ready(suggestions)
            }
            Err(err) => {
                tracing::warn!(code = err.code(), "address suggestions failed: {err}");
                SuggestOutcome::Ready(Vec::new())
            }
        }
    }

    /// Geocode a chosen suggestion and parse it into a selection.
    pub async fn resolve(&self, description: &str) -> Result<AddressSelection, AddressError> {
        let components = self.service.geocode(description).await.inspect_err(|err| {
            tracing::warn!(code = err.code(), "address geocoding failed: {err}");
        })?;

        if components.is_empty() {
            tracing::warn!("geocoding returned no results");
            return Err(AddressError::Resolution(format!(
                "no results for '{description}'"
            )));
        }

        let selection = parse_address_components(&components).inspect_err(|err| {
            tracing::warn!(code = err.code(), "geocoded address unusable: {err}");
        })?;
        tracing::debug!(city = %selection.city, state = %selection.state, "address resolved");
        Ok(selection)
    }
}
