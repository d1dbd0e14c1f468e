//! AddressService trait definition.
//!
//! The external autocomplete/geocoding service behind one seam, so the
//! resolver and the address step can be exercised against a fake. The Google
//! implementation lives in leadform-infra.

use leadform_types::address::{AddressComponent, Suggestion};
use leadform_types::error::AddressError;

/// Trait for address suggestion/geocoding backends.
pub trait AddressService: Send + Sync {
    /// Candidate addresses for a partial query, restricted to `country`
    /// (ISO 3166-1 alpha-2). An empty result is not an error.
    fn autocomplete(
        &self,
        query: &str,
        country: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Suggestion>, AddressError>> + Send;

    /// Address components of the best geocoding match for a description.
    /// No match is an empty list.
    fn geocode(
        &self,
        description: &str,
    ) -> impl std::future::Future<Output = Result<Vec<AddressComponent>, AddressError>> + Send;
}
