//! Geocoded components -> `AddressSelection`.
//!
//! Rules:
//! - street = `street_number + " " + route`, trimmed (route alone when there
//!   is no number),
//! - city = locality, else sublocality / sublocality_level_1, else
//!   neighborhood, whatever order the components arrive in,
//! - state = short name of administrative_area_level_1,
//! - zip = postal_code, address2 = subpremise (omitted when absent).
//!
//! The first component of each type wins. Parsing fails only when street,
//! city and state are all missing.

use leadform_types::address::{AddressComponent, AddressSelection};
use leadform_types::error::AddressError;

const CITY_TYPES: [&[&str]; 3] = [
    &["locality"],
    &["sublocality", "sublocality_level_1"],
    &["neighborhood"],
];

fn first_of<'a>(components: &'a [AddressComponent], kinds: &[&str]) -> Option<&'a AddressComponent> {
    components
        .iter()
        .find(|component| kinds.iter().any(|kind| component.has_type(kind)))
}

fn long_name(components: &[AddressComponent], kind: &str) -> Option<String> {
    first_of(components, &[kind]).map(|component| component.long_name.clone())
}

/// Build an [`AddressSelection`] from geocoder components.
pub fn parse_address_components(
    components: &[AddressComponent],
) -> Result<AddressSelection, AddressError> {
    if components.is_empty() {
        return Err(AddressError::Parse("no address components".to_string()));
    }

    let street_number = long_name(components, "street_number").unwrap_or_default();
    let route = long_name(components, "route").unwrap_or_default();
    let street = format!("{street_number} {route}").trim().to_string();
    let address = if street.is_empty() { route } else { street };

    let city = CITY_TYPES
        .iter()
        .find_map(|kinds| first_of(components, kinds))
        .map(|component| component.long_name.clone())
        .unwrap_or_default();

    let state = first_of(components, &["administrative_area_level_1"])
        .map(|component| component.short_name.clone())
        .unwrap_or_default();

    let zip = long_name(components, "postal_code").unwrap_or_default();
    let address2 = long_name(components, "subpremise");

    if address.is_empty() && city.is_empty() && state.is_empty() {
        return Err(AddressError::Parse(
            "missing essential components (address, city, or state)".to_string(),
        ));
    }

    Ok(AddressSelection {
        address,
        address2,
        city,
        state,
        zip,
    })
}
