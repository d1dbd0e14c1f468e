//! Google Maps web service wire types (only the fields we read).

use serde::Deserialize;

use leadform_types::address::{AddressComponent, Suggestion};

/// Status value for a successful request with results.
pub const STATUS_OK: &str = "OK";
/// Status value for a successful request with no results.
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Deserialize)]
pub struct AutocompleteResponse {
    pub status: String,
    #[serde(default)]
    pub predictions: Vec<Prediction>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Prediction {
    pub place_id: String,
    pub description: String,
}

impl From<Prediction> for Suggestion {
    fn from(prediction: Prediction) -> Self {
        Suggestion {
            id: prediction.place_id,
            description: prediction.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    #[serde(default)]
    pub address_components: Vec<AddressComponent>,
}
