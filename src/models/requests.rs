use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// Request to compute drive times from one address
///
/// Destinations are accepted in any shape the record normalizer
/// understands, from raw table records to bare `{id, latitude, longitude}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DriveTimesRequest {
    #[validate(length(max = 512))]
    #[serde(default, alias = "addressText")]
    pub address: String,
    #[validate(length(max = 5000))]
    #[serde(default, alias = "destinations")]
    pub restaurants: Vec<Value>,
    /// Caller-chosen sequence number, echoed back so stale responses can be dropped
    #[serde(default)]
    pub generation: Option<u64>,
}

/// Query parameters for the restaurant listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantsQuery {
    /// Comma-separated cuisines, any of which must match
    pub cuisine: Option<String>,
    /// Comma-separated neighborhoods
    pub neighborhood: Option<String>,
}
