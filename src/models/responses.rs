use serde::{Deserialize, Serialize};
use crate::models::domain::{Coordinate, DurationMap, RestaurantEntity};

/// Response for the restaurant listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantsResponse {
    pub restaurants: Vec<RestaurantEntity>,
    pub cuisines: Vec<String>,
    pub neighborhoods: Vec<String>,
    pub total: usize,
}

/// Response for the drive-time endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriveTimesResponse {
    pub origin: Coordinate,
    pub durations: DurationMap,
    /// Restaurant ids ordered by drive time, unknown durations last
    pub order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation: Option<u64>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub kind: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }
}
