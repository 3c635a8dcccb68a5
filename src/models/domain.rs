use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Travel duration in seconds, keyed by restaurant id
pub type DurationMap = HashMap<String, f64>;

/// Canonical restaurant record produced by the normalizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantEntity {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cuisines: Vec<String>,
    pub neighborhood: Option<String>,
    pub address: Option<String>,
    #[serde(alias = "googleMapsUrl")]
    pub maps_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl RestaurantEntity {
    /// Map position, if both halves are present and finite
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Coordinate::new(lat, lng),
            _ => None,
        }
    }
}

/// A point in WGS84 degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,
    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,
}

impl Coordinate {
    /// Returns `None` unless both values are finite
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        if latitude.is_finite() && longitude.is_finite() {
            Some(Self { latitude, longitude })
        } else {
            None
        }
    }

    /// `[lng, lat]` pair in the order routing services expect
    #[inline]
    pub fn lng_lat(&self) -> [f64; 2] {
        [self.longitude, self.latitude]
    }
}

/// A destination that can be sent to the matrix service
#[derive(Debug, Clone, PartialEq)]
pub struct RoutableDestination {
    pub id: String,
    pub coordinate: Coordinate,
}

/// Outcome of a successful drive-time computation
///
/// `durations` only holds destinations the matrix service could route;
/// a missing id means "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveTimeResult {
    pub origin: Coordinate,
    pub durations: DurationMap,
}
