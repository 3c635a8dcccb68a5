//! Drive times - restaurant listing and drive-time service for the LA restaurants guide
//!
//! This library normalizes loosely shaped restaurant records from an
//! Airtable table and computes driving durations from one address to every
//! mapped restaurant through Nominatim and the OpenRouteService matrix API.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{normalize_cuisine_list, normalize_record, select_routable, DriveTimeError, DriveTimeOrchestrator};
pub use crate::models::{Coordinate, DriveTimeResult, DurationMap, RestaurantEntity, RoutableDestination};
pub use crate::services::{AirtableClient, GeocodingClient, MatrixClient};
