// Service exports
pub mod airtable;
pub mod geocoder;
pub mod matrix;
pub mod pacing;

pub use airtable::{AirtableClient, AirtableError, RecordPage};
pub use geocoder::{GeocodeError, GeocodingClient};
pub use matrix::{MatrixClient, MatrixError};
pub use pacing::{Pacer, RecordingPacer, TokioPacer};
