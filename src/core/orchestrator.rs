use thiserror::Error;

use crate::core::destinations::select_routable;
use crate::models::{DriveTimeResult, RestaurantEntity};
use crate::services::{GeocodeError, GeocodingClient, MatrixClient, MatrixError, Pacer, TokioPacer};

/// Failure of a drive-time computation, one variant per caller-visible kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DriveTimeError {
    #[error("Address is required")]
    InvalidAddress,

    #[error("At least one restaurant is required")]
    NoDestinations,

    #[error("Address not found")]
    AddressNotFound,

    #[error("No valid restaurant coordinates supplied")]
    NoRoutableDestinations,

    #[error("{message}")]
    UpstreamUnavailable { message: String },
}

impl DriveTimeError {
    pub fn kind(&self) -> &'static str {
        match self {
            DriveTimeError::InvalidAddress => "InvalidAddress",
            DriveTimeError::NoDestinations => "NoDestinations",
            DriveTimeError::AddressNotFound => "AddressNotFound",
            DriveTimeError::NoRoutableDestinations => "NoRoutableDestinations",
            DriveTimeError::UpstreamUnavailable { .. } => "UpstreamUnavailable",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            DriveTimeError::InvalidAddress
            | DriveTimeError::NoDestinations
            | DriveTimeError::NoRoutableDestinations => 400,
            DriveTimeError::AddressNotFound => 404,
            DriveTimeError::UpstreamUnavailable { .. } => 502,
        }
    }
}

impl From<GeocodeError> for DriveTimeError {
    fn from(err: GeocodeError) -> Self {
        match err {
            GeocodeError::InvalidInput => DriveTimeError::InvalidAddress,
            other => DriveTimeError::UpstreamUnavailable {
                message: other.to_string(),
            },
        }
    }
}

impl From<MatrixError> for DriveTimeError {
    fn from(err: MatrixError) -> Self {
        DriveTimeError::UpstreamUnavailable {
            message: err.to_string(),
        }
    }
}

/// Single entry point for drive-time computation
///
/// # Stages
/// 1. Input validation (no network)
/// 2. Geocoding the origin address
/// 3. Selecting routable destinations
/// 4. Batched matrix requests
///
/// Holds no per-request state; concurrent calls are independent and the
/// caller decides which result is current. Nothing is retried.
pub struct DriveTimeOrchestrator<P = TokioPacer> {
    geocoder: GeocodingClient,
    matrix: MatrixClient<P>,
}

impl<P: Pacer> DriveTimeOrchestrator<P> {
    pub fn new(geocoder: GeocodingClient, matrix: MatrixClient<P>) -> Self {
        Self { geocoder, matrix }
    }

    /// Compute driving durations from `address` to every mappable restaurant
    pub async fn compute_drive_times(
        &self,
        address: &str,
        restaurants: &[RestaurantEntity],
    ) -> Result<DriveTimeResult, DriveTimeError> {
        let address = address.trim();
        if address.is_empty() {
            return Err(DriveTimeError::InvalidAddress);
        }
        if restaurants.is_empty() {
            return Err(DriveTimeError::NoDestinations);
        }

        let origin = match self.geocoder.resolve(address).await {
            Ok(Some(origin)) => origin,
            Ok(None) => {
                tracing::info!("No geocoding match for requested address");
                return Err(DriveTimeError::AddressNotFound);
            }
            Err(e) => {
                tracing::error!("Geocoding failed: {}", e);
                return Err(e.into());
            }
        };

        let destinations = select_routable(restaurants);
        if destinations.is_empty() {
            return Err(DriveTimeError::NoRoutableDestinations);
        }

        tracing::debug!(
            routable = destinations.len(),
            total = restaurants.len(),
            "Computing drive times"
        );

        let durations = self
            .matrix
            .compute_durations(origin, &destinations)
            .await
            .map_err(|e| {
                tracing::error!("Drive-time matrix failed: {}", e);
                DriveTimeError::from(e)
            })?;

        Ok(DriveTimeResult { origin, durations })
    }
}
