use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::batching::partition;
use crate::core::coercion::to_number;
use crate::models::{Coordinate, DurationMap, RoutableDestination};
use crate::services::pacing::{Pacer, TokioPacer};

pub const DEFAULT_MATRIX_URL: &str = "https://api.openrouteservice.org/v2/matrix/driving-car";

/// Errors that can occur when calling the distance-matrix service
#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Matrix request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("{message}")]
    Upstream { status: u16, message: String },
}

#[derive(Debug, Serialize)]
struct MatrixRequest {
    locations: Vec<[f64; 2]>,
    metrics: [&'static str; 1],
    units: &'static str,
}

/// OpenRouteService matrix client
///
/// Sends destinations in fixed-size batches, one request at a time, with a
/// pause between requests to stay under the service's rate limit.
pub struct MatrixClient<P = TokioPacer> {
    endpoint: String,
    api_key: String,
    chunk_size: usize,
    pause: Duration,
    client: Client,
    pacer: P,
}

impl MatrixClient<TokioPacer> {
    /// Create a new matrix client pacing on the tokio timer
    pub fn new(
        endpoint: String,
        api_key: String,
        chunk_size: usize,
        pause: Duration,
        timeout: Duration,
    ) -> Result<Self, MatrixError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            endpoint,
            api_key,
            chunk_size,
            pause,
            client,
            pacer: TokioPacer,
        })
    }
}

impl<P: Pacer> MatrixClient<P> {
    /// Swap the pacing strategy
    pub fn with_pacer<Q: Pacer>(self, pacer: Q) -> MatrixClient<Q> {
        MatrixClient {
            endpoint: self.endpoint,
            api_key: self.api_key,
            chunk_size: self.chunk_size,
            pause: self.pause,
            client: self.client,
            pacer,
        }
    }

    /// Driving duration in seconds from `origin` to each destination
    ///
    /// Batches are sent strictly in order. The first failing batch aborts
    /// the whole computation and durations from earlier batches are
    /// discarded. Destinations the service cannot route are left out of
    /// the map.
    pub async fn compute_durations(
        &self,
        origin: Coordinate,
        destinations: &[RoutableDestination],
    ) -> Result<DurationMap, MatrixError> {
        let batches = partition(destinations, self.chunk_size);
        let mut durations = DurationMap::with_capacity(destinations.len());

        for index in 0..batches.len() {
            let batch = batches[index];
            tracing::debug!(batch = index + 1, of = batches.len(), size = batch.len(), "Requesting matrix batch");

            let batch_durations = self.fetch_batch(origin, batch).await?;
            durations.extend(batch_durations);

            if index + 1 < batches.len() {
                self.pacer.pause(self.pause).await;
            }
        }

        Ok(durations)
    }

    async fn fetch_batch(
        &self,
        origin: Coordinate,
        batch: &[RoutableDestination],
    ) -> Result<DurationMap, MatrixError> {
        let body = MatrixRequest {
            locations: std::iter::once(origin.lng_lat())
                .chain(batch.iter().map(|d| d.coordinate.lng_lat()))
                .collect(),
            metrics: ["duration"],
            units: "m",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        // Unparseable bodies are treated as empty; the status still decides
        let bytes = response.bytes().await?;
        let json: Value = serde_json::from_slice(&bytes).unwrap_or_default();

        let error_message = upstream_error_message(&json);
        if !status.is_success() || error_message.is_some() {
            let message = error_message
                .unwrap_or_else(|| format!("OpenRouteService error ({})", status.as_u16()));
            tracing::error!(status = status.as_u16(), "Matrix batch failed: {}", message);
            return Err(MatrixError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        Ok(origin_row_durations(&json, batch))
    }
}

/// Error text from either `{"error": {"message": ..}}`, `{"error": ".."}` or `{"message": ..}`
fn upstream_error_message(json: &Value) -> Option<String> {
    let nested = json.get("error").and_then(|error| {
        error
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| error.as_str())
    });

    nested
        .or_else(|| json.get("message").and_then(Value::as_str))
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}

/// Zip the origin row (minus the origin itself) against the batch ids
fn origin_row_durations(json: &Value, batch: &[RoutableDestination]) -> DurationMap {
    let Some(row) = json.pointer("/durations/0").and_then(Value::as_array) else {
        return DurationMap::new();
    };

    row.iter()
        .skip(1)
        .zip(batch)
        .filter_map(|(value, destination)| {
            to_number(value).map(|secs| (destination.id.clone(), secs))
        })
        .collect()
}
