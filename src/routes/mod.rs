// Route exports
pub mod drivetimes;
pub mod restaurants;

use actix_web::{error, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::core::DriveTimeOrchestrator;
use crate::models::ErrorResponse;
use crate::services::AirtableClient;

/// Application state shared across all handlers
///
/// Either backend may be absent when its credentials are not configured;
/// the matching endpoint then answers 503.
#[derive(Clone, Default)]
pub struct AppState {
    pub records: Option<Arc<AirtableClient>>,
    pub drive_times: Option<Arc<DriveTimeOrchestrator>>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(restaurants::configure)
            .configure(drivetimes::configure),
    );
}

pub(crate) fn not_configured(what: &str) -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
        "NotConfigured",
        format!("{} is not configured", what),
    ))
}

/// Answer malformed JSON bodies with the usable error shape
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "InvalidRequest",
        format!("Invalid JSON: {}", err),
    ));
    error::InternalError::from_response(err, response).into()
}

/// Answer malformed query strings with the usable error shape
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "InvalidRequest",
        format!("Invalid query: {}", err),
    ));
    error::InternalError::from_response(err, response).into()
}
