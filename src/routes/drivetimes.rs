use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{normalize_records, sort_by_drive_time, DriveTimeError};
use crate::models::{DriveTimesRequest, DriveTimesResponse, ErrorResponse};
use crate::routes::{not_configured, AppState};

/// Configure drive-time routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/drivetimes", web::post().to(compute_drive_times));
}

/// Drive-time endpoint
///
/// POST /api/v1/drivetimes
///
/// Request body:
/// ```json
/// {
///   "address": "600 W 7th St, Los Angeles",
///   "restaurants": [{"id": "rec1", "latitude": 34.05, "longitude": -118.25}],
///   "generation": 3
/// }
/// ```
async fn compute_drive_times(
    state: web::Data<AppState>,
    req: web::Json<DriveTimesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for drive-time request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse::new("InvalidRequest", errors.to_string()));
    }

    let Some(orchestrator) = state.drive_times.as_ref() else {
        return not_configured("Drive-time service");
    };

    let request_id = uuid::Uuid::new_v4();
    let restaurants = normalize_records(&req.restaurants);

    tracing::info!(
        %request_id,
        restaurants = restaurants.len(),
        generation = ?req.generation,
        "Computing drive times"
    );

    match orchestrator.compute_drive_times(&req.address, &restaurants).await {
        Ok(result) => {
            let order = sort_by_drive_time(&restaurants, &result.durations)
                .into_iter()
                .map(|r| r.id)
                .collect();

            tracing::info!(%request_id, routed = result.durations.len(), "Drive times computed");

            HttpResponse::Ok().json(DriveTimesResponse {
                origin: result.origin,
                durations: result.durations,
                order,
                generation: req.generation,
            })
        }
        Err(e) => {
            tracing::info!(%request_id, kind = e.kind(), "Drive-time request failed: {}", e);
            error_response(&e)
        }
    }
}

fn error_response(err: &DriveTimeError) -> HttpResponse {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY);
    HttpResponse::build(status).json(ErrorResponse::new(err.kind(), err.to_string()))
}
