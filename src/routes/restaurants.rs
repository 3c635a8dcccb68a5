use actix_web::{web, HttpResponse, Responder};

use crate::core::{cuisine_options, neighborhood_options, ListingFilter};
use crate::models::{ErrorResponse, HealthResponse, RestaurantsQuery, RestaurantsResponse};
use crate::routes::{not_configured, AppState};

/// Configure listing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/restaurants", web::get().to(list_restaurants));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.records.is_some() && state.drive_times.is_some() {
        "healthy"
    } else {
        "degraded"
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Restaurant listing endpoint
///
/// GET /api/v1/restaurants?cuisine=Thai,Korean&neighborhood=Koreatown
///
/// Facet lists are computed over the whole table, before filtering.
async fn list_restaurants(
    state: web::Data<AppState>,
    query: web::Query<RestaurantsQuery>,
) -> impl Responder {
    let Some(records) = state.records.as_ref() else {
        return not_configured("Airtable");
    };

    let restaurants = match records.fetch_restaurants().await {
        Ok(restaurants) => restaurants,
        Err(e) => {
            tracing::error!("Failed to fetch restaurants: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse::new(
                "UpstreamUnavailable",
                "Failed to fetch from Airtable",
            ));
        }
    };

    let cuisines = cuisine_options(&restaurants);
    let neighborhoods = neighborhood_options(&restaurants);
    let filter = ListingFilter::from_query(query.cuisine.as_deref(), query.neighborhood.as_deref());
    let restaurants = filter.apply(restaurants);

    tracing::info!("Returning {} restaurants", restaurants.len());

    HttpResponse::Ok().json(RestaurantsResponse {
        total: restaurants.len(),
        restaurants,
        cuisines,
        neighborhoods,
    })
}
