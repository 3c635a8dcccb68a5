use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use drivetimes::config::{LoggingSettings, Settings};
use drivetimes::routes::{self, AppState};
use drivetimes::services::{AirtableClient, GeocodingClient, MatrixClient};
use drivetimes::DriveTimeOrchestrator;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_records_client(settings: &Settings) -> Option<Arc<AirtableClient>> {
    let airtable = &settings.airtable;
    if !airtable.is_configured() {
        warn!("Airtable credentials are not configured; /restaurants is disabled");
        return None;
    }

    match AirtableClient::new(
        &airtable.endpoint,
        &airtable.base_id,
        &airtable.table_name,
        airtable.token.clone(),
        airtable.page_size,
        airtable.max_pages,
        settings.drive_times.request_timeout(),
    ) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            error!("Failed to create Airtable client: {}", e);
            None
        }
    }
}

fn build_orchestrator(settings: &Settings) -> Option<Arc<DriveTimeOrchestrator>> {
    if !settings.matrix.is_configured() {
        warn!("ORS API key is not configured; /drivetimes is disabled");
        return None;
    }

    let drive_times = settings.drive_times;
    let geocoder = GeocodingClient::new(
        settings.geocoding.endpoint.clone(),
        &settings.geocoding.user_agent,
        drive_times.request_timeout(),
    );
    let matrix = MatrixClient::new(
        settings.matrix.endpoint.clone(),
        settings.matrix.api_key.trim().to_string(),
        drive_times.chunk_size,
        drive_times.pause(),
        drive_times.request_timeout(),
    );

    match (geocoder, matrix) {
        (Ok(geocoder), Ok(matrix)) => Some(Arc::new(DriveTimeOrchestrator::new(geocoder, matrix))),
        (Err(e), _) => {
            error!("Failed to create geocoding client: {}", e);
            None
        }
        (_, Err(e)) => {
            error!("Failed to create matrix client: {}", e);
            None
        }
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load();
    init_logging(
        settings
            .as_ref()
            .map(|s| &s.logging)
            .unwrap_or(&LoggingSettings::default()),
    );

    let settings = settings.map_err(|e| {
        error!("Failed to load configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e)
    })?;

    info!("Starting drive-time service...");

    let app_state = AppState {
        records: build_records_client(&settings),
        drive_times: build_orchestrator(&settings),
    };

    info!(
        "Drive times: chunk size {}, pause {}ms, timeout {}s",
        settings.drive_times.chunk_size,
        settings.drive_times.pause_ms,
        settings.drive_times.request_timeout_secs
    );

    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(web::JsonConfig::default().error_handler(routes::handle_json_payload_error))
            .app_data(web::QueryConfig::default().error_handler(routes::handle_query_payload_error))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
