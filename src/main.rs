//! Pitchbook Server - Sports Facility Booking System
//!
//! A Rust REST API server for slot-based field reservations.

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pitchbook_server::{
    api,
    config::AppConfig,
    repository::Repository,
    services::Services,
    AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pitchbook_server={},tower_http=debug", config.logging.level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pitchbook Server v{}", env!("CARGO_PKG_VERSION"));

    // Create database connection pool
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");

    tracing::info!("Database migrations completed");

    // Save server address before moving config
    let server_host = config.server.host.clone();
    let server_port = config.server.port;

    // Create repository and services
    let repository = Repository::new(pool);
    let services = Services::new(repository);

    // Create application state
    let state = AppState {
        config: Arc::new(config),
        services: Arc::new(services),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(
        server_host.parse().expect("Invalid host address"),
        server_port,
    );

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes
fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // API v1 routes
    let api_v1 = Router::new()
        // Health check
        .route("/health", get(api::health::health_check))
        .route("/ready", get(api::health::readiness_check))
        // Fields
        .route("/fields", get(api::fields::list_fields))
        .route("/fields", post(api::fields::create_field))
        .route("/fields/:id", get(api::fields::get_field))
        .route("/fields/:id", put(api::fields::update_field))
        .route("/fields/:id/reorder", put(api::fields::reorder_field))
        .route("/fields/:id/availability", get(api::slots::get_availability))
        // Shifts
        .route("/fields/:id/shifts", get(api::shifts::list_shifts))
        .route("/fields/:id/shifts", post(api::shifts::create_shift))
        .route("/shifts/:id", put(api::shifts::update_shift))
        .route("/shifts/:id", delete(api::shifts::delete_shift))
        // Slots
        .route("/slots/provision", post(api::slots::provision_slots))
        .route("/slots/:id", delete(api::slots::delete_slot))
        .route("/maintenance", get(api::slots::list_maintenance))
        .route("/maintenance", post(api::slots::create_maintenance))
        .route("/maintenance/:id", delete(api::slots::delete_maintenance))
        // Bookings
        .route("/bookings", get(api::bookings::list_bookings))
        .route("/bookings", post(api::bookings::create_booking))
        .route("/bookings/:id", get(api::bookings::get_booking))
        .route("/bookings/:id", put(api::bookings::reschedule_booking))
        .route("/bookings/:id/payment", put(api::bookings::update_payment))
        .route("/bookings/code/:code", get(api::bookings::get_booking_by_code))
        // Discounts
        .route("/discounts", get(api::discounts::list_discounts))
        .route("/discounts", post(api::discounts::create_discount))
        .route("/discounts/:id", put(api::discounts::update_discount))
        .route("/discounts/:id", delete(api::discounts::delete_discount))
        .route("/discounts/:id/toggle", put(api::discounts::toggle_discount))
        .route("/discounts/check/:code", get(api::discounts::check_discount))
        // Revenue
        .route("/revenue", get(api::revenue::get_revenue))
        .route("/summary", get(api::revenue::get_summary))
        .with_state(state.clone());

    // OpenAPI documentation
    let openapi = api::openapi::create_openapi_router();

    Router::new()
        .nest("/api/v1", api_v1)
        .merge(openapi)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
