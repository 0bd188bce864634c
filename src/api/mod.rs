pub mod handlers;
pub mod middleware;
pub mod state;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::Settings, service::ServiceContext};
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>, settings: Arc<Settings>) -> Router {
    let app_state = AppState::new(service_context, settings);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))
        // Back-office routes (guarded when a token is configured)
        .nest("/api", api_routes(app_state.clone()))
        // Public routes consumed by the marketing site and external flows
        .nest("/public", public_routes())
        // Add state to the router
        .with_state(app_state)
        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // Configure properly for production
        .layer(TraceLayer::new_for_http())
}

fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .nest("/leads", lead_routes())
        .nest("/bookings", booking_routes())
        .nest("/payments", payment_routes())
        .nest("/packages", package_routes())
        .nest("/catalog", catalog_routes())
        .nest("/content", content_routes())
        .nest("/employees", employee_routes())
        .nest("/reports", report_routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state,
            middleware::auth::require_token,
        ))
}

fn lead_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::leads::list))
        .route("/", post(handlers::leads::create))
        .route("/:id", get(handlers::leads::get))
        .route("/:id", put(handlers::leads::update))
        .route("/:id", delete(handlers::leads::delete))
        .route("/:id/advance", post(handlers::leads::advance))
}

fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::bookings::list))
        .route("/:id", get(handlers::bookings::get))
        .route("/:id", delete(handlers::bookings::delete))
}

fn payment_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::payments::list))
}

fn package_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::packages::list))
        .route("/", post(handlers::packages::create))
        .route("/:id", get(handlers::packages::get))
        .route("/:id", put(handlers::packages::update))
        .route("/:id", delete(handlers::packages::delete))
}

fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/hotels", get(handlers::catalog::list_hotels))
        .route("/hotels", post(handlers::catalog::create_hotel))
        .route("/hotels/:id", delete(handlers::catalog::delete_hotel))
        .route("/vehicles", get(handlers::catalog::list_vehicles))
        .route("/vehicles", post(handlers::catalog::create_vehicle))
        .route("/vehicles/:id", delete(handlers::catalog::delete_vehicle))
        .route("/departures", get(handlers::catalog::list_fixed_departures))
        .route("/departures", post(handlers::catalog::create_fixed_departure))
        .route(
            "/departures/:id",
            delete(handlers::catalog::delete_fixed_departure),
        )
}

fn content_routes() -> Router<AppState> {
    Router::new()
        .route("/pages", get(handlers::content::list))
        .route("/pages/:slug", put(handlers::content::upsert))
        .route("/pages/:slug", delete(handlers::content::delete))
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::employees::list))
        .route("/", post(handlers::employees::create))
        .route("/:id", get(handlers::employees::get))
        .route("/:id", put(handlers::employees::update))
        .route("/:id", delete(handlers::employees::delete))
}

fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(handlers::reports::dashboard))
        .route("/revenue", get(handlers::reports::revenue))
        .route("/bookings.csv", get(handlers::reports::export_bookings))
}

/// No guard: these are hit by the marketing website, the checkout flow and
/// the payment processor.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/enquiries", post(handlers::leads::create))
        .route("/bookings", post(handlers::bookings::create))
        .route("/payments/webhook", post(handlers::payments::webhook))
        .route("/pages/:slug", get(handlers::content::get_by_slug))
}
