//! Axum router construction for the flight API.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /health` -- liveness probe
/// - `GET /api/flights?date=` -- flights departing on a date
/// - `GET /api/flights/departure?city=&date=` -- flights leaving a city
/// - `GET /api/flights/arrival?city=&date=` -- flights reaching a city
/// - `GET /api/flights/{flight_number}` -- a single flight
///
/// The static `departure` and `arrival` segments take priority over the
/// `{flight_number}` capture. CORS allows any origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/flights", get(handlers::list_flights_by_date))
        .route("/api/flights/departure", get(handlers::flights_by_departure))
        .route("/api/flights/arrival", get(handlers::flights_by_arrival))
        .route(
            "/api/flights/{flight_number}",
            get(handlers::get_flight_by_number),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
