//! Shared application state for the HTTP server.

use flightstore_core::FlightService;

/// State injected into every handler via Axum's `State` extractor.
///
/// Wrapped in [`Arc`](std::sync::Arc) by the router. The service is
/// stateless, so handlers never contend on it.
#[derive(Clone)]
pub struct AppState {
    /// The validating query service.
    pub service: FlightService,
}

impl AppState {
    /// Create state around an existing service.
    pub const fn new(service: FlightService) -> Self {
        Self { service }
    }
}
