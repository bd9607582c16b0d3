//! HTTP request boundary for the flight storage service.
//!
//! Exposes the four flight queries and a health probe as JSON over Axum.
//! Handlers parse and log each request, delegate to
//! [`FlightService`](flightstore_core::FlightService), and map its
//! outcomes onto status codes:
//!
//! | Outcome                               | Status |
//! |---------------------------------------|--------|
//! | flights found (possibly empty list)   | 200    |
//! | no flight with the requested number   | 404    |
//! | blank argument, bad or out-of-window date | 400 |
//! | store failure                         | 500    |

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use server::{ServerConfig, ServerError, start_server};
pub use state::AppState;
