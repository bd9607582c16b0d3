//! Shared type definitions for the flight storage service.
//!
//! The [`Flight`] record is the only entity the service knows about. It is
//! produced by the persistence gateway, passed unchanged through the query
//! service and serialized as-is by the HTTP layer. A TypeScript binding is
//! generated via `ts-rs` for the client application.

pub mod flight;

pub use flight::{Flight, FlightError};

#[cfg(test)]
mod tests {
    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::flight::Flight::export_all();
    }
}
