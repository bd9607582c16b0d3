//! Persistence gateway for the flight storage service.
//!
//! Translates the six logical store operations into parameterized calls
//! against `PostgreSQL` stored routines and maps the result rows into
//! [`Flight`](flightstore_types::Flight) records.
//!
//! # Architecture
//!
//! ```text
//! FlightService (flightstore-core)
//!     |
//!     +-- Arc<dyn FlightRepository>
//!             |-- PostgresFlightStore  (stored routines, one pooled connection per call)
//!             +-- InMemoryFlightStore  (tests, database-less runs)
//! ```
//!
//! # Modules
//!
//! - [`repository`] -- The [`FlightRepository`] capability trait
//! - [`flight_store`] -- `PostgreSQL` gateway and row mapping
//! - [`memory`] -- In-memory store with the same semantics
//! - [`postgres`] -- Connection pool configuration
//! - [`error`] -- [`DbError`] and the [`Operation`] names

pub mod error;
pub mod flight_store;
pub mod memory;
pub mod postgres;
pub mod repository;

pub use error::{DbError, Operation};
pub use flight_store::{FlightRow, PostgresFlightStore};
pub use memory::InMemoryFlightStore;
pub use postgres::PostgresConfig;
pub use repository::FlightRepository;

/// DDL for the `flights` table and its stored routines.
///
/// Applied by operators (and by the integration tests); the service itself
/// never changes the schema.
pub const SCHEMA_SQL: &str = include_str!("../sql/flights.sql");
