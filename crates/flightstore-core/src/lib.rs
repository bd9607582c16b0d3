//! Query validation layer for the flight storage service.
//!
//! This crate sits between the HTTP boundary and the persistence gateway.
//! It owns the business rules (non-blank identifiers, the bounded
//! lookahead window for date queries) and the service configuration.
//!
//! # Modules
//!
//! - [`service`] -- [`FlightService`], validation then delegation
//! - [`clock`] -- Injectable source of today's UTC date
//! - [`error`] -- [`QueryError`], the typed outcomes callers discriminate on
//! - [`config`] -- YAML configuration with environment overrides

pub mod clock;
pub mod config;
pub mod error;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ConfigError, ServiceConfig};
pub use error::QueryError;
pub use service::FlightService;
