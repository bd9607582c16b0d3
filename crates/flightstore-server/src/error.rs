//! Error types for the server binary.
//!
//! [`ServerError`] wraps every failure mode during startup and serving
//! so `main` can propagate with `?`.

/// Top-level error for the server binary.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: flightstore_core::ConfigError,
    },

    /// The database pool could not be created.
    #[error("database error: {source}")]
    Database {
        /// The underlying gateway error.
        #[from]
        source: flightstore_db::DbError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("http error: {source}")]
    Http {
        /// The underlying server error.
        #[from]
        source: flightstore_api::ServerError,
    },
}
