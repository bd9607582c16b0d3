//! Error types for the persistence gateway.
//!
//! Every failure below the gateway boundary is reported as a [`DbError`]
//! that names the [`Operation`] which was running and, where one exists,
//! keeps the driver error as its source. The gateway never retries or
//! downgrades these; the caller decides what to do.

use core::fmt;

/// The logical store operations, named after the stored routines they call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Single flight lookup by number.
    GetFlightByNumber,
    /// All flights departing on a date.
    GetFlightsByDate,
    /// Flights leaving a city on a date.
    GetFlightsByDepartureCityAndDate,
    /// Flights arriving in a city on a date.
    GetFlightsByArrivalCityAndDate,
    /// Insert of a new flight.
    AddFlight,
    /// Retention sweep.
    CleanupOldFlights,
}

impl Operation {
    /// Stable name used in logs and error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GetFlightByNumber => "GetFlightByNumber",
            Self::GetFlightsByDate => "GetFlightsByDate",
            Self::GetFlightsByDepartureCityAndDate => "GetFlightsByDepartureCityAndDate",
            Self::GetFlightsByArrivalCityAndDate => "GetFlightsByArrivalCityAndDate",
            Self::AddFlight => "AddFlight",
            Self::CleanupOldFlights => "CleanupOldFlights",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur in the persistence gateway.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// A `PostgreSQL` call failed (connectivity, timeout, constraint, ...).
    #[error("{operation} failed: {source}")]
    Postgres {
        /// The operation that was running.
        operation: Operation,
        /// The underlying driver error.
        #[source]
        source: sqlx::Error,
    },

    /// The store returned a row that does not map onto a flight.
    #[error("{operation} returned a malformed row: {reason}")]
    MalformedRow {
        /// The operation that was running.
        operation: Operation,
        /// What was wrong with the row.
        reason: String,
    },

    /// The store rejected a write because of a key or integrity rule.
    #[error("{operation} rejected by the store: {reason}")]
    Constraint {
        /// The operation that was running.
        operation: Operation,
        /// Description of the violated rule.
        reason: String,
    },

    /// The store could not be reached.
    #[error("{operation} failed: store unavailable")]
    Unavailable {
        /// The operation that was running.
        operation: Operation,
    },

    /// Invalid connection settings.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DbError {
    /// Wrap a driver error raised while running `operation`.
    pub const fn postgres(operation: Operation, source: sqlx::Error) -> Self {
        Self::Postgres { operation, source }
    }

    /// The operation that failed, if the error arose from one.
    pub const fn operation(&self) -> Option<Operation> {
        match self {
            Self::Postgres { operation, .. }
            | Self::MalformedRow { operation, .. }
            | Self::Constraint { operation, .. }
            | Self::Unavailable { operation } => Some(*operation),
            Self::Config(_) => None,
        }
    }
}
