//! Typed outcomes of the query service.
//!
//! [`QueryError::InvalidArgument`] and [`QueryError::OutOfRange`] are
//! raised before the store is touched and depend only on the input, so
//! retrying them never helps. [`QueryError::StorageFailure`] carries the
//! gateway error untouched. A lookup that finds nothing is `Ok(None)`,
//! not an error.

use chrono::NaiveDate;
use flightstore_db::DbError;

/// Errors returned by [`FlightService`](crate::service::FlightService).
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// A required string argument was empty or whitespace only.
    #[error("invalid argument `{field}`: {message}")]
    InvalidArgument {
        /// Name of the rejected argument.
        field: &'static str,
        /// Human-readable reason.
        message: String,
    },

    /// The requested date lies outside the lookahead window.
    #[error("date {date} is out of range: must be between {earliest} and {latest}")]
    OutOfRange {
        /// The rejected date.
        date: NaiveDate,
        /// First permitted date (today, UTC).
        earliest: NaiveDate,
        /// Last permitted date.
        latest: NaiveDate,
    },

    /// The store failed below the gateway boundary.
    #[error("storage failure: {0}")]
    StorageFailure(#[from] DbError),
}

impl QueryError {
    pub(crate) fn blank(field: &'static str) -> Self {
        Self::InvalidArgument {
            field,
            message: format!("{field} cannot be empty"),
        }
    }

    /// Whether the caller supplied bad input (as opposed to a store failure).
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. } | Self::OutOfRange { .. })
    }
}
