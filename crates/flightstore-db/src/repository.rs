//! The gateway capability set shared by every store implementation.
//!
//! The query service depends only on [`FlightRepository`], never on a
//! concrete store, so the `PostgreSQL` gateway and the in-memory store are
//! interchangeable behind an `Arc<dyn FlightRepository>`.
//!
//! # Ordering
//!
//! Multi-row results are ordered by departure time ascending, then by
//! flight number. When a flight number appears on several dates,
//! [`FlightRepository::get_by_number`] returns the earliest departure.

use async_trait::async_trait;
use chrono::NaiveDate;
use flightstore_types::Flight;

use crate::error::DbError;

/// Parameterized lookups and writes against the flight store.
///
/// Implementations hold no per-request state and must be safe to call
/// concurrently from many tasks.
#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Fetch the first flight with this number, or `None` if there is none.
    ///
    /// Absence is a valid result, not an error.
    async fn get_by_number(&self, flight_number: &str) -> Result<Option<Flight>, DbError>;

    /// All flights departing on `date`, ignoring the time of day.
    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Flight>, DbError>;

    /// Flights leaving `city` on `date`.
    async fn get_by_departure_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError>;

    /// Flights arriving in `city` on `date`.
    async fn get_by_arrival_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError>;

    /// Insert a new flight. Duplicate handling is up to the store.
    async fn add(&self, flight: &Flight) -> Result<(), DbError>;

    /// Delete flights older than the store's retention threshold.
    async fn cleanup_old(&self) -> Result<(), DbError>;
}
