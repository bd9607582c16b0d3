//! Query validation service.
//!
//! [`FlightService`] checks caller input before any store access and then
//! delegates to the gateway. Two rules apply:
//!
//! - Flight numbers and city names must contain a non-whitespace character.
//! - Date queries must fall within `today ..= today + lookahead_days`,
//!   with today read from the injected [`Clock`] on every call.
//!
//! When a city query fails both rules, the city error is reported.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use flightstore_db::FlightRepository;
use flightstore_types::Flight;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::error::QueryError;

/// Default number of days past today that date queries may reach.
pub const DEFAULT_LOOKAHEAD_DAYS: u64 = 7;

/// Validates flight queries and forwards them to a [`FlightRepository`].
///
/// Stateless apart from its injected handles; clones share them, and the
/// service can be called concurrently from any number of tasks.
#[derive(Clone)]
pub struct FlightService {
    repository: Arc<dyn FlightRepository>,
    clock: Arc<dyn Clock>,
    lookahead_days: u64,
}

impl FlightService {
    /// Create a service with the default 7-day lookahead.
    pub fn new(repository: Arc<dyn FlightRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            clock,
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
        }
    }

    /// Override the lookahead window length.
    #[must_use]
    pub const fn with_lookahead_days(mut self, days: u64) -> Self {
        self.lookahead_days = days;
        self
    }

    /// Look up one flight by number.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidArgument`] for a blank number,
    /// [`QueryError::StorageFailure`] if the store fails.
    pub async fn get_flight_by_number(
        &self,
        flight_number: &str,
    ) -> Result<Option<Flight>, QueryError> {
        require_non_blank("flight_number", flight_number)?;

        let flight = self.repository.get_by_number(flight_number).await?;
        if flight.is_none() {
            info!(flight_number, "flight not found");
        }
        Ok(flight)
    }

    /// All flights departing on `date`.
    ///
    /// # Errors
    ///
    /// [`QueryError::OutOfRange`] outside the lookahead window,
    /// [`QueryError::StorageFailure`] if the store fails.
    pub async fn get_flights_by_date(&self, date: NaiveDate) -> Result<Vec<Flight>, QueryError> {
        self.check_window(date)?;
        let flights = self.repository.get_by_date(date).await?;
        debug!(%date, count = flights.len(), "flights by date");
        Ok(flights)
    }

    /// Flights leaving `city` on `date`.
    ///
    /// # Errors
    ///
    /// [`QueryError::InvalidArgument`] for a blank city (checked first),
    /// [`QueryError::OutOfRange`] outside the lookahead window,
    /// [`QueryError::StorageFailure`] if the store fails.
    pub async fn get_flights_by_departure(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, QueryError> {
        require_non_blank("city", city)?;
        self.check_window(date)?;
        let flights = self
            .repository
            .get_by_departure_city_and_date(city, date)
            .await?;
        debug!(city, %date, count = flights.len(), "flights by departure");
        Ok(flights)
    }

    /// Flights arriving in `city` on `date`.
    ///
    /// # Errors
    ///
    /// Same as [`FlightService::get_flights_by_departure`].
    pub async fn get_flights_by_arrival(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, QueryError> {
        require_non_blank("city", city)?;
        self.check_window(date)?;
        let flights = self
            .repository
            .get_by_arrival_city_and_date(city, date)
            .await?;
        debug!(city, %date, count = flights.len(), "flights by arrival");
        Ok(flights)
    }

    /// Insert a flight. The [`Flight`] type already guarantees its fields.
    ///
    /// # Errors
    ///
    /// [`QueryError::StorageFailure`] if the store rejects or fails the write.
    pub async fn add_flight(&self, flight: &Flight) -> Result<(), QueryError> {
        self.repository.add(flight).await?;
        info!(flight_number = flight.flight_number(), "flight added");
        Ok(())
    }

    /// Run the store's retention sweep.
    ///
    /// # Errors
    ///
    /// [`QueryError::StorageFailure`] if the store fails.
    pub async fn cleanup_old_flights(&self) -> Result<(), QueryError> {
        self.repository.cleanup_old().await?;
        info!("old flights cleaned up");
        Ok(())
    }

    /// Reject dates outside `today ..= today + lookahead_days`.
    fn check_window(&self, date: NaiveDate) -> Result<(), QueryError> {
        let earliest = self.clock.today();
        let latest = earliest
            .checked_add_days(Days::new(self.lookahead_days))
            .unwrap_or(NaiveDate::MAX);

        if date < earliest || date > latest {
            warn!(%date, %earliest, %latest, "date outside lookahead window");
            return Err(QueryError::OutOfRange {
                date,
                earliest,
                latest,
            });
        }
        Ok(())
    }
}

fn require_non_blank(field: &'static str, value: &str) -> Result<(), QueryError> {
    if value.trim().is_empty() {
        warn!(field, "blank argument rejected");
        return Err(QueryError::blank(field));
    }
    Ok(())
}
