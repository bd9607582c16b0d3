//! The flight record shared by every layer of the service.
//!
//! A [`Flight`] is a flat, immutable value. Fields are private and only
//! reachable through accessors, so once [`Flight::new`] has accepted the
//! values they cannot change. Deserialization goes through the same
//! validation as the constructor.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Errors raised when a flight record would violate its invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlightError {
    /// A required text field was empty or whitespace only.
    #[error("{field} must not be empty")]
    BlankField {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// A scheduled flight instance.
///
/// `flight_number` identifies a flight on a given departure date; the same
/// number may recur on other dates. `departure_date_time` carries no zone
/// and is kept exactly as the store recorded it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "FlightRecord")]
#[ts(export, export_to = "bindings/")]
#[allow(clippy::struct_field_names)]
pub struct Flight {
    flight_number: String,
    #[ts(as = "String")]
    departure_date_time: NaiveDateTime,
    departure_airport_city: String,
    arrival_airport_city: String,
    duration_minutes: u32,
}

impl Flight {
    /// Build a flight, rejecting blank identifiers and city names.
    ///
    /// # Errors
    ///
    /// Returns [`FlightError::BlankField`] naming the first blank field.
    pub fn new(
        flight_number: impl Into<String>,
        departure_date_time: NaiveDateTime,
        departure_airport_city: impl Into<String>,
        arrival_airport_city: impl Into<String>,
        duration_minutes: u32,
    ) -> Result<Self, FlightError> {
        let flight_number = non_blank("flight_number", flight_number.into())?;
        let departure_airport_city =
            non_blank("departure_airport_city", departure_airport_city.into())?;
        let arrival_airport_city = non_blank("arrival_airport_city", arrival_airport_city.into())?;

        Ok(Self {
            flight_number,
            departure_date_time,
            departure_airport_city,
            arrival_airport_city,
            duration_minutes,
        })
    }

    /// The flight's identifier, e.g. `AA100`.
    pub fn flight_number(&self) -> &str {
        &self.flight_number
    }

    /// Scheduled departure, as stored.
    pub const fn departure_date_time(&self) -> NaiveDateTime {
        self.departure_date_time
    }

    /// City of the departure airport.
    pub fn departure_airport_city(&self) -> &str {
        &self.departure_airport_city
    }

    /// City of the arrival airport.
    pub fn arrival_airport_city(&self) -> &str {
        &self.arrival_airport_city
    }

    /// Scheduled flight time in minutes.
    pub const fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

/// Unchecked wire shape; converted into [`Flight`] through [`Flight::new`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_field_names)]
struct FlightRecord {
    flight_number: String,
    departure_date_time: NaiveDateTime,
    departure_airport_city: String,
    arrival_airport_city: String,
    duration_minutes: u32,
}

impl TryFrom<FlightRecord> for Flight {
    type Error = FlightError;

    fn try_from(record: FlightRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.flight_number,
            record.departure_date_time,
            record.departure_airport_city,
            record.arrival_airport_city,
            record.duration_minutes,
        )
    }
}

fn non_blank(field: &'static str, value: String) -> Result<String, FlightError> {
    if value.trim().is_empty() {
        return Err(FlightError::BlankField { field });
    }
    Ok(value)
}
