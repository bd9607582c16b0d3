//! In-memory flight store.
//!
//! Implements [`FlightRepository`] over a sorted map so it behaves like the
//! `PostgreSQL` gateway: the same ordering, the same duplicate-key rule,
//! the same date-only and case-insensitive city matching, and the same
//! retention rule for [`FlightRepository::cleanup_old`]. Used by tests and
//! by the server when no database is configured.
//!
//! [`InMemoryFlightStore::set_unavailable`] makes every call fail with
//! [`DbError::Unavailable`], which lets callers exercise their storage
//! failure paths without a real database.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use flightstore_types::Flight;
use tokio::sync::RwLock;

use crate::error::{DbError, Operation};
use crate::repository::FlightRepository;

/// Flights keyed by `(departure_date_time, flight_number)`.
///
/// The key is both the uniqueness rule and the result ordering.
type FlightMap = BTreeMap<(NaiveDateTime, String), Flight>;

/// Shared in-memory store. Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFlightStore {
    flights: Arc<RwLock<FlightMap>>,
    unavailable: Arc<AtomicBool>,
    today: Option<NaiveDate>,
}

impl InMemoryFlightStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin the date the retention sweep treats as today.
    ///
    /// Without this the sweep uses the current UTC date.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Make every subsequent call fail (`true`) or succeed again (`false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of stored flights.
    pub async fn len(&self) -> usize {
        self.flights.read().await.len()
    }

    /// Whether the store holds no flights.
    pub async fn is_empty(&self) -> bool {
        self.flights.read().await.is_empty()
    }

    fn check_available(&self, operation: Operation) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            tracing::error!(%operation, "in-memory store marked unavailable");
            return Err(DbError::Unavailable { operation });
        }
        Ok(())
    }

    async fn collect_on<F>(
        &self,
        operation: Operation,
        date: NaiveDate,
        matches: F,
    ) -> Result<Vec<Flight>, DbError>
    where
        F: Fn(&Flight) -> bool + Send,
    {
        self.check_available(operation)?;
        let flights = self.flights.read().await;
        let found: Vec<Flight> = flights
            .values()
            .filter(|f| f.departure_date_time().date() == date && matches(f))
            .cloned()
            .collect();
        tracing::debug!(%operation, rows = found.len(), "fetched flights");
        Ok(found)
    }
}

#[async_trait]
impl FlightRepository for InMemoryFlightStore {
    async fn get_by_number(&self, flight_number: &str) -> Result<Option<Flight>, DbError> {
        self.check_available(Operation::GetFlightByNumber)?;
        let flights = self.flights.read().await;
        Ok(flights
            .values()
            .find(|f| f.flight_number() == flight_number)
            .cloned())
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Flight>, DbError> {
        self.collect_on(Operation::GetFlightsByDate, date, |_| true)
            .await
    }

    async fn get_by_departure_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError> {
        let city = city.to_lowercase();
        self.collect_on(Operation::GetFlightsByDepartureCityAndDate, date, |f| {
            f.departure_airport_city().to_lowercase() == city
        })
        .await
    }

    async fn get_by_arrival_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError> {
        let city = city.to_lowercase();
        self.collect_on(Operation::GetFlightsByArrivalCityAndDate, date, |f| {
            f.arrival_airport_city().to_lowercase() == city
        })
        .await
    }

    async fn add(&self, flight: &Flight) -> Result<(), DbError> {
        let operation = Operation::AddFlight;
        self.check_available(operation)?;

        let key = (
            flight.departure_date_time(),
            flight.flight_number().to_owned(),
        );
        let mut flights = self.flights.write().await;
        if flights.contains_key(&key) {
            return Err(DbError::Constraint {
                operation,
                reason: format!(
                    "flight {} departing {} already exists",
                    flight.flight_number(),
                    flight.departure_date_time()
                ),
            });
        }
        flights.insert(key, flight.clone());
        tracing::debug!(flight_number = flight.flight_number(), "flight added");
        Ok(())
    }

    async fn cleanup_old(&self) -> Result<(), DbError> {
        self.check_available(Operation::CleanupOldFlights)?;

        let today = self.today.unwrap_or_else(|| Utc::now().date_naive());
        let mut flights = self.flights.write().await;
        let before = flights.len();
        flights.retain(|_, f| f.departure_date_time().date() >= today);
        tracing::info!(
            removed = before.saturating_sub(flights.len()),
            %today,
            "old flights cleaned up"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn flight(number: &str, departs: NaiveDateTime, from: &str, to: &str) -> Flight {
        Flight::new(number, departs, from, to, 90).unwrap()
    }

    async fn seeded() -> InMemoryFlightStore {
        let store = InMemoryFlightStore::new();
        for seed in [
            flight("UA300", at(10, 17), "Boston", "Denver"),
            flight("AA100", at(10, 8), "Boston", "Chicago"),
            flight("DL200", at(10, 8), "Atlanta", "Chicago"),
            flight("AA100", at(11, 8), "Boston", "Chicago"),
        ] {
            store.add(&seed).await.unwrap();
        }
        store
    }

    #[tokio::test]
    async fn round_trip_preserves_all_fields() {
        let store = InMemoryFlightStore::new();
        let inserted = Flight::new("AA100", at(10, 8), "Boston", "Chicago", 180).unwrap();
        store.add(&inserted).await.unwrap();

        let fetched = store.get_by_number("AA100").await.unwrap().unwrap();
        assert_eq!(fetched, inserted);
    }

    #[tokio::test]
    async fn missing_number_is_none() {
        let store = seeded().await;
        assert_eq!(store.get_by_number("ZZ999").await.unwrap(), None);
    }

    #[tokio::test]
    async fn number_lookup_returns_earliest_departure() {
        let store = seeded().await;
        let flight = store.get_by_number("AA100").await.unwrap().unwrap();
        assert_eq!(flight.departure_date_time(), at(10, 8));
    }

    #[tokio::test]
    async fn date_lookup_orders_by_departure_then_number() {
        let store = seeded().await;
        let numbers: Vec<String> = store
            .get_by_date(date(10))
            .await
            .unwrap()
            .iter()
            .map(|f| f.flight_number().to_owned())
            .collect();
        assert_eq!(numbers, ["AA100", "DL200", "UA300"]);
    }

    #[tokio::test]
    async fn city_lookups_match_date_and_city_ignoring_case() {
        let store = seeded().await;

        let departing = store
            .get_by_departure_city_and_date("boston", date(10))
            .await
            .unwrap();
        assert_eq!(departing.len(), 2);

        let arriving = store
            .get_by_arrival_city_and_date("CHICAGO", date(10))
            .await
            .unwrap();
        assert_eq!(arriving.len(), 2);

        let none = store
            .get_by_arrival_city_and_date("Chicago", date(12))
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn duplicate_insert_is_a_constraint_error() {
        let store = seeded().await;
        let err = store
            .add(&flight("AA100", at(10, 8), "Boston", "Chicago"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Constraint {
                operation: Operation::AddFlight,
                ..
            }
        ));
        assert_eq!(store.len().await, 4);
    }

    #[tokio::test]
    async fn cleanup_removes_flights_before_today() {
        let store = seeded().await.with_today(date(11));
        store.cleanup_old().await.unwrap();

        assert_eq!(store.len().await, 1);
        assert!(store.get_by_date(date(10)).await.unwrap().is_empty());
        assert_eq!(store.get_by_date(date(11)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_operation() {
        let store = seeded().await;
        store.set_unavailable(true);

        let err = store.get_by_number("AA100").await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::GetFlightByNumber));
        let err = store.get_by_date(date(10)).await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::GetFlightsByDate));
        let err = store.cleanup_old().await.unwrap_err();
        assert_eq!(err.operation(), Some(Operation::CleanupOldFlights));

        store.set_unavailable(false);
        assert!(store.get_by_number("AA100").await.is_ok());
    }
}
