//! `PostgreSQL` implementation of the flight gateway.
//!
//! Every operation calls one stored routine from `sql/flights.sql`. Reads
//! go through set-returning functions, writes through procedures invoked
//! with `CALL`. All inputs are bound as parameters; no value is ever
//! formatted into the SQL text.
//!
//! Each call acquires its own pooled connection inside the operation's
//! scope. The connection goes back to the pool when that scope ends,
//! whether the call succeeded, failed or returned early.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use flightstore_types::Flight;
use sqlx::pool::PoolConnection;
use sqlx::{PgPool, Postgres};

use crate::error::{DbError, Operation};
use crate::postgres::{self, PostgresConfig};
use crate::repository::FlightRepository;

const GET_FLIGHT_BY_NUMBER: &str = r"SELECT flight_number, departure_date_time, departure_airport_city, arrival_airport_city, duration_minutes
  FROM get_flight_by_number($1)";

const GET_FLIGHTS_BY_DATE: &str = r"SELECT flight_number, departure_date_time, departure_airport_city, arrival_airport_city, duration_minutes
  FROM get_flights_by_date($1)
  ORDER BY departure_date_time, flight_number";

const GET_FLIGHTS_BY_DEPARTURE: &str = r"SELECT flight_number, departure_date_time, departure_airport_city, arrival_airport_city, duration_minutes
  FROM get_flights_by_departure_city_and_date($1, $2)
  ORDER BY departure_date_time, flight_number";

const GET_FLIGHTS_BY_ARRIVAL: &str = r"SELECT flight_number, departure_date_time, departure_airport_city, arrival_airport_city, duration_minutes
  FROM get_flights_by_arrival_city_and_date($1, $2)
  ORDER BY departure_date_time, flight_number";

const ADD_FLIGHT: &str = r"CALL add_flight($1, $2, $3, $4, $5)";

const CLEANUP_OLD_FLIGHTS: &str = r"CALL cleanup_old_flights()";

/// Gateway to the flights database.
///
/// Holds only the driver pool handle; cloning is cheap and clones share
/// the pool.
#[derive(Clone)]
pub struct PostgresFlightStore {
    pool: PgPool,
}

impl PostgresFlightStore {
    /// Wrap an existing pool.
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Build a store from connection settings without opening a connection.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Config`] if the URL cannot be parsed.
    pub fn connect_lazy(config: &PostgresConfig) -> Result<Self, DbError> {
        postgres::connect_lazy(config).map(Self::new)
    }

    /// Return a reference to the underlying [`PgPool`].
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close all connections in the pool gracefully.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }

    async fn acquire(&self, operation: Operation) -> Result<PoolConnection<Postgres>, DbError> {
        self.pool
            .acquire()
            .await
            .map_err(|e| DbError::postgres(operation, e))
    }

    async fn fetch_flights(
        &self,
        operation: Operation,
        sql: &'static str,
        city: Option<&str>,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError> {
        let mut conn = self.acquire(operation).await?;

        let mut query = sqlx::query_as::<_, FlightRow>(sql);
        if let Some(city) = city {
            query = query.bind(city);
        }
        let rows = query
            .bind(date)
            .fetch_all(&mut *conn)
            .await
            .map_err(|e| DbError::postgres(operation, e))?;

        tracing::debug!(%operation, rows = rows.len(), "fetched flights");

        rows.into_iter().map(|row| row.into_flight(operation)).collect()
    }
}

#[async_trait]
impl FlightRepository for PostgresFlightStore {
    async fn get_by_number(&self, flight_number: &str) -> Result<Option<Flight>, DbError> {
        let operation = Operation::GetFlightByNumber;
        async {
            let mut conn = self.acquire(operation).await?;
            let row = sqlx::query_as::<_, FlightRow>(GET_FLIGHT_BY_NUMBER)
                .bind(flight_number)
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| DbError::postgres(operation, e))?;
            row.map(|r| r.into_flight(operation)).transpose()
        }
        .await
        .inspect_err(|e| {
            tracing::error!(%operation, flight_number, error = %e, "error getting flight by number");
        })
    }

    async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Flight>, DbError> {
        let operation = Operation::GetFlightsByDate;
        self.fetch_flights(operation, GET_FLIGHTS_BY_DATE, None, date)
            .await
            .inspect_err(|e| {
                tracing::error!(%operation, %date, error = %e, "error getting flights by date");
            })
    }

    async fn get_by_departure_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError> {
        let operation = Operation::GetFlightsByDepartureCityAndDate;
        self.fetch_flights(operation, GET_FLIGHTS_BY_DEPARTURE, Some(city), date)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    %operation,
                    city,
                    %date,
                    error = %e,
                    "error getting flights by departure city and date"
                );
            })
    }

    async fn get_by_arrival_city_and_date(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Vec<Flight>, DbError> {
        let operation = Operation::GetFlightsByArrivalCityAndDate;
        self.fetch_flights(operation, GET_FLIGHTS_BY_ARRIVAL, Some(city), date)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    %operation,
                    city,
                    %date,
                    error = %e,
                    "error getting flights by arrival city and date"
                );
            })
    }

    async fn add(&self, flight: &Flight) -> Result<(), DbError> {
        let operation = Operation::AddFlight;
        async {
            let duration = i32::try_from(flight.duration_minutes()).map_err(|e| {
                DbError::Constraint {
                    operation,
                    reason: format!(
                        "duration_minutes {} does not fit the INTEGER column: {e}",
                        flight.duration_minutes()
                    ),
                }
            })?;

            let mut conn = self.acquire(operation).await?;
            sqlx::query(ADD_FLIGHT)
                .bind(flight.flight_number())
                .bind(flight.departure_date_time())
                .bind(flight.departure_airport_city())
                .bind(flight.arrival_airport_city())
                .bind(duration)
                .execute(&mut *conn)
                .await
                .map_err(|e| DbError::postgres(operation, e))?;

            tracing::debug!(flight_number = flight.flight_number(), "flight added");
            Ok::<(), DbError>(())
        }
        .await
        .inspect_err(|e| {
            tracing::error!(
                %operation,
                flight_number = flight.flight_number(),
                error = %e,
                "error adding flight"
            );
        })
    }

    async fn cleanup_old(&self) -> Result<(), DbError> {
        let operation = Operation::CleanupOldFlights;
        async {
            let mut conn = self.acquire(operation).await?;
            sqlx::query(CLEANUP_OLD_FLIGHTS)
                .execute(&mut *conn)
                .await
                .map_err(|e| DbError::postgres(operation, e))?;
            Ok::<(), DbError>(())
        }
        .await
        .inspect_err(|e| {
            tracing::error!(%operation, error = %e, "error cleaning up old flights");
        })
    }
}

/// A row as returned by the stored routines.
///
/// Function result columns are nullable from the driver's point of view,
/// so every column is optional here and checked in [`FlightRow::into_flight`].
#[derive(Debug, Clone, Default, sqlx::FromRow)]
pub struct FlightRow {
    /// Flight identifier.
    pub flight_number: Option<String>,
    /// Scheduled departure (`TIMESTAMP WITHOUT TIME ZONE`).
    pub departure_date_time: Option<NaiveDateTime>,
    /// Departure city.
    pub departure_airport_city: Option<String>,
    /// Arrival city.
    pub arrival_airport_city: Option<String>,
    /// Flight time in minutes.
    pub duration_minutes: Option<i32>,
}

impl FlightRow {
    /// Map the row onto a [`Flight`].
    ///
    /// # Errors
    ///
    /// Returns [`DbError::MalformedRow`] if any column is NULL, the duration
    /// is negative, or a text column is blank.
    pub fn into_flight(self, operation: Operation) -> Result<Flight, DbError> {
        let malformed = |reason: String| DbError::MalformedRow { operation, reason };

        let flight_number = self
            .flight_number
            .ok_or_else(|| malformed("flight_number is NULL".to_owned()))?;
        let departure_date_time = self
            .departure_date_time
            .ok_or_else(|| malformed("departure_date_time is NULL".to_owned()))?;
        let departure_airport_city = self
            .departure_airport_city
            .ok_or_else(|| malformed("departure_airport_city is NULL".to_owned()))?;
        let arrival_airport_city = self
            .arrival_airport_city
            .ok_or_else(|| malformed("arrival_airport_city is NULL".to_owned()))?;
        let raw_duration = self
            .duration_minutes
            .ok_or_else(|| malformed("duration_minutes is NULL".to_owned()))?;
        let duration_minutes = u32::try_from(raw_duration)
            .map_err(|e| malformed(format!("duration_minutes {raw_duration} is invalid: {e}")))?;

        Flight::new(
            flight_number,
            departure_date_time,
            departure_airport_city,
            arrival_airport_city,
            duration_minutes,
        )
        .map_err(|e| malformed(e.to_string()))
    }
}
