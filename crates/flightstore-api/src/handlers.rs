//! REST handlers for the flight endpoints.
//!
//! Each handler logs the request, turns its inputs into typed values,
//! and delegates to [`FlightService`](flightstore_core::FlightService).
//! Dates must use the `yyyy-MM-dd` form; anything else is rejected with
//! 400 before the service is consulted.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::NaiveDate;
use flightstore_types::Flight;
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

/// Accepted date layout for every `date` query parameter.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Query parameters for `GET /api/flights`.
#[derive(Debug, Deserialize)]
pub struct DateQuery {
    /// Calendar date in `yyyy-MM-dd` form.
    pub date: Option<String>,
}

/// Query parameters for the city endpoints.
#[derive(Debug, Deserialize)]
pub struct CityDateQuery {
    /// Airport city to match (case-insensitive).
    pub city: Option<String>,
    /// Calendar date in `yyyy-MM-dd` form.
    pub date: Option<String>,
}

/// `GET /health` -- liveness probe.
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `GET /api/flights/{flight_number}` -- a single flight.
///
/// # Errors
///
/// 400 for a blank number, 404 when no flight carries the number, and
/// 500 when the store fails.
pub async fn get_flight_by_number(
    State(state): State<Arc<AppState>>,
    Path(flight_number): Path<String>,
) -> Result<Json<Flight>, ApiError> {
    info!(%flight_number, "get flight by number");
    state
        .service
        .get_flight_by_number(&flight_number)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("flight {flight_number} not found")))
}

/// `GET /api/flights?date=yyyy-MM-dd` -- every flight departing on a date.
///
/// # Errors
///
/// 400 for a missing, malformed or out-of-window date, and 500 when the
/// store fails.
pub async fn list_flights_by_date(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    info!(date = ?query.date, "get flights by date");
    let date = parse_date(query.date.as_deref())?;
    let flights = state.service.get_flights_by_date(date).await?;
    Ok(Json(flights))
}

/// `GET /api/flights/departure?city=&date=` -- flights leaving a city.
///
/// # Errors
///
/// 400 for a blank city or a bad date (the city is checked first), and
/// 500 when the store fails.
pub async fn flights_by_departure(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityDateQuery>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    info!(city = ?query.city, date = ?query.date, "get flights by departure city");
    let city = require_city(query.city.as_deref())?;
    let date = parse_date(query.date.as_deref())?;
    let flights = state.service.get_flights_by_departure(city, date).await?;
    Ok(Json(flights))
}

/// `GET /api/flights/arrival?city=&date=` -- flights reaching a city.
///
/// # Errors
///
/// 400 for a blank city or a bad date (the city is checked first), and
/// 500 when the store fails.
pub async fn flights_by_arrival(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CityDateQuery>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    info!(city = ?query.city, date = ?query.date, "get flights by arrival city");
    let city = require_city(query.city.as_deref())?;
    let date = parse_date(query.date.as_deref())?;
    let flights = state.service.get_flights_by_arrival(city, date).await?;
    Ok(Json(flights))
}

fn require_city(city: Option<&str>) -> Result<&str, ApiError> {
    match city {
        Some(c) if !c.trim().is_empty() => Ok(c),
        _ => Err(ApiError::BadRequest(String::from("city cannot be empty"))),
    }
}

/// Parse a strict `yyyy-MM-dd` date.
///
/// chrono accepts single-digit months and days for `%m` and `%d`, so the
/// length is checked as well.
fn parse_date(raw: Option<&str>) -> Result<NaiveDate, ApiError> {
    let invalid = || ApiError::BadRequest(String::from("invalid date format, expected yyyy-MM-dd"));
    raw.filter(|r| r.len() == 10)
        .and_then(|r| NaiveDate::parse_from_str(r, DATE_FORMAT).ok())
        .ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date(Some("2025-01-10")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
        );
    }

    #[test]
    fn rejects_other_date_shapes() {
        for raw in ["2025-1-10", "10/01/2025", "2025-02-30", "", "tomorrow"] {
            assert!(parse_date(Some(raw)).is_err(), "{raw} should be rejected");
        }
        assert!(parse_date(None).is_err());
    }

    #[test]
    fn blank_city_is_rejected() {
        assert!(require_city(Some("  ")).is_err());
        assert!(require_city(None).is_err());
        assert_eq!(require_city(Some("Boston")).unwrap(), "Boston");
    }
}
