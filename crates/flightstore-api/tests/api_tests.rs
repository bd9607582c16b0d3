//! Integration tests for the flight API endpoints.
//!
//! Tests use Axum's `Router` directly via `tower::ServiceExt` without
//! starting a TCP server. The store is in memory and today is pinned
//! with a fixed clock.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{NaiveDate, NaiveDateTime};
use flightstore_api::router::build_router;
use flightstore_api::state::AppState;
use flightstore_core::{FixedClock, FlightService};
use flightstore_db::{FlightRepository, InMemoryFlightStore};
use flightstore_types::Flight;
use serde_json::Value;
use tower::ServiceExt;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 10).unwrap()
}

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

async fn make_test_state() -> (Arc<AppState>, InMemoryFlightStore) {
    let store = InMemoryFlightStore::new();
    for flight in [
        Flight::new("UA300", at(10, 17), "Boston", "Denver", 240).unwrap(),
        Flight::new("AA100", at(10, 8), "Boston", "Chicago", 180).unwrap(),
        Flight::new("DL200", at(12, 6), "Atlanta", "Chicago", 120).unwrap(),
        Flight::new("OLD1", at(5, 6), "Boston", "Chicago", 120).unwrap(),
    ] {
        store.add(&flight).await.unwrap();
    }

    let service = FlightService::new(Arc::new(store.clone()), Arc::new(FixedClock(today())));
    (Arc::new(AppState::new(service)), store)
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let (state, _) = make_test_state().await;
    send(state, uri).await
}

async fn send(state: Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let app = build_router(state);
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

fn numbers(json: &Value) -> Vec<&str> {
    json.as_array()
        .unwrap()
        .iter()
        .map(|f| f["flightNumber"].as_str().unwrap())
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_returns_ok() {
    let (status, json) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

// =============================================================================
// By number
// =============================================================================

#[tokio::test]
async fn flight_by_number_returns_camel_case_json() {
    let (status, json) = get("/api/flights/AA100").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["flightNumber"], "AA100");
    assert_eq!(json["departureDateTime"], "2025-01-10T08:00:00");
    assert_eq!(json["departureAirportCity"], "Boston");
    assert_eq!(json["arrivalAirportCity"], "Chicago");
    assert_eq!(json["durationMinutes"], 180);
}

#[tokio::test]
async fn unknown_flight_number_is_404() {
    let (status, json) = get("/api/flights/ZZ999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn blank_flight_number_is_400() {
    let (status, json) = get("/api/flights/%20%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("flight_number"));
}

// =============================================================================
// By date
// =============================================================================

#[tokio::test]
async fn flights_by_date_are_ordered_by_departure() {
    let (status, json) = get("/api/flights?date=2025-01-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&json), ["AA100", "UA300"]);
}

#[tokio::test]
async fn empty_day_is_an_empty_list() {
    let (status, json) = get("/api/flights?date=2025-01-17").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, Value::Array(Vec::new()));
}

#[tokio::test]
async fn dates_outside_window_are_400() {
    for uri in ["/api/flights?date=2025-01-09", "/api/flights?date=2025-01-18"] {
        let (status, json) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["error"].as_str().unwrap().contains("out of range"));
    }
}

#[tokio::test]
async fn malformed_or_missing_date_is_400() {
    for uri in [
        "/api/flights?date=10-01-2025",
        "/api/flights?date=2025-1-10",
        "/api/flights",
    ] {
        let (status, json) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(json["error"].as_str().unwrap().contains("yyyy-MM-dd"));
    }
}

// =============================================================================
// By city
// =============================================================================

#[tokio::test]
async fn departure_city_match_ignores_case() {
    let (status, json) = get("/api/flights/departure?city=boston&date=2025-01-10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&json), ["AA100", "UA300"]);
}

#[tokio::test]
async fn arrival_city_filters_by_date() {
    let (status, json) = get("/api/flights/arrival?city=Chicago&date=2025-01-12").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(numbers(&json), ["DL200"]);
}

#[tokio::test]
async fn blank_city_wins_over_bad_date() {
    let (status, json) = get("/api/flights/departure?city=%20&date=garbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("city"));

    let (status, _) = get("/api/flights/arrival?date=2025-01-10").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Store failure
// =============================================================================

#[tokio::test]
async fn store_failure_is_500_without_details() {
    let (state, store) = make_test_state().await;
    store.set_unavailable(true);

    let (status, json) = send(Arc::clone(&state), "/api/flights?date=2025-01-10").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "internal server error");

    let (status, _) = send(state, "/api/flights/AA100").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn validation_runs_before_failing_store() {
    let (state, store) = make_test_state().await;
    store.set_unavailable(true);

    let (status, _) = send(state, "/api/flights?date=2025-02-01").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
