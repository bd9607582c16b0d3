//! Periodic retention sweep.

use std::time::Duration;

use flightstore_core::FlightService;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

/// Call [`FlightService::cleanup_old_flights`] every `period`, forever.
///
/// The first sweep runs immediately. Failures are logged and the loop
/// keeps going; the next tick retries.
pub async fn run_cleanup(service: FlightService, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!(period_secs = period.as_secs(), "retention sweep started");

    loop {
        interval.tick().await;
        match service.cleanup_old_flights().await {
            Ok(()) => info!("retention sweep completed"),
            Err(e) => error!(error = %e, "retention sweep failed"),
        }
    }
}
