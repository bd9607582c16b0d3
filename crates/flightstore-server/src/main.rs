//! Flight storage service binary.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `flightstore-config.yaml` (or defaults)
//! 2. Initialize structured logging (tracing)
//! 3. Select the store: `PostgreSQL` when a URL is configured, else in memory
//! 4. Build the query service around the system clock
//! 5. Spawn the retention sweep if an interval is configured
//! 6. Serve HTTP until `Ctrl-C`

mod error;
mod maintenance;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use flightstore_api::{AppState, ServerConfig};
use flightstore_core::{FlightService, ServiceConfig, SystemClock};
use flightstore_db::{FlightRepository, InMemoryFlightStore, PostgresFlightStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::ServerError;

/// Default configuration file, resolved against the working directory.
const CONFIG_PATH: &str = "flightstore-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, store setup or the HTTP server fails.
#[tokio::main]
async fn main() -> Result<(), ServerError> {
    // 1. Load configuration.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging. RUST_LOG wins over the config level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_target(true)
        .init();

    info!("flightstore-server starting");
    if !from_file {
        info!(path = CONFIG_PATH, "config file not found, using defaults");
    }
    info!(
        host = config.server.host,
        port = config.server.port,
        lookahead_days = config.query.lookahead_days,
        cleanup_interval_secs = config.maintenance.cleanup_interval_secs,
        "configuration loaded"
    );

    // 3. Select the store.
    let (repository, postgres) = build_repository(&config)?;

    // 4. Build the query service.
    let service = FlightService::new(repository, Arc::new(SystemClock))
        .with_lookahead_days(config.query.lookahead_days);

    // 5. Retention sweep.
    let sweeper = match config.maintenance.cleanup_interval_secs {
        0 => {
            info!("retention sweep disabled");
            None
        }
        secs => Some(tokio::spawn(maintenance::run_cleanup(
            service.clone(),
            Duration::from_secs(secs),
        ))),
    };

    // 6. Serve until Ctrl-C.
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    let state = Arc::new(AppState::new(service));
    let served = flightstore_api::start_server(&server_config, state, shutdown_signal()).await;

    if let Some(handle) = sweeper {
        handle.abort();
    }
    if let Some(store) = postgres {
        store.close().await;
    }

    served?;
    info!("flightstore-server stopped");
    Ok(())
}

/// Load `flightstore-config.yaml` if present, otherwise defaults.
///
/// Environment overrides apply either way. The flag reports whether the
/// file was read.
fn load_config() -> Result<(ServiceConfig, bool), ServerError> {
    let path = Path::new(CONFIG_PATH);
    if path.exists() {
        Ok((ServiceConfig::from_file(path)?, true))
    } else {
        Ok((ServiceConfig::parse("")?, false))
    }
}

/// Pick the gateway. The `PostgreSQL` handle is returned separately so
/// its pool can be closed on shutdown.
fn build_repository(
    config: &ServiceConfig,
) -> Result<(Arc<dyn FlightRepository>, Option<PostgresFlightStore>), ServerError> {
    if let Some(pg) = config.database.postgres() {
        let store = PostgresFlightStore::connect_lazy(&pg)?;
        info!(
            max_connections = pg.max_connections,
            "using PostgreSQL flight store"
        );
        Ok((Arc::new(store.clone()), Some(store)))
    } else {
        warn!("no database URL configured, using in-memory flight store");
        Ok((Arc::new(InMemoryFlightStore::new()), None))
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
