//! Feed engine binary for signalgrid.
//!
//! Runs the traffic feed standalone: seeds the five intersections and
//! two incidents, drives the 3-second drift tick, and logs a summary of
//! every broadcast snapshot until interrupted.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `signalgrid-config.yaml`
//! 3. Construct the feed handle and subscribe
//! 4. Seed state and start the drift driver
//! 5. Log each snapshot until ctrl-c
//! 6. Stop the feed

mod error;

use std::path::Path;

use signalgrid_core::config::FeedConfig;
use signalgrid_core::TrafficFeed;
use signalgrid_types::FeedStats;
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::EngineError;

/// Application entry point for the feed engine.
///
/// # Errors
///
/// Returns an error if configuration loading or signal handling fails.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("signalgrid-engine starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        world_name = config.world.name,
        seed = ?config.world.seed,
        tick_interval_ms = config.world.tick_interval_ms,
        "Configuration loaded"
    );

    // 3. Construct the feed and subscribe before starting so the seed
    //    snapshot is the first thing logged.
    let feed = TrafficFeed::new(config);
    let mut updates = feed.subscribe();

    // 4. Seed state and start the drift driver.
    feed.start();
    info!("feed started, streaming snapshots (ctrl-c to stop)");

    // 5. Log each snapshot until interrupted.
    loop {
        tokio::select! {
            result = updates.recv() => match result {
                Ok(snapshot) => {
                    let stats = FeedStats::compute(&snapshot.lights, &snapshot.incidents);
                    info!(
                        seq = snapshot.seq,
                        signals_green = stats.signals_green,
                        vehicles_total = stats.vehicles_total,
                        incidents = stats.incident_total,
                        "snapshot"
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "snapshot logger lagged, skipping ahead");
                }
                Err(RecvError::Closed) => break,
            },
            result = tokio::signal::ctrl_c() => {
                result.map_err(EngineError::from)?;
                info!("ctrl-c received");
                break;
            }
        }
    }

    // 6. Stop the feed.
    feed.stop();
    info!("signalgrid-engine shutdown complete");

    Ok(())
}

/// Load the feed configuration from `signalgrid-config.yaml`.
///
/// Looks for the config file relative to the current working directory.
fn load_config() -> Result<FeedConfig, EngineError> {
    let config_path = Path::new("signalgrid-config.yaml");
    if config_path.exists() {
        let config = FeedConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(FeedConfig::default())
    }
}
