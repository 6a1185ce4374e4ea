//! Background task that applies drift on a fixed interval.
//!
//! One timer, one writer: each tick recomputes the whole light
//! collection with [`drift_lights`](crate::drift::drift_lights) and
//! writes it back as a single atomic replace, so subscribers only ever
//! see a tick's results as a whole. The tick itself has no fallible
//! operations.
//!
//! Cancellation is a permit on the shutdown [`Notify`]: `stop` stores
//! the permit, and the `biased` select consumes it before the timer arm
//! can run another tick.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::SmallRng;
use tokio::sync::{Notify, broadcast};
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use crate::drift;
use crate::store::{FeedSnapshot, StateStore};

pub(crate) async fn run_driver(
    store: Arc<StateStore>,
    tx: broadcast::Sender<FeedSnapshot>,
    tick_interval: Duration,
    mut rng: SmallRng,
    shutdown: Arc<Notify>,
) {
    // First tick fires one full interval after start, so the seed
    // snapshot stands for a whole interval before drift begins.
    let first_tick = tokio::time::Instant::now()
        .checked_add(tick_interval)
        .unwrap_or_else(tokio::time::Instant::now);
    let mut ticker = tokio::time::interval_at(first_tick, tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    debug!(?tick_interval, "drift driver running");

    loop {
        tokio::select! {
            // Shutdown wins when both arms are ready: a cancelled driver
            // must not apply another tick.
            biased;

            () = shutdown.notified() => {
                debug!("drift driver stopped");
                return;
            }
            _ = ticker.tick() => {
                let lights = store.traffic_lights();
                let next = drift::drift_lights(&lights, &mut rng);
                let snapshot = store.replace_lights(next);
                let seq = snapshot.seq;
                // send errs only when nobody is subscribed, which is normal.
                let receivers = tx.send(snapshot).unwrap_or(0);
                trace!(seq, receivers, "tick applied");
            }
        }
    }
}
