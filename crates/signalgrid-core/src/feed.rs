//! The traffic feed: lifecycle, mutation API, and broadcast layer.
//!
//! [`TrafficFeed`] is an explicit handle constructed from a
//! [`FeedConfig`] and passed by clone to every consumer -- there is no
//! ambient singleton. `start` seeds the store and launches the drift
//! driver; `stop` cancels the driver before its next tick can fire.
//!
//! Views never mutate state directly: they read snapshots, subscribe
//! for change notifications, and call the two mutation operations. Every
//! completed write publishes exactly one [`FeedSnapshot`] on the
//! broadcast channel.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::{Notify, broadcast};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use signalgrid_types::{
    FeedStats, Incident, IncidentDraft, LightId, LightStatus, TrafficLight,
};

use crate::config::FeedConfig;
use crate::driver;
use crate::error::FeedError;
use crate::seed;
use crate::store::{FeedSnapshot, StateStore};

/// Real-time traffic feed handle.
///
/// Cheap to clone; all clones share one store, one broadcast channel,
/// and one drift driver.
#[derive(Debug, Clone)]
pub struct TrafficFeed {
    inner: Arc<FeedInner>,
}

#[derive(Debug)]
struct FeedInner {
    store: Arc<StateStore>,
    tx: broadcast::Sender<FeedSnapshot>,
    shutdown: Arc<Notify>,
    driver: Mutex<Option<JoinHandle<()>>>,
    running: AtomicBool,
    config: FeedConfig,
}

impl TrafficFeed {
    /// Create a feed handle. No state is seeded and no timer runs until
    /// [`start`](Self::start) is called.
    pub fn new(config: FeedConfig) -> Self {
        let (tx, _) = broadcast::channel(config.channel.broadcast_capacity.max(1));
        Self {
            inner: Arc::new(FeedInner {
                store: Arc::new(StateStore::new()),
                tx,
                shutdown: Arc::new(Notify::new()),
                driver: Mutex::new(None),
                running: AtomicBool::new(false),
                config,
            }),
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Seed the initial collections and launch the drift driver.
    ///
    /// Idempotent: calling `start` while the feed is already running is
    /// a no-op. A `start` after a `stop` resumes drift over the current
    /// state without reseeding. Must be called from within a Tokio
    /// runtime.
    pub fn start(&self) {
        if self.inner.running.swap(true, Ordering::AcqRel) {
            debug!("feed already running, start ignored");
            return;
        }

        if !self.inner.store.is_connected() {
            let snapshot = self
                .inner
                .store
                .seed(seed::seed_traffic_lights(), seed::seed_incidents());
            let receivers = self.inner.tx.send(snapshot).unwrap_or(0);
            info!(receivers, "feed seeded");
        }

        let rng = match self.inner.config.world.seed {
            Some(world_seed) => SmallRng::seed_from_u64(world_seed),
            None => SmallRng::from_rng(&mut rand::rng()),
        };

        let handle = tokio::spawn(driver::run_driver(
            Arc::clone(&self.inner.store),
            self.inner.tx.clone(),
            Duration::from_millis(self.inner.config.world.tick_interval_ms.max(1)),
            rng,
            Arc::clone(&self.inner.shutdown),
        ));
        *self.lock_driver() = Some(handle);

        info!(
            tick_interval_ms = self.inner.config.world.tick_interval_ms,
            "feed started"
        );
    }

    /// Cancel the drift driver.
    ///
    /// Idempotent, and effective before the driver's next scheduled
    /// tick. The store stays readable and `connected` remains true; no
    /// state is discarded.
    pub fn stop(&self) {
        if !self.inner.running.swap(false, Ordering::AcqRel) {
            return;
        }
        // The stored permit is consumed by the driver's shutdown arm
        // before the timer arm can run again.
        self.inner.shutdown.notify_one();
        if let Some(handle) = self.lock_driver().take() {
            drop(handle);
        }
        info!("feed stopped");
    }

    // -----------------------------------------------------------------------
    // Read interface
    // -----------------------------------------------------------------------

    /// Current traffic light collection, in seed order.
    pub fn traffic_lights(&self) -> Arc<[TrafficLight]> {
        self.inner.store.traffic_lights()
    }

    /// Current incident collection, most recent first.
    pub fn incidents(&self) -> Arc<[Incident]> {
        self.inner.store.incidents()
    }

    /// Whether the initial seed data has loaded. Never transitions back
    /// to `false` on its own.
    pub fn is_connected(&self) -> bool {
        self.inner.store.is_connected()
    }

    /// A consistent snapshot of both collections.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.inner.store.snapshot()
    }

    /// Aggregate statistics over the current snapshot.
    pub fn stats(&self) -> FeedStats {
        let snapshot = self.snapshot();
        FeedStats::compute(&snapshot.lights, &snapshot.incidents)
    }

    // -----------------------------------------------------------------------
    // Change notification
    // -----------------------------------------------------------------------

    /// Subscribe to snapshot broadcasts.
    ///
    /// The receiver yields one [`FeedSnapshot`] per completed write, in
    /// write order. Dropping the receiver unsubscribes. A receiver that
    /// falls behind the channel capacity skips ahead to the newest
    /// snapshot; the stored state itself never skips a write.
    pub fn subscribe(&self) -> broadcast::Receiver<FeedSnapshot> {
        self.inner.tx.subscribe()
    }

    // -----------------------------------------------------------------------
    // Mutation API
    // -----------------------------------------------------------------------

    /// Override the status of one light, leaving every other field and
    /// record unchanged.
    ///
    /// An unknown `id` is a silent no-op: nothing is written and no
    /// notification is sent. The override holds until the next tick
    /// potentially re-rolls the status.
    pub fn update_light_status(&self, id: &LightId, status: LightStatus) {
        match self.inner.store.update_light_status(id, status) {
            Some(snapshot) => {
                let seq = snapshot.seq;
                let receivers = self.inner.tx.send(snapshot).unwrap_or(0);
                debug!(light = %id, ?status, seq, receivers, "light status overridden");
            }
            None => {
                debug!(light = %id, "override targeted unknown light, ignored");
            }
        }
    }

    /// Report a new incident.
    ///
    /// Assigns a fresh id and the current timestamp, prepends the
    /// incident so the most recent is always at index 0, and returns
    /// the created record.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Validation`] when a free-text field of the
    /// draft is empty.
    pub fn add_incident(&self, draft: IncidentDraft) -> Result<Incident, FeedError> {
        draft.validate()?;
        let incident = Incident::from_draft(draft);
        let snapshot = self.inner.store.prepend_incident(incident.clone());
        let seq = snapshot.seq;
        let receivers = self.inner.tx.send(snapshot).unwrap_or(0);
        debug!(incident = %incident.id, seq, receivers, "incident reported");
        Ok(incident)
    }

    fn lock_driver(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.inner
            .driver
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use signalgrid_types::{IncidentKind, Severity, ValidationError};

    use crate::config::WorldConfig;

    use super::*;

    fn idle_config() -> FeedConfig {
        FeedConfig {
            world: WorldConfig {
                name: String::from("test"),
                seed: Some(7),
                // Long enough that no tick interferes with the test body.
                tick_interval_ms: 60_000,
            },
            ..FeedConfig::default()
        }
    }

    #[tokio::test]
    async fn start_is_idempotent() {
        let feed = TrafficFeed::new(idle_config());
        feed.start();
        let seq_after_first = feed.snapshot().seq;
        feed.start();
        assert_eq!(feed.snapshot().seq, seq_after_first, "second start reseeded");
        feed.stop();
    }

    #[tokio::test]
    async fn stop_without_start_is_a_noop() {
        let feed = TrafficFeed::new(idle_config());
        feed.stop();
        feed.stop();
        assert!(!feed.is_connected());
    }

    #[tokio::test]
    async fn restart_keeps_state() {
        let feed = TrafficFeed::new(idle_config());
        feed.start();
        feed.update_light_status(&LightId::from("1"), LightStatus::Red);
        feed.stop();
        feed.start();
        let light = feed
            .traffic_lights()
            .iter()
            .find(|light| light.id.as_str() == "1")
            .cloned()
            .unwrap();
        assert_eq!(light.status, LightStatus::Red, "restart discarded state");
        feed.stop();
    }

    #[tokio::test]
    async fn blank_draft_is_rejected_with_field_name() {
        let feed = TrafficFeed::new(idle_config());
        feed.start();
        let result = feed.add_incident(IncidentDraft::new(
            IncidentKind::Malfunction,
            "  ",
            Severity::Low,
            "x",
        ));
        match result {
            Err(FeedError::Validation {
                source: ValidationError::EmptyField { field },
            }) => assert_eq!(field, "location"),
            other => panic!("expected validation error, got {other:?}"),
        }
        feed.stop();
    }
}
