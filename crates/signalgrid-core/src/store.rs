//! Single source of truth for the feed's collections.
//!
//! The store owns the traffic light and incident collections outright;
//! no other component holds a mutable reference to them. Every write is
//! a whole-collection replace -- writers build a fresh `Vec`, wrap it in
//! a new [`Arc`], and swap it under the writer lock. A snapshot already
//! handed to a consumer keeps its `Arc` and never observes later writes.
//!
//! Writes are serialized by the `RwLock` writer lock, so a reader always
//! sees the result of some prefix of writes in program order -- never a
//! collection half-updated by a simulation tick.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use signalgrid_types::{Incident, LightId, LightStatus, TrafficLight};

/// An immutable view of both collections as of one completed write.
///
/// Cloning is cheap: the collections are shared `Arc` slices. Incidents
/// are ordered most-recent-first.
#[derive(Debug, Clone)]
pub struct FeedSnapshot {
    /// Write sequence number, incremented by every completed write.
    pub seq: u64,
    /// All tracked traffic lights, in seed order.
    pub lights: Arc<[TrafficLight]>,
    /// All reported incidents, most recent at index 0.
    pub incidents: Arc<[Incident]>,
    /// Whether the initial seed data has loaded.
    pub connected: bool,
}

#[derive(Debug)]
struct StoreState {
    seq: u64,
    lights: Arc<[TrafficLight]>,
    incidents: Arc<[Incident]>,
    connected: bool,
}

impl StoreState {
    fn snapshot(&self) -> FeedSnapshot {
        FeedSnapshot {
            seq: self.seq,
            lights: Arc::clone(&self.lights),
            incidents: Arc::clone(&self.incidents),
            connected: self.connected,
        }
    }

    fn bump(&mut self) {
        self.seq = self.seq.saturating_add(1);
    }
}

/// Owner of the canonical traffic light and incident collections.
///
/// The read surface is whole-collection only. The write surface is
/// crate-internal and used exclusively by the drift driver and the
/// mutation operations on [`TrafficFeed`](crate::feed::TrafficFeed).
#[derive(Debug, Default)]
pub struct StateStore {
    inner: RwLock<StoreState>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            seq: 0,
            lights: Vec::new().into(),
            incidents: Vec::new().into(),
            connected: false,
        }
    }
}

impl StateStore {
    /// Create an empty, disconnected store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the current traffic light collection.
    pub fn traffic_lights(&self) -> Arc<[TrafficLight]> {
        Arc::clone(&self.read().lights)
    }

    /// Return the current incident collection, most recent first.
    pub fn incidents(&self) -> Arc<[Incident]> {
        Arc::clone(&self.read().incidents)
    }

    /// Whether the initial seed data has loaded.
    pub fn is_connected(&self) -> bool {
        self.read().connected
    }

    /// Return a consistent snapshot of both collections.
    pub fn snapshot(&self) -> FeedSnapshot {
        self.read().snapshot()
    }

    /// Load the initial collections and mark the store connected.
    pub(crate) fn seed(
        &self,
        lights: Vec<TrafficLight>,
        incidents: Vec<Incident>,
    ) -> FeedSnapshot {
        let mut state = self.write();
        state.lights = lights.into();
        state.incidents = incidents.into();
        state.connected = true;
        state.bump();
        state.snapshot()
    }

    /// Replace the whole traffic light collection with one tick's result.
    pub(crate) fn replace_lights(&self, lights: Vec<TrafficLight>) -> FeedSnapshot {
        let mut state = self.write();
        state.lights = lights.into();
        state.bump();
        state.snapshot()
    }

    /// Replace the status of the light with the given id, leaving every
    /// other field and record unchanged.
    ///
    /// Returns `None` without writing when no light matches -- the
    /// caller treats that as a silent no-op.
    pub(crate) fn update_light_status(
        &self,
        id: &LightId,
        status: LightStatus,
    ) -> Option<FeedSnapshot> {
        let mut state = self.write();
        if !state.lights.iter().any(|light| &light.id == id) {
            return None;
        }
        let next: Vec<TrafficLight> = state
            .lights
            .iter()
            .map(|light| {
                if &light.id == id {
                    let mut updated = light.clone();
                    updated.status = status;
                    updated
                } else {
                    light.clone()
                }
            })
            .collect();
        state.lights = next.into();
        state.bump();
        Some(state.snapshot())
    }

    /// Prepend an incident, keeping prior incidents in their existing
    /// relative order.
    pub(crate) fn prepend_incident(&self, incident: Incident) -> FeedSnapshot {
        let mut state = self.write();
        let next: Vec<Incident> = std::iter::once(incident)
            .chain(state.incidents.iter().cloned())
            .collect();
        state.incidents = next.into();
        state.bump();
        state.snapshot()
    }
}
