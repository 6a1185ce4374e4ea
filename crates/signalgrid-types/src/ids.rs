//! Typed identifiers for traffic feed entities.
//!
//! Traffic lights use opaque string identifiers fixed by the seed set --
//! they are stable for the lifetime of the store and never reused.
//! Incidents use UUID v7 (time-ordered) identifiers assigned at creation,
//! so two incidents created within the same tick still get distinct ids.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Opaque, stable identifier for a traffic light.
///
/// Assigned once when the seed set is created and immutable thereafter.
/// The string content carries no meaning; equality is the only operation
/// the feed performs on it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct LightId(String);

impl LightId {
    /// Create a light identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for LightId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LightId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for LightId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier for a reported incident.
///
/// UUID v7 is time-ordered, so ids assigned by [`IncidentId::new`] are
/// monotonically distinguishing even when several incidents are created
/// in the same mutation tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct IncidentId(pub Uuid);

impl IncidentId {
    /// Create a new identifier using UUID v7 (time-ordered).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Return the inner [`Uuid`] value.
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for IncidentId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for IncidentId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for IncidentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<IncidentId> for Uuid {
    fn from(id: IncidentId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn light_id_round_trips_as_plain_string() {
        let id = LightId::from("2");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"2\""));
        let restored: Result<LightId, _> = serde_json::from_str("\"2\"");
        assert_eq!(restored.ok(), Some(id));
    }

    #[test]
    fn incident_ids_are_distinct() {
        let a = IncidentId::new();
        let b = IncidentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn incident_id_display_matches_uuid() {
        let id = IncidentId::new();
        assert_eq!(id.to_string(), id.into_inner().to_string());
    }
}
