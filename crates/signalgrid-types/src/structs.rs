//! Core entity structs for the traffic feed.
//!
//! [`TrafficLight`] and [`Incident`] are the two independent collections
//! the state store owns. No referential integrity links an incident's
//! free-text `location` to a light's `location`; views match them by
//! best-effort substring search only.
//!
//! Field names serialize in camelCase (`vehicleCount`) and the incident
//! category serializes under the `type` key, matching the payloads the
//! dashboard views consume.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{IncidentKind, LightStatus, Severity};
use crate::ids::{IncidentId, LightId};

/// Validation failure for caller-supplied entity fields.
///
/// Names the offending field rather than silently coercing it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required free-text field was empty or whitespace-only.
    #[error("field `{field}` must not be empty")]
    EmptyField {
        /// Name of the rejected field.
        field: &'static str,
    },
}

/// A signalized intersection tracked by the feed.
///
/// `id`, `location`, `lat`, and `lng` are fixed at creation and never
/// mutate. Only `status` and `vehicle_count` change, via the simulation
/// driver's drift or an operator override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TrafficLight {
    /// Stable identifier, unique for the store's lifetime.
    pub id: LightId,
    /// Human-readable intersection name. Display only, not a key.
    pub location: String,
    /// Current signal phase.
    pub status: LightStatus,
    /// Vehicles currently observed at the intersection.
    pub vehicle_count: u32,
    /// Latitude, fixed at creation.
    pub lat: f64,
    /// Longitude, fixed at creation.
    pub lng: f64,
}

impl TrafficLight {
    /// Create a traffic light record.
    ///
    /// `vehicle_count` is unsigned, so negative counts are
    /// unrepresentable. The >= 10 floor applies to simulation updates,
    /// not construction.
    pub fn new(
        id: impl Into<LightId>,
        location: impl Into<String>,
        lat: f64,
        lng: f64,
        status: LightStatus,
        vehicle_count: u32,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            status,
            vehicle_count,
            lat,
            lng,
        }
    }
}

/// A reported traffic incident.
///
/// Immutable once created. The feed only ever prepends incidents; it
/// never edits or removes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Incident {
    /// Identifier assigned at creation, never supplied by callers.
    pub id: IncidentId,
    /// Incident category.
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    /// Free-text location description. Not a foreign key.
    pub location: String,
    /// How disruptive the incident is.
    pub severity: Severity,
    /// Creation time, assigned by the feed, immutable.
    pub timestamp: DateTime<Utc>,
    /// Free-text description.
    pub description: String,
}

impl Incident {
    /// Build an incident from a draft, assigning a fresh id and the
    /// current timestamp.
    ///
    /// This is the only way an incident comes into existence; callers
    /// never supply `id` or `timestamp`.
    pub fn from_draft(draft: IncidentDraft) -> Self {
        Self {
            id: IncidentId::new(),
            kind: draft.kind,
            location: draft.location,
            severity: draft.severity,
            timestamp: Utc::now(),
            description: draft.description,
        }
    }
}

/// Caller-supplied incident fields, before the feed assigns identity.
///
/// Mirrors the submission payload of the operator view: everything an
/// [`Incident`] carries except `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct IncidentDraft {
    /// Incident category.
    #[serde(rename = "type")]
    pub kind: IncidentKind,
    /// Free-text location description.
    pub location: String,
    /// How disruptive the incident is.
    pub severity: Severity,
    /// Free-text description.
    pub description: String,
}

impl IncidentDraft {
    /// Create a draft from its four caller-supplied fields.
    pub fn new(
        kind: IncidentKind,
        location: impl Into<String>,
        severity: Severity,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            location: location.into(),
            severity,
            description: description.into(),
        }
    }

    /// Check the free-text fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyField`] naming the first empty or
    /// whitespace-only field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.location.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "location" });
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyField {
                field: "description",
            });
        }
        Ok(())
    }
}

/// Aggregate statistics derived from one feed snapshot.
///
/// Recomputed per snapshot by [`compute`](Self::compute); nothing here is
/// stored by the feed. These are the figures the dashboard header cards
/// display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct FeedStats {
    /// Number of tracked signals.
    pub signal_total: u32,
    /// Signals currently showing green.
    pub signals_green: u32,
    /// Sum of vehicle counts across all signals.
    pub vehicles_total: u64,
    /// Mean vehicle count per signal. Zero when there are no signals.
    #[ts(as = "String")]
    pub vehicles_average: Decimal,
    /// Number of reported incidents.
    pub incident_total: u32,
    /// Reported incidents with high severity.
    pub incidents_high_severity: u32,
}

impl FeedStats {
    /// Compute statistics over the given collections.
    #[allow(clippy::cast_possible_truncation)]
    pub fn compute(lights: &[TrafficLight], incidents: &[Incident]) -> Self {
        let signal_total = lights.len() as u32;
        let signals_green = lights
            .iter()
            .filter(|light| light.status == LightStatus::Green)
            .count() as u32;
        let vehicles_total = lights
            .iter()
            .fold(0_u64, |sum, light| sum.saturating_add(u64::from(light.vehicle_count)));

        #[allow(clippy::arithmetic_side_effects)]
        let vehicles_average = if lights.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(vehicles_total) / Decimal::from(signal_total)
        };

        let incident_total = incidents.len() as u32;
        let incidents_high_severity = incidents
            .iter()
            .filter(|incident| incident.severity == Severity::High)
            .count() as u32;

        Self {
            signal_total,
            signals_green,
            vehicles_total,
            vehicles_average,
            incident_total,
            incidents_high_severity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::enums::{IncidentKind, LightStatus, Severity};

    fn sample_light() -> TrafficLight {
        TrafficLight::new(
            "1",
            "Uhuru Highway & Kenyatta Ave",
            -1.2864,
            36.8172,
            LightStatus::Green,
            45,
        )
    }

    #[test]
    fn traffic_light_serializes_camel_case() {
        let json = serde_json::to_value(sample_light()).unwrap();
        assert_eq!(json.get("vehicleCount").and_then(serde_json::Value::as_u64), Some(45));
        assert_eq!(
            json.get("status").and_then(serde_json::Value::as_str),
            Some("green")
        );
    }

    #[test]
    fn incident_kind_serializes_under_type_key() {
        let draft = IncidentDraft::new(
            IncidentKind::Malfunction,
            "Test Rd",
            Severity::Low,
            "signal stuck on red",
        );
        let incident = Incident::from_draft(draft);
        let json = serde_json::to_value(&incident).unwrap();
        assert_eq!(
            json.get("type").and_then(serde_json::Value::as_str),
            Some("malfunction")
        );
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn from_draft_assigns_identity() {
        let draft = IncidentDraft::new(
            IncidentKind::Accident,
            "Mombasa Road",
            Severity::High,
            "multi-vehicle collision",
        );
        let before = Utc::now();
        let a = Incident::from_draft(draft.clone());
        let b = Incident::from_draft(draft);
        assert_ne!(a.id, b.id);
        assert!(a.timestamp >= before);
    }

    #[test]
    fn draft_rejects_blank_location() {
        let draft = IncidentDraft::new(IncidentKind::Congestion, "   ", Severity::Medium, "x");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::EmptyField { field: "location" })
        );
    }

    #[test]
    fn draft_rejects_empty_description() {
        let draft = IncidentDraft::new(IncidentKind::Congestion, "Ngong Road", Severity::Medium, "");
        assert_eq!(
            draft.validate(),
            Err(ValidationError::EmptyField {
                field: "description"
            })
        );
    }

    #[test]
    fn stats_over_empty_collections_are_zero() {
        let stats = FeedStats::compute(&[], &[]);
        assert_eq!(stats.signal_total, 0);
        assert_eq!(stats.vehicles_average, Decimal::ZERO);
    }

    #[test]
    fn stats_count_green_signals_and_vehicles() {
        let mut red = sample_light();
        red.id = LightId::from("2");
        red.status = LightStatus::Red;
        red.vehicle_count = 55;
        let lights = vec![sample_light(), red];

        let incident = Incident::from_draft(IncidentDraft::new(
            IncidentKind::Accident,
            "Mombasa Road",
            Severity::High,
            "collision",
        ));

        let stats = FeedStats::compute(&lights, std::slice::from_ref(&incident));
        assert_eq!(stats.signal_total, 2);
        assert_eq!(stats.signals_green, 1);
        assert_eq!(stats.vehicles_total, 100);
        assert_eq!(stats.vehicles_average, Decimal::from(50));
        assert_eq!(stats.incident_total, 1);
        assert_eq!(stats.incidents_high_severity, 1);
    }
}
