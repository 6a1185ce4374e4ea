//! Enumeration types for the traffic feed.
//!
//! All variants serialize as lowercase strings to stay wire-compatible
//! with the dashboard views (`"green"`, `"accident"`, `"high"`, ...).

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Signal phase of a traffic light.
///
/// The model enforces no transition order -- any status may follow any
/// other. Both the simulation driver and operator overrides set it freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum LightStatus {
    /// Traffic flows.
    Green,
    /// Phase change imminent.
    Amber,
    /// Traffic stopped.
    Red,
}

/// Category of a reported incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum IncidentKind {
    /// A collision or crash.
    Accident,
    /// Abnormally heavy traffic.
    Congestion,
    /// Equipment failure (signal outage, sensor fault).
    Malfunction,
}

/// Severity of a reported incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum Severity {
    /// Minor disruption.
    Low,
    /// Noticeable disruption.
    Medium,
    /// Major disruption.
    High,
}

/// Derived congestion classification of an intersection.
///
/// Never stored -- always recomputed from the current vehicle count by
/// whichever view needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CongestionLevel {
    /// Fewer than 40 vehicles.
    Low,
    /// 40 to 69 vehicles.
    Medium,
    /// 70 vehicles or more.
    High,
}

impl CongestionLevel {
    /// Classify a vehicle count into a congestion level.
    ///
    /// Thresholds: below 40 is low, below 70 is medium, 70 and above
    /// is high.
    pub const fn from_vehicle_count(count: u32) -> Self {
        if count < 40 {
            Self::Low
        } else if count < 70 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn statuses_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&LightStatus::Green).unwrap(), "\"green\"");
        assert_eq!(serde_json::to_string(&LightStatus::Amber).unwrap(), "\"amber\"");
        assert_eq!(serde_json::to_string(&LightStatus::Red).unwrap(), "\"red\"");
    }

    #[test]
    fn incident_kind_round_trips() {
        for kind in [
            IncidentKind::Accident,
            IncidentKind::Congestion,
            IncidentKind::Malfunction,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            let restored: IncidentKind = serde_json::from_str(&json).unwrap();
            assert_eq!(restored, kind);
        }
    }

    #[test]
    fn congestion_thresholds() {
        assert_eq!(CongestionLevel::from_vehicle_count(0), CongestionLevel::Low);
        assert_eq!(CongestionLevel::from_vehicle_count(39), CongestionLevel::Low);
        assert_eq!(CongestionLevel::from_vehicle_count(40), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::from_vehicle_count(69), CongestionLevel::Medium);
        assert_eq!(CongestionLevel::from_vehicle_count(70), CongestionLevel::High);
        assert_eq!(CongestionLevel::from_vehicle_count(92), CongestionLevel::High);
    }
}
