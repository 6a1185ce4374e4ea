//! Fixed seed data loaded when the feed starts.
//!
//! Five signalized intersections in the Nairobi CBD and two open
//! incident reports. Lights are created exactly once here and never
//! added or removed afterwards; only their status and vehicle count
//! drift.

use chrono::TimeDelta;

use signalgrid_types::{
    Incident, IncidentDraft, IncidentKind, LightStatus, Severity, TrafficLight,
};

/// The five seed intersections, in display order.
pub fn seed_traffic_lights() -> Vec<TrafficLight> {
    vec![
        TrafficLight::new(
            "1",
            "Uhuru Highway & Kenyatta Ave",
            -1.2864,
            36.8172,
            LightStatus::Green,
            45,
        ),
        TrafficLight::new(
            "2",
            "Moi Avenue & Haile Selassie",
            -1.2832,
            36.8219,
            LightStatus::Red,
            78,
        ),
        TrafficLight::new(
            "3",
            "Ngong Road & Kilimani",
            -1.2956,
            36.7828,
            LightStatus::Amber,
            56,
        ),
        TrafficLight::new(
            "4",
            "Thika Road & Outer Ring",
            -1.2571,
            36.8868,
            LightStatus::Green,
            34,
        ),
        TrafficLight::new(
            "5",
            "Waiyaki Way & Westlands",
            -1.2635,
            36.8055,
            LightStatus::Red,
            92,
        ),
    ]
}

/// The two seed incidents, most recent first.
pub fn seed_incidents() -> Vec<Incident> {
    let accident = Incident::from_draft(IncidentDraft::new(
        IncidentKind::Accident,
        "Mombasa Road",
        Severity::High,
        "Multi-vehicle collision blocking two lanes",
    ));

    let mut congestion = Incident::from_draft(IncidentDraft::new(
        IncidentKind::Congestion,
        "Ngong Road",
        Severity::Medium,
        "Heavy traffic during peak hours",
    ));
    // The congestion report predates feed start by five minutes.
    congestion.timestamp = congestion
        .timestamp
        .checked_sub_signed(TimeDelta::minutes(5))
        .unwrap_or(congestion.timestamp);

    vec![accident, congestion]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn five_lights_with_distinct_ids() {
        let lights = seed_traffic_lights();
        assert_eq!(lights.len(), 5);
        let ids: BTreeSet<&str> = lights.iter().map(|light| light.id.as_str()).collect();
        assert_eq!(ids.len(), 5);
        assert!(lights.iter().all(|light| light.vehicle_count >= 10));
    }

    #[test]
    fn seed_incidents_are_most_recent_first() {
        let incidents = seed_incidents();
        assert_eq!(incidents.len(), 2);
        assert_eq!(incidents[0].kind, IncidentKind::Accident);
        assert_eq!(incidents[1].kind, IncidentKind::Congestion);
        assert!(incidents[0].timestamp > incidents[1].timestamp);
        assert_ne!(incidents[0].id, incidents[1].id);
    }
}
