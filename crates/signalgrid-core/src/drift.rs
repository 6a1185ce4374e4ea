//! Per-tick drift of traffic conditions.
//!
//! Emulates sensor-like movement without any external feed: each tick,
//! every light's vehicle count takes a bounded random step floored at
//! [`VEHICLE_FLOOR`], and with probability [`STATUS_CHURN_PROBABILITY`]
//! its status is re-rolled uniformly over the three phases (a re-roll
//! may land on the current phase, which reads as no visible change).
//!
//! The random source is injected so the same seed always produces the
//! same drift sequence.

use rand::Rng;

use signalgrid_types::{LightStatus, TrafficLight};

/// Minimum vehicle count ever reported for an intersection.
pub const VEHICLE_FLOOR: u32 = 10;

/// Smallest per-tick change in vehicle count.
pub const VEHICLE_DELTA_MIN: i64 = -5;

/// Largest per-tick change in vehicle count.
pub const VEHICLE_DELTA_MAX: i64 = 4;

/// Probability that a light's status is re-rolled on a tick.
pub const STATUS_CHURN_PROBABILITY: f64 = 0.2;

/// Recompute the whole collection for one tick.
///
/// Deltas and status rolls are drawn independently per light. `id`,
/// `location`, `lat`, and `lng` are carried over unchanged. The caller
/// writes the returned collection back as one atomic replace.
pub fn drift_lights(lights: &[TrafficLight], rng: &mut impl Rng) -> Vec<TrafficLight> {
    lights.iter().map(|light| drift_light(light, rng)).collect()
}

fn drift_light(light: &TrafficLight, rng: &mut impl Rng) -> TrafficLight {
    let delta = rng.random_range(VEHICLE_DELTA_MIN..=VEHICLE_DELTA_MAX);
    let stepped = i64::from(light.vehicle_count)
        .saturating_add(delta)
        .max(i64::from(VEHICLE_FLOOR));
    let vehicle_count = u32::try_from(stepped).unwrap_or(u32::MAX);

    let status = if rng.random_bool(STATUS_CHURN_PROBABILITY) {
        random_status(rng)
    } else {
        light.status
    };

    TrafficLight {
        status,
        vehicle_count,
        ..light.clone()
    }
}

fn random_status(rng: &mut impl Rng) -> LightStatus {
    match rng.random_range(0_u8..3) {
        0 => LightStatus::Green,
        1 => LightStatus::Amber,
        _ => LightStatus::Red,
    }
}
