//! Shared type definitions for the signalgrid traffic feed.
//!
//! This crate is the single source of truth for the entity model shared
//! by the feed core and the dashboard views. Types defined here flow
//! downstream to `TypeScript` via `ts-rs`.
//!
//! # Modules
//!
//! - [`ids`] -- Typed identifiers for lights and incidents
//! - [`enums`] -- Signal status, incident category, severity, congestion
//! - [`structs`] -- Entity structs, drafts, validation, derived stats

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{CongestionLevel, IncidentKind, LightStatus, Severity};
pub use ids::{IncidentId, LightId};
pub use structs::{FeedStats, Incident, IncidentDraft, TrafficLight, ValidationError};

#[cfg(test)]
mod tests {
    //! Integration tests for type exports and `TypeScript` binding generation.

    #[test]
    fn export_bindings() {
        // ts-rs generates TypeScript bindings when types with
        // #[ts(export)] are used. Importing them here triggers generation.
        // The actual files are written to the `bindings/` directory
        // relative to the crate root.
        use ts_rs::TS;

        // IDs
        let _ = crate::ids::LightId::export_all();
        let _ = crate::ids::IncidentId::export_all();

        // Enums
        let _ = crate::enums::LightStatus::export_all();
        let _ = crate::enums::IncidentKind::export_all();
        let _ = crate::enums::Severity::export_all();
        let _ = crate::enums::CongestionLevel::export_all();

        // Structs
        let _ = crate::structs::TrafficLight::export_all();
        let _ = crate::structs::Incident::export_all();
        let _ = crate::structs::IncidentDraft::export_all();
        let _ = crate::structs::FeedStats::export_all();
    }
}
