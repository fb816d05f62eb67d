#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Protest event and reference infrastructure record types.
//!
//! Events carry an optional coordinate; records without one are kept for
//! listing but excluded from every spatial computation. Severity is derived
//! from the fatality count with fixed thresholds.

use chrono::NaiveDate;
use protest_map_geography_models::GeoPoint;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity level of a protest event, derived from its fatality count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
    EnumString, AsRefStr,
)]
pub enum ProtestSeverity {
    /// No recorded fatalities.
    Low,
    /// One or two fatalities.
    Medium,
    /// Three to five fatalities.
    High,
    /// More than five fatalities.
    Critical,
}

impl ProtestSeverity {
    /// Derives the severity level from a fatality count.
    #[must_use]
    pub const fn from_fatalities(fatalities: Option<u32>) -> Self {
        match fatalities {
            None | Some(0) => Self::Low,
            Some(1..=2) => Self::Medium,
            Some(3..=5) => Self::High,
            Some(_) => Self::Critical,
        }
    }
}

/// A single protest event record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtestEvent {
    /// Record id from the source dataset.
    pub id: i64,
    /// Date the event occurred.
    pub event_date: Option<NaiveDate>,
    /// Event location; absent coordinates exclude the event from spatial
    /// computations.
    pub coordinate: Option<GeoPoint>,
    /// Number of fatalities recorded for the event.
    pub fatalities: Option<u32>,
}

impl ProtestEvent {
    /// Severity level derived from the fatality count.
    #[must_use]
    pub const fn severity(&self) -> ProtestSeverity {
        ProtestSeverity::from_fatalities(self.fatalities)
    }

    /// Whether the event resulted in at least one fatality.
    #[must_use]
    pub const fn has_fatalities(&self) -> bool {
        matches!(self.fatalities, Some(n) if n > 0)
    }
}

/// A police station reference point.
#[derive(Debug, Clone, PartialEq)]
pub struct PoliceStation {
    /// Record id from the source dataset.
    pub id: i64,
    /// Station name.
    pub name: Option<String>,
    /// Station location.
    pub coordinate: Option<GeoPoint>,
}

/// A hospital reference point. Listing passthrough only; the analytics core
/// does not consume hospitals.
#[derive(Debug, Clone, PartialEq)]
pub struct Hospital {
    /// Record id from the source dataset.
    pub id: i64,
    /// Hospital name.
    pub name: Option<String>,
    /// OSM amenity tag.
    pub amenity: Option<String>,
    /// Hospital location.
    pub coordinate: Option<GeoPoint>,
}

/// A road record. Listing passthrough only; the geometry is echoed back
/// as-is rather than parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    /// Record id from the source dataset.
    pub id: i64,
    /// Road name.
    pub name: Option<String>,
    /// OSM highway classification.
    pub highway: Option<String>,
    /// Lane count, as tagged upstream.
    pub lanes: Option<String>,
    /// Road geometry (usually a LineString).
    pub geometry: Option<geojson::Geometry>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(fatalities: Option<u32>) -> ProtestEvent {
        ProtestEvent {
            id: 1,
            event_date: None,
            coordinate: None,
            fatalities,
        }
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(event(None).severity(), ProtestSeverity::Low);
        assert_eq!(event(Some(0)).severity(), ProtestSeverity::Low);
        assert_eq!(event(Some(1)).severity(), ProtestSeverity::Medium);
        assert_eq!(event(Some(2)).severity(), ProtestSeverity::Medium);
        assert_eq!(event(Some(3)).severity(), ProtestSeverity::High);
        assert_eq!(event(Some(5)).severity(), ProtestSeverity::High);
        assert_eq!(event(Some(6)).severity(), ProtestSeverity::Critical);
    }

    #[test]
    fn has_fatalities_requires_positive_count() {
        assert!(!event(None).has_fatalities());
        assert!(!event(Some(0)).has_fatalities());
        assert!(event(Some(1)).has_fatalities());
    }
}
