#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the protest map server.
//!
//! These wrap the analytics result types with the `success`-flag envelope
//! the frontend consumes. Field names are snake_case throughout; the
//! contract predates this server and is kept verbatim.

use chrono::{DateTime, Utc};
use protest_map_analytics_models::{SpatialAnalysisResult, WardStatistics};
use protest_map_geography_models::SocioeconomicMetric;
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Serialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// Query parameters for the spatial analysis endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SpatialAnalysisParams {
    /// Metric name; defaults to `poverty_rate`.
    pub metric: Option<String>,
    /// `"true"` (case-insensitive) enables the density surface; anything
    /// else, or absence, disables it.
    pub include_kde: Option<String>,
    /// Evaluation grid resolution; defaults to 50.
    pub grid_size: Option<usize>,
}

impl SpatialAnalysisParams {
    /// Whether the density surface was requested.
    #[must_use]
    pub fn wants_kde(&self) -> bool {
        self.include_kde
            .as_deref()
            .is_some_and(|raw| raw.eq_ignore_ascii_case("true"))
    }
}

/// Successful spatial analysis response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiSpatialAnalysis {
    /// Always `true` for this envelope.
    pub success: bool,
    /// Correlation and optional density surface payload, flattened into
    /// the envelope.
    #[serde(flatten)]
    pub analysis: SpatialAnalysisResult,
    /// Echo of the analyzed metric.
    pub metric: SocioeconomicMetric,
}

/// Successful ward statistics response.
#[derive(Debug, Clone, Serialize)]
pub struct ApiWardStatistics {
    /// Always `true` for this envelope.
    pub success: bool,
    /// The statistics payload.
    pub statistics: WardStatistics,
    /// Server time the statistics were computed.
    pub timestamp: DateTime<Utc>,
}

/// Failure envelope for any endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Always `false` for this envelope.
    pub success: bool,
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// Builds a failure envelope from any displayable error.
    #[must_use]
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            error: error.to_string(),
        }
    }
}
