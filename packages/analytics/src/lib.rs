#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial analytics engine.
//!
//! One analysis request runs the correlation analyzer and, when asked, the
//! density surface builder against the same snapshot of ward, protest, and
//! police records, then merges both results. All computation is synchronous
//! and pure over the inputs; per-record anomalies are filtered out locally
//! and never abort an analysis.

pub mod correlation;
pub mod kde;
pub mod statistics;

use protest_map_analytics_models::SpatialAnalysisResult;
use protest_map_geography_models::{SocioeconomicMetric, Ward};
use protest_map_protest_models::{PoliceStation, ProtestEvent};
use thiserror::Error;

pub use correlation::{CorrelationOptions, correlate};
pub use kde::density_surface;
pub use statistics::ward_statistics;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The requested grid resolution cannot form a grid.
    #[error("Invalid grid size {size}: need at least 2 points per axis")]
    InvalidGridSize {
        /// The rejected resolution.
        size: usize,
    },
}

/// Parameters of one spatial analysis request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialAnalysisRequest {
    /// Metric to correlate against protest intensity.
    pub metric: SocioeconomicMetric,
    /// Whether to also build the density surface.
    pub include_kde: bool,
    /// Evaluation grid resolution.
    pub grid_size: usize,
    /// Correlation sampling knobs.
    pub correlation: CorrelationOptions,
}

impl Default for SpatialAnalysisRequest {
    fn default() -> Self {
        Self {
            metric: SocioeconomicMetric::PovertyRate,
            include_kde: false,
            grid_size: 50,
            correlation: CorrelationOptions::default(),
        }
    }
}

/// Runs the correlation analysis and, when requested, the density surface,
/// merging both into one result.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidGridSize`] when `grid_size < 2`. Too
/// few protest coordinates is not an error; the surface is omitted.
pub fn spatial_analysis(
    wards: &[Ward],
    protests: &[ProtestEvent],
    police_stations: &[PoliceStation],
    request: &SpatialAnalysisRequest,
) -> Result<SpatialAnalysisResult, AnalyticsError> {
    if request.grid_size < 2 {
        return Err(AnalyticsError::InvalidGridSize {
            size: request.grid_size,
        });
    }

    let kde_data = if request.include_kde {
        let protest_coords: Vec<_> = protests.iter().filter_map(|p| p.coordinate).collect();
        let police_coords: Vec<_> = police_stations
            .iter()
            .filter_map(|s| s.coordinate)
            .collect();
        let surface = density_surface(&protest_coords, &police_coords, request.grid_size);
        if surface.is_none() {
            log::debug!(
                "Density surface skipped: {} protest coordinates",
                protest_coords.len()
            );
        }
        surface
    } else {
        None
    };

    let summary = correlate(wards, protests, request.metric, &request.correlation);

    Ok(SpatialAnalysisResult {
        correlation: summary.correlation,
        p_value: summary.p_value,
        correlation_data: summary.data,
        kde_data,
        sample_size: summary.sample_size,
    })
}
