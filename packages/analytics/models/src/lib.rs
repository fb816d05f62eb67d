#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the spatial analytics engine.
//!
//! These types are serialized to JSON for the REST API. Field names stay
//! snake_case because the frontend consumes the long-standing contract
//! (`p_value`, `density_grid`, `correlation_data`, ...) verbatim.

use protest_map_geography_models::GridBounds;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

/// One ward's contribution to the correlation sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    /// Protest events within the sampling radius of the ward centroid.
    pub protest_intensity: usize,
    /// Value of the requested socioeconomic metric.
    pub socioeconomic_value: f64,
    /// Human-readable ward label ("ward, subcounty, county").
    pub ward: String,
    /// Ward record id.
    pub ward_id: i64,
    /// Composite risk assessment label for the ward.
    pub risk_assessment: String,
}

/// Pearson correlation between ward protest intensity and a socioeconomic
/// metric, with the per-ward sample for client-side inspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationSummary {
    /// Correlation coefficient in [-1, 1]; 0 when it cannot be computed.
    pub correlation: f64,
    /// Two-tailed p-value in [0, 1]; 1 when it cannot be computed.
    pub p_value: f64,
    /// Per-ward sample points.
    pub data: Vec<CorrelationPoint>,
    /// Number of sample points.
    pub sample_size: usize,
}

/// A high-risk grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Cell longitude.
    pub longitude: f64,
    /// Cell latitude.
    pub latitude: f64,
    /// Raw risk surface value at the cell.
    pub risk_score: f64,
    /// Risk normalized by the surface maximum, in [0, 1].
    pub intensity: f64,
}

/// Density estimation output over the evaluation grid.
///
/// The nested vectors are latitude rows of longitude columns, matching the
/// grid enumeration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdePayload {
    /// Estimated protest density per grid cell.
    pub density_grid: Vec<Vec<f64>>,
    /// Density combined with inverse police proximity.
    pub risk_surface: Vec<Vec<f64>>,
    /// Normalized proximity weight per grid cell.
    pub proximity_weights: Vec<Vec<f64>>,
    /// Geographic extent of the grid.
    pub grid_bounds: GridBounds,
    /// Points per grid axis.
    pub grid_size: usize,
    /// Cells at or above the hotspot percentile.
    pub hotspots: Vec<Hotspot>,
}

/// Merged output of one spatial analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialAnalysisResult {
    /// Correlation coefficient.
    pub correlation: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
    /// Per-ward correlation sample.
    pub correlation_data: Vec<CorrelationPoint>,
    /// Density surface, when requested and computable.
    pub kde_data: Option<KdePayload>,
    /// Correlation sample size.
    pub sample_size: usize,
}

/// Descriptive statistics for one ward numeric field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Arithmetic mean.
    pub mean: f64,
    /// Median (linear interpolation between the middle values).
    pub median: f64,
    /// Population standard deviation.
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Number of non-null values.
    pub count: usize,
}

/// Label -> count distribution serialized as a JSON object with the bucket
/// order preserved.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategoryDistribution(pub Vec<(String, u64)>);

impl Serialize for CategoryDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl CategoryDistribution {
    /// Count recorded for a label, if the bucket exists.
    #[must_use]
    pub fn count(&self, label: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(bucket, _)| bucket == label)
            .map(|(_, count)| *count)
    }
}

/// Statistical summary of the ward dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WardStatistics {
    /// Wards with boundary geometry (the statistics population).
    pub total_wards: usize,
    /// Poverty rate statistics.
    pub poverty_stats: Option<FieldStats>,
    /// Youth unemployment statistics.
    pub unemployment_stats: Option<FieldStats>,
    /// Population density statistics.
    pub population_stats: Option<FieldStats>,
    /// Average education statistics.
    pub education_stats: Option<FieldStats>,
    /// Slum housing statistics.
    pub slum_housing_stats: Option<FieldStats>,
    /// Protest density index statistics.
    pub protest_density_stats: Option<FieldStats>,
    /// Ward counts per risk assessment label.
    pub risk_distribution: CategoryDistribution,
    /// Ward counts per protest density level.
    pub protest_density_distribution: CategoryDistribution,
}
