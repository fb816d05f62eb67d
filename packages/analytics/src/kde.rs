//! Gaussian kernel density estimation and the risk surface built from it.
//!
//! The estimator uses a fixed 0.01-degree bandwidth and evaluates relative
//! likelihoods on a square grid over the padded protest bounding box. The
//! risk surface scales density by inverse police proximity, so cells far
//! from any station score higher than equally dense cells next to one.

use protest_map_analytics_models::{Hotspot, KdePayload};
use protest_map_geography_models::GeoPoint;
use protest_map_spatial::{EvaluationGrid, proximity_weights};

/// Kernel bandwidth in degrees.
pub const KDE_BANDWIDTH: f64 = 0.01;

/// Percentile of the risk surface above which a cell is a hotspot.
pub const HOTSPOT_PERCENTILE: f64 = 90.0;

/// Offset keeping the inverse-proximity factor finite at weight 0.
const PROXIMITY_OFFSET: f64 = 0.1;

/// Builds the density and risk surfaces over the protest coordinates.
///
/// Returns `None` when fewer than two protest coordinates are available
/// (the estimator has no meaningful fit) or when `grid_size < 2`.
#[must_use]
pub fn density_surface(
    protest_coords: &[GeoPoint],
    police_coords: &[GeoPoint],
    grid_size: usize,
) -> Option<KdePayload> {
    if protest_coords.len() < 2 {
        return None;
    }
    let grid = EvaluationGrid::from_coordinates(protest_coords, grid_size)?;
    let cells = grid.cells();

    let density: Vec<f64> = cells
        .iter()
        .map(|cell| gaussian_density(*cell, protest_coords, KDE_BANDWIDTH))
        .collect();

    let weights = proximity_weights(&cells, police_coords);

    let risk: Vec<f64> = density
        .iter()
        .zip(&weights)
        .map(|(d, w)| d * (1.0 / (w + PROXIMITY_OFFSET)))
        .collect();

    let hotspots = extract_hotspots(&cells, &risk, HOTSPOT_PERCENTILE);

    Some(KdePayload {
        density_grid: grid.reshape(&density),
        risk_surface: grid.reshape(&risk),
        proximity_weights: grid.reshape(&weights),
        grid_bounds: grid.bounds(),
        grid_size: grid.size(),
        hotspots,
    })
}

/// Gaussian kernel density at `point`, averaged over all samples.
///
/// Normalized as a 2-D Gaussian, `1 / (n * 2 * pi * h^2)` per kernel, so
/// values are comparable across sample sizes but do not integrate to 1 over
/// the grid.
#[must_use]
pub fn gaussian_density(point: GeoPoint, samples: &[GeoPoint], bandwidth: f64) -> f64 {
    let two_h_squared = 2.0 * bandwidth * bandwidth;
    let kernel_sum: f64 = samples
        .iter()
        .map(|sample| {
            let dx = point.longitude - sample.longitude;
            let dy = point.latitude - sample.latitude;
            (-(dx * dx + dy * dy) / two_h_squared).exp()
        })
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let normalization = samples.len() as f64 * std::f64::consts::PI * two_h_squared;
    kernel_sum / normalization
}

/// Cells at or above the given percentile of the risk surface.
///
/// Intensity is normalized by the surface maximum, so the strongest cell
/// reports 1.0.
fn extract_hotspots(cells: &[GeoPoint], risk: &[f64], threshold_percentile: f64) -> Vec<Hotspot> {
    let threshold = percentile(risk, threshold_percentile);
    let max_risk = risk.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !max_risk.is_finite() || max_risk <= 0.0 {
        return Vec::new();
    }

    cells
        .iter()
        .zip(risk)
        .filter(|(_, score)| **score >= threshold)
        .map(|(cell, score)| Hotspot {
            longitude: cell.longitude,
            latitude: cell.latitude,
            risk_score: *score,
            intensity: score / max_risk,
        })
        .collect()
}

/// Percentile with linear interpolation between closest ranks.
fn percentile(values: &[f64], percentile: f64) -> f64 {
    assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let rank = percentile / 100.0 * (sorted.len() - 1) as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lower = rank.floor() as usize;
    let fraction = rank - rank.floor();

    if lower + 1 >= sorted.len() {
        return sorted[sorted.len() - 1];
    }
    sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
}
