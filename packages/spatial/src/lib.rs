#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spatial intensity primitives for the analytics layer.
//!
//! Distances are planar: Euclidean distance in degrees scaled by a fixed
//! 111 km/degree factor, not geodesic. The approximation is only valid near
//! the dataset's reference latitude and is kept deliberately, since the
//! published analysis numbers depend on it.

use protest_map_geography_models::{GeoPoint, GridBounds};
use protest_map_protest_models::ProtestEvent;
use rstar::RTree;

/// Kilometers per degree of great-circle arc, the fixed planar conversion
/// factor used for every distance in the analytics layer.
pub const KM_PER_DEGREE: f64 = 111.0;

/// Margin in degrees added around the protest bounding box when building an
/// evaluation grid.
pub const GRID_MARGIN_DEGREES: f64 = 0.05;

/// Planar distance between two points in kilometers.
#[must_use]
pub fn planar_distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    (a.longitude - b.longitude).hypot(a.latitude - b.latitude) * KM_PER_DEGREE
}

/// Counts protest events within `radius_km` of `center`.
///
/// The radius is inclusive (`distance <= radius_km`). Events without a
/// coordinate are skipped.
#[must_use]
pub fn protest_intensity(center: GeoPoint, events: &[ProtestEvent], radius_km: f64) -> usize {
    events
        .iter()
        .filter_map(|event| event.coordinate)
        .filter(|coordinate| planar_distance_km(center, *coordinate) <= radius_km)
        .count()
}

/// Normalized inverse-distance weights from each grid point to its nearest
/// reference point.
///
/// `weight = 1 - d / d_max` where `d` is the nearest-reference distance in
/// degrees and `d_max` the largest such distance across the grid, so the
/// grid point farthest from any reference gets weight 0 and a grid point on
/// top of a reference gets weight 1.
///
/// With an empty reference set every weight is 1.0, treating each grid point
/// as if a reference were adjacent so downstream risk is not inflated. The
/// same applies when every grid point coincides with a reference.
#[must_use]
pub fn proximity_weights(grid_points: &[GeoPoint], references: &[GeoPoint]) -> Vec<f64> {
    if references.is_empty() {
        return vec![1.0; grid_points.len()];
    }

    let tree = RTree::bulk_load(
        references
            .iter()
            .map(|r| [r.longitude, r.latitude])
            .collect(),
    );

    let min_distances: Vec<f64> = grid_points
        .iter()
        .map(|point| {
            let query = [point.longitude, point.latitude];
            tree.nearest_neighbor(&query).map_or(0.0, |nearest| {
                (query[0] - nearest[0]).hypot(query[1] - nearest[1])
            })
        })
        .collect();

    let max_distance = min_distances.iter().copied().fold(0.0f64, f64::max);
    if max_distance <= 0.0 {
        return vec![1.0; grid_points.len()];
    }

    min_distances
        .iter()
        .map(|d| 1.0 - d / max_distance)
        .collect()
}

/// A square evaluation grid covering the padded bounding box of a set of
/// coordinates.
///
/// Cells are enumerated row-major with latitude as the row axis, so a flat
/// per-cell vector reshapes into `size` rows of `size` longitudes each.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationGrid {
    xs: Vec<f64>,
    ys: Vec<f64>,
    bounds: GridBounds,
}

impl EvaluationGrid {
    /// Builds a `size`x`size` grid spanning the bounding box of
    /// `coordinates` expanded by [`GRID_MARGIN_DEGREES`] on every side.
    ///
    /// Returns `None` when `coordinates` is empty or `size < 2` (a single
    /// axis point has no well-defined spacing).
    #[must_use]
    pub fn from_coordinates(coordinates: &[GeoPoint], size: usize) -> Option<Self> {
        if coordinates.is_empty() || size < 2 {
            return None;
        }

        let mut x_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_min = f64::INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for point in coordinates {
            x_min = x_min.min(point.longitude);
            x_max = x_max.max(point.longitude);
            y_min = y_min.min(point.latitude);
            y_max = y_max.max(point.latitude);
        }

        let bounds = GridBounds {
            x_min: x_min - GRID_MARGIN_DEGREES,
            x_max: x_max + GRID_MARGIN_DEGREES,
            y_min: y_min - GRID_MARGIN_DEGREES,
            y_max: y_max + GRID_MARGIN_DEGREES,
        };

        Some(Self {
            xs: linspace(bounds.x_min, bounds.x_max, size),
            ys: linspace(bounds.y_min, bounds.y_max, size),
            bounds,
        })
    }

    /// Number of points along each axis.
    #[must_use]
    pub fn size(&self) -> usize {
        self.xs.len()
    }

    /// Geographic bounds of the grid.
    #[must_use]
    pub const fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// All grid cells in row-major order, latitude rows first.
    #[must_use]
    pub fn cells(&self) -> Vec<GeoPoint> {
        self.ys
            .iter()
            .flat_map(|y| self.xs.iter().map(|x| GeoPoint::new(*x, *y)))
            .collect()
    }

    /// Reshapes a flat per-cell vector into latitude-row nested vectors.
    ///
    /// # Panics
    ///
    /// Panics if `flat` does not hold exactly `size * size` values.
    #[must_use]
    pub fn reshape(&self, flat: &[f64]) -> Vec<Vec<f64>> {
        assert_eq!(flat.len(), self.size() * self.size());
        flat.chunks(self.size()).map(<[f64]>::to_vec).collect()
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    debug_assert!(count >= 2);
    #[allow(clippy::cast_precision_loss)]
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let offset = step * i as f64;
            start + offset
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(id: i64, coordinate: Option<GeoPoint>) -> ProtestEvent {
        ProtestEvent {
            id,
            event_date: None,
            coordinate,
            fatalities: None,
        }
    }

    #[test]
    fn planar_distance_one_degree_is_111_km() {
        let a = GeoPoint::new(36.8, -1.3);
        let b = GeoPoint::new(37.8, -1.3);
        assert!((planar_distance_km(a, b) - 111.0).abs() < 1e-9);
    }

    #[test]
    fn intensity_radius_is_inclusive() {
        let center = GeoPoint::new(36.8, -1.3);
        let events = vec![event(1, Some(GeoPoint::new(37.8, -1.3)))];

        // One degree away is exactly 111 km.
        assert_eq!(protest_intensity(center, &events, 1.0), 0);
        assert_eq!(protest_intensity(center, &events, 111.0), 1);
    }

    #[test]
    fn intensity_skips_events_without_coordinates() {
        let center = GeoPoint::new(36.8, -1.3);
        let events = vec![
            event(1, None),
            event(2, Some(center)),
            event(3, Some(GeoPoint::new(36.81, -1.31))),
        ];
        assert_eq!(protest_intensity(center, &events, 5.0), 2);
        assert_eq!(protest_intensity(center, &[], 5.0), 0);
    }

    #[test]
    fn proximity_weights_empty_references_are_all_one() {
        let grid = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert_eq!(proximity_weights(&grid, &[]), vec![1.0, 1.0]);
    }

    #[test]
    fn proximity_weights_span_zero_to_one() {
        let grid = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.5, 0.0),
            GeoPoint::new(1.0, 0.0),
        ];
        let references = vec![GeoPoint::new(0.0, 0.0)];

        let weights = proximity_weights(&grid, &references);
        assert!((weights[0] - 1.0).abs() < 1e-9);
        assert!((weights[1] - 0.5).abs() < 1e-9);
        assert!(weights[2].abs() < 1e-9);
    }

    #[test]
    fn proximity_weights_use_nearest_reference() {
        let grid = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(10.0, 0.0)];
        let references = vec![GeoPoint::new(0.1, 0.0), GeoPoint::new(9.0, 0.0)];

        let weights = proximity_weights(&grid, &references);
        // Farthest grid point is 1 degree from its nearest station, the
        // other is 0.1 degrees: weights 0 and 0.9.
        assert!(weights[0] > weights[1]);
        assert!((weights[0] - 0.9).abs() < 1e-9);
        assert!(weights[1].abs() < 1e-9);
    }

    #[test]
    fn grid_requires_two_points_per_axis() {
        let coords = vec![GeoPoint::new(36.8, -1.3)];
        assert!(EvaluationGrid::from_coordinates(&coords, 1).is_none());
        assert!(EvaluationGrid::from_coordinates(&[], 50).is_none());
        assert!(EvaluationGrid::from_coordinates(&coords, 2).is_some());
    }

    #[test]
    fn grid_bounds_include_margin() {
        let coords = vec![GeoPoint::new(36.0, -2.0), GeoPoint::new(37.0, -1.0)];
        let grid = EvaluationGrid::from_coordinates(&coords, 10).unwrap();

        let bounds = grid.bounds();
        assert!((bounds.x_min - 35.95).abs() < 1e-9);
        assert!((bounds.x_max - 37.05).abs() < 1e-9);
        assert!((bounds.y_min - -2.05).abs() < 1e-9);
        assert!((bounds.y_max - -0.95).abs() < 1e-9);
    }

    #[test]
    fn grid_cells_are_latitude_rows_of_longitudes() {
        let coords = vec![GeoPoint::new(0.05, 0.05), GeoPoint::new(0.95, 0.95)];
        let grid = EvaluationGrid::from_coordinates(&coords, 2).unwrap();

        let cells = grid.cells();
        assert_eq!(cells.len(), 4);
        // Row-major: both longitudes of the southern row come first.
        assert!((cells[0].longitude - 0.0).abs() < 1e-9);
        assert!((cells[0].latitude - 0.0).abs() < 1e-9);
        assert!((cells[1].longitude - 1.0).abs() < 1e-9);
        assert!((cells[1].latitude - 0.0).abs() < 1e-9);
        assert!((cells[2].latitude - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reshape_recovers_rows() {
        let coords = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        let grid = EvaluationGrid::from_coordinates(&coords, 2).unwrap();

        let rows = grid.reshape(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn linspace_endpoints_are_exact() {
        let values = linspace(-1.0, 1.0, 5);
        assert_eq!(values.len(), 5);
        assert!((values[0] - -1.0).abs() < 1e-12);
        assert!((values[2]).abs() < 1e-12);
        assert!((values[4] - 1.0).abs() < 1e-12);
    }
}
