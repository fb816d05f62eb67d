//! Descriptive statistics over the ward dataset.
//!
//! The statistics population is the set of wards with boundary geometry,
//! matching the sample the correlation analysis draws from. Field values of
//! exactly zero are real observations here; only nulls are filtered.

use protest_map_analytics_models::{CategoryDistribution, FieldStats, WardStatistics};
use protest_map_geography_models::{ProtestDensityLevel, RiskLevel, Ward, WardField};

/// Summarizes all six numeric fields and both categorical distributions.
#[must_use]
pub fn ward_statistics(wards: &[Ward]) -> WardStatistics {
    let population: Vec<&Ward> = wards.iter().filter(|w| w.boundary.is_some()).collect();

    WardStatistics {
        total_wards: population.len(),
        poverty_stats: field_stats(&population, WardField::PovertyRate),
        unemployment_stats: field_stats(&population, WardField::YouthUnemploymentRate),
        population_stats: field_stats(&population, WardField::PopulationDensity),
        education_stats: field_stats(&population, WardField::AvgEducationYears),
        slum_housing_stats: field_stats(&population, WardField::SlumHousingPct),
        protest_density_stats: field_stats(&population, WardField::ProtestDensityIndex),
        risk_distribution: risk_distribution(&population),
        protest_density_distribution: protest_density_distribution(&population),
    }
}

/// Mean, median, population standard deviation, min, max, and count of the
/// non-null values of one field. `None` when no ward has a value.
#[must_use]
pub fn field_stats(wards: &[&Ward], field: WardField) -> Option<FieldStats> {
    let mut values: Vec<f64> = wards.iter().filter_map(|w| w.field_value(field)).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;

    Some(FieldStats {
        mean,
        median: median_of_sorted(&values),
        std: variance.sqrt(),
        min: values[0],
        max: values[values.len() - 1],
        count: values.len(),
    })
}

/// Median of an ascending slice, averaging the two middle values for even
/// lengths.
fn median_of_sorted(values: &[f64]) -> f64 {
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        f64::midpoint(values[mid - 1], values[mid])
    } else {
        values[mid]
    }
}

/// Ward counts per composite risk label, every bucket present.
fn risk_distribution(wards: &[&Ward]) -> CategoryDistribution {
    CategoryDistribution(
        RiskLevel::all()
            .iter()
            .map(|level| {
                let count = wards
                    .iter()
                    .filter(|w| w.risk_assessment() == *level)
                    .count() as u64;
                (level.to_string(), count)
            })
            .collect(),
    )
}

/// Ward counts per protest density level, every bucket present.
fn protest_density_distribution(wards: &[&Ward]) -> CategoryDistribution {
    CategoryDistribution(
        ProtestDensityLevel::all()
            .iter()
            .map(|level| {
                let count = wards
                    .iter()
                    .filter(|w| w.protest_density_level() == *level)
                    .count() as u64;
                (level.to_string(), count)
            })
            .collect(),
    )
}
