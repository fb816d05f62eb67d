#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ward and geographic point types with derived socioeconomic indicators.
//!
//! A [`Ward`] is the smallest administrative subdivision in the dataset and
//! carries the aggregate socioeconomic fields the analytics layer consumes.
//! The categorical levels (poverty, unemployment, density, education,
//! housing, protest density) and the composite risk assessment are computed
//! here with fixed thresholds so every consumer reports identical labels.

pub mod levels;

use geo::{Centroid, MultiPolygon};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use levels::{
    DensityCategory, EducationLevel, IndicatorLevel, ProtestDensityLevel, RiskLevel,
};

/// A longitude/latitude pair in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude in degrees.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// Geographic bounding box of an evaluation grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Western edge (minimum longitude).
    pub x_min: f64,
    /// Eastern edge (maximum longitude).
    pub x_max: f64,
    /// Southern edge (minimum latitude).
    pub y_min: f64,
    /// Northern edge (maximum latitude).
    pub y_max: f64,
}

/// Socioeconomic metric names accepted by the correlation endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SocioeconomicMetric {
    PovertyRate,
    YouthUnemployment,
    PopulationDensity,
    EducationLevel,
    SlumHousing,
    ProtestDensity,
}

/// Numeric ward fields accepted by the statistics endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WardField {
    PovertyRate,
    YouthUnemploymentRate,
    SlumHousingPct,
    AvgEducationYears,
    PopulationDensity,
    ProtestDensityIndex,
}

impl WardField {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::PovertyRate,
            Self::YouthUnemploymentRate,
            Self::SlumHousingPct,
            Self::AvgEducationYears,
            Self::PopulationDensity,
            Self::ProtestDensityIndex,
        ]
    }
}

/// An administrative ward with socioeconomic indicators and an optional
/// boundary polygon.
///
/// All numeric fields are optional; upstream shapefile joins leave gaps.
#[derive(Debug, Clone, Default)]
pub struct Ward {
    /// Record id from the source dataset.
    pub id: i64,
    /// Ward name.
    pub ward: Option<String>,
    /// Subcounty name.
    pub subcounty: Option<String>,
    /// County name.
    pub county: Option<String>,
    /// 2009 census population.
    pub population_2009: Option<i64>,
    /// Boundary polygon in WGS84 degrees.
    pub boundary: Option<MultiPolygon<f64>>,
    /// Poverty rate, percent.
    pub poverty_rate: Option<f64>,
    /// Youth unemployment rate, percent.
    pub youth_unemployment_rate: Option<f64>,
    /// Share of slum housing, percent.
    pub slum_housing_pct: Option<f64>,
    /// Average years of education.
    pub avg_education_years: Option<f64>,
    /// Population per square kilometer.
    pub population_density: Option<f64>,
    /// Protest events per unit area, from the source dataset's spatial join.
    pub protest_density_index: Option<f64>,
}

/// Treats an absent or exactly-zero value as missing.
///
/// The upstream dataset uses zero interchangeably with "no data" for the
/// rate fields, so level categorization collapses both to missing.
#[allow(clippy::float_cmp)]
fn present(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

impl Ward {
    /// Comma-joined "ward, subcounty, county" from the parts that are set.
    #[must_use]
    pub fn full_location(&self) -> String {
        [&self.ward, &self.subcounty, &self.county]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Centroid of the boundary polygon, if there is one.
    #[must_use]
    pub fn centroid(&self) -> Option<GeoPoint> {
        self.boundary
            .as_ref()
            .and_then(Centroid::centroid)
            .map(|p| GeoPoint::new(p.x(), p.y()))
    }

    /// Categorizes the poverty rate.
    #[must_use]
    pub fn poverty_level(&self) -> IndicatorLevel {
        match present(self.poverty_rate) {
            None => IndicatorLevel::Unknown,
            Some(v) if v < 20.0 => IndicatorLevel::Low,
            Some(v) if v < 40.0 => IndicatorLevel::Medium,
            Some(v) if v < 60.0 => IndicatorLevel::High,
            Some(_) => IndicatorLevel::VeryHigh,
        }
    }

    /// Categorizes youth unemployment.
    #[must_use]
    pub fn youth_unemployment_level(&self) -> IndicatorLevel {
        match present(self.youth_unemployment_rate) {
            None => IndicatorLevel::Unknown,
            Some(v) if v < 15.0 => IndicatorLevel::Low,
            Some(v) if v < 30.0 => IndicatorLevel::Medium,
            Some(v) if v < 45.0 => IndicatorLevel::High,
            Some(_) => IndicatorLevel::VeryHigh,
        }
    }

    /// Categorizes population density.
    #[must_use]
    pub fn population_density_category(&self) -> DensityCategory {
        match present(self.population_density) {
            None => DensityCategory::Unknown,
            Some(v) if v < 1000.0 => DensityCategory::Low,
            Some(v) if v < 5000.0 => DensityCategory::Medium,
            Some(v) if v < 10000.0 => DensityCategory::High,
            Some(_) => DensityCategory::VeryHigh,
        }
    }

    /// Categorizes average education years.
    #[must_use]
    pub fn education_level_category(&self) -> EducationLevel {
        match present(self.avg_education_years) {
            None => EducationLevel::Unknown,
            Some(v) if v < 5.0 => EducationLevel::VeryLow,
            Some(v) if v < 8.0 => EducationLevel::Low,
            Some(v) if v < 12.0 => EducationLevel::Medium,
            Some(_) => EducationLevel::High,
        }
    }

    /// Categorizes the slum housing share.
    #[must_use]
    pub fn slum_housing_level(&self) -> IndicatorLevel {
        match present(self.slum_housing_pct) {
            None => IndicatorLevel::Unknown,
            Some(v) if v < 10.0 => IndicatorLevel::Low,
            Some(v) if v < 30.0 => IndicatorLevel::Medium,
            Some(v) if v < 50.0 => IndicatorLevel::High,
            Some(_) => IndicatorLevel::VeryHigh,
        }
    }

    /// Categorizes protest density. Zero is a real observation here
    /// ([`ProtestDensityLevel::None`]); only an absent field yields
    /// [`ProtestDensityLevel::NoData`].
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn protest_density_level(&self) -> ProtestDensityLevel {
        match self.protest_density_index {
            None => ProtestDensityLevel::NoData,
            Some(v) if v == 0.0 => ProtestDensityLevel::None,
            Some(v) if v < 0.5 => ProtestDensityLevel::Low,
            Some(v) if v < 1.0 => ProtestDensityLevel::Medium,
            Some(v) if v < 2.0 => ProtestDensityLevel::High,
            Some(_) => ProtestDensityLevel::VeryHigh,
        }
    }

    /// Composite risk assessment over the factors that have usable values.
    ///
    /// Each factor contributes a capped score; the average over contributing
    /// factors selects the label. Protest density counts as a factor
    /// whenever the field is set, even at zero.
    #[must_use]
    pub fn risk_assessment(&self) -> RiskLevel {
        let mut score = 0.0;
        let mut factors = 0u32;

        if let Some(v) = present(self.poverty_rate) {
            score += (v / 10.0).min(10.0);
            factors += 1;
        }
        if let Some(v) = present(self.youth_unemployment_rate) {
            score += (v / 5.0).min(10.0);
            factors += 1;
        }
        if let Some(v) = present(self.slum_housing_pct) {
            score += (v / 5.0).min(10.0);
            factors += 1;
        }
        if let Some(v) = present(self.population_density) {
            score += (v / 1000.0).min(5.0);
            factors += 1;
        }
        if let Some(v) = present(self.avg_education_years) {
            // Inverse: less education, more risk.
            score += ((12.0 - v) / 2.0).clamp(0.0, 6.0);
            factors += 1;
        }
        if let Some(v) = self.protest_density_index {
            score += (v * 5.0).min(15.0);
            factors += 1;
        }

        if factors == 0 {
            return RiskLevel::Unknown;
        }

        let avg = score / f64::from(factors);
        if avg < 3.0 {
            RiskLevel::Low
        } else if avg < 6.0 {
            RiskLevel::Medium
        } else if avg < 9.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    /// Value of the requested correlation metric, applying the same
    /// missing-value rules as level categorization: the rate metrics treat
    /// zero as missing, protest density keeps zero.
    #[must_use]
    pub fn metric_value(&self, metric: SocioeconomicMetric) -> Option<f64> {
        match metric {
            SocioeconomicMetric::PovertyRate => present(self.poverty_rate),
            SocioeconomicMetric::YouthUnemployment => present(self.youth_unemployment_rate),
            SocioeconomicMetric::PopulationDensity => present(self.population_density),
            SocioeconomicMetric::EducationLevel => present(self.avg_education_years),
            SocioeconomicMetric::SlumHousing => present(self.slum_housing_pct),
            SocioeconomicMetric::ProtestDensity => self.protest_density_index,
        }
    }

    /// Raw value of a numeric field, with no missing-value coercion.
    #[must_use]
    pub const fn field_value(&self, field: WardField) -> Option<f64> {
        match field {
            WardField::PovertyRate => self.poverty_rate,
            WardField::YouthUnemploymentRate => self.youth_unemployment_rate,
            WardField::SlumHousingPct => self.slum_housing_pct,
            WardField::AvgEducationYears => self.avg_education_years,
            WardField::PopulationDensity => self.population_density,
            WardField::ProtestDensityIndex => self.protest_density_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;

    fn ward_with_poverty(rate: Option<f64>) -> Ward {
        Ward {
            poverty_rate: rate,
            ..Ward::default()
        }
    }

    #[test]
    fn poverty_level_thresholds() {
        assert_eq!(
            ward_with_poverty(Some(19.9)).poverty_level(),
            IndicatorLevel::Low
        );
        // Boundary values resolve to the higher bucket.
        assert_eq!(
            ward_with_poverty(Some(20.0)).poverty_level(),
            IndicatorLevel::Medium
        );
        assert_eq!(
            ward_with_poverty(Some(40.0)).poverty_level(),
            IndicatorLevel::High
        );
        assert_eq!(
            ward_with_poverty(Some(60.0)).poverty_level(),
            IndicatorLevel::VeryHigh
        );
    }

    #[test]
    fn zero_is_treated_as_missing_for_rate_levels() {
        assert_eq!(
            ward_with_poverty(Some(0.0)).poverty_level(),
            IndicatorLevel::Unknown
        );
        assert_eq!(
            ward_with_poverty(None).poverty_level(),
            IndicatorLevel::Unknown
        );

        let ward = Ward {
            youth_unemployment_rate: Some(0.0),
            slum_housing_pct: Some(0.0),
            avg_education_years: Some(0.0),
            population_density: Some(0.0),
            ..Ward::default()
        };
        assert_eq!(ward.youth_unemployment_level(), IndicatorLevel::Unknown);
        assert_eq!(ward.slum_housing_level(), IndicatorLevel::Unknown);
        assert_eq!(ward.education_level_category(), EducationLevel::Unknown);
        assert_eq!(ward.population_density_category(), DensityCategory::Unknown);
    }

    #[test]
    fn protest_density_level_keeps_zero() {
        let mut ward = Ward::default();
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::NoData);

        ward.protest_density_index = Some(0.0);
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::None);

        ward.protest_density_index = Some(0.4);
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::Low);
        ward.protest_density_index = Some(0.5);
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::Medium);
        ward.protest_density_index = Some(1.0);
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::High);
        ward.protest_density_index = Some(2.0);
        assert_eq!(ward.protest_density_level(), ProtestDensityLevel::VeryHigh);
    }

    #[test]
    fn risk_assessment_with_no_factors_is_unknown() {
        assert_eq!(Ward::default().risk_assessment(), RiskLevel::Unknown);
        // Zero-valued rate fields do not count as factors.
        let ward = Ward {
            poverty_rate: Some(0.0),
            youth_unemployment_rate: Some(0.0),
            ..Ward::default()
        };
        assert_eq!(ward.risk_assessment(), RiskLevel::Unknown);
    }

    #[test]
    fn risk_assessment_low_risk_vector() {
        let ward = Ward {
            poverty_rate: Some(1.0),
            youth_unemployment_rate: Some(1.0),
            slum_housing_pct: Some(1.0),
            population_density: Some(1.0),
            avg_education_years: Some(12.0),
            protest_density_index: Some(0.01),
            ..Ward::default()
        };
        // (0.1 + 0.2 + 0.2 + 0.001 + 0.0 + 0.05) / 6 < 3
        assert_eq!(ward.risk_assessment(), RiskLevel::Low);
    }

    #[test]
    fn risk_assessment_critical_when_every_factor_saturates() {
        let ward = Ward {
            poverty_rate: Some(100.0),
            youth_unemployment_rate: Some(100.0),
            slum_housing_pct: Some(100.0),
            population_density: Some(20000.0),
            avg_education_years: Some(1.0),
            protest_density_index: Some(10.0),
            ..Ward::default()
        };
        // (10 + 10 + 10 + 5 + 5.5 + 15) / 6 = 9.25
        assert_eq!(ward.risk_assessment(), RiskLevel::Critical);
    }

    #[test]
    fn risk_assessment_counts_zero_protest_density_as_factor() {
        let ward = Ward {
            protest_density_index: Some(0.0),
            ..Ward::default()
        };
        // Single factor contributing zero points: average 0 -> Low Risk.
        assert_eq!(ward.risk_assessment(), RiskLevel::Low);
    }

    #[test]
    fn metric_value_presence_rules() {
        let ward = Ward {
            poverty_rate: Some(0.0),
            protest_density_index: Some(0.0),
            ..Ward::default()
        };
        assert_eq!(ward.metric_value(SocioeconomicMetric::PovertyRate), None);
        assert_eq!(
            ward.metric_value(SocioeconomicMetric::ProtestDensity),
            Some(0.0)
        );
    }

    #[test]
    fn metric_names_parse_from_snake_case() {
        assert_eq!(
            "poverty_rate".parse::<SocioeconomicMetric>().ok(),
            Some(SocioeconomicMetric::PovertyRate)
        );
        assert_eq!(
            "protest_density".parse::<SocioeconomicMetric>().ok(),
            Some(SocioeconomicMetric::ProtestDensity)
        );
        assert!("not_a_metric".parse::<SocioeconomicMetric>().is_err());
    }

    #[test]
    fn full_location_skips_missing_parts() {
        let ward = Ward {
            ward: Some("Kariobangi".to_string()),
            county: Some("Nairobi".to_string()),
            ..Ward::default()
        };
        assert_eq!(ward.full_location(), "Kariobangi, Nairobi");
        assert_eq!(Ward::default().full_location(), "");
    }

    #[test]
    fn centroid_of_unit_square() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        let ward = Ward {
            boundary: Some(MultiPolygon(vec![square])),
            ..Ward::default()
        };
        let centroid = ward.centroid().unwrap();
        assert!((centroid.longitude - 0.5).abs() < 1e-9);
        assert!((centroid.latitude - 0.5).abs() < 1e-9);

        assert!(Ward::default().centroid().is_none());
    }
}
