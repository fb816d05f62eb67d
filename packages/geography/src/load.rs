//! `GeoJSON` dataset loading.
//!
//! The source files are shapefile exports, so ward properties carry the
//! truncated DBF column names (`poverty_ra`, `youth_unem`, `pop_densit`,
//! ...). Features are processed one at a time; a bad feature is logged and
//! skipped (or its field left unset) so one malformed record never sinks a
//! whole dataset.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use geo::MultiPolygon;
use geojson::{FeatureCollection, GeoJson};
use protest_map_geography_models::{GeoPoint, Ward};
use protest_map_protest_models::{Hospital, PoliceStation, ProtestEvent, Road};

use crate::GeoError;

/// Locations of the five dataset files.
#[derive(Debug, Clone)]
pub struct DatasetPaths {
    /// Ward boundaries with socioeconomic properties.
    pub wards: PathBuf,
    /// Protest event points.
    pub protests: PathBuf,
    /// Police station points.
    pub police_stations: PathBuf,
    /// Hospital points.
    pub hospitals: PathBuf,
    /// Road linestrings.
    pub roads: PathBuf,
}

/// The full set of geographic records, loaded once at startup and shared
/// immutably across requests.
#[derive(Debug, Clone, Default)]
pub struct GeoDataset {
    /// Wards sorted by (county, subcounty, ward), absent names last.
    pub wards: Vec<Ward>,
    /// Protest events.
    pub protests: Vec<ProtestEvent>,
    /// Police stations.
    pub police_stations: Vec<PoliceStation>,
    /// Hospitals.
    pub hospitals: Vec<Hospital>,
    /// Roads.
    pub roads: Vec<Road>,
}

impl GeoDataset {
    /// Loads all five datasets from disk.
    ///
    /// # Errors
    ///
    /// Returns [`GeoError`] if a file cannot be read or is not valid
    /// `GeoJSON`. Per-feature problems are logged and skipped.
    pub fn load(paths: &DatasetPaths) -> Result<Self, GeoError> {
        let wards = parse_wards(&read_collection(&paths.wards)?);
        log::info!("Loaded {} wards from {}", wards.len(), paths.wards.display());

        let protests = parse_protests(&read_collection(&paths.protests)?);
        log::info!(
            "Loaded {} protest events from {}",
            protests.len(),
            paths.protests.display()
        );

        let police_stations = parse_police_stations(&read_collection(&paths.police_stations)?);
        log::info!(
            "Loaded {} police stations from {}",
            police_stations.len(),
            paths.police_stations.display()
        );

        let hospitals = parse_hospitals(&read_collection(&paths.hospitals)?);
        log::info!(
            "Loaded {} hospitals from {}",
            hospitals.len(),
            paths.hospitals.display()
        );

        let roads = parse_roads(&read_collection(&paths.roads)?);
        log::info!("Loaded {} roads from {}", roads.len(), paths.roads.display());

        Ok(Self {
            wards,
            protests,
            police_stations,
            hospitals,
            roads,
        })
    }

    /// Coordinates of all protest events that have one.
    #[must_use]
    pub fn protest_coordinates(&self) -> Vec<GeoPoint> {
        self.protests.iter().filter_map(|p| p.coordinate).collect()
    }

    /// Coordinates of all police stations that have one.
    #[must_use]
    pub fn police_coordinates(&self) -> Vec<GeoPoint> {
        self.police_stations
            .iter()
            .filter_map(|s| s.coordinate)
            .collect()
    }

    /// Wards that have boundary geometry, in provider order.
    #[must_use]
    pub fn wards_with_boundaries(&self) -> Vec<&Ward> {
        self.wards.iter().filter(|w| w.boundary.is_some()).collect()
    }
}

fn read_collection(path: &Path) -> Result<FeatureCollection, GeoError> {
    let raw = std::fs::read_to_string(path).map_err(|source| GeoError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let geojson: GeoJson = raw.parse()?;
    FeatureCollection::try_from(geojson).map_err(Into::into)
}

/// Parses ward features, sorting the result by (county, subcounty, ward)
/// with absent name components last so downstream sampling order is
/// deterministic.
#[must_use]
pub fn parse_wards(collection: &FeatureCollection) -> Vec<Ward> {
    let mut wards: Vec<Ward> = collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| Ward {
            id: feature_id(feature, index),
            ward: prop_string(feature, "ward"),
            subcounty: prop_string(feature, "subcounty"),
            county: prop_string(feature, "county"),
            population_2009: prop_i64(feature, "pop2009"),
            boundary: feature_multipolygon(feature),
            poverty_rate: prop_f64(feature, "poverty_ra"),
            youth_unemployment_rate: prop_f64(feature, "youth_unem"),
            slum_housing_pct: prop_f64(feature, "slum_house"),
            avg_education_years: prop_f64(feature, "avg_educat"),
            population_density: prop_f64(feature, "pop_densit"),
            protest_density_index: prop_f64(feature, "protest_de"),
        })
        .collect();

    wards.sort_by(|a, b| {
        name_key(a.county.as_deref())
            .cmp(&name_key(b.county.as_deref()))
            .then_with(|| name_key(a.subcounty.as_deref()).cmp(&name_key(b.subcounty.as_deref())))
            .then_with(|| name_key(a.ward.as_deref()).cmp(&name_key(b.ward.as_deref())))
    });

    wards
}

/// Sort key placing absent names after present ones.
fn name_key(name: Option<&str>) -> (bool, Option<&str>) {
    (name.is_none(), name)
}

/// Parses protest event features.
#[must_use]
pub fn parse_protests(collection: &FeatureCollection) -> Vec<ProtestEvent> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let id = feature_id(feature, index);
            ProtestEvent {
                id,
                event_date: prop_string(feature, "event_date").and_then(|raw| {
                    NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                        .inspect_err(|e| {
                            log::warn!("Unparseable event_date '{raw}' on protest {id}: {e}");
                        })
                        .ok()
                }),
                coordinate: feature_point(feature),
                fatalities: prop_i64(feature, "fatalities").and_then(|n| u32::try_from(n).ok()),
            }
        })
        .collect()
}

/// Parses police station features.
#[must_use]
pub fn parse_police_stations(collection: &FeatureCollection) -> Vec<PoliceStation> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| PoliceStation {
            id: feature_id(feature, index),
            name: prop_string(feature, "name"),
            coordinate: feature_point(feature),
        })
        .collect()
}

/// Parses hospital features.
#[must_use]
pub fn parse_hospitals(collection: &FeatureCollection) -> Vec<Hospital> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| Hospital {
            id: feature_id(feature, index),
            name: prop_string(feature, "name"),
            amenity: prop_string(feature, "amenity"),
            coordinate: feature_point(feature),
        })
        .collect()
}

/// Parses road features. Road geometry is kept as raw `GeoJSON` since it is
/// only echoed back by the listing endpoint.
#[must_use]
pub fn parse_roads(collection: &FeatureCollection) -> Vec<Road> {
    collection
        .features
        .iter()
        .enumerate()
        .map(|(index, feature)| Road {
            id: feature_id(feature, index),
            name: prop_string(feature, "name"),
            highway: prop_string(feature, "highway"),
            lanes: prop_string(feature, "lanes"),
            geometry: feature.geometry.clone(),
        })
        .collect()
}

/// Record id from the `gid` property, falling back to the feature's
/// position in the collection.
#[allow(clippy::cast_possible_wrap)]
fn feature_id(feature: &geojson::Feature, index: usize) -> i64 {
    prop_i64(feature, "gid").unwrap_or_else(|| index as i64 + 1)
}

fn prop_f64(feature: &geojson::Feature, key: &str) -> Option<f64> {
    feature.property(key).and_then(serde_json::Value::as_f64)
}

fn prop_i64(feature: &geojson::Feature, key: &str) -> Option<i64> {
    feature.property(key).and_then(serde_json::Value::as_i64)
}

fn prop_string(feature: &geojson::Feature, key: &str) -> Option<String> {
    feature
        .property(key)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
}

/// Point coordinate of a feature, if its geometry is a `Point`.
fn feature_point(feature: &geojson::Feature) -> Option<GeoPoint> {
    let geometry = feature.geometry.as_ref()?;
    if let geojson::Value::Point(position) = &geometry.value {
        if position.len() >= 2 {
            return Some(GeoPoint::new(position[0], position[1]));
        }
    }
    log::warn!("Feature geometry is not a point; coordinate dropped");
    None
}

/// `Polygon` or `MultiPolygon` geometry of a feature as a
/// [`MultiPolygon`]. Other geometry types are logged and dropped.
fn feature_multipolygon(feature: &geojson::Feature) -> Option<MultiPolygon<f64>> {
    let geometry = feature.geometry.as_ref()?;
    let geo_geometry: geo::Geometry<f64> = geometry.value.clone().try_into().ok()?;
    match geo_geometry {
        geo::Geometry::MultiPolygon(mp) => Some(mp),
        geo::Geometry::Polygon(p) => Some(MultiPolygon(vec![p])),
        _ => {
            log::warn!("Ward geometry is neither Polygon nor MultiPolygon; boundary dropped");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(json: &str) -> FeatureCollection {
        let geojson: GeoJson = json.parse().unwrap();
        FeatureCollection::try_from(geojson).unwrap()
    }

    const WARD_COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[36.0, -1.0], [37.0, -1.0], [37.0, 0.0], [36.0, 0.0], [36.0, -1.0]]]
                },
                "properties": {
                    "gid": 7,
                    "ward": "Ngara",
                    "subcounty": "Starehe",
                    "county": "Nairobi",
                    "pop2009": 12345,
                    "poverty_ra": 35.2,
                    "youth_unem": 22.0,
                    "slum_house": 41.5,
                    "avg_educat": 9.1,
                    "pop_densit": 5400.0,
                    "protest_de": 0.8
                }
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"gid": 3, "ward": "Kariobangi", "county": "Nairobi"}
            },
            {
                "type": "Feature",
                "geometry": null,
                "properties": {"gid": 9}
            }
        ]
    }"#;

    #[test]
    fn wards_parse_properties_and_boundary() {
        let wards = parse_wards(&collection(WARD_COLLECTION));
        assert_eq!(wards.len(), 3);

        let ngara = wards.iter().find(|w| w.id == 7).unwrap();
        assert_eq!(ngara.ward.as_deref(), Some("Ngara"));
        assert_eq!(ngara.population_2009, Some(12345));
        assert_eq!(ngara.poverty_rate, Some(35.2));
        assert_eq!(ngara.protest_density_index, Some(0.8));
        assert!(ngara.boundary.is_some());

        let kariobangi = wards.iter().find(|w| w.id == 3).unwrap();
        assert!(kariobangi.boundary.is_none());
        assert!(kariobangi.poverty_rate.is_none());
    }

    #[test]
    fn wards_sort_with_absent_names_last() {
        let wards = parse_wards(&collection(WARD_COLLECTION));
        // Both named wards sort before the anonymous one; subcounty breaks
        // the tie between them ("Starehe" ward has one, Kariobangi does not).
        assert_eq!(wards[0].id, 7);
        assert_eq!(wards[1].id, 3);
        assert_eq!(wards[2].id, 9);
    }

    #[test]
    fn protests_parse_dates_and_fatalities() {
        let protests = parse_protests(&collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [36.82, -1.29]},
                        "properties": {"gid": 1, "event_date": "2023-07-12", "fatalities": 2}
                    },
                    {
                        "type": "Feature",
                        "geometry": null,
                        "properties": {"gid": 2, "event_date": "not-a-date", "fatalities": -4}
                    }
                ]
            }"#,
        ));

        assert_eq!(protests.len(), 2);
        assert_eq!(
            protests[0].event_date,
            NaiveDate::from_ymd_opt(2023, 7, 12)
        );
        assert_eq!(protests[0].fatalities, Some(2));
        let coordinate = protests[0].coordinate.unwrap();
        assert!((coordinate.longitude - 36.82).abs() < 1e-9);

        // Malformed values degrade to None instead of failing the load.
        assert!(protests[1].event_date.is_none());
        assert!(protests[1].coordinate.is_none());
        assert!(protests[1].fatalities.is_none());
    }

    #[test]
    fn feature_id_falls_back_to_position() {
        let stations = parse_police_stations(&collection(
            r#"{
                "type": "FeatureCollection",
                "features": [
                    {
                        "type": "Feature",
                        "geometry": {"type": "Point", "coordinates": [36.8, -1.3]},
                        "properties": {"name": "Central"}
                    }
                ]
            }"#,
        ));
        assert_eq!(stations[0].id, 1);
        assert_eq!(stations[0].name.as_deref(), Some("Central"));
    }

    #[test]
    fn dataset_accessors_filter_missing_records() {
        let dataset = GeoDataset {
            wards: parse_wards(&collection(WARD_COLLECTION)),
            protests: vec![
                ProtestEvent {
                    id: 1,
                    event_date: None,
                    coordinate: Some(GeoPoint::new(36.8, -1.3)),
                    fatalities: None,
                },
                ProtestEvent {
                    id: 2,
                    event_date: None,
                    coordinate: None,
                    fatalities: None,
                },
            ],
            ..GeoDataset::default()
        };

        assert_eq!(dataset.protest_coordinates().len(), 1);
        assert!(dataset.police_coordinates().is_empty());
        assert_eq!(dataset.wards_with_boundaries().len(), 1);
    }
}
