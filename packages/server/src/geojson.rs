//! `GeoJSON` `FeatureCollection` building for the listing endpoints.
//!
//! Each record becomes one feature; records without geometry serialize with
//! `geometry: null` so clients still see the attribute data.

use geojson::{Feature, FeatureCollection, Geometry, feature::Id};
use protest_map_geography_models::{GeoPoint, Ward};
use protest_map_protest_models::{Hospital, PoliceStation, ProtestEvent, Road};
use serde_json::{Map, Value, json};

fn feature(id: i64, geometry: Option<Geometry>, properties: Map<String, Value>) -> Feature {
    Feature {
        bbox: None,
        geometry,
        id: Some(Id::Number(id.into())),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn point_geometry(coordinate: Option<GeoPoint>) -> Option<Geometry> {
    coordinate.map(|c| Geometry::new(geojson::Value::Point(vec![c.longitude, c.latitude])))
}

fn properties(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Wards with their socioeconomic fields and derived labels.
pub fn ward_collection(wards: &[Ward]) -> FeatureCollection {
    collection(
        wards
            .iter()
            .map(|ward| {
                let geometry = ward
                    .boundary
                    .as_ref()
                    .map(|boundary| Geometry::new(geojson::Value::from(boundary)));
                feature(
                    ward.id,
                    geometry,
                    properties(json!({
                        "ward": ward.ward,
                        "subcounty": ward.subcounty,
                        "county": ward.county,
                        "population_2009": ward.population_2009,
                        "poverty_rate": ward.poverty_rate,
                        "youth_unemployment_rate": ward.youth_unemployment_rate,
                        "slum_housing_pct": ward.slum_housing_pct,
                        "avg_education_years": ward.avg_education_years,
                        "population_density": ward.population_density,
                        "protest_density_index": ward.protest_density_index,
                        "risk_assessment": ward.risk_assessment().to_string(),
                        "protest_density_level": ward.protest_density_level().to_string(),
                    })),
                )
            })
            .collect(),
    )
}

/// Protest events with severity labels.
pub fn protest_collection(protests: &[ProtestEvent]) -> FeatureCollection {
    collection(
        protests
            .iter()
            .map(|protest| {
                feature(
                    protest.id,
                    point_geometry(protest.coordinate),
                    properties(json!({
                        "event_date": protest.event_date,
                        "fatalities": protest.fatalities,
                        "severity": protest.severity().to_string(),
                        "has_fatalities": protest.has_fatalities(),
                    })),
                )
            })
            .collect(),
    )
}

/// Police stations.
pub fn police_collection(stations: &[PoliceStation]) -> FeatureCollection {
    collection(
        stations
            .iter()
            .map(|station| {
                feature(
                    station.id,
                    point_geometry(station.coordinate),
                    properties(json!({ "name": station.name })),
                )
            })
            .collect(),
    )
}

/// Hospitals.
pub fn hospital_collection(hospitals: &[Hospital]) -> FeatureCollection {
    collection(
        hospitals
            .iter()
            .map(|hospital| {
                feature(
                    hospital.id,
                    point_geometry(hospital.coordinate),
                    properties(json!({
                        "name": hospital.name,
                        "amenity": hospital.amenity,
                    })),
                )
            })
            .collect(),
    )
}

/// Roads; geometry is echoed back exactly as loaded.
pub fn road_collection(roads: &[Road]) -> FeatureCollection {
    collection(
        roads
            .iter()
            .map(|road| {
                feature(
                    road.id,
                    road.geometry.clone(),
                    properties(json!({
                        "name": road.name,
                        "highway": road.highway,
                        "lanes": road.lanes,
                    })),
                )
            })
            .collect(),
    )
}
