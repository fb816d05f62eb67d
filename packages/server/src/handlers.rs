//! HTTP handler functions for the protest map API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use protest_map_analytics::{CorrelationOptions, SpatialAnalysisRequest};
use protest_map_geography_models::SocioeconomicMetric;
use protest_map_server_models::{
    ApiError, ApiHealth, ApiSpatialAnalysis, ApiWardStatistics, SpatialAnalysisParams,
};

use crate::{AppState, geojson};

/// Default evaluation grid resolution.
const DEFAULT_GRID_SIZE: usize = 50;

/// Largest accepted grid resolution; a 200x200 grid is already 40k kernel
/// evaluations per protest event.
const MAX_GRID_SIZE: usize = 200;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/analysis/spatial`
///
/// Runs the correlation analysis for the requested metric, optionally with
/// the density surface, over the loaded dataset snapshot.
pub async fn spatial_analysis(
    state: web::Data<AppState>,
    params: web::Query<SpatialAnalysisParams>,
) -> HttpResponse {
    let metric = match params.metric.as_deref() {
        None => SocioeconomicMetric::PovertyRate,
        Some(raw) => match raw.parse::<SocioeconomicMetric>() {
            Ok(metric) => metric,
            Err(_) => {
                return HttpResponse::BadRequest()
                    .json(ApiError::new(format!("Unknown metric '{raw}'")));
            }
        },
    };

    let grid_size = params.grid_size.unwrap_or(DEFAULT_GRID_SIZE);
    if !(2..=MAX_GRID_SIZE).contains(&grid_size) {
        return HttpResponse::BadRequest().json(ApiError::new(format!(
            "Invalid grid size {grid_size}: expected 2..={MAX_GRID_SIZE}"
        )));
    }

    let request = SpatialAnalysisRequest {
        metric,
        include_kde: params.wants_kde(),
        grid_size,
        correlation: CorrelationOptions {
            ward_sample_cap: state.ward_sample_cap,
            ..CorrelationOptions::default()
        },
    };

    let dataset = &state.dataset;
    match protest_map_analytics::spatial_analysis(
        &dataset.wards,
        &dataset.protests,
        &dataset.police_stations,
        &request,
    ) {
        Ok(analysis) => HttpResponse::Ok().json(ApiSpatialAnalysis {
            success: true,
            analysis,
            metric,
        }),
        Err(e) => {
            log::error!("Spatial analysis failed: {e}");
            HttpResponse::InternalServerError().json(ApiError::new(e))
        }
    }
}

/// `GET /api/wards/statistics`
pub async fn ward_statistics(state: web::Data<AppState>) -> HttpResponse {
    let statistics = protest_map_analytics::ward_statistics(&state.dataset.wards);
    HttpResponse::Ok().json(ApiWardStatistics {
        success: true,
        statistics,
        timestamp: Utc::now(),
    })
}

/// `GET /api/wards`
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(geojson::ward_collection(&state.dataset.wards))
}

/// `GET /api/protests`
pub async fn protests(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(geojson::protest_collection(&state.dataset.protests))
}

/// `GET /api/police-stations`
pub async fn police_stations(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(geojson::police_collection(&state.dataset.police_stations))
}

/// `GET /api/hospitals`
pub async fn hospitals(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(geojson::hospital_collection(&state.dataset.hospitals))
}

/// `GET /api/roads`
pub async fn roads(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(geojson::road_collection(&state.dataset.roads))
}
