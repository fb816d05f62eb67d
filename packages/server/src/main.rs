#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the protest map application.
//!
//! Loads the geographic datasets once at startup and serves the spatial
//! analytics endpoints plus read-only `GeoJSON` listings for the map
//! frontend. All request handling works over the immutable startup
//! snapshot; nothing is persisted.

mod geojson;
mod handlers;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use protest_map_geography::{DatasetPaths, GeoDataset};

/// Shared application state.
pub struct AppState {
    /// The dataset snapshot loaded at startup.
    pub dataset: GeoDataset,
    /// Maximum wards sampled by the correlation analysis.
    pub ward_sample_cap: usize,
}

fn env_path(key: &str, default: &str) -> std::path::PathBuf {
    std::env::var(key).unwrap_or_else(|_| default.to_string()).into()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let paths = DatasetPaths {
        wards: env_path("WARD_DATA", "data/wards.geojson"),
        protests: env_path("PROTEST_DATA", "data/protest_events.geojson"),
        police_stations: env_path("POLICE_DATA", "data/police_stations.geojson"),
        hospitals: env_path("HOSPITAL_DATA", "data/hospitals.geojson"),
        roads: env_path("ROAD_DATA", "data/roads.geojson"),
    };

    log::info!("Loading geographic datasets...");
    let dataset = GeoDataset::load(&paths).expect("Failed to load geographic datasets");

    let ward_sample_cap: usize = std::env::var("WARD_SAMPLE_CAP")
        .ok()
        .and_then(|cap| cap.parse().ok())
        .unwrap_or(30);

    let state = web::Data::new(AppState {
        dataset,
        ward_sample_cap,
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/analysis/spatial", web::get().to(handlers::spatial_analysis))
                    .route("/wards/statistics", web::get().to(handlers::ward_statistics))
                    .route("/wards", web::get().to(handlers::wards))
                    .route("/protests", web::get().to(handlers::protests))
                    .route("/police-stations", web::get().to(handlers::police_stations))
                    .route("/hospitals", web::get().to(handlers::hospitals))
                    .route("/roads", web::get().to(handlers::roads)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
