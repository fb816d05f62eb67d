#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic record provider.
//!
//! Loads ward, protest event, police station, hospital, and road records
//! from `GeoJSON` `FeatureCollection` files at startup. Per-feature
//! anomalies (missing or unparseable geometry, malformed properties) are
//! logged and tolerated rather than failing the load; only file I/O and
//! top-level parse failures surface as errors.

pub mod load;

use thiserror::Error;

pub use load::{DatasetPaths, GeoDataset};

/// Errors that can occur while loading the geographic datasets.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Reading a dataset file failed.
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path of the file that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A dataset file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),
}
