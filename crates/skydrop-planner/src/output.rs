//! Route file output.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use skydrop_core::Route;
use std::path::{Path, PathBuf};
use tracing::info;

/// `drone-DD-MM-YYYY.geojson`
pub fn route_file_name(date: NaiveDate) -> String {
    format!("drone-{}.geojson", date.format("%d-%m-%Y"))
}

/// A collection holding one LineString through every visited position.
pub fn route_feature_collection(route: &Route) -> FeatureCollection {
    let line = route
        .points()
        .into_iter()
        .map(|p| vec![p.longitude, p.latitude])
        .collect();

    let feature = Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: None,
        foreign_members: None,
    };

    FeatureCollection {
        bbox: None,
        features: vec![feature],
        foreign_members: None,
    }
}

/// Write the route for `date` into `dir`, returning the file path.
pub fn write_route_file(dir: &Path, date: NaiveDate, route: &Route) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    let path = dir.join(route_file_name(date));
    let body = serde_json::to_string(&route_feature_collection(route))
        .context("Failed to encode route")?;
    std::fs::write(&path, body)
        .with_context(|| format!("Failed to write route file {}", path.display()))?;

    info!(path = %path.display(), points = route.len() + 1, "Wrote route file");
    Ok(path)
}
