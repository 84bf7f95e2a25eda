//! GeoJSON decoding for no-fly zones and landmarks.

use anyhow::{anyhow, bail, Context, Result};
use geojson::{FeatureCollection, GeoJson, Value};
use skydrop_core::{NoFlyZones, Point, Zone};
use tracing::warn;

fn feature_collection(body: &str) -> Result<FeatureCollection> {
    let geojson: GeoJson = body.parse().context("Failed to parse GeoJSON")?;
    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => bail!("Expected a GeoJSON FeatureCollection"),
    }
}

fn to_point(position: &[f64]) -> Result<Point> {
    match position {
        [lng, lat, ..] => Ok(Point::new(*lng, *lat)),
        _ => Err(anyhow!("Position has {} coordinates", position.len())),
    }
}

/// Decode polygon features into zones. Only the outer ring of each polygon is
/// used; features of any other geometry are skipped.
pub fn parse_no_fly_zones(body: &str) -> Result<NoFlyZones> {
    let collection = feature_collection(body)?;
    let mut zones = Vec::new();

    for feature in collection.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        let Value::Polygon(rings) = geometry.value else {
            warn!("Skipping non-polygon no-fly zone feature");
            continue;
        };
        let Some(outer) = rings.first() else {
            continue;
        };
        let vertices = outer
            .iter()
            .map(|position| to_point(position))
            .collect::<Result<Vec<_>>>()?;
        zones.push(Zone::new(vertices).context("Invalid no-fly zone polygon")?);
    }

    Ok(NoFlyZones::new(zones))
}

/// Decode point features into landmark coordinates, in document order.
pub fn parse_landmarks(body: &str) -> Result<Vec<Point>> {
    let collection = feature_collection(body)?;
    let mut landmarks = Vec::new();

    for feature in collection.features {
        match feature.geometry.map(|geometry| geometry.value) {
            Some(Value::Point(position)) => landmarks.push(to_point(&position)?),
            _ => warn!("Skipping non-point landmark feature"),
        }
    }

    Ok(landmarks)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZONES: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Library"},
             "geometry": {"type": "Polygon", "coordinates": [[
                [-3.1899, 55.9426], [-3.1891, 55.9426],
                [-3.1891, 55.9431], [-3.1899, 55.9431],
                [-3.1899, 55.9426]
             ]]}},
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Point", "coordinates": [-3.19, 55.94]}}
        ]
    }"#;

    const LANDMARKS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "properties": {"name": "Bristo Square"},
             "geometry": {"type": "Point", "coordinates": [-3.189, 55.9456]}},
            {"type": "Feature", "properties": {"name": "George Square"},
             "geometry": {"type": "Point", "coordinates": [-3.1882, 55.9439]}}
        ]
    }"#;

    #[test]
    fn test_polygons_become_zones_without_closing_vertex() {
        let zones = parse_no_fly_zones(ZONES).unwrap();
        assert_eq!(zones.len(), 1);
        assert_eq!(zones.zones()[0].vertices().len(), 4);
        assert_eq!(zones.zones()[0].vertices()[0], Point::new(-3.1899, 55.9426));
    }

    #[test]
    fn test_landmarks_keep_document_order() {
        let landmarks = parse_landmarks(LANDMARKS).unwrap();
        assert_eq!(
            landmarks,
            vec![Point::new(-3.189, 55.9456), Point::new(-3.1882, 55.9439)]
        );
    }

    #[test]
    fn test_bare_geometry_is_rejected() {
        let body = r#"{"type": "Point", "coordinates": [0.0, 0.0]}"#;
        assert!(parse_landmarks(body).is_err());
    }

    #[test]
    fn test_degenerate_polygon_is_an_error() {
        let body = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {},
             "geometry": {"type": "Polygon", "coordinates": [[[0,0],[1,0],[0,0]]]}}
        ]}"#;
        assert!(parse_no_fly_zones(body).is_err());
    }
}
