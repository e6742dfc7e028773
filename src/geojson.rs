//! GeoJSON reading and writing for state boundary features.

use anyhow::{Context, Result, anyhow};
use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{Value, json};

/// A named state boundary: exterior rings only.
#[derive(Debug, Clone)]
pub struct StateFeature {
    /// Lowercase-hyphenated identifier, e.g. "new-hampshire".
    pub name: String,
    /// Display name as given by the source, e.g. "New Hampshire".
    pub description: String,
    pub geometry: MultiPolygon<f64>,
}

/// Convert a display name to its lowercase-hyphenated identifier.
pub fn location_id(name: &str) -> String {
    name.trim().to_ascii_lowercase().replace(' ', "-")
}

/// Parse a GeoJSON FeatureCollection into state features.
///
/// A missing `features` array or unparseable JSON is an error; individual
/// features without a name property or a usable Polygon/MultiPolygon
/// geometry are skipped with a warning.
pub fn parse_feature_collection(bytes: &[u8]) -> Result<Vec<StateFeature>> {
    let value: Value =
        serde_json::from_slice(bytes).context("[geojson] failed to parse FeatureCollection")?;
    let features = value["features"]
        .as_array()
        .ok_or_else(|| anyhow!("[geojson] missing \"features\" array"))?;

    let mut states = Vec::with_capacity(features.len());
    for feature in features {
        let Some(name) = feature["properties"]["name"].as_str() else {
            eprintln!("[geojson] skipping feature without a name property");
            continue;
        };
        let Some(geometry) = parse_geometry(&feature["geometry"]) else {
            eprintln!("[geojson] skipping {name}: no usable Polygon/MultiPolygon geometry");
            continue;
        };
        states.push(StateFeature {
            name: location_id(name),
            description: name.to_string(),
            geometry,
        });
    }
    Ok(states)
}

fn parse_geometry(geometry: &Value) -> Option<MultiPolygon<f64>> {
    let coords = geometry["coordinates"].as_array()?;
    match geometry["type"].as_str()? {
        "Polygon" => parse_polygon_coords(coords).map(|polygon| MultiPolygon(vec![polygon])),
        "MultiPolygon" => {
            let polygons: Vec<Polygon<f64>> = coords
                .iter()
                .filter_map(|polygon| polygon.as_array().and_then(|rings| parse_polygon_coords(rings)))
                .collect();
            (!polygons.is_empty()).then(|| MultiPolygon(polygons))
        }
        _ => None,
    }
}

/// Parse the rings of a single GeoJSON polygon; only the exterior ring is kept.
fn parse_polygon_coords(rings: &[Value]) -> Option<Polygon<f64>> {
    let exterior = rings.first()?.as_array()?;
    let ring = parse_ring_coords(exterior)?;
    // A closed ring needs at least a triangle plus the closure point.
    (ring.0.len() >= 4).then(|| Polygon::new(ring, vec![]))
}

/// Parse a ring from GeoJSON coordinates: [[lon, lat], ...].
/// Rings left open by the source are re-closed.
fn parse_ring_coords(coords: &[Value]) -> Option<LineString<f64>> {
    let mut points = Vec::with_capacity(coords.len());
    for pair in coords {
        let pair = pair.as_array()?;
        let x = pair.first()?.as_f64()?;
        let y = pair.get(1)?.as_f64()?;
        points.push(Coord { x, y });
    }
    if !points.is_empty() && points[0] != points[points.len() - 1] {
        points.push(points[0]);
    }
    Some(LineString(points))
}

/// Serialize simplified boundaries as a GeoJSON FeatureCollection,
/// one MultiPolygon feature per state with name/description properties.
pub fn write_boundaries_bytes(features: &[StateFeature]) -> Result<Vec<u8>> {
    let features_json: Vec<Value> = features
        .iter()
        .map(|state| {
            let polygons: Vec<Value> = state
                .geometry
                .0
                .iter()
                .map(|polygon| {
                    let exterior: Vec<Vec<f64>> = polygon
                        .exterior()
                        .coords()
                        .map(|coord| vec![coord.x, coord.y])
                        .collect();
                    json!([exterior])
                })
                .collect();

            json!({
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": polygons,
                },
                "properties": {
                    "name": state.name,
                    "description": state.description,
                },
            })
        })
        .collect();

    let collection = json!({
        "type": "FeatureCollection",
        "features": features_json,
    });

    serde_json::to_vec(&collection).context("[geojson] failed to serialize boundaries")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_id_lowercases_and_hyphenates() {
        assert_eq!(location_id("New Hampshire"), "new-hampshire");
        assert_eq!(location_id("Iowa"), "iowa");
        assert_eq!(location_id("District of Columbia"), "district-of-columbia");
    }

    #[test]
    fn parses_polygon_and_multipolygon_features() {
        let body = br#"{
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "properties": {"name": "Squareland"},
                    "geometry": {
                        "type": "Polygon",
                        "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]]
                    }
                },
                {
                    "type": "Feature",
                    "properties": {"name": "Twin Isles"},
                    "geometry": {
                        "type": "MultiPolygon",
                        "coordinates": [
                            [[[2.0, 2.0], [3.0, 2.0], [3.0, 3.0], [2.0, 2.0]]],
                            [[[4.0, 4.0], [5.0, 4.0], [5.0, 5.0], [4.0, 4.0]]]
                        ]
                    }
                }
            ]
        }"#;

        let states = parse_feature_collection(body).unwrap();
        assert_eq!(states.len(), 2);
        assert_eq!(states[0].name, "squareland");
        assert_eq!(states[0].description, "Squareland");
        assert_eq!(states[0].geometry.0.len(), 1);
        assert_eq!(states[1].name, "twin-isles");
        assert_eq!(states[1].geometry.0.len(), 2);
    }

    #[test]
    fn skips_features_without_name_or_geometry() {
        let body = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }},
                {"type": "Feature", "properties": {"name": "Pointless"}, "geometry": {
                    "type": "Point", "coordinates": [0.0, 0.0]
                }},
                {"type": "Feature", "properties": {"name": "Kept"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }}
            ]
        }"#;

        let states = parse_feature_collection(body).unwrap();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].name, "kept");
    }

    #[test]
    fn open_rings_are_closed_on_parse() {
        let body = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Open"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]]
                }}
            ]
        }"#;

        let states = parse_feature_collection(body).unwrap();
        let ring = &states[0].geometry.0[0].exterior().0;
        assert_eq!(ring.first(), ring.last());
        assert_eq!(ring.len(), 5);
    }

    #[test]
    fn missing_features_array_is_an_error() {
        assert!(parse_feature_collection(br#"{"type": "FeatureCollection"}"#).is_err());
        assert!(parse_feature_collection(b"not json").is_err());
    }

    #[test]
    fn boundaries_round_trip_through_the_parser() {
        let body = br#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"name": "Roundtrip"}, "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }}
            ]
        }"#;

        let states = parse_feature_collection(body).unwrap();
        let bytes = write_boundaries_bytes(&states).unwrap();
        let reparsed = parse_feature_collection(&bytes).unwrap();
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed[0].name, states[0].name);
        assert_eq!(reparsed[0].geometry, states[0].geometry);
    }
}
