use crate::domain::model::{GeoFence, Point, Polygon};
use crate::utils::error::{PunchError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A location row as stored by the admin layer. The boundary is free-form JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredLocation {
    #[serde(default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub geo_fence_coordinates: Option<Value>,
}

impl StoredLocation {
    pub fn into_fence(self) -> Result<GeoFence> {
        let polygons = match &self.geo_fence_coordinates {
            None | Some(Value::Null) => Vec::new(),
            Some(shape) => parse_shape(&self.name, shape)?,
        };
        Ok(GeoFence::new(self.id, self.name, polygons))
    }
}

/// Outer rings of a GeoJSON `Polygon` or `MultiPolygon`, or a bare
/// `[[lon, lat], ...]` ring. Holes are dropped.
pub fn parse_shape(location: &str, shape: &Value) -> Result<Vec<Polygon>> {
    if shape.is_array() {
        return Ok(vec![parse_ring(location, shape)?]);
    }

    let object = shape
        .as_object()
        .ok_or_else(|| malformed(location, "boundary must be a JSON object or array"))?;

    let coordinates = match object.get("coordinates") {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(coordinates) => coordinates,
    };

    let kind = object
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or("Polygon");

    match kind {
        "Polygon" => {
            let rings = as_array(location, coordinates, "coordinates")?;
            match rings.first() {
                Some(outer) => Ok(vec![parse_ring(location, outer)?]),
                None => Ok(Vec::new()),
            }
        }
        "MultiPolygon" => {
            let members = as_array(location, coordinates, "coordinates")?;
            let mut polygons = Vec::with_capacity(members.len());
            for member in members {
                let rings = as_array(location, member, "polygon")?;
                if let Some(outer) = rings.first() {
                    polygons.push(parse_ring(location, outer)?);
                }
            }
            Ok(polygons)
        }
        other => Err(malformed(
            location,
            &format!("unsupported boundary type '{}'", other),
        )),
    }
}

fn parse_ring(location: &str, ring: &Value) -> Result<Polygon> {
    let positions = as_array(location, ring, "ring")?;
    if positions.len() < 3 {
        return Err(malformed(
            location,
            &format!("ring has {} positions, at least 3 required", positions.len()),
        ));
    }

    let vertices = positions
        .iter()
        .map(|position| parse_position(location, position))
        .collect::<Result<Vec<_>>>()?;

    Ok(Polygon::new(vertices))
}

fn parse_position(location: &str, position: &Value) -> Result<Point> {
    let pair = as_array(location, position, "position")?;
    let longitude = pair.first().and_then(Value::as_f64);
    let latitude = pair.get(1).and_then(Value::as_f64);

    match (longitude, latitude) {
        (Some(longitude), Some(latitude)) => Ok(Point::new(longitude, latitude)),
        _ => Err(malformed(
            location,
            &format!("position {} is not a numeric [longitude, latitude] pair", position),
        )),
    }
}

fn as_array<'a>(location: &str, value: &'a Value, what: &str) -> Result<&'a Vec<Value>> {
    value
        .as_array()
        .ok_or_else(|| malformed(location, &format!("{} must be an array", what)))
}

fn malformed(location: &str, reason: &str) -> PunchError {
    PunchError::FenceFormatError {
        location: location.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location(shape: Value) -> StoredLocation {
        StoredLocation {
            id: "loc-1".to_string(),
            name: "Head Office".to_string(),
            geo_fence_coordinates: Some(shape),
        }
    }

    #[test]
    fn test_polygon_takes_outer_ring() {
        let fence = location(json!({
            "type": "Polygon",
            "coordinates": [
                [[0, 0], [0, 10], [10, 10], [10, 0], [0, 0]],
                [[4, 4], [4, 6], [6, 6], [6, 4]]
            ]
        }))
        .into_fence()
        .unwrap();

        assert_eq!(fence.polygons.len(), 1);
        assert_eq!(fence.polygons[0].vertices().len(), 5);
        assert_eq!(fence.polygons[0].vertices()[2], Point::new(10.0, 10.0));
    }

    #[test]
    fn test_multipolygon_yields_one_polygon_per_member() {
        let fence = location(json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0, 0], [0, 1], [1, 1]]],
                [[[5, 5], [5, 6], [6, 6], [6, 5]]]
            ]
        }))
        .into_fence()
        .unwrap();

        assert_eq!(fence.polygons.len(), 2);
        assert_eq!(fence.polygons[1].vertices().len(), 4);
    }

    #[test]
    fn test_missing_type_defaults_to_polygon() {
        let fence = location(json!({
            "coordinates": [[[77.59, 12.97], [77.60, 12.97], [77.60, 12.98]]]
        }))
        .into_fence()
        .unwrap();
        assert_eq!(fence.polygons.len(), 1);
    }

    #[test]
    fn test_bare_coordinate_array_is_one_ring() {
        let fence = location(json!([[1, 1], [1, 2], [2, 2]])).into_fence().unwrap();

        assert_eq!(fence.polygons.len(), 1);
        assert_eq!(fence.polygons[0].vertices()[1], Point::new(1.0, 2.0));

        let result = location(json!([[1, 1], [1, 2]])).into_fence();
        assert!(matches!(result, Err(PunchError::FenceFormatError { .. })));

        let result = location(json!("0,0 1,1 2,2")).into_fence();
        assert!(matches!(result, Err(PunchError::FenceFormatError { .. })));
    }

    #[test]
    fn test_null_boundary_has_no_polygons() {
        let fence = StoredLocation {
            id: "loc-2".to_string(),
            name: "Warehouse".to_string(),
            geo_fence_coordinates: None,
        }
        .into_fence()
        .unwrap();
        assert!(fence.polygons.is_empty());

        let fence = location(json!({"type": "Polygon"})).into_fence().unwrap();
        assert!(fence.polygons.is_empty());
    }

    #[test]
    fn test_short_ring_is_rejected() {
        let err = location(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1, 1]]]
        }))
        .into_fence()
        .unwrap_err();

        match err {
            PunchError::FenceFormatError { location, reason } => {
                assert_eq!(location, "Head Office");
                assert!(reason.contains("at least 3"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_non_numeric_position_is_rejected() {
        let result = location(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], ["1", 1], [1, 0]]]
        }))
        .into_fence();
        assert!(matches!(result, Err(PunchError::FenceFormatError { .. })));

        let result = location(json!({
            "type": "Polygon",
            "coordinates": [[[0, 0], [1], [1, 0]]]
        }))
        .into_fence();
        assert!(matches!(result, Err(PunchError::FenceFormatError { .. })));
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = location(json!({
            "type": "Circle",
            "coordinates": [0, 0]
        }))
        .into_fence();
        assert!(matches!(result, Err(PunchError::FenceFormatError { .. })));
    }

    #[test]
    fn test_stored_location_deserializes_from_admin_json() {
        let stored: StoredLocation = serde_json::from_value(json!({
            "id": "6f1c",
            "name": "Plant A",
            "geoFenceCoordinates": {
                "type": "Polygon",
                "coordinates": [[[0, 0], [0, 2], [2, 2], [2, 0]]]
            },
            "createdAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap();

        let fence = stored.into_fence().unwrap();
        assert_eq!(fence.id, "6f1c");
        assert_eq!(fence.polygons[0].vertices().len(), 4);
    }
}
