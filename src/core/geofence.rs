use crate::domain::model::{GeoFence, Point, Polygon};

/// Ray-casting point-in-polygon test over planar coordinates.
///
/// A ray from `point` towards increasing longitude is tested against every
/// edge, including the closing edge from the last vertex back to the first.
/// An odd number of crossings means the point is inside.
///
/// Points lying exactly on an edge or vertex may land on either side.
pub fn contains(point: &Point, polygon: &Polygon) -> bool {
    let vertices = polygon.vertices();
    if polygon.is_degenerate() {
        return false;
    }

    let (x, y) = (point.longitude, point.latitude);
    let mut inside = false;
    let mut j = vertices.len() - 1;

    for i in 0..vertices.len() {
        let (xi, yi) = (vertices[i].longitude, vertices[i].latitude);
        let (xj, yj) = (vertices[j].longitude, vertices[j].latitude);

        // the straddle check guarantees yj != yi before dividing
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

pub fn fence_contains(point: &Point, fence: &GeoFence) -> bool {
    fence.polygons.iter().any(|polygon| contains(point, polygon))
}

/// First fence with any polygon containing `point`.
pub fn matching_fence<'a>(point: &Point, fences: &'a [GeoFence]) -> Option<&'a GeoFence> {
    fences.iter().find(|fence| fence_contains(point, fence))
}

pub fn is_within_any_fence(point: &Point, fences: &[GeoFence]) -> bool {
    matching_fence(point, fences).is_some()
}
