//! Bounding-box extraction over full-resolution geometry.

use geo::{BoundingRect, Coord, MapCoordsInPlace, MultiPolygon, Rect};

/// Location id of the one state whose boundary crosses the antimeridian.
pub const ALASKA: &str = "alaska";

/// Axis-aligned bounds across every ring of `geometry`, or `None` if empty.
///
/// Bounds are always taken from the full-resolution geometry, never from
/// a decimated copy.
pub fn geometry_bounds(geometry: &MultiPolygon<f64>) -> Option<Rect<f64>> {
    geometry.bounding_rect()
}

/// Shift eastern-hemisphere longitudes into the extended western range
/// (lon - 360) so a boundary spanning the antimeridian stays contiguous.
///
/// Applied to Alaska before bounds or simplification; the Aleutian islands
/// west of 180° land in [-189, -180] instead of [+170, +180].
pub fn normalize_antimeridian(geometry: &mut MultiPolygon<f64>) {
    geometry.map_coords_in_place(|coord| {
        if coord.x > 0.0 {
            Coord { x: coord.x - 360.0, y: coord.y }
        } else {
            coord
        }
    });
}
