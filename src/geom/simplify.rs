//! Vertex-count reduction for boundary rings.

use std::collections::BTreeSet;

use geo::{Coord, LineString, MultiPolygon, Polygon};

/// Decimate a closed ring down to at most `max_vertices` points.
///
/// Points are selected by uniform stride over the original indices. The
/// closure points (first and last) are always retained, and the four
/// extrema-bearing points (westmost, eastmost, southmost, northmost) are
/// retained whenever the budget allows, so the ring's bounds survive
/// decimation. A ring that already fits the budget is returned unchanged.
pub fn decimate_ring(ring: &[Coord<f64>], max_vertices: usize) -> Vec<Coord<f64>> {
    let n = ring.len();
    if n <= max_vertices {
        return ring.to_vec();
    }

    let mut keep = BTreeSet::new();
    keep.insert(0);
    if max_vertices > 1 {
        keep.insert(n - 1);
    }

    for idx in extrema_indices(ring) {
        if keep.len() >= max_vertices {
            break;
        }
        keep.insert(idx);
    }

    let budget = max_vertices - keep.len();
    for step in 1..=budget {
        if keep.len() >= max_vertices {
            break;
        }
        keep.insert(step * (n - 1) / (budget + 1));
    }

    keep.into_iter().map(|idx| ring[idx]).collect()
}

/// Indices of the first occurrence of each coordinate extremum
/// (min/max longitude, min/max latitude).
fn extrema_indices(ring: &[Coord<f64>]) -> [usize; 4] {
    let (mut west, mut east, mut south, mut north) = (0, 0, 0, 0);
    for (idx, coord) in ring.iter().enumerate() {
        if coord.x < ring[west].x {
            west = idx;
        }
        if coord.x > ring[east].x {
            east = idx;
        }
        if coord.y < ring[south].y {
            south = idx;
        }
        if coord.y > ring[north].y {
            north = idx;
        }
    }
    [west, east, south, north]
}

/// Decimate every exterior ring of `geometry` independently.
///
/// Because each ring keeps its own extrema, the bounds of the result equal
/// the bounds of the input.
pub fn simplify_geometry(geometry: &MultiPolygon<f64>, max_vertices: usize) -> MultiPolygon<f64> {
    MultiPolygon(
        geometry
            .0
            .iter()
            .map(|polygon| {
                let ring = decimate_ring(&polygon.exterior().0, max_vertices);
                Polygon::new(LineString(ring), vec![])
            })
            .collect(),
    )
}
