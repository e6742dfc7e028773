//! SVG rendering of bounding boxes and boundary outlines.

mod writer;

use anyhow::{Result, anyhow};
use geo::{Coord, Rect};

use crate::geojson::StateFeature;
use crate::geom::MapProjection;
use crate::table::StateRecord;

/// Viewport mapping: planar map coords -> SVG pixel coords.
pub(crate) type Viewport = dyn Fn(&Coord<f64>) -> (f64, f64);

pub struct PlotOptions {
    pub width: f64,
    pub margin: f64,
    pub projection: MapProjection,
}

/// Render one box per record, plus outlines when given, to SVG bytes.
///
/// Geometry is projected first and the viewport is fitted to the planar
/// bounds of everything drawn, preserving aspect ratio (Y down).
pub fn render_map(
    records: &[StateRecord],
    outlines: &[StateFeature],
    options: &PlotOptions,
) -> Result<Vec<u8>> {
    if records.is_empty() && outlines.is_empty() {
        return Err(anyhow!("[plot] nothing to draw"));
    }

    let boxes: Vec<Vec<Coord<f64>>> = records
        .iter()
        .map(|record| {
            bbox_ring(record)
                .iter()
                .map(|coord| options.projection.forward(*coord))
                .collect()
        })
        .collect();
    let rings: Vec<Vec<Coord<f64>>> = outlines
        .iter()
        .flat_map(|state| {
            state.geometry.0.iter().map(|polygon| {
                polygon
                    .exterior()
                    .coords()
                    .map(|coord| options.projection.forward(*coord))
                    .collect()
            })
        })
        .collect();

    let bounds = planar_bounds(rings.iter().chain(boxes.iter()).flatten())
        .ok_or_else(|| anyhow!("[plot] could not determine bounds"))?;
    if bounds.width() == 0.0 || bounds.height() == 0.0 {
        return Err(anyhow!("[plot] degenerate bounds; nothing to draw"));
    }

    let margin = options.margin;
    let width = options.width;
    let scale = (width - 2.0 * margin) / bounds.width();
    let height = bounds.height() * scale + 2.0 * margin;

    // Planar -> SVG coords (preserve aspect, Y down).
    let viewport = move |coord: &Coord<f64>| -> (f64, f64) {
        let x = margin + (coord.x - bounds.min().x) * scale;
        let y = margin + (bounds.max().y - coord.y) * scale;
        (x, y)
    };

    let mut out = Vec::new();
    writer::write_header(&mut out, width, height, &bounds)?;
    writer::write_styles(&mut out)?;
    for ring in &rings {
        writer::write_ring(&mut out, "outline", ring, &viewport)?;
    }
    for ring in &boxes {
        writer::write_ring(&mut out, "bbox", ring, &viewport)?;
    }
    writer::write_footer(&mut out)?;
    Ok(out)
}

/// Closed ring through the corners of a record's bounding box.
fn bbox_ring(record: &StateRecord) -> [Coord<f64>; 5] {
    [
        Coord { x: record.lon_min, y: record.lat_min },
        Coord { x: record.lon_max, y: record.lat_min },
        Coord { x: record.lon_max, y: record.lat_max },
        Coord { x: record.lon_min, y: record.lat_max },
        Coord { x: record.lon_min, y: record.lat_min },
    ]
}

/// Bounds of a set of planar coordinates.
fn planar_bounds<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> Option<Rect<f64>> {
    coords
        .map(|coord| Rect::new(*coord, *coord))
        .reduce(|a, b| {
            Rect::new(
                Coord {
                    x: a.min().x.min(b.min().x),
                    y: a.min().y.min(b.min().y),
                },
                Coord {
                    x: a.max().x.max(b.max().x),
                    y: a.max().y.max(b.max().y),
                },
            )
        })
}
