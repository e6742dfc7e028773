//! Low-level SVG element writing.

use std::io::Write;

use anyhow::Result;
use geo::{Coord, Rect};

use super::Viewport;

/// Write the SVG header, including the XML declaration and opening <svg> tag.
pub(super) fn write_header(
    writer: &mut impl Write,
    width: f64,
    height: f64,
    bounds: &Rect<f64>,
) -> Result<()> {
    writeln!(writer, r##"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"##)?;
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg"
        width="{width}" height="{height}"
        viewBox="0 0 {width} {height}"
        data-x-min="{x_min}" data-x-max="{x_max}"
        data-y-min="{y_min}" data-y-max="{y_max}">"##,
        x_min = bounds.min().x,
        x_max = bounds.max().x,
        y_min = bounds.min().y,
        y_max = bounds.max().y,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="#ffffff"/>"##)?;
    Ok(())
}

/// Write SVG styles for map features.
pub(super) fn write_styles(writer: &mut impl Write) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .outline {{ fill: #e5e7eb; stroke: #111827; stroke-width: 0.5; fill-opacity: 0.85; }}
    .bbox {{ fill: none; stroke: #2563eb; stroke-opacity: 0.7; stroke-width: 1; }}
</style>
</defs>"##)?;
    Ok(())
}

/// Write one closed ring as a path element with the given class.
pub(super) fn write_ring(
    writer: &mut impl Write,
    class: &str,
    ring: &[Coord<f64>],
    viewport: &Viewport,
) -> Result<()> {
    writeln!(writer, r#"<path class="{class}" d="{}"/>"#, ring_to_path(ring, viewport))?;
    Ok(())
}

/// Build a compact SVG path string for a closed ring.
fn ring_to_path(ring: &[Coord<f64>], viewport: &Viewport) -> String {
    let mut out = String::new();

    let mut coords = ring.iter().map(|coord| viewport(coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        out.push('Z');
    }

    out
}

/// Write the closing </svg> tag.
pub(super) fn write_footer(writer: &mut impl Write) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_paths_are_closed() {
        let ring = [
            Coord { x: 0.0, y: 0.0 },
            Coord { x: 1.0, y: 0.0 },
            Coord { x: 1.0, y: 1.0 },
            Coord { x: 0.0, y: 0.0 },
        ];
        let identity = |coord: &Coord<f64>| (coord.x, coord.y);
        let path = ring_to_path(&ring, &identity);
        assert!(path.starts_with(" M0.000,0.000"));
        assert!(path.ends_with('Z'));
        assert_eq!(path.matches('L').count(), 3);
    }

    #[test]
    fn empty_ring_produces_an_empty_path() {
        let identity = |coord: &Coord<f64>| (coord.x, coord.y);
        assert_eq!(ring_to_path(&[], &identity), "");
    }
}
