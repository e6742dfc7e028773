#![doc = "statebounds public API"]
pub mod cli;
pub mod commands;
mod fetch;
mod geojson;
mod geom;
mod io;
mod svg;
mod table;

#[doc(inline)]
pub use geojson::{StateFeature, location_id, parse_feature_collection, write_boundaries_bytes};

#[doc(inline)]
pub use geom::{
    ALASKA, MapProjection, decimate_ring, geometry_bounds, normalize_antimeridian,
    simplify_geometry,
};

#[doc(inline)]
pub use table::{StateRecord, read_locations_csv, write_locations_csv, write_locations_csv_bytes};

#[doc(inline)]
pub use svg::{PlotOptions, render_map};
