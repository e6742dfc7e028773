mod bbox;
mod proj;
mod simplify;

pub use bbox::{ALASKA, geometry_bounds, normalize_antimeridian};
pub use proj::MapProjection;
pub use simplify::{decimate_ring, simplify_geometry};
