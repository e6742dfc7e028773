//! Forward projections for the plotting backends.

use geo::Coord;

// Conventional conterminous-US Albers parameters.
const STANDARD_PARALLEL_1: f64 = 29.5;
const STANDARD_PARALLEL_2: f64 = 45.5;
const ORIGIN_LAT: f64 = 23.0;
const ORIGIN_LON: f64 = -96.0;

/// Forward projection from lon/lat degrees to planar map coordinates
/// (x grows east, y grows north).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapProjection {
    /// Equirectangular: degrees used as planar coordinates directly.
    Plain,
    /// Spherical Albers equal-area conic.
    Albers,
}

impl MapProjection {
    pub fn forward(&self, coord: Coord<f64>) -> Coord<f64> {
        match self {
            MapProjection::Plain => coord,
            MapProjection::Albers => albers_forward(coord),
        }
    }
}

fn albers_forward(coord: Coord<f64>) -> Coord<f64> {
    let phi1 = STANDARD_PARALLEL_1.to_radians();
    let phi2 = STANDARD_PARALLEL_2.to_radians();
    let phi0 = ORIGIN_LAT.to_radians();
    let lam0 = ORIGIN_LON.to_radians();
    let phi = coord.y.to_radians();
    let lam = coord.x.to_radians();

    let n = (phi1.sin() + phi2.sin()) / 2.0;
    let c = phi1.cos().powi(2) + 2.0 * n * phi1.sin();
    let rho = (c - 2.0 * n * phi.sin()).sqrt() / n;
    let rho0 = (c - 2.0 * n * phi0.sin()).sqrt() / n;
    let theta = n * (lam - lam0);

    Coord {
        x: rho * theta.sin(),
        y: rho0 - rho * theta.cos(),
    }
}
