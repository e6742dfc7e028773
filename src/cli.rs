use clap::{Args, Parser, Subcommand, ValueEnum, ValueHint};
use std::path::PathBuf;

use crate::fetch::US_STATES_URL;

/// State bounding-box table CLI (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "statebounds", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch state boundaries and write the bounding-box table
    Generate(GenerateArgs),

    /// Render the bounding-box table (and optional outlines) to an SVG map
    Plot(PlotArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Output CSV file path (overwritten if present)
    #[arg(long, default_value = "us_states.csv", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Maximum vertices kept per boundary ring (must be positive)
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_vertices: u32,

    /// Source URL for the states FeatureCollection
    #[arg(long, default_value = US_STATES_URL)]
    pub url: String,

    /// Read the FeatureCollection from a local file instead of the network
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub input: Option<PathBuf>,

    /// Also write the simplified boundaries as GeoJSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub boundaries: Option<PathBuf>,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
pub enum Backend {
    /// Equirectangular: longitude/latitude used as planar coordinates
    Plain,
    /// Albers equal-area conic with conterminous-US parameters
    Albers,
}

#[derive(Args, Debug)]
pub struct PlotArgs {
    /// Input CSV produced by `generate`
    #[arg(long, default_value = "us_states.csv", value_hint = ValueHint::FilePath)]
    pub input: PathBuf,

    /// Simplified boundaries GeoJSON to draw as outlines under the boxes
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub boundaries: Option<PathBuf>,

    /// Output SVG file path (overwritten if present)
    #[arg(long, default_value = "us_states.svg", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Plotting backend
    #[arg(long, value_enum, default_value_t = Backend::Albers)]
    pub projection: Backend,

    /// SVG width in pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// SVG margin in pixels
    #[arg(long, default_value_t = 10)]
    pub margin: u32,
}
