use std::io::Write;

use anyhow::{Context, Result};

use crate::cli::{Backend, Cli, PlotArgs};
use crate::geom::MapProjection;
use crate::io::AtomicFile;
use crate::svg::{self, PlotOptions};
use crate::{fetch, geojson, table};

pub fn run(cli: &Cli, args: &PlotArgs) -> Result<()> {
    let records = table::read_locations_csv(&args.input)?;
    if cli.verbose > 0 {
        eprintln!("[plot] {} records from {}", records.len(), args.input.display());
    }

    let outlines = match &args.boundaries {
        Some(path) => {
            if cli.verbose > 0 {
                eprintln!("[plot] outlines from {}", path.display());
            }
            let bytes = fetch::read_local_feature_collection(path)?;
            geojson::parse_feature_collection(&bytes)?
        }
        None => Vec::new(),
    };

    let projection = match args.projection {
        Backend::Plain => MapProjection::Plain,
        Backend::Albers => MapProjection::Albers,
    };

    let options = PlotOptions {
        width: args.width as f64,
        margin: args.margin as f64,
        projection,
    };
    let bytes = svg::render_map(&records, &outlines, &options)?;

    let mut sink = AtomicFile::create(&args.output)?;
    sink.write_all(&bytes)
        .with_context(|| format!("[plot] failed to write {}", args.output.display()))?;
    sink.commit()?;
    println!("Rendered {} states -> {}", records.len(), args.output.display());

    Ok(())
}
