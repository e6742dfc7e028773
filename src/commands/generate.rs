use std::io::Write;

use anyhow::Result;

use crate::cli::{Cli, GenerateArgs};
use crate::geojson::{self, StateFeature};
use crate::io::AtomicFile;
use crate::table::{self, StateRecord};
use crate::{fetch, geom};

pub fn run(cli: &Cli, args: &GenerateArgs) -> Result<()> {
    let bytes = match &args.input {
        Some(path) => {
            if cli.verbose > 0 {
                eprintln!("[generate] reading {}", path.display());
            }
            fetch::read_local_feature_collection(path)?
        }
        None => fetch::fetch_feature_collection(&args.url, cli.verbose)?,
    };

    let mut states = geojson::parse_feature_collection(&bytes)?;
    if cli.verbose > 0 {
        eprintln!("[generate] {} states/territories parsed", states.len());
    }

    // Alaska's longitudes are normalized before any bounds are taken.
    for state in states.iter_mut().filter(|state| state.name == geom::ALASKA) {
        geom::normalize_antimeridian(&mut state.geometry);
    }

    let max_vertices = args.max_vertices as usize;
    let mut records = Vec::with_capacity(states.len());
    let mut boundaries = Vec::with_capacity(states.len());
    for state in &states {
        let Some(bounds) = geom::geometry_bounds(&state.geometry) else {
            eprintln!("[generate] skipping {}: empty geometry", state.name);
            continue;
        };
        if cli.verbose > 1 {
            eprintln!(
                "[generate] {}: bounds [{:.2}, {:.2}] x [{:.2}, {:.2}]",
                state.description,
                bounds.min().y,
                bounds.max().y,
                bounds.min().x,
                bounds.max().x,
            );
        }

        records.push(StateRecord::from_bounds(&state.name, &state.description, &bounds));
        boundaries.push(StateFeature {
            geometry: geom::simplify_geometry(&state.geometry, max_vertices),
            ..state.clone()
        });
    }

    table::write_locations_csv(&records, &args.output)?;
    println!("Wrote {} states -> {}", records.len(), args.output.display());

    if let Some(path) = &args.boundaries {
        boundaries.sort_by(|a, b| a.name.cmp(&b.name));
        let bytes = geojson::write_boundaries_bytes(&boundaries)?;
        let mut sink = AtomicFile::create(path)?;
        sink.write_all(&bytes)?;
        sink.commit()?;
        println!("Wrote boundaries -> {}", path.display());
    }

    Ok(())
}
