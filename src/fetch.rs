use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use reqwest::{blocking::Client, redirect::Policy};

/// Default source for the US states FeatureCollection.
pub const US_STATES_URL: &str =
    "https://raw.githubusercontent.com/PublicaMundi/MappingAPI/master/data/geojson/us-states.json";

/// Fetch a FeatureCollection from `url`. Any non-success status is an error.
pub(crate) fn fetch_feature_collection(url: &str, verbose: u8) -> Result<Vec<u8>> {
    let client = Client::builder()
        .user_agent(concat!("statebounds/", env!("CARGO_PKG_VERSION")))
        .redirect(Policy::limited(10))
        .timeout(Duration::from_secs(30))
        .build()?;

    if verbose > 0 {
        eprintln!("[fetch] GET {url}");
    }

    let resp = client
        .get(url)
        .send()
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("GET {url} returned error status"))?;

    let body = resp
        .bytes()
        .with_context(|| format!("read response body of {url}"))?;
    Ok(body.to_vec())
}

/// Read a locally cached FeatureCollection instead of hitting the network.
pub(crate) fn read_local_feature_collection(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read {}", path.display()))
}
