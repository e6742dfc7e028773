//! The locations table: per-state bounding-box records and CSV io.

use std::{fs::File, io::Write, path::Path};

use anyhow::{Context, Result, anyhow};
use geo::Rect;
use polars::{
    frame::DataFrame,
    io::{SerReader, SerWriter},
    prelude::{CsvReader, CsvWriter, NamedFrom},
    series::Series,
};

use crate::io::AtomicFile;

/// One row of the locations table.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    /// Lowercase-hyphenated identifier, e.g. "rhode-island".
    pub name: String,
    /// Display name, e.g. "Rhode Island".
    pub description: String,
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl StateRecord {
    /// Build a record from a state's full-resolution bounds.
    pub fn from_bounds(name: &str, description: &str, bounds: &Rect<f64>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            lat_min: bounds.min().y,
            lat_max: bounds.max().y,
            lon_min: bounds.min().x,
            lon_max: bounds.max().x,
        }
    }
}

/// Assemble the locations table, sorted by state name.
fn to_dataframe(records: &[StateRecord]) -> Result<DataFrame> {
    let mut records: Vec<&StateRecord> = records.iter().collect();
    records.sort_by(|a, b| a.name.cmp(&b.name));

    let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
    let descriptions: Vec<&str> = records.iter().map(|r| r.description.as_str()).collect();
    let lat_mins: Vec<f64> = records.iter().map(|r| r.lat_min).collect();
    let lat_maxs: Vec<f64> = records.iter().map(|r| r.lat_max).collect();
    let lon_mins: Vec<f64> = records.iter().map(|r| r.lon_min).collect();
    let lon_maxs: Vec<f64> = records.iter().map(|r| r.lon_max).collect();

    let df = DataFrame::new(vec![
        Series::new("Name".into(), names).into(),
        Series::new("Description".into(), descriptions).into(),
        Series::new("Latmin".into(), lat_mins).into(),
        Series::new("Latmax".into(), lat_maxs).into(),
        Series::new("Lonmin".into(), lon_mins).into(),
        Series::new("Lonmax".into(), lon_maxs).into(),
    ])?;
    Ok(df)
}

/// Write the locations table to CSV bytes.
pub fn write_locations_csv_bytes(records: &[StateRecord]) -> Result<Vec<u8>> {
    let mut df = to_dataframe(records)?;
    let mut out = Vec::new();
    CsvWriter::new(&mut out)
        .finish(&mut df)
        .context("[table] failed to write CSV to bytes")?;
    Ok(out)
}

/// Write the locations table to `path`, replacing any existing file.
/// The write is staged, so a failure leaves no partial CSV behind.
pub fn write_locations_csv(records: &[StateRecord], path: &Path) -> Result<()> {
    let bytes = write_locations_csv_bytes(records)?;
    let mut sink = AtomicFile::create(path)?;
    sink.write_all(&bytes)
        .with_context(|| format!("[table] failed to write CSV to {}", path.display()))?;
    sink.commit()
}

/// Read a locations table back into records.
pub fn read_locations_csv(path: &Path) -> Result<Vec<StateRecord>> {
    let file = File::open(path)
        .with_context(|| format!("[table] failed to open {}", path.display()))?;
    let df = CsvReader::new(file)
        .finish()
        .with_context(|| format!("[table] failed to parse {}", path.display()))?;

    let names = df.column("Name")?.str()?;
    let descriptions = df.column("Description")?.str()?;
    let lat_mins = df.column("Latmin")?.f64()?;
    let lat_maxs = df.column("Latmax")?.f64()?;
    let lon_mins = df.column("Lonmin")?.f64()?;
    let lon_maxs = df.column("Lonmax")?.f64()?;

    let mut records = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let row = || anyhow!("[table] null value at row {idx} of {}", path.display());
        records.push(StateRecord {
            name: names.get(idx).ok_or_else(row)?.to_string(),
            description: descriptions.get(idx).ok_or_else(row)?.to_string(),
            lat_min: lat_mins.get(idx).ok_or_else(row)?,
            lat_max: lat_maxs.get(idx).ok_or_else(row)?,
            lon_min: lon_mins.get(idx).ok_or_else(row)?,
            lon_max: lon_maxs.get(idx).ok_or_else(row)?,
        });
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;

    fn california() -> StateRecord {
        StateRecord::from_bounds(
            "california",
            "California",
            &Rect::new(
                Coord { x: -124.48, y: 32.53 },
                Coord { x: -114.13, y: 42.01 },
            ),
        )
    }

    fn wyoming() -> StateRecord {
        StateRecord::from_bounds(
            "wyoming",
            "Wyoming",
            &Rect::new(Coord { x: -111.05, y: 41.0 }, Coord { x: -104.05, y: 45.0 }),
        )
    }

    #[test]
    fn from_bounds_orders_min_and_max() {
        let record = california();
        assert!(record.lat_min <= record.lat_max);
        assert!(record.lon_min <= record.lon_max);
        assert_eq!(record.lat_min, 32.53);
        assert_eq!(record.lon_max, -114.13);
    }

    #[test]
    fn csv_has_the_expected_header_and_rows() {
        let bytes = write_locations_csv_bytes(&[california()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Name,Description,Latmin,Latmax,Lonmin,Lonmax"));
        assert_eq!(
            lines.next(),
            Some("california,California,32.53,42.01,-124.48,-114.13"),
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn rows_are_sorted_by_state_name() {
        let bytes = write_locations_csv_bytes(&[wyoming(), california()]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let rows: Vec<&str> = text.lines().skip(1).collect();
        assert!(rows[0].starts_with("california,"));
        assert!(rows[1].starts_with("wyoming,"));
    }

    #[test]
    fn output_is_byte_identical_across_runs() {
        let records = [wyoming(), california()];
        assert_eq!(
            write_locations_csv_bytes(&records).unwrap(),
            write_locations_csv_bytes(&records).unwrap(),
        );
    }

    #[test]
    fn csv_round_trips_through_the_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.csv");
        let records = vec![california(), wyoming()];

        write_locations_csv(&records, &path).unwrap();
        let read_back = read_locations_csv(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn write_overwrites_an_existing_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("locations.csv");

        write_locations_csv(&[california(), wyoming()], &path).unwrap();
        write_locations_csv(&[california()], &path).unwrap();

        assert_eq!(read_locations_csv(&path).unwrap().len(), 1);
    }
}
