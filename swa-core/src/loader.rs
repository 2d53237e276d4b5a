use crate::ephemeris::{self, OrbitSample};
use crate::error::{Result, SwaError};
use crate::timeseries::TimeSeriesTable;
use chrono::DateTime;
use csv::ReaderBuilder;
use itertools::Itertools;
use log::info;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

const EPHEMERIS_HEADER: [&str; 4] = ["epoch", "x_gse_km", "y_gse_km", "z_gse_km"];

/// Parse a measurement table from CSV.
///
/// Expected layout: a header row `epoch,<col1>,<col2>,...` followed by one
/// row per sample. Epoch cells are either integer nanoseconds since the Unix
/// epoch or RFC 3339 timestamps; every other cell is a float.
pub fn parse_table<R: Read>(reader: R) -> Result<TimeSeriesTable> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.get(0).map(str::trim) != Some("epoch") {
        return Err(SwaError::InvalidFormat(
            "first column of a measurement table must be 'epoch'".to_string(),
        ));
    }
    let names: Vec<String> = headers.iter().skip(1).map(|h| h.trim().to_string()).collect();
    if let Some(name) = names.iter().duplicates().next() {
        return Err(SwaError::InvalidFormat(format!(
            "duplicate column '{}'",
            name
        )));
    }

    let mut epochs_ns = Vec::new();
    let mut values: Vec<Vec<f64>> = vec![Vec::new(); names.len()];
    for (row, record_result) in rdr.records().enumerate() {
        let record = record_result?;
        let epoch_cell = record.get(0).ok_or_else(|| {
            SwaError::InvalidFormat(format!("row {} has no epoch cell", row))
        })?;
        epochs_ns.push(parse_epoch(epoch_cell)?);
        for ((name, column), cell) in names.iter().zip(&mut values).zip(record.iter().skip(1)) {
            column.push(parse_value(cell, name, row)?);
        }
    }

    let columns: BTreeMap<String, Vec<f64>> = names.into_iter().zip(values).collect();
    TimeSeriesTable::new(epochs_ns, columns)
}

/// Read a measurement table from a CSV file.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<TimeSeriesTable> {
    let path = path.as_ref();
    info!("loading measurement table from {}", path.display());
    let table = parse_table(File::open(path)?)?;
    info!(
        "loaded {} samples across {} columns",
        table.len(),
        table.columns().len()
    );
    Ok(table)
}

/// Parse a spacecraft trajectory from CSV.
///
/// Expected layout: the header row `epoch,x_gse_km,y_gse_km,z_gse_km`
/// followed by one row per sample. A file without samples cannot support any
/// trajectory analysis and is rejected.
pub fn parse_ephemeris<R: Read>(reader: R) -> Result<Vec<OrbitSample>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let headers = rdr.headers()?.clone();
    let found: Vec<&str> = headers.iter().map(str::trim).collect();
    if found != EPHEMERIS_HEADER {
        return Err(SwaError::InvalidFormat(format!(
            "ephemeris header must be '{}', found '{}'",
            EPHEMERIS_HEADER.join(","),
            found.join(",")
        )));
    }

    let mut epochs_ns = Vec::new();
    let mut x_km = Vec::new();
    let mut y_km = Vec::new();
    let mut z_km = Vec::new();
    for (row, record_result) in rdr.records().enumerate() {
        let record = record_result?;
        let mut cells = record.iter();
        let epoch_cell = cells.next().ok_or_else(|| {
            SwaError::InvalidFormat(format!("row {} has no epoch cell", row))
        })?;
        epochs_ns.push(parse_epoch(epoch_cell)?);
        for (name, axis) in [
            ("x_gse_km", &mut x_km),
            ("y_gse_km", &mut y_km),
            ("z_gse_km", &mut z_km),
        ] {
            let cell = cells.next().ok_or_else(|| {
                SwaError::InvalidFormat(format!("row {} is missing '{}'", row, name))
            })?;
            axis.push(parse_value(cell, name, row)?);
        }
    }

    if epochs_ns.is_empty() {
        return Err(SwaError::DegenerateTrajectory(
            "ephemeris contains no samples".to_string(),
        ));
    }
    ephemeris::from_columns(&epochs_ns, &x_km, &y_km, &z_km)
}

/// Read a spacecraft trajectory from a CSV file.
pub fn load_ephemeris<P: AsRef<Path>>(path: P) -> Result<Vec<OrbitSample>> {
    let path = path.as_ref();
    info!("loading ephemeris from {}", path.display());
    let samples = parse_ephemeris(File::open(path)?)?;
    info!("loaded {} trajectory samples", samples.len());
    Ok(samples)
}

fn parse_epoch(cell: &str) -> Result<i64> {
    let trimmed = cell.trim();
    if let Ok(nanoseconds) = trimmed.parse::<i64>() {
        return Ok(nanoseconds);
    }
    let stamp = DateTime::parse_from_rfc3339(trimmed)
        .map_err(|e| SwaError::EpochParse(format!("'{}': {}", trimmed, e)))?;
    stamp.timestamp_nanos_opt().ok_or_else(|| {
        SwaError::EpochParse(format!("'{}' does not fit the nanosecond range", trimmed))
    })
}

fn parse_value(cell: &str, column: &str, row: usize) -> Result<f64> {
    cell.trim().parse::<f64>().map_err(|_| {
        SwaError::InvalidFormat(format!(
            "row {}: '{}' is not a number for column '{}'",
            row, cell, column
        ))
    })
}
