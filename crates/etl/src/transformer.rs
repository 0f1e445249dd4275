// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dataset parsing and field derivation.
//!
//! Every row becomes exactly one `TransformedRecord`. The first invalid row
//! aborts the whole transform; no row is ever skipped.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use evcharge_domain::{DomainError, RawSession, SessionId, StationId, TransformedRecord};
use time::PrimitiveDateTime;
use tracing::{debug, info};

use crate::dataset::{DATASET_HEADERS, parse_timestamp};
use crate::error::EtlError;

/// Column positions of the required fields.
struct Columns {
    session_id: usize,
    station_id: usize,
    start_time: usize,
    end_time: usize,
    energy_kwh: usize,
    success: usize,
}

/// Normalizes a CSV header for case-insensitive, whitespace-tolerant matching.
fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase().replace(' ', "_")
}

/// Maps every required column to its position, reporting all missing ones.
fn validate_headers(headers: &StringRecord) -> Result<Columns, EtlError> {
    let mut header_map: HashMap<String, usize> = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        header_map.entry(normalize_header(header)).or_insert(idx);
    }

    let missing: Vec<String> = DATASET_HEADERS
        .iter()
        .filter(|required| !header_map.contains_key(**required))
        .map(|required| String::from(*required))
        .collect();
    if !missing.is_empty() {
        return Err(EtlError::MissingHeaders(missing));
    }

    let position = |name: &str| header_map.get(name).copied().unwrap_or_default();
    Ok(Columns {
        session_id: position("session_id"),
        station_id: position("station_id"),
        start_time: position("start_time"),
        end_time: position("end_time"),
        energy_kwh: position("energy_kwh"),
        success: position("success"),
    })
}

fn parse_error(row: usize, field: &str, reason: impl ToString) -> EtlError {
    EtlError::Parse {
        row,
        field: String::from(field),
        reason: reason.to_string(),
    }
}

fn required_field<'r>(
    record: &'r StringRecord,
    idx: usize,
    row: usize,
    field: &str,
) -> Result<&'r str, EtlError> {
    record
        .get(idx)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| parse_error(row, field, "required field is missing or empty"))
}

fn parse_success(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Parses one dataset row into a validated session.
fn parse_row(record: &StringRecord, columns: &Columns, row: usize) -> Result<RawSession, EtlError> {
    let session_id: SessionId = required_field(record, columns.session_id, row, "session_id")?
        .parse::<u64>()
        .map_err(|e| parse_error(row, "session_id", e))
        .and_then(|id| SessionId::new(id).map_err(|e| parse_error(row, "session_id", e)))?;

    let station_id: StationId = required_field(record, columns.station_id, row, "station_id")?
        .parse::<u32>()
        .map_err(|e| parse_error(row, "station_id", e))
        .and_then(|id| StationId::new(id).map_err(|e| parse_error(row, "station_id", e)))?;

    let start_raw: &str = required_field(record, columns.start_time, row, "start_time")?;
    let start: PrimitiveDateTime = parse_timestamp(start_raw)
        .map_err(|e| parse_error(row, "start_time", format!("'{start_raw}': {e}")))?;

    let end_raw: &str = required_field(record, columns.end_time, row, "end_time")?;
    let end: PrimitiveDateTime = parse_timestamp(end_raw)
        .map_err(|e| parse_error(row, "end_time", format!("'{end_raw}': {e}")))?;

    let energy_kwh: f64 = required_field(record, columns.energy_kwh, row, "energy_kwh")?
        .parse::<f64>()
        .map_err(|e| parse_error(row, "energy_kwh", e))?;

    let success_raw: &str = required_field(record, columns.success, row, "success")?;
    let success: bool = parse_success(success_raw).ok_or_else(|| {
        parse_error(row, "success", format!("'{success_raw}' is not 0/1"))
    })?;

    RawSession::new(session_id, station_id, start, end, energy_kwh, success).map_err(|e| {
        let field: &str = match e {
            DomainError::EndBeforeStart { .. } => "end_time",
            DomainError::InvalidEnergy(_) => "energy_kwh",
            _ => "record",
        };
        parse_error(row, field, e)
    })
}

/// Parses and transforms a dataset from any reader.
///
/// # Errors
///
/// Returns an error if the header lacks a required column, a row cannot be
/// read, or any row holds an invalid value. No partial result is returned.
pub fn transform_reader<R: Read>(reader: R) -> Result<Vec<TransformedRecord>, EtlError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let headers: StringRecord = csv_reader
        .headers()
        .map_err(|e| EtlError::Read {
            source_name: String::from("header"),
            reason: e.to_string(),
        })?
        .clone();
    let columns: Columns = validate_headers(&headers)?;

    let mut records: Vec<TransformedRecord> = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let row: usize = idx + 1;
        let record: StringRecord = result.map_err(|e| parse_error(row, "record", e))?;
        let session: RawSession = parse_row(&record, &columns, row)?;
        records.push(TransformedRecord::from_raw(session));
    }

    debug!(rows = records.len(), "Parsed dataset rows");
    Ok(records)
}

/// Reads the dataset at `source` and transforms every row.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or any row is invalid.
pub fn transform(source: &Path) -> Result<Vec<TransformedRecord>, EtlError> {
    let source_name: String = source.display().to_string();
    let file: File = File::open(source).map_err(|e| EtlError::Read {
        source_name: source_name.clone(),
        reason: e.to_string(),
    })?;

    let records: Vec<TransformedRecord> = transform_reader(file)?;
    info!(source = %source_name, rows = records.len(), "Transformed session dataset");

    Ok(records)
}
