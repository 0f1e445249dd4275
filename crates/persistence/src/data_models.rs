// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types and conversions at the store boundary.
//!
//! Identifiers are unsigned in the domain and signed in `SQLite`. Every
//! narrowing or widening goes through a checked conversion here instead of
//! an `as` cast.

use evcharge_domain::{DateKey, SessionId, StationId};
use num_traits::ToPrimitive;

use crate::error::PersistenceError;

/// Outcome of a dimension load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DimensionLoadSummary {
    /// Station rows that did not exist before the load.
    pub stations_inserted: usize,
    /// Time rows that did not exist before the load.
    pub dates_inserted: usize,
}

/// A persisted fact row.
#[derive(Debug, Clone, PartialEq)]
pub struct FactRow {
    pub session_id: SessionId,
    pub station_id: StationId,
    pub date_key: DateKey,
    pub energy_kwh: f64,
    pub duration_hours: f64,
    pub success: bool,
}

/// Raw `fact_charging` columns as loaded by Diesel.
pub type FactColumns = (i64, i64, i32, f64, f64, i32);

impl TryFrom<FactColumns> for FactRow {
    type Error = PersistenceError;

    fn try_from(
        (session_id, station_id, date_key, energy_kwh, duration_hours, success): FactColumns,
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            session_id: session_id_from_db(session_id)?,
            station_id: station_id_from_db(station_id)?,
            date_key: DateKey::new(date_key)?,
            energy_kwh,
            duration_hours,
            success: success != 0,
        })
    }
}

/// Narrows a session identifier to the `BigInt` column type.
pub fn session_id_to_db(session_id: SessionId) -> Result<i64, PersistenceError> {
    session_id.value().to_i64().ok_or_else(|| {
        PersistenceError::ConversionFailed(format!(
            "session id {session_id} does not fit in a 64-bit signed column"
        ))
    })
}

/// Widens a station identifier to the `BigInt` column type.
pub fn station_id_to_db(station_id: StationId) -> i64 {
    i64::from(station_id.value())
}

pub fn session_id_from_db(value: i64) -> Result<SessionId, PersistenceError> {
    let id: u64 = value.to_u64().ok_or_else(|| {
        PersistenceError::ConversionFailed(format!("stored session id {value} is negative"))
    })?;
    Ok(SessionId::new(id)?)
}

pub fn station_id_from_db(value: i64) -> Result<StationId, PersistenceError> {
    let id: u32 = value.to_u32().ok_or_else(|| {
        PersistenceError::ConversionFailed(format!("stored station id {value} is out of range"))
    })?;
    Ok(StationId::new(id)?)
}

pub fn count_from_db(value: i64) -> Result<u64, PersistenceError> {
    value
        .to_u64()
        .ok_or_else(|| PersistenceError::ConversionFailed(String::from("Count conversion failed")))
}
