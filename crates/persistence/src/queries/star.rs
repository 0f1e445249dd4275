// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row counts and lookups on the star-schema tables.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evcharge_domain::{DateKey, SessionId, StationDimension, TimeDimension};
use num_traits::ToPrimitive;

use crate::data_models::{
    FactColumns, FactRow, count_from_db, session_id_to_db, station_id_from_db,
};
use crate::diesel_schema::{dim_station, dim_time, fact_charging};
use crate::error::PersistenceError;
use crate::queries::kpis::parse_stored_date;

/// `(date_key, date, weekday, month, year)`
type TimeColumns = (i32, String, String, i32, i32);

/// Counts rows in the station dimension.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_stations(conn: &mut SqliteConnection) -> Result<u64, PersistenceError> {
    count_from_db(dim_station::table.count().get_result::<i64>(conn)?)
}

/// Counts rows in the time dimension.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_dates(conn: &mut SqliteConnection) -> Result<u64, PersistenceError> {
    count_from_db(dim_time::table.count().get_result::<i64>(conn)?)
}

/// Counts rows in the fact table.
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_facts(conn: &mut SqliteConnection) -> Result<u64, PersistenceError> {
    count_from_db(fact_charging::table.count().get_result::<i64>(conn)?)
}

/// Looks up the fact row of a session.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or the stored row is
/// invalid.
pub fn get_fact(
    conn: &mut SqliteConnection,
    session_id: SessionId,
) -> Result<Option<FactRow>, PersistenceError> {
    let columns: Option<FactColumns> = fact_charging::table
        .find(session_id_to_db(session_id)?)
        .select((
            fact_charging::session_id,
            fact_charging::station_id,
            fact_charging::date_key,
            fact_charging::energy_kwh,
            fact_charging::duration_hours,
            fact_charging::success,
        ))
        .first::<FactColumns>(conn)
        .optional()?;

    columns.map(FactRow::try_from).transpose()
}

/// Lists the station dimension, ordered by station id.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row is
/// invalid.
pub fn list_stations(
    conn: &mut SqliteConnection,
) -> Result<Vec<StationDimension>, PersistenceError> {
    let rows = dim_station::table
        .order(dim_station::station_id.asc())
        .select((
            dim_station::station_id,
            dim_station::name,
            dim_station::location,
        ))
        .load::<(i64, String, String)>(conn)?;

    rows.into_iter()
        .map(|(station_id, name, location)| {
            station_id_from_db(station_id).map(|station_id| StationDimension {
                station_id,
                name,
                location,
            })
        })
        .collect()
}

/// Lists the time dimension, ordered by date key.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored row is
/// invalid.
pub fn list_dates(conn: &mut SqliteConnection) -> Result<Vec<TimeDimension>, PersistenceError> {
    let rows = dim_time::table
        .order(dim_time::date_key.asc())
        .select((
            dim_time::date_key,
            dim_time::date,
            dim_time::weekday,
            dim_time::month,
            dim_time::year,
        ))
        .load::<TimeColumns>(conn)?;

    rows.into_iter().map(time_dimension_from_row).collect()
}

fn time_dimension_from_row(
    (date_key, date, weekday, month, year): TimeColumns,
) -> Result<TimeDimension, PersistenceError> {
    let month: u8 = month.to_u8().ok_or_else(|| {
        PersistenceError::InvalidStoredData(format!("month {month} is out of range"))
    })?;

    Ok(TimeDimension {
        date_key: DateKey::new(date_key)?,
        date: parse_stored_date(&date)?,
        weekday,
        month,
        year,
    })
}
