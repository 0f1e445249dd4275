// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use diesel::SqliteConnection;
use diesel::prelude::*;
use evcharge_domain::{DateKey, StationDimension, StationId, TimeDimension, TransformedRecord};
use tracing::{debug, info};

use crate::data_models::{DimensionLoadSummary, station_id_to_db};
use crate::diesel_schema::{dim_station, dim_time};
use crate::error::PersistenceError;

/// Inserts the station and time dimension rows referenced by `records`.
///
/// Rows that already exist are left untouched (`INSERT OR IGNORE`), so
/// loading the same records twice leaves exactly one row per station and
/// date key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `records` - The transformed records whose dimensions should exist
///
/// # Errors
///
/// Returns an error if any insert fails. The whole batch is rolled back.
pub fn load_dimensions(
    conn: &mut SqliteConnection,
    records: &[TransformedRecord],
) -> Result<DimensionLoadSummary, PersistenceError> {
    let stations: BTreeSet<StationId> = records.iter().map(TransformedRecord::station_id).collect();
    let date_keys: BTreeSet<DateKey> = records.iter().map(TransformedRecord::date_key).collect();

    debug!(
        stations = stations.len(),
        date_keys = date_keys.len(),
        "Loading dimensions"
    );

    let summary: DimensionLoadSummary = conn.transaction::<_, PersistenceError, _>(|conn| {
        let mut summary: DimensionLoadSummary = DimensionLoadSummary::default();

        for station_id in &stations {
            summary.stations_inserted += insert_station(conn, *station_id)?;
        }
        for date_key in &date_keys {
            summary.dates_inserted += insert_date(conn, *date_key)?;
        }

        Ok(summary)
    })?;

    info!(
        stations_inserted = summary.stations_inserted,
        dates_inserted = summary.dates_inserted,
        "Loaded dimensions"
    );

    Ok(summary)
}

fn insert_station(
    conn: &mut SqliteConnection,
    station_id: StationId,
) -> Result<usize, PersistenceError> {
    let row: StationDimension = StationDimension::for_station(station_id);

    Ok(diesel::insert_or_ignore_into(dim_station::table)
        .values((
            dim_station::station_id.eq(station_id_to_db(row.station_id)),
            dim_station::name.eq(&row.name),
            dim_station::location.eq(&row.location),
        ))
        .execute(conn)?)
}

fn insert_date(conn: &mut SqliteConnection, date_key: DateKey) -> Result<usize, PersistenceError> {
    let row: TimeDimension = TimeDimension::for_date_key(date_key)?;

    Ok(diesel::insert_or_ignore_into(dim_time::table)
        .values((
            dim_time::date_key.eq(row.date_key.value()),
            dim_time::date.eq(row.date.to_string()),
            dim_time::weekday.eq(&row.weekday),
            dim_time::month.eq(i32::from(row.month)),
            dim_time::year.eq(row.year),
        ))
        .execute(conn)?)
}
