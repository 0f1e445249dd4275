// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! KPI aggregation queries.
//!
//! Grouping and averaging happen in `SQLite`; only the success ratio is
//! computed here, from the grouped counts.

use diesel::SqliteConnection;
use diesel::dsl::{avg, count, sum};
use diesel::prelude::*;
use evcharge_domain::{DailyPoint, StationKpi};
use time::Date;
use time::macros::format_description;
use tracing::debug;

use crate::data_models::{count_from_db, station_id_from_db};
use crate::diesel_schema::{dim_station, dim_time, fact_charging};
use crate::error::PersistenceError;

/// `(station_id, sessions, successes, avg energy, avg duration)`
type StationKpiColumns = (i64, i64, Option<i64>, Option<f64>, Option<f64>);

/// `(date, avg energy, avg duration)`
type DailyPointColumns = (String, Option<f64>, Option<f64>);

/// Computes reliability KPIs for every station that has facts.
///
/// Returns one entry per station, ordered by station id. Stations without
/// facts are absent.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored value is
/// out of range.
pub fn station_kpis(conn: &mut SqliteConnection) -> Result<Vec<StationKpi>, PersistenceError> {
    let rows = fact_charging::table
        .inner_join(dim_station::table)
        .group_by(dim_station::station_id)
        .order(dim_station::station_id.asc())
        .select((
            dim_station::station_id,
            count(fact_charging::session_id),
            sum(fact_charging::success),
            avg(fact_charging::energy_kwh),
            avg(fact_charging::duration_hours),
        ))
        .load::<StationKpiColumns>(conn)?;

    debug!(stations = rows.len(), "Aggregated station KPIs");

    rows.into_iter().map(station_kpi_from_row).collect()
}

/// Computes mean energy and duration per calendar date across all stations.
///
/// Returns one entry per date that has facts, ordered by date.
///
/// # Errors
///
/// Returns an error if the database cannot be queried or a stored date
/// cannot be parsed.
pub fn daily_series(conn: &mut SqliteConnection) -> Result<Vec<DailyPoint>, PersistenceError> {
    let rows = fact_charging::table
        .inner_join(dim_time::table)
        .group_by(dim_time::date)
        .order(dim_time::date.asc())
        .select((
            dim_time::date,
            avg(fact_charging::energy_kwh),
            avg(fact_charging::duration_hours),
        ))
        .load::<DailyPointColumns>(conn)?;

    debug!(dates = rows.len(), "Aggregated daily series");

    rows.into_iter().map(daily_point_from_row).collect()
}

fn station_kpi_from_row(
    (station_id, total, successes, avg_energy, avg_duration): StationKpiColumns,
) -> Result<StationKpi, PersistenceError> {
    Ok(StationKpi::from_counts(
        station_id_from_db(station_id)?,
        count_from_db(total)?,
        count_from_db(successes.unwrap_or_default())?,
        avg_energy.unwrap_or_default(),
        avg_duration.unwrap_or_default(),
    )?)
}

fn daily_point_from_row(
    (date, avg_energy, avg_duration): DailyPointColumns,
) -> Result<DailyPoint, PersistenceError> {
    Ok(DailyPoint {
        date: parse_stored_date(&date)?,
        avg_energy: avg_energy.unwrap_or_default(),
        avg_duration: avg_duration.unwrap_or_default(),
    })
}

/// Parses an ISO `YYYY-MM-DD` date from `dim_time`.
pub fn parse_stored_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::InvalidStoredData(format!("date '{value}': {e}")))
}
