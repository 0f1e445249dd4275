// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evcharge_domain::TransformedRecord;
use tracing::{debug, info};

use crate::data_models::{session_id_to_db, station_id_to_db};
use crate::diesel_schema::fact_charging;
use crate::error::PersistenceError;

/// Upserts one fact row per record, keyed by session id.
///
/// A session that is already stored is replaced in full (`REPLACE INTO`),
/// never merged.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `records` - The transformed records to store
///
/// # Returns
///
/// The number of records written.
///
/// # Errors
///
/// Returns an error if a session id does not fit the column type or if a
/// record references a station or date key missing from the dimensions
/// (`PersistenceError::ForeignKeyViolation`). The whole batch is rolled back.
pub fn load_facts(
    conn: &mut SqliteConnection,
    records: &[TransformedRecord],
) -> Result<usize, PersistenceError> {
    debug!(records = records.len(), "Loading facts");

    let written: usize = conn.transaction::<_, PersistenceError, _>(|conn| {
        for record in records {
            diesel::replace_into(fact_charging::table)
                .values((
                    fact_charging::session_id.eq(session_id_to_db(record.session_id())?),
                    fact_charging::station_id.eq(station_id_to_db(record.station_id())),
                    fact_charging::date_key.eq(record.date_key().value()),
                    fact_charging::energy_kwh.eq(record.energy_kwh()),
                    fact_charging::duration_hours.eq(record.duration_hours()),
                    fact_charging::success.eq(i32::from(record.success())),
                ))
                .execute(conn)?;
        }

        Ok(records.len())
    })?;

    info!(facts = written, "Loaded facts");
    Ok(written)
}
