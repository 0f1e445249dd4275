// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use evcharge_domain::{RawSession, SessionId, StationId, TransformedRecord};
use time::PrimitiveDateTime;

use crate::Persistence;

/// Opens an isolated in-memory store with the star schema applied.
pub fn setup_store() -> Persistence {
    let mut store = Persistence::open_in_memory().expect("Failed to open in-memory store");
    store.ensure_schema().expect("Failed to apply star schema");
    store
}

/// Builds a transformed record from raw field values.
pub fn record(
    session_id: u64,
    station_id: u32,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    energy_kwh: f64,
    success: bool,
) -> TransformedRecord {
    let raw = RawSession::new(
        SessionId::new(session_id).unwrap(),
        StationId::new(station_id).unwrap(),
        start,
        end,
        energy_kwh,
        success,
    )
    .unwrap();
    TransformedRecord::from_raw(raw)
}

/// Loads dimensions and facts for `records`, in that order.
pub fn load_all(store: &mut Persistence, records: &[TransformedRecord]) {
    store.load_dimensions(records).unwrap();
    store.load_facts(records).unwrap();
}
