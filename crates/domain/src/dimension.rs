// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DateKey, StationId};
use serde::{Deserialize, Serialize};
use time::Date;

/// Descriptive attributes of a charging station.
///
/// Stations are only ever known by identifier, so the name and location are
/// synthesized from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationDimension {
    pub station_id: StationId,
    pub name: String,
    pub location: String,
}

impl StationDimension {
    /// Builds the dimension row for a station.
    #[must_use]
    pub fn for_station(station_id: StationId) -> Self {
        Self {
            station_id,
            name: format!("Station {station_id}"),
            location: format!("Location {station_id}"),
        }
    }
}

/// Calendar attributes of a date key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeDimension {
    pub date_key: DateKey,
    pub date: Date,
    /// English weekday name, e.g. `Friday`.
    pub weekday: String,
    /// Month number, 1 through 12.
    pub month: u8,
    pub year: i32,
}

impl TimeDimension {
    /// Builds the dimension row for a date key.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not decode to a calendar date.
    pub fn for_date_key(date_key: DateKey) -> Result<Self, DomainError> {
        let date: Date = date_key.date()?;
        Ok(Self {
            date_key,
            date,
            weekday: date.weekday().to_string(),
            month: u8::from(date.month()),
            year: date.year(),
        })
    }
}
