// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dataset file layout shared by the generator and the transformer.

use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Column headers, in the order the generator writes them.
pub const DATASET_HEADERS: [&str; 6] = [
    "session_id",
    "station_id",
    "start_time",
    "end_time",
    "energy_kwh",
    "success",
];

const MINUTE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]");

const SECOND_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Formats a timestamp the way the dataset stores it (`YYYY-MM-DDTHH:MM`).
///
/// # Errors
///
/// Returns an error if the timestamp cannot be formatted.
pub fn format_timestamp(timestamp: PrimitiveDateTime) -> Result<String, time::error::Format> {
    timestamp.format(MINUTE_FORMAT)
}

/// Parses a dataset timestamp.
///
/// Minute precision is the dataset format; second precision is accepted as
/// well for hand-edited files.
///
/// # Errors
///
/// Returns an error if the value matches neither format.
pub fn parse_timestamp(value: &str) -> Result<PrimitiveDateTime, time::error::Parse> {
    PrimitiveDateTime::parse(value, MINUTE_FORMAT)
        .or_else(|_| PrimitiveDateTime::parse(value, SECOND_FORMAT))
}
