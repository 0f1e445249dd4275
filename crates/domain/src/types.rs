// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::{Date, Month, PrimitiveDateTime};

/// Identifies a single charging session.
///
/// Session identifiers are positive; zero is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

impl SessionId {
    /// Creates a new `SessionId`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is zero.
    pub const fn new(value: u64) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidSessionId(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a charging station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(u32);

impl StationId {
    /// Creates a new `StationId`.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is zero.
    pub const fn new(value: u32) -> Result<Self, DomainError> {
        if value == 0 {
            return Err(DomainError::InvalidStationId(value));
        }
        Ok(Self(value))
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for StationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A calendar date encoded as a `YYYYMMDD` integer.
///
/// The key is the primary key of the time dimension. Every key maps to
/// exactly one calendar date and vice versa; keys that do not decode to a
/// real date are rejected by [`DateKey::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateKey(i32);

impl DateKey {
    /// Creates a `DateKey` from its encoded `YYYYMMDD` value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not decode to a valid calendar date.
    pub fn new(value: i32) -> Result<Self, DomainError> {
        decode(value).map(|_| Self(value))
    }

    /// Encodes a calendar date.
    #[must_use]
    pub fn from_date(date: Date) -> Self {
        let month: i32 = i32::from(u8::from(date.month()));
        let day: i32 = i32::from(date.day());
        Self(date.year() * 10_000 + month * 100 + day)
    }

    /// Encodes the calendar date of a timestamp, ignoring the time of day.
    #[must_use]
    pub fn from_datetime(timestamp: PrimitiveDateTime) -> Self {
        Self::from_date(timestamp.date())
    }

    /// Returns the encoded `YYYYMMDD` value.
    #[must_use]
    pub const fn value(&self) -> i32 {
        self.0
    }

    /// Decodes the key back to its calendar date.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not decode to a valid calendar date.
    /// This cannot happen for keys built through this type's constructors.
    pub fn date(&self) -> Result<Date, DomainError> {
        decode(self.0)
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn decode(value: i32) -> Result<Date, DomainError> {
    if value <= 0 {
        return Err(DomainError::InvalidDateKey(value));
    }

    let year: i32 = value / 10_000;
    let month: Month = u8::try_from((value / 100) % 100)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .ok_or(DomainError::InvalidDateKey(value))?;
    let day: u8 = u8::try_from(value % 100).map_err(|_| DomainError::InvalidDateKey(value))?;

    Date::from_calendar_date(year, month, day).map_err(|_| DomainError::InvalidDateKey(value))
}
