// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{DateKey, SessionId, StationId};
use time::PrimitiveDateTime;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// A charging session as generated or read from a dataset.
///
/// Invariants enforced by [`RawSession::new`]:
/// - `end >= start`
/// - `energy_kwh` is finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct RawSession {
    session_id: SessionId,
    station_id: StationId,
    start: PrimitiveDateTime,
    end: PrimitiveDateTime,
    energy_kwh: f64,
    success: bool,
}

impl RawSession {
    /// Creates a new `RawSession`.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session identifier
    /// * `station_id` - The station the session ran on
    /// * `start` - When charging started
    /// * `end` - When charging ended
    /// * `energy_kwh` - Energy delivered
    /// * `success` - Whether the session completed successfully
    ///
    /// # Errors
    ///
    /// Returns an error if the session ends before it starts or if the energy
    /// is negative or not finite.
    pub fn new(
        session_id: SessionId,
        station_id: StationId,
        start: PrimitiveDateTime,
        end: PrimitiveDateTime,
        energy_kwh: f64,
        success: bool,
    ) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::EndBeforeStart {
                session_id: session_id.value(),
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        if !energy_kwh.is_finite() || energy_kwh < 0.0 {
            return Err(DomainError::InvalidEnergy(format!(
                "{energy_kwh} kWh for session {session_id}"
            )));
        }

        Ok(Self {
            session_id,
            station_id,
            start,
            end,
            energy_kwh,
            success,
        })
    }

    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub const fn station_id(&self) -> StationId {
        self.station_id
    }

    #[must_use]
    pub const fn start(&self) -> PrimitiveDateTime {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> PrimitiveDateTime {
        self.end
    }

    #[must_use]
    pub const fn energy_kwh(&self) -> f64 {
        self.energy_kwh
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.success
    }
}

/// A session with the fields derived for loading.
///
/// `duration_hours` is the wall-clock difference between end and start, so a
/// session crossing midnight or a month boundary is measured correctly.
/// `date_key` depends on the start timestamp only.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedRecord {
    session: RawSession,
    duration_hours: f64,
    date_key: DateKey,
}

impl TransformedRecord {
    /// Derives the duration and date key of a session.
    #[must_use]
    pub fn from_raw(session: RawSession) -> Self {
        let elapsed: time::Duration = session.end - session.start;
        let duration_hours: f64 = elapsed.as_seconds_f64() / SECONDS_PER_HOUR;
        let date_key: DateKey = DateKey::from_datetime(session.start);

        Self {
            session,
            duration_hours,
            date_key,
        }
    }

    /// Returns the underlying raw session.
    #[must_use]
    pub const fn session(&self) -> &RawSession {
        &self.session
    }

    #[must_use]
    pub const fn session_id(&self) -> SessionId {
        self.session.session_id
    }

    #[must_use]
    pub const fn station_id(&self) -> StationId {
        self.session.station_id
    }

    #[must_use]
    pub const fn energy_kwh(&self) -> f64 {
        self.session.energy_kwh
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.session.success
    }

    #[must_use]
    pub const fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    #[must_use]
    pub const fn date_key(&self) -> DateKey {
        self.date_key
    }
}
