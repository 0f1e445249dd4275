// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Session identifier is zero.
    InvalidSessionId(u64),
    /// Station identifier is zero.
    InvalidStationId(u32),
    /// Date key does not encode a valid calendar date.
    InvalidDateKey(i32),
    /// Energy is negative or not a finite number.
    InvalidEnergy(String),
    /// The session ends before it starts.
    EndBeforeStart {
        /// The offending session.
        session_id: u64,
        /// The start timestamp as written.
        start: String,
        /// The end timestamp as written.
        end: String,
    },
    /// A KPI was requested for a group without sessions.
    EmptyKpiGroup(u32),
    /// More successful sessions than total sessions in a KPI group.
    InconsistentKpiCounts {
        /// The station the counts belong to.
        station_id: u32,
        /// Successful sessions.
        successes: u64,
        /// Total sessions.
        total: u64,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSessionId(id) => {
                write!(f, "Invalid session id: {id}. Must be greater than 0")
            }
            Self::InvalidStationId(id) => {
                write!(f, "Invalid station id: {id}. Must be greater than 0")
            }
            Self::InvalidDateKey(key) => {
                write!(f, "Invalid date key: {key}. Must be a YYYYMMDD calendar date")
            }
            Self::InvalidEnergy(msg) => write!(f, "Invalid energy: {msg}"),
            Self::EndBeforeStart {
                session_id,
                start,
                end,
            } => {
                write!(
                    f,
                    "Session {session_id} ends at {end}, before its start at {start}"
                )
            }
            Self::EmptyKpiGroup(station_id) => {
                write!(f, "Station {station_id} has no sessions to aggregate")
            }
            Self::InconsistentKpiCounts {
                station_id,
                successes,
                total,
            } => {
                write!(
                    f,
                    "Station {station_id} reports {successes} successful sessions out of {total}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
