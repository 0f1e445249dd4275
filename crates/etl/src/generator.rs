// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Synthetic charging session generator.
//!
//! All randomness comes from a single `ChaCha8Rng` seeded from the
//! configuration, so the same seed always yields the same dataset, byte for
//! byte. For every session the draws happen in this order:
//!
//! 1. station, uniform in `[1, station_count]`
//! 2. start day offset, uniform in `[0, 29]`
//! 3. start hour, uniform in `[0, 23]`
//! 4. start minute, uniform in `[0, 59]`
//! 5. duration in minutes, uniform in `[15, 240]`
//! 6. energy intensity, uniform in `[0.5, 0.8)`
//! 7. success, true with probability 0.9
//!
//! Changing this order changes every generated dataset.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use evcharge_domain::{RawSession, SessionId, StationId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use time::macros::datetime;
use time::{Duration, PrimitiveDateTime};
use tracing::{debug, info};

use crate::dataset::{DATASET_HEADERS, format_timestamp};
use crate::error::EtlError;

const WINDOW_DAYS: u8 = 30;
const MIN_DURATION_MINUTES: u16 = 15;
const MAX_DURATION_MINUTES: u16 = 240;
const MIN_INTENSITY: f64 = 0.5;
const MAX_INTENSITY: f64 = 0.8;
const ENERGY_SCALE: f64 = 10.0;
const SUCCESS_PROBABILITY: f64 = 0.9;

/// Parameters for a generated dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub session_count: u64,
    pub station_count: u32,
    pub seed: u64,
}

impl GeneratorConfig {
    /// Creates a validated generator configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either count is zero.
    pub fn new(session_count: u64, station_count: u32, seed: u64) -> Result<Self, EtlError> {
        if session_count == 0 {
            return Err(EtlError::InvalidConfig(String::from(
                "session count must be greater than 0",
            )));
        }
        if station_count == 0 {
            return Err(EtlError::InvalidConfig(String::from(
                "station count must be greater than 0",
            )));
        }

        Ok(Self {
            session_count,
            station_count,
            seed,
        })
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            session_count: 500,
            station_count: 10,
            seed: 42,
        }
    }
}

/// Start of the 30-day window every generated session begins in.
#[must_use]
pub const fn session_epoch() -> PrimitiveDateTime {
    datetime!(2025-01-01 0:00)
}

/// Draws one session from `rng`, consuming exactly seven draws.
///
/// # Errors
///
/// Returns an error if `station_count` is zero or the drawn values violate a
/// session invariant.
pub fn draw_session<R: Rng>(
    rng: &mut R,
    session_id: SessionId,
    station_count: u32,
) -> Result<RawSession, EtlError> {
    if station_count == 0 {
        return Err(EtlError::InvalidConfig(String::from(
            "station count must be greater than 0",
        )));
    }

    let station: u32 = rng.gen_range(1..=station_count);
    let day: u8 = rng.gen_range(0..WINDOW_DAYS);
    let hour: u8 = rng.gen_range(0..24);
    let minute: u8 = rng.gen_range(0..60);
    let duration_minutes: u16 = rng.gen_range(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES);
    let intensity: f64 = rng.gen_range(MIN_INTENSITY..MAX_INTENSITY);
    let success: bool = rng.gen_bool(SUCCESS_PROBABILITY);

    let start: PrimitiveDateTime = session_epoch()
        + Duration::days(i64::from(day))
        + Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute));
    let end: PrimitiveDateTime = start + Duration::minutes(i64::from(duration_minutes));
    let energy_kwh: f64 =
        round_to_cents(intensity * (f64::from(duration_minutes) / 60.0) * ENERGY_SCALE);

    let station_id: StationId = StationId::new(station).map_err(invalid_config)?;
    RawSession::new(session_id, station_id, start, end, energy_kwh, success)
        .map_err(invalid_config)
}

/// Generates `config.session_count` sessions with identifiers `1..=n`.
///
/// # Errors
///
/// Returns an error if a drawn session is invalid.
pub fn generate_sessions<R: Rng>(
    rng: &mut R,
    config: &GeneratorConfig,
) -> Result<Vec<RawSession>, EtlError> {
    (1..=config.session_count)
        .map(|index| {
            let session_id: SessionId = SessionId::new(index).map_err(invalid_config)?;
            draw_session(rng, session_id, config.station_count)
        })
        .collect()
}

/// Writes a generated dataset to `writer`.
///
/// Returns the number of sessions written.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn generate_to_writer<W: Write>(writer: W, config: &GeneratorConfig) -> Result<u64, EtlError> {
    generate_into(writer, config, "writer")
}

/// Generates a synthetic dataset and writes it to `target`.
///
/// # Arguments
///
/// * `target` - Path of the CSV file to create (truncated if it exists)
/// * `session_count` - Number of sessions, must be positive
/// * `station_count` - Number of stations to spread sessions over, must be positive
/// * `seed` - Seed for the pseudorandom generator
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the target cannot be
/// written.
pub fn generate(
    target: &Path,
    session_count: u64,
    station_count: u32,
    seed: u64,
) -> Result<u64, EtlError> {
    let config: GeneratorConfig = GeneratorConfig::new(session_count, station_count, seed)?;
    let target_name: String = target.display().to_string();

    let file: File = File::create(target).map_err(|e| EtlError::Generation {
        target: target_name.clone(),
        reason: e.to_string(),
    })?;

    let written: u64 = generate_into(BufWriter::new(file), &config, &target_name)?;
    info!(
        target = %target_name,
        sessions = written,
        stations = config.station_count,
        seed = config.seed,
        "Generated synthetic session dataset"
    );

    Ok(written)
}

fn generate_into<W: Write>(
    writer: W,
    config: &GeneratorConfig,
    target_name: &str,
) -> Result<u64, EtlError> {
    let write_error = |e: &dyn std::fmt::Display| EtlError::Generation {
        target: target_name.to_string(),
        reason: e.to_string(),
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer
        .write_record(DATASET_HEADERS)
        .map_err(|e| write_error(&e))?;

    let sessions: Vec<RawSession> =
        generate_sessions(&mut ChaCha8Rng::seed_from_u64(config.seed), config)?;
    for session in &sessions {
        csv_writer
            .write_record(session_row(session).map_err(|e| write_error(&e))?)
            .map_err(|e| write_error(&e))?;
    }

    csv_writer.flush().map_err(|e| write_error(&e))?;
    debug!(sessions = config.session_count, "Flushed dataset writer");

    Ok(config.session_count)
}

fn session_row(session: &RawSession) -> Result<[String; 6], time::error::Format> {
    Ok([
        session.session_id().to_string(),
        session.station_id().to_string(),
        format_timestamp(session.start())?,
        format_timestamp(session.end())?,
        format!("{:.2}", session.energy_kwh()),
        String::from(if session.success() { "1" } else { "0" }),
    ])
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn invalid_config(err: evcharge_domain::DomainError) -> EtlError {
    EtlError::InvalidConfig(err.to_string())
}
