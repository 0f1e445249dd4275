// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Aggregated reliability indicators.
//!
//! These are the values handed to presentation layers. `success_rate` is
//! already normalized to `[0, 1]` and must not be re-aggregated.

use crate::error::DomainError;
use crate::types::StationId;
use time::Date;

/// Reliability KPIs for a single station.
#[derive(Debug, Clone, PartialEq)]
pub struct StationKpi {
    pub station_id: StationId,
    pub total_sessions: u64,
    pub success_rate: f64,
    pub avg_energy_kwh: f64,
    pub avg_duration_hours: f64,
}

impl StationKpi {
    /// Builds a station KPI from grouped counts and averages.
    ///
    /// # Arguments
    ///
    /// * `station_id` - The station the group belongs to
    /// * `total_sessions` - Number of sessions in the group
    /// * `successful_sessions` - Number of successful sessions in the group
    /// * `avg_energy_kwh` - Mean energy per session
    /// * `avg_duration_hours` - Mean duration per session
    ///
    /// # Errors
    ///
    /// Returns an error if the group is empty or if there are more successful
    /// sessions than sessions.
    pub fn from_counts(
        station_id: StationId,
        total_sessions: u64,
        successful_sessions: u64,
        avg_energy_kwh: f64,
        avg_duration_hours: f64,
    ) -> Result<Self, DomainError> {
        if total_sessions == 0 {
            return Err(DomainError::EmptyKpiGroup(station_id.value()));
        }
        if successful_sessions > total_sessions {
            return Err(DomainError::InconsistentKpiCounts {
                station_id: station_id.value(),
                successes: successful_sessions,
                total: total_sessions,
            });
        }

        // Session counts stay far below 2^52.
        #[allow(clippy::cast_precision_loss)]
        let success_rate: f64 = successful_sessions as f64 / total_sessions as f64;

        Ok(Self {
            station_id,
            total_sessions,
            success_rate,
            avg_energy_kwh,
            avg_duration_hours,
        })
    }
}

/// Mean energy and duration across all stations for one calendar date.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: Date,
    pub avg_energy: f64,
    pub avg_duration: f64,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_success_rate_is_ratio_of_counts() {
        let kpi = StationKpi::from_counts(StationId::new(1).unwrap(), 4, 3, 12.5, 1.0).unwrap();

        assert!((kpi.success_rate - 0.75).abs() < f64::EPSILON);
        assert_eq!(kpi.total_sessions, 4);
    }

    #[test]
    fn test_all_failed_sessions_give_zero_rate() {
        let kpi = StationKpi::from_counts(StationId::new(2).unwrap(), 5, 0, 0.0, 0.5).unwrap();

        assert!(kpi.success_rate.abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let result = StationKpi::from_counts(StationId::new(3).unwrap(), 0, 0, 0.0, 0.0);

        assert_eq!(result, Err(DomainError::EmptyKpiGroup(3)));
    }

    #[test]
    fn test_more_successes_than_sessions_is_rejected() {
        let result = StationKpi::from_counts(StationId::new(3).unwrap(), 2, 3, 1.0, 1.0);

        assert!(matches!(
            result,
            Err(DomainError::InconsistentKpiCounts { .. })
        ));
    }
}
