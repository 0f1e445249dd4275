// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rendering of aggregated KPIs for the terminal.

use evcharge_domain::{DailyPoint, StationKpi};
use serde::Serialize;

/// Everything the aggregator produces for one store.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub station_kpis: Vec<StationKpi>,
    pub daily_series: Vec<DailyPoint>,
}

/// JSON view of a station KPI row.
#[derive(Debug, Serialize)]
struct StationKpiView {
    station_id: u32,
    total_sessions: u64,
    success_rate: f64,
    avg_energy_kwh: f64,
    avg_duration_hours: f64,
}

/// JSON view of a daily point. Dates are ISO `YYYY-MM-DD` strings.
#[derive(Debug, Serialize)]
struct DailyPointView {
    date: String,
    avg_energy: f64,
    avg_duration: f64,
}

#[derive(Debug, Serialize)]
struct ReportView {
    station_kpis: Vec<StationKpiView>,
    daily_series: Vec<DailyPointView>,
}

impl From<&StationKpi> for StationKpiView {
    fn from(kpi: &StationKpi) -> Self {
        Self {
            station_id: kpi.station_id.value(),
            total_sessions: kpi.total_sessions,
            success_rate: kpi.success_rate,
            avg_energy_kwh: kpi.avg_energy_kwh,
            avg_duration_hours: kpi.avg_duration_hours,
        }
    }
}

impl From<&DailyPoint> for DailyPointView {
    fn from(point: &DailyPoint) -> Self {
        Self {
            date: point.date.to_string(),
            avg_energy: point.avg_energy,
            avg_duration: point.avg_duration,
        }
    }
}

impl Report {
    /// Renders the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let view = ReportView {
            station_kpis: self.station_kpis.iter().map(StationKpiView::from).collect(),
            daily_series: self.daily_series.iter().map(DailyPointView::from).collect(),
        };
        serde_json::to_string_pretty(&view)
    }

    /// Renders the report as two plain-text tables.
    #[must_use]
    pub fn to_table(&self) -> String {
        let mut lines: Vec<String> = vec![
            String::from("Station reliability"),
            format!(
                "{:>8}  {:>8}  {:>12}  {:>14}  {:>14}",
                "station", "sessions", "success_rate", "avg_energy_kwh", "avg_duration_h"
            ),
        ];
        lines.extend(self.station_kpis.iter().map(|kpi| {
            format!(
                "{:>8}  {:>8}  {:>12.3}  {:>14.2}  {:>14.2}",
                kpi.station_id.value(),
                kpi.total_sessions,
                kpi.success_rate,
                kpi.avg_energy_kwh,
                kpi.avg_duration_hours
            )
        }));

        lines.push(String::new());
        lines.push(String::from("Daily averages"));
        lines.push(format!(
            "{:<10}  {:>10}  {:>12}",
            "date", "avg_energy", "avg_duration"
        ));
        lines.extend(self.daily_series.iter().map(|point| {
            format!(
                "{:<10}  {:>10.2}  {:>12.2}",
                point.date.to_string(),
                point.avg_energy,
                point.avg_duration
            )
        }));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used)]

    use super::*;
    use evcharge_domain::StationId;
    use time::macros::date;

    fn sample_report() -> Report {
        Report {
            station_kpis: vec![
                StationKpi::from_counts(StationId::new(1).unwrap(), 3, 2, 10.0, 7.0 / 6.0)
                    .unwrap(),
                StationKpi::from_counts(StationId::new(4).unwrap(), 1, 1, 5.5, 0.25).unwrap(),
            ],
            daily_series: vec![DailyPoint {
                date: date!(2025 - 01 - 07),
                avg_energy: 12.5,
                avg_duration: 1.75,
            }],
        }
    }

    #[test]
    fn test_table_lists_every_row() {
        let table = sample_report().to_table();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], "Station reliability");
        assert!(lines[2].trim_start().starts_with("1 "));
        assert!(lines[2].contains("0.667"));
        assert!(lines[2].contains("10.00"));
        assert!(lines[3].trim_start().starts_with("4 "));
        assert!(table.contains("Daily averages"));
        assert!(table.contains("2025-01-07"));
        assert!(table.contains("12.50"));
    }

    #[test]
    fn test_json_uses_plain_values() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["station_kpis"][0]["station_id"], 1);
        assert_eq!(value["station_kpis"][0]["total_sessions"], 3);
        assert_eq!(value["station_kpis"][1]["station_id"], 4);
        assert_eq!(value["daily_series"][0]["date"], "2025-01-07");
        assert_eq!(value["daily_series"][0]["avg_energy"], 12.5);
    }

    #[test]
    fn test_empty_report_renders_headers_only() {
        let report = Report {
            station_kpis: Vec::new(),
            daily_series: Vec::new(),
        };

        assert_eq!(report.to_table().lines().count(), 5);
        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["station_kpis"].as_array().map(Vec::len), Some(0));
    }
}
