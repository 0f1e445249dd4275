// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `kpis` — grouped KPI and time-series aggregation
//! - `star` — row counts and lookups on the dimension and fact tables

pub mod kpis;
pub mod star;

pub use kpis::{daily_series, station_kpis};
pub use star::{count_dates, count_facts, count_stations, get_fact, list_dates, list_stations};
