// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain types for the EV charging reliability pipeline.
//!
//! Every stage of the pipeline (generation, transformation, loading and
//! aggregation) exchanges the typed records defined here instead of
//! loosely-typed rows. Constructors validate their invariants and return
//! [`DomainError`] on failure, so a value of one of these types is always
//! well-formed.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dimension;
mod error;
mod kpi;
mod session;
mod types;

#[cfg(test)]
mod tests;

pub use dimension::{StationDimension, TimeDimension};
pub use error::DomainError;
pub use kpi::{DailyPoint, StationKpi};
pub use session::{RawSession, TransformedRecord};
pub use types::{DateKey, SessionId, StationId};
