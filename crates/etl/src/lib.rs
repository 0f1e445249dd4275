// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extract and transform stages of the EV charging pipeline.
//!
//! - `generator` writes a reproducible synthetic session dataset
//! - `transformer` reads a dataset back, validates every row and derives the
//!   duration and date key used by the star schema
//!
//! Both stages share the dataset layout defined in `dataset`.

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
#![allow(clippy::multiple_crate_versions)]

mod dataset;
mod error;
mod generator;
mod transformer;

#[cfg(test)]
mod tests;

pub use dataset::{DATASET_HEADERS, format_timestamp, parse_timestamp};
pub use error::EtlError;
pub use generator::{
    GeneratorConfig, draw_session, generate, generate_sessions, generate_to_writer, session_epoch,
};
pub use transformer::{transform, transform_reader};
