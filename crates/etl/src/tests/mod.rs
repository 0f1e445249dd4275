// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod transformer_tests;

use crate::GeneratorConfig;

/// Generates a dataset into memory.
pub fn generate_bytes(session_count: u64, station_count: u32, seed: u64) -> Vec<u8> {
    let config = GeneratorConfig::new(session_count, station_count, seed).unwrap();
    let mut buffer: Vec<u8> = Vec::new();
    crate::generate_to_writer(&mut buffer, &config).unwrap();
    buffer
}

/// Builds a dataset from data rows, prefixed with the standard header.
pub fn dataset(rows: &[&str]) -> String {
    let mut text = String::from("session_id,station_id,start_time,end_time,energy_kwh,success\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}
