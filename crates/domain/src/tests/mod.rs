// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod types;

use time::PrimitiveDateTime;
use time::macros::format_description;

/// Parses a `YYYY-MM-DDTHH:MM` test timestamp.
pub fn ts(value: &str) -> PrimitiveDateTime {
    PrimitiveDateTime::parse(value, format_description!("[year]-[month]-[day]T[hour]:[minute]"))
        .expect("Valid test timestamp")
}
