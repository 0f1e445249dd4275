// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::ts;
use crate::{DateKey, DomainError, SessionId, StationId};
use time::{Date, Month};

#[test]
fn test_session_id_rejects_zero() {
    assert_eq!(SessionId::new(0), Err(DomainError::InvalidSessionId(0)));
    assert_eq!(SessionId::new(12).unwrap().value(), 12);
}

#[test]
fn test_station_id_rejects_zero() {
    assert_eq!(StationId::new(0), Err(DomainError::InvalidStationId(0)));
    assert_eq!(StationId::new(3).unwrap().to_string(), "3");
}

#[test]
fn test_date_key_from_date() {
    let date = Date::from_calendar_date(2025, Month::March, 7).unwrap();
    assert_eq!(DateKey::from_date(date).value(), 20_250_307);
}

#[test]
fn test_date_key_ignores_time_of_day() {
    let morning = DateKey::from_datetime(ts("2025-03-07T00:00"));
    let night = DateKey::from_datetime(ts("2025-03-07T23:59"));

    assert_eq!(morning, night);
    assert_eq!(morning.value(), 20_250_307);
}

#[test]
fn test_date_key_decodes_to_same_date() {
    let date = Date::from_calendar_date(2024, Month::December, 31).unwrap();
    let key = DateKey::from_date(date);

    assert_eq!(key.date().unwrap(), date);
    assert_eq!(DateKey::new(key.value()).unwrap(), key);
}

#[test]
fn test_date_key_rejects_impossible_dates() {
    for value in [0, -20_250_101, 20_251_301, 20_250_230, 20_250_100, 20_250_732] {
        assert_eq!(
            DateKey::new(value),
            Err(DomainError::InvalidDateKey(value)),
            "{value} should not be a valid date key"
        );
    }
}

#[test]
fn test_date_keys_order_like_dates() {
    let earlier = DateKey::from_datetime(ts("2025-01-31T12:00"));
    let later = DateKey::from_datetime(ts("2025-02-01T00:00"));

    assert!(earlier < later);
}
