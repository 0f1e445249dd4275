// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::path::Path;

use crate::tests::dataset;
use crate::{EtlError, transform, transform_reader};

fn transform_text(text: &str) -> Result<Vec<evcharge_domain::TransformedRecord>, EtlError> {
    transform_reader(text.as_bytes())
}

#[test]
fn test_duration_across_midnight_is_half_an_hour() {
    let records =
        transform_text(&dataset(&["1,1,2025-01-01T23:50,2025-01-02T00:20,3.10,1"])).unwrap();

    assert_eq!(records.len(), 1);
    assert!((records[0].duration_hours() - 0.5).abs() < 1e-12);
    assert!((records[0].duration_hours() * 3600.0 - 1800.0).abs() < 1e-9);
}

#[test]
fn test_duration_across_month_end() {
    let records =
        transform_text(&dataset(&["1,1,2025-01-31T22:45,2025-02-01T01:15,9.00,1"])).unwrap();

    assert!((records[0].duration_hours() - 2.5).abs() < 1e-12);
    assert_eq!(records[0].date_key().value(), 20_250_131);
}

#[test]
fn test_date_key_comes_from_start() {
    let records = transform_text(&dataset(&[
        "1,1,2025-03-07T08:15,2025-03-07T09:15,5.00,1",
        "2,1,2025-03-07T08:15,2025-03-08T02:00,5.00,0",
    ]))
    .unwrap();

    assert_eq!(records[0].date_key().value(), 20_250_307);
    assert_eq!(records[1].date_key().value(), 20_250_307);
}

#[test]
fn test_one_record_per_row_in_input_order() {
    let records = transform_text(&dataset(&[
        "3,2,2025-01-03T10:00,2025-01-03T11:00,6.00,1",
        "1,1,2025-01-01T10:00,2025-01-01T10:30,3.00,0",
        "2,2,2025-01-02T10:00,2025-01-02T12:00,12.00,1",
    ]))
    .unwrap();

    let ids: Vec<u64> = records.iter().map(|r| r.session_id().value()).collect();
    assert_eq!(ids, vec![3, 1, 2]);
    assert!(!records[1].success());
    assert_eq!(records[2].station_id().value(), 2);
    assert!((records[2].energy_kwh() - 12.0).abs() < f64::EPSILON);
}

#[test]
fn test_header_only_dataset_is_empty() {
    assert!(transform_text(&dataset(&[])).unwrap().is_empty());
}

#[test]
fn test_columns_may_be_reordered_and_padded() {
    let text = "Success, Energy_kWh ,session_id,station_id,end_time,start_time\n\
                1,4.25,10,3,2025-01-05T13:00,2025-01-05T12:30\n";
    let records = transform_text(text).unwrap();

    assert_eq!(records[0].session_id().value(), 10);
    assert_eq!(records[0].station_id().value(), 3);
    assert!((records[0].duration_hours() - 0.5).abs() < 1e-12);
    assert!((records[0].energy_kwh() - 4.25).abs() < f64::EPSILON);
}

#[test]
fn test_seconds_precision_is_accepted() {
    let records =
        transform_text(&dataset(&["1,1,2025-01-01T10:00:00,2025-01-01T10:00:36,0.10,1"]))
            .unwrap();

    assert!((records[0].duration_hours() - 0.01).abs() < 1e-12);
}

#[test]
fn test_success_accepts_words_in_any_case() {
    let records = transform_text(&dataset(&[
        "1,1,2025-01-01T10:00,2025-01-01T11:00,5.00,TRUE",
        "2,1,2025-01-01T12:00,2025-01-01T13:00,5.00,false",
        "3,1,2025-01-01T14:00,2025-01-01T15:00,5.00,True",
    ]))
    .unwrap();

    let success: Vec<bool> = records
        .iter()
        .map(evcharge_domain::TransformedRecord::success)
        .collect();
    assert_eq!(success, vec![true, false, true]);
}

#[test]
fn test_missing_headers_are_all_reported() {
    let result = transform_text("session_id,station_id,start_time\n1,1,2025-01-01T10:00\n");

    assert_eq!(
        result,
        Err(EtlError::MissingHeaders(vec![
            String::from("end_time"),
            String::from("energy_kwh"),
            String::from("success"),
        ]))
    );
}

#[test]
fn test_end_before_start_aborts_the_batch() {
    let result = transform_text(&dataset(&[
        "1,1,2025-01-01T10:00,2025-01-01T11:00,5.00,1",
        "2,1,2025-01-01T10:00,2025-01-01T09:00,5.00,1",
        "3,1,2025-01-01T10:00,2025-01-01T11:00,5.00,1",
    ]));

    match result {
        Err(EtlError::Parse { row, field, .. }) => {
            assert_eq!(row, 2);
            assert_eq!(field, "end_time");
        }
        other => panic!("Expected parse error, got {other:?}"),
    }
}

#[test]
fn test_malformed_timestamp_is_a_parse_error() {
    let result = transform_text(&dataset(&["1,1,2025-13-01T10:00,2025-01-01T11:00,5.00,1"]));

    assert!(matches!(
        result,
        Err(EtlError::Parse { row: 1, ref field, .. }) if field == "start_time"
    ));
}

#[test]
fn test_empty_end_time_is_a_parse_error() {
    let result = transform_text(&dataset(&["1,1,2025-01-01T10:00,,5.00,1"]));

    assert!(matches!(
        result,
        Err(EtlError::Parse { ref field, .. }) if field == "end_time"
    ));
}

#[test]
fn test_invalid_values_are_parse_errors() {
    let cases: [(&str, &str); 6] = [
        ("0,1,2025-01-01T10:00,2025-01-01T11:00,5.00,1", "session_id"),
        ("x,1,2025-01-01T10:00,2025-01-01T11:00,5.00,1", "session_id"),
        ("1,0,2025-01-01T10:00,2025-01-01T11:00,5.00,1", "station_id"),
        ("1,1,2025-01-01T10:00,2025-01-01T11:00,-1.00,1", "energy_kwh"),
        ("1,1,2025-01-01T10:00,2025-01-01T11:00,abc,1", "energy_kwh"),
        ("1,1,2025-01-01T10:00,2025-01-01T11:00,5.00,yes", "success"),
    ];

    for (row, expected_field) in cases {
        match transform_text(&dataset(&[row])) {
            Err(EtlError::Parse { field, .. }) => assert_eq!(field, expected_field, "{row}"),
            other => panic!("Expected parse error for {row}, got {other:?}"),
        }
    }
}

#[test]
fn test_short_row_is_a_parse_error() {
    let result = transform_text(&dataset(&["1,1,2025-01-01T10:00"]));

    assert!(matches!(result, Err(EtlError::Parse { row: 1, .. })));
}

#[test]
fn test_missing_file_is_a_read_error() {
    let result = transform(Path::new("/nonexistent/evcharge/sessions.csv"));

    assert!(matches!(result, Err(EtlError::Read { .. })));
}
