use crate::DbError;
use crate::repositories::{parse_date, parse_enum, parse_json, parse_time, parse_timestamp, parse_uuid, to_json};

use chrono::{NaiveDate, NaiveTime};
use googletest::prelude::*;
use hs_core::{AppointmentStatus, Role};

// =========================================================================
// Scalar columns
// =========================================================================

#[test]
fn given_stored_date_when_parsed_then_returns_calendar_date() {
    // When
    let date = parse_date("appointments.appointment_date", "2026-03-14");

    // Then
    assert_that!(date, ok(eq(&NaiveDate::from_ymd_opt(2026, 3, 14).unwrap())));
}

#[test]
fn given_stored_time_when_parsed_then_returns_hour_and_minute() {
    // When
    let time = parse_time("appointments.appointment_time", "09:30");

    // Then
    assert_that!(time, ok(eq(&NaiveTime::from_hms_opt(9, 30, 0).unwrap())));
}

#[test]
fn given_time_with_seconds_when_parsed_then_returns_decode_error() {
    // When
    let result = parse_time("appointments.appointment_time", "09:30:15");

    // Then
    assert!(matches!(
        result,
        Err(DbError::Decode {
            column: "appointments.appointment_time",
            ..
        })
    ));
}

#[test]
fn given_garbage_uuid_when_parsed_then_error_names_column_and_value() {
    // When
    let err = parse_uuid("appointments.id", "not-a-uuid").unwrap_err();

    // Then
    let message = err.to_string();
    assert_that!(message, contains_substring("appointments.id"));
    assert_that!(message, contains_substring("not-a-uuid"));
}

#[test]
fn given_out_of_range_timestamp_when_parsed_then_returns_decode_error() {
    // When
    let result = parse_timestamp("profiles.created_at", i64::MAX);

    // Then
    assert!(matches!(result, Err(DbError::Decode { .. })));
}

#[test]
fn given_unix_seconds_when_parsed_then_returns_utc_instant() {
    // When
    let instant = parse_timestamp("profiles.created_at", 1_700_000_000).unwrap();

    // Then
    assert_that!(instant.timestamp(), eq(1_700_000_000));
}

// =========================================================================
// Enum and JSON columns
// =========================================================================

#[test]
fn given_known_enum_text_when_parsed_then_returns_variant() {
    // When
    let role: crate::Result<Role> = parse_enum("profiles.role", "doctor");
    let status: crate::Result<AppointmentStatus> = parse_enum("appointments.status", "completed");

    // Then
    assert_that!(role, ok(eq(&Role::Doctor)));
    assert_that!(status, ok(eq(&AppointmentStatus::Completed)));
}

#[test]
fn given_unknown_enum_text_when_parsed_then_returns_decode_error() {
    // When
    let result: crate::Result<AppointmentStatus> = parse_enum("appointments.status", "postponed");

    // Then
    assert!(matches!(
        result,
        Err(DbError::Decode {
            column: "appointments.status",
            ..
        })
    ));
}

#[test]
fn given_day_list_when_stored_as_json_then_reads_back_in_order() {
    // Given
    let days = vec!["monday".to_string(), "thursday".to_string()];

    // When
    let stored = to_json("doctor_details.available_days", &days).unwrap();
    let parsed: Vec<String> = parse_json("doctor_details.available_days", &stored).unwrap();

    // Then
    assert_that!(stored, eq("[\"monday\",\"thursday\"]"));
    assert_that!(parsed, eq(&days));
}

#[test]
fn given_malformed_json_when_parsed_then_returns_decode_error() {
    // When
    let result: crate::Result<Vec<String>> = parse_json("diagnoses.symptoms", "[\"fever\"");

    // Then
    assert!(matches!(result, Err(DbError::Decode { .. })));
}
