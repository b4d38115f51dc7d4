use crate::{Appointment, AppointmentStatus, BookingRequest, CoreError};

use chrono::NaiveDate;
use googletest::prelude::*;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

fn request(date: NaiveDate, time: &str) -> BookingRequest {
    BookingRequest {
        patient_id: "patient-1".to_string(),
        doctor_id: "doctor-1".to_string(),
        date,
        time: time.to_string(),
        reason: Some("Checkup".to_string()),
    }
}

#[test]
fn given_future_slot_when_booked_then_scheduled_appointment() {
    let appointment = Appointment::book(request(today(), "09:30"), today()).unwrap();

    assert_that!(appointment.status, eq(AppointmentStatus::Scheduled));
    assert_that!(appointment.time_label(), eq("09:30"));
    assert_eq!(appointment.reason.as_deref(), Some("Checkup"));
}

#[test]
fn given_past_date_when_booked_then_validation_error() {
    let yesterday = today().pred_opt().unwrap();

    let result = Appointment::book(request(yesterday, "09:30"), today());

    assert!(matches!(result, Err(CoreError::Validation { .. })));
}

#[test]
fn given_malformed_time_when_booked_then_error_mentions_format() {
    let result = Appointment::book(request(today(), "9.30am"), today());

    let err = result.unwrap_err();
    assert_that!(err.to_string(), contains_substring("HH:MM"));
}

#[test]
fn given_blank_reason_when_booked_then_reason_dropped() {
    let mut req = request(today(), "10:00");
    req.reason = Some("  ".to_string());

    let appointment = Appointment::book(req, today()).unwrap();

    assert!(appointment.reason.is_none());
}

#[test]
fn given_same_doctor_and_slot_when_compared_then_conflict() {
    let a = Appointment::book(request(today(), "11:00"), today()).unwrap();
    let mut b = Appointment::book(request(today(), "11:00"), today()).unwrap();

    assert!(a.conflicts_with(&b));

    b.status = AppointmentStatus::Cancelled;
    assert!(!a.conflicts_with(&b));
    assert!(!a.conflicts_with(&a));
}

#[test]
fn given_completed_appointment_when_transitioned_then_rejected() {
    let mut a = Appointment::book(request(today(), "11:00"), today()).unwrap();
    a.transition(AppointmentStatus::Completed).unwrap();

    let result = a.transition(AppointmentStatus::Cancelled);

    assert!(result.is_err());
    assert_that!(a.status, eq(AppointmentStatus::Completed));
}
