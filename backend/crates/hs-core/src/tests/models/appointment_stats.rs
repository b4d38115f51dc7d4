use crate::{Appointment, AppointmentStats, AppointmentStatus, BookingRequest, PortalStats, Role};

use std::collections::HashMap;

use chrono::NaiveDate;

fn on(date: NaiveDate, status: AppointmentStatus) -> Appointment {
    let mut appointment = Appointment::book(
        BookingRequest {
            patient_id: "p".to_string(),
            doctor_id: "d".to_string(),
            date,
            time: "08:00".to_string(),
            reason: None,
        },
        date,
    )
    .unwrap();
    appointment.status = status;
    appointment
}

#[test]
fn given_mixed_appointments_when_computed_then_counts_each_status() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let past = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
    let future = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    let appointments = vec![
        on(past, AppointmentStatus::Scheduled),
        on(today, AppointmentStatus::Scheduled),
        on(future, AppointmentStatus::Scheduled),
        on(past, AppointmentStatus::Completed),
        on(future, AppointmentStatus::Cancelled),
    ];

    let stats = AppointmentStats::compute(&appointments, today);

    assert_eq!(stats.total, 5);
    assert_eq!(stats.scheduled, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.cancelled, 1);
    assert_eq!(stats.upcoming, 2);
}

#[test]
fn given_no_appointments_when_computed_then_all_zero() {
    let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

    assert_eq!(AppointmentStats::compute(&[], today), AppointmentStats::default());
}

#[test]
fn given_partial_role_counts_when_portal_stats_built_then_missing_roles_are_zero() {
    let mut counts = HashMap::new();
    counts.insert(Role::Patient, 12);
    counts.insert(Role::Doctor, 3);

    let stats = PortalStats::new(&counts, AppointmentStats::default());

    assert_eq!(stats.admins, 0);
    assert_eq!(stats.total_users(), 15);
}
