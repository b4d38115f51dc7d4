use crate::{DoctorDetails, DoctorStatus, PatientDetails};

use chrono::NaiveDate;

fn details() -> DoctorDetails {
    DoctorDetails {
        user_id: "doc-1".to_string(),
        specialization: "Cardiology".to_string(),
        license_number: "LIC-42".to_string(),
        experience_years: 8,
        consultation_fee: 5000,
        bio: None,
        available_days: vec!["monday".to_string(), "thursday".to_string()],
        available_hours: "09:00-17:00".to_string(),
        status: DoctorStatus::Active,
    }
}

#[test]
fn given_valid_details_when_validated_then_ok_and_bookable() {
    let d = details();

    assert!(d.validate().is_ok());
    assert!(d.is_bookable());
}

#[test]
fn given_unknown_weekday_when_validated_then_error() {
    let mut d = details();
    d.available_days.push("funday".to_string());

    let err = d.validate().unwrap_err();

    assert!(err.to_string().contains("funday"));
}

#[test]
fn given_inactive_doctor_when_checked_then_not_bookable() {
    let mut d = details();
    d.status = DoctorStatus::Inactive;

    assert!(!d.is_bookable());
}

#[test]
fn given_birth_date_when_age_on_then_whole_years() {
    let mut p = PatientDetails::new("pat-1".to_string());
    p.date_of_birth = NaiveDate::from_ymd_opt(1990, 6, 15);

    assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2025, 6, 14).unwrap()), Some(34));
    assert_eq!(p.age_on(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()), Some(35));
    assert_eq!(p.age_on(NaiveDate::from_ymd_opt(1980, 1, 1).unwrap()), None);
}
