use crate::{AppointmentStatus, CoreError, RecordType, Role};

use std::str::FromStr;

#[test]
fn test_role_as_str() {
    assert_eq!(Role::Patient.as_str(), "patient");
    assert_eq!(Role::Doctor.as_str(), "doctor");
    assert_eq!(Role::Admin.as_str(), "admin");
}

#[test]
fn test_role_from_str() {
    for role in Role::ALL {
        assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
    }
}

#[test]
fn test_role_from_str_rejects_unknown_and_case_variants() {
    assert!(matches!(
        Role::from_str("nurse"),
        Err(CoreError::InvalidRole { .. })
    ));
    assert!(Role::from_str("Doctor").is_err());
    assert!(Role::from_str("").is_err());
}

#[test]
fn test_role_serializes_snake_case() {
    assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    let role: Role = serde_json::from_str("\"doctor\"").unwrap();
    assert_eq!(role, Role::Doctor);
}

#[test]
fn test_record_type_lab_report_uses_underscore() {
    assert_eq!(RecordType::LabReport.as_str(), "lab_report");
    assert_eq!(
        RecordType::from_str("lab_report").unwrap(),
        RecordType::LabReport
    );
    assert!(RecordType::from_str("lab-report").is_err());
}

#[test]
fn test_appointment_status_transitions() {
    assert!(AppointmentStatus::Scheduled.can_transition_to(AppointmentStatus::Completed));
    assert!(AppointmentStatus::Scheduled.can_transition_to(AppointmentStatus::Cancelled));
    assert!(!AppointmentStatus::Completed.can_transition_to(AppointmentStatus::Scheduled));
    assert!(!AppointmentStatus::Cancelled.can_transition_to(AppointmentStatus::Completed));
    assert!(!AppointmentStatus::Scheduled.can_transition_to(AppointmentStatus::Scheduled));
}
