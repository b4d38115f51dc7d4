use chrono::{Duration, NaiveDate, Utc};
use hs_core::{
    AiPrediction, Appointment, BookingRequest, Diagnosis, DoctorDetails, DoctorStatus,
    MedicalRecord, RecordType,
};

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// A scheduled appointment `days_ahead` days from today
pub fn create_test_appointment(
    patient_id: &str,
    doctor_id: &str,
    days_ahead: i64,
    time: &str,
) -> Appointment {
    Appointment::book(
        BookingRequest {
            patient_id: patient_id.to_string(),
            doctor_id: doctor_id.to_string(),
            date: today() + Duration::days(days_ahead),
            time: time.to_string(),
            reason: Some("Routine check-up".to_string()),
        },
        today(),
    )
    .expect("Failed to book test appointment")
}

pub fn create_test_doctor_details(user_id: &str) -> DoctorDetails {
    DoctorDetails {
        user_id: user_id.to_string(),
        specialization: "Cardiology".to_string(),
        license_number: "LIC-12345".to_string(),
        experience_years: 12,
        consultation_fee: 150,
        bio: Some("Heart specialist".to_string()),
        available_days: vec!["monday".to_string(), "wednesday".to_string()],
        available_hours: "09:00-17:00".to_string(),
        status: DoctorStatus::Active,
    }
}

pub fn create_test_record(patient_id: &str, title: &str) -> MedicalRecord {
    MedicalRecord::new(patient_id.to_string(), RecordType::LabReport, title.to_string())
}

pub fn create_test_diagnosis(patient_id: &str) -> Diagnosis {
    let mut diagnosis = Diagnosis::new(
        patient_id.to_string(),
        vec!["fever".to_string(), "cough".to_string()],
    );
    diagnosis.ai_prediction = Some(vec![
        AiPrediction {
            disease: "Influenza".to_string(),
            confidence: 0.75,
        },
        AiPrediction {
            disease: "Common cold".to_string(),
            confidence: 0.125,
        },
    ]);
    diagnosis
}
