pub mod error;
pub mod models;
pub mod repository;

pub use error::{CoreError, Result};
pub use error_location::ErrorLocation;
pub use models::appointment::{Appointment, BookingRequest};
pub use models::appointment_stats::AppointmentStats;
pub use models::appointment_status::AppointmentStatus;
pub use models::diagnosis::{AiPrediction, Diagnosis};
pub use models::doctor_details::DoctorDetails;
pub use models::doctor_status::DoctorStatus;
pub use models::gender::Gender;
pub use models::identity::Identity;
pub use models::medical_record::MedicalRecord;
pub use models::patient_details::PatientDetails;
pub use models::portal_stats::PortalStats;
pub use models::profile::{Profile, ProfileLookup};
pub use models::record_type::RecordType;
pub use models::role::Role;
pub use repository::appointment_repository::AppointmentRepository;
pub use repository::diagnosis_repository::DiagnosisRepository;
pub use repository::medical_record_repository::MedicalRecordRepository;
pub use repository::profile_repository::ProfileRepository;

#[cfg(test)]
mod tests;
