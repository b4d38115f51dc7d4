pub mod appointment;
pub mod appointment_stats;
pub mod appointment_status;
pub mod diagnosis;
pub mod doctor_details;
pub mod doctor_status;
pub mod gender;
pub mod identity;
pub mod medical_record;
pub mod patient_details;
pub mod portal_stats;
pub mod profile;
pub mod record_type;
pub mod role;
