pub mod appointment_store;
pub mod diagnosis_store;
pub mod medical_record_store;
pub mod profile_store;
