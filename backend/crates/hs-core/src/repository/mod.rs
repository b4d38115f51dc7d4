//! Backend-access ports, one per entity. Vendor adapters implement these;
//! nothing above this layer knows which backend is in use.

pub mod appointment_repository;
pub mod diagnosis_repository;
pub mod medical_record_repository;
pub mod profile_repository;
