//! REST adapter for the hosted backend.
//!
//! Speaks the PostgREST table API under `/rest/v1` and the auth API under
//! `/auth/v1`. Every request carries the project's public key; row-level
//! security sees the signed-in user's access token when one is set.

pub(crate) mod client;
pub(crate) mod repositories;


pub use client::{ClientError, RestClient, Result};
pub use repositories::appointment_store::RestAppointmentRepository;
pub use repositories::diagnosis_store::RestDiagnosisRepository;
pub use repositories::medical_record_store::RestMedicalRecordRepository;
pub use repositories::profile_store::RestProfileRepository;
