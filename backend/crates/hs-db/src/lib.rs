pub mod connection;
pub mod error;
pub mod repositories;

pub use connection::sqlite_pool::{create_memory_pool, create_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::appointment_repository::SqliteAppointmentRepository;
pub use repositories::diagnosis_repository::SqliteDiagnosisRepository;
pub use repositories::medical_record_repository::SqliteMedicalRecordRepository;
pub use repositories::profile_repository::SqliteProfileRepository;

#[cfg(test)]
mod tests;
