use crate::{Appointment, AppointmentStatus, Result as CoreErrorResult};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Store a new appointment. Fails with `CoreError::Conflict` when the
    /// doctor already has a scheduled appointment in the same slot.
    async fn create(&self, appointment: &Appointment) -> CoreErrorResult<()>;

    async fn find_by_id(&self, id: Uuid) -> CoreErrorResult<Option<Appointment>>;

    /// Newest date first
    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Appointment>>;

    /// Newest date first
    async fn list_for_doctor(&self, doctor_id: &str) -> CoreErrorResult<Vec<Appointment>>;

    async fn list_all(&self) -> CoreErrorResult<Vec<Appointment>>;

    /// Apply a status transition; fails with `NotFound` or `Validation`
    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> CoreErrorResult<Appointment>;
}
