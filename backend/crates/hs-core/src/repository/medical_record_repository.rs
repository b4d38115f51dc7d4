use crate::{MedicalRecord, Result as CoreErrorResult};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait MedicalRecordRepository: Send + Sync {
    async fn create(&self, record: &MedicalRecord) -> CoreErrorResult<()>;

    /// Newest first
    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<MedicalRecord>>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> CoreErrorResult<bool>;
}
