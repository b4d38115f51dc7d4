use crate::{Diagnosis, Result as CoreErrorResult};

use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait DiagnosisRepository: Send + Sync {
    async fn create(&self, diagnosis: &Diagnosis) -> CoreErrorResult<()>;

    /// Newest first
    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Diagnosis>>;

    /// Record the reviewing doctor's conclusion
    async fn set_doctor_diagnosis(&self, id: Uuid, text: &str) -> CoreErrorResult<Diagnosis>;
}
