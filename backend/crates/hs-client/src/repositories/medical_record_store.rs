use crate::RestClient;
use crate::client::rest_client::eq_filter;

use std::sync::Arc;

use async_trait::async_trait;
use hs_core::{MedicalRecord, MedicalRecordRepository, Result as CoreErrorResult};
use uuid::Uuid;

const MEDICAL_RECORDS: &str = "medical_records";

pub struct RestMedicalRecordRepository {
    client: Arc<RestClient>,
}

impl RestMedicalRecordRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl MedicalRecordRepository for RestMedicalRecordRepository {
    async fn create(&self, record: &MedicalRecord) -> CoreErrorResult<()> {
        record.validate()?;
        Ok(self.client.insert(MEDICAL_RECORDS, record, false).await?)
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<MedicalRecord>> {
        Ok(self
            .client
            .select(
                MEDICAL_RECORDS,
                &[
                    ("patient_id", eq_filter(patient_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?)
    }

    async fn delete(&self, id: Uuid) -> CoreErrorResult<bool> {
        let removed = self
            .client
            .delete(MEDICAL_RECORDS, &[("id", eq_filter(id))])
            .await?;
        Ok(removed > 0)
    }
}
