use crate::RestClient;
use crate::client::rest_client::eq_filter;

use std::sync::Arc;

use async_trait::async_trait;
use hs_core::{CoreError, Diagnosis, DiagnosisRepository, Result as CoreErrorResult};
use serde_json::json;
use uuid::Uuid;

const DIAGNOSES: &str = "diagnoses";

pub struct RestDiagnosisRepository {
    client: Arc<RestClient>,
}

impl RestDiagnosisRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DiagnosisRepository for RestDiagnosisRepository {
    async fn create(&self, diagnosis: &Diagnosis) -> CoreErrorResult<()> {
        diagnosis.validate()?;
        Ok(self.client.insert(DIAGNOSES, diagnosis, false).await?)
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Diagnosis>> {
        Ok(self
            .client
            .select(
                DIAGNOSES,
                &[
                    ("patient_id", eq_filter(patient_id)),
                    ("order", "created_at.desc".to_string()),
                ],
            )
            .await?)
    }

    async fn set_doctor_diagnosis(&self, id: Uuid, text: &str) -> CoreErrorResult<Diagnosis> {
        if text.trim().is_empty() {
            return Err(CoreError::validation("doctor diagnosis cannot be empty"));
        }

        let rows: Vec<Diagnosis> = self
            .client
            .update(
                DIAGNOSES,
                &[("id", eq_filter(id))],
                &json!({ "doctor_diagnosis": text }),
            )
            .await?;

        rows.into_iter()
            .next()
            .ok_or_else(|| CoreError::not_found("diagnosis", id.to_string()))
    }
}
