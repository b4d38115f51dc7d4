use crate::repositories::{parse_json, parse_timestamp, parse_uuid, to_json};
use crate::Result as DbErrorResult;

use async_trait::async_trait;
use hs_core::{CoreError, Diagnosis, DiagnosisRepository, Result as CoreErrorResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_DIAGNOSIS: &str = r#"
    SELECT id, patient_id, symptoms, ai_prediction, doctor_diagnosis, created_at
    FROM diagnoses
"#;

pub struct SqliteDiagnosisRepository {
    pool: SqlitePool,
}

impl SqliteDiagnosisRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, diagnosis: &Diagnosis) -> DbErrorResult<()> {
        let symptoms = to_json("diagnoses.symptoms", &diagnosis.symptoms)?;
        let ai_prediction = diagnosis
            .ai_prediction
            .as_ref()
            .map(|p| to_json("diagnoses.ai_prediction", p))
            .transpose()?;

        sqlx::query(
            r#"
              INSERT INTO diagnoses (
                  id, patient_id, symptoms, ai_prediction, doctor_diagnosis, created_at
              ) VALUES (?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(diagnosis.id.to_string())
        .bind(&diagnosis.patient_id)
        .bind(symptoms)
        .bind(ai_prediction)
        .bind(&diagnosis.doctor_diagnosis)
        .bind(diagnosis.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> DbErrorResult<Option<Diagnosis>> {
        let row = sqlx::query(&format!("{SELECT_DIAGNOSIS} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    pub async fn for_patient(&self, patient_id: &str) -> DbErrorResult<Vec<Diagnosis>> {
        let rows = sqlx::query(&format!(
            "{SELECT_DIAGNOSIS} WHERE patient_id = ? ORDER BY created_at DESC"
        ))
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    pub async fn save_doctor_diagnosis(&self, id: Uuid, text: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("UPDATE diagnoses SET doctor_diagnosis = ? WHERE id = ?")
            .bind(text)
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn from_row(row: &SqliteRow) -> DbErrorResult<Diagnosis> {
        let id: String = row.try_get("id")?;
        let symptoms: String = row.try_get("symptoms")?;
        let ai_prediction: Option<String> = row.try_get("ai_prediction")?;

        Ok(Diagnosis {
            id: parse_uuid("diagnoses.id", &id)?,
            patient_id: row.try_get("patient_id")?,
            symptoms: parse_json("diagnoses.symptoms", &symptoms)?,
            ai_prediction: ai_prediction
                .as_deref()
                .map(|p| parse_json("diagnoses.ai_prediction", p))
                .transpose()?,
            doctor_diagnosis: row.try_get("doctor_diagnosis")?,
            created_at: parse_timestamp("diagnoses.created_at", row.try_get("created_at")?)?,
        })
    }
}

#[async_trait]
impl DiagnosisRepository for SqliteDiagnosisRepository {
    async fn create(&self, diagnosis: &Diagnosis) -> CoreErrorResult<()> {
        diagnosis.validate()?;
        Ok(self.insert(diagnosis).await?)
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Diagnosis>> {
        Ok(self.for_patient(patient_id).await?)
    }

    async fn set_doctor_diagnosis(&self, id: Uuid, text: &str) -> CoreErrorResult<Diagnosis> {
        if text.trim().is_empty() {
            return Err(CoreError::validation("doctor diagnosis cannot be empty"));
        }
        if !self.save_doctor_diagnosis(id, text).await? {
            return Err(CoreError::not_found("diagnosis", id.to_string()));
        }
        self.find(id)
            .await?
            .ok_or_else(|| CoreError::not_found("diagnosis", id.to_string()))
    }
}
