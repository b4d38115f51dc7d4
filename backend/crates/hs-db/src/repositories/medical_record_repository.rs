use crate::repositories::{parse_enum, parse_timestamp, parse_uuid};
use crate::Result as DbErrorResult;

use async_trait::async_trait;
use hs_core::{MedicalRecord, MedicalRecordRepository, Result as CoreErrorResult};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct SqliteMedicalRecordRepository {
    pool: SqlitePool,
}

impl SqliteMedicalRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, record: &MedicalRecord) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO medical_records (
                  id, patient_id, doctor_id, record_type, title, description,
                  file_url, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(record.id.to_string())
        .bind(&record.patient_id)
        .bind(&record.doctor_id)
        .bind(record.record_type.as_str())
        .bind(&record.title)
        .bind(&record.description)
        .bind(&record.file_url)
        .bind(record.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn for_patient(&self, patient_id: &str) -> DbErrorResult<Vec<MedicalRecord>> {
        let rows = sqlx::query(
            r#"
              SELECT id, patient_id, doctor_id, record_type, title, description,
                     file_url, created_at
              FROM medical_records
              WHERE patient_id = ?
              ORDER BY created_at DESC
              "#,
        )
        .bind(patient_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    pub async fn remove(&self, id: Uuid) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM medical_records WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    fn from_row(row: &SqliteRow) -> DbErrorResult<MedicalRecord> {
        let id: String = row.try_get("id")?;
        let record_type: String = row.try_get("record_type")?;

        Ok(MedicalRecord {
            id: parse_uuid("medical_records.id", &id)?,
            patient_id: row.try_get("patient_id")?,
            doctor_id: row.try_get("doctor_id")?,
            record_type: parse_enum("medical_records.record_type", &record_type)?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            file_url: row.try_get("file_url")?,
            created_at: parse_timestamp("medical_records.created_at", row.try_get("created_at")?)?,
        })
    }
}

#[async_trait]
impl MedicalRecordRepository for SqliteMedicalRecordRepository {
    async fn create(&self, record: &MedicalRecord) -> CoreErrorResult<()> {
        record.validate()?;
        Ok(self.insert(record).await?)
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<MedicalRecord>> {
        Ok(self.for_patient(patient_id).await?)
    }

    async fn delete(&self, id: Uuid) -> CoreErrorResult<bool> {
        Ok(self.remove(id).await?)
    }
}
