use crate::{CoreError, RecordType, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata for an uploaded record. The file itself lives in external storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicalRecord {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: Option<String>,
    pub record_type: RecordType,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl MedicalRecord {
    pub fn new(patient_id: String, record_type: RecordType, title: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            doctor_id: None,
            record_type,
            title,
            description: None,
            file_url: None,
            created_at: Utc::now(),
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.title.trim().is_empty() {
            return Err(CoreError::validation("record title cannot be empty"));
        }
        Ok(())
    }
}
