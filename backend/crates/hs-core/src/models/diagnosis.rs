//! Diagnosis entity - symptom check results plus the doctor's conclusion.

use crate::{CoreError, Result as CoreErrorResult};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One candidate condition suggested by the symptom checker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiPrediction {
    pub disease: String,
    /// Probability in [0, 1]
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub id: Uuid,
    pub patient_id: String,
    pub symptoms: Vec<String>,
    pub ai_prediction: Option<Vec<AiPrediction>>,
    pub doctor_diagnosis: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Diagnosis {
    pub fn new(patient_id: String, symptoms: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            patient_id,
            symptoms,
            ai_prediction: None,
            doctor_diagnosis: None,
            created_at: Utc::now(),
        }
    }

    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.symptoms.iter().all(|s| s.trim().is_empty()) {
            return Err(CoreError::validation("at least one symptom is required"));
        }
        if let Some(predictions) = &self.ai_prediction
            && let Some(bad) = predictions
                .iter()
                .find(|p| !(0.0..=1.0).contains(&p.confidence))
        {
            return Err(CoreError::validation(format!(
                "confidence {} for '{}' is outside [0, 1]",
                bad.confidence, bad.disease
            )));
        }
        Ok(())
    }

    /// Highest-confidence prediction, if any
    pub fn top_prediction(&self) -> Option<&AiPrediction> {
        self.ai_prediction
            .as_deref()?
            .iter()
            .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
    }

    pub fn is_reviewed(&self) -> bool {
        self.doctor_diagnosis.is_some()
    }
}
