use crate::Gender;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Patient extension record. Every field except the owner is optional
/// because patients fill it in gradually from the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PatientDetails {
    pub user_id: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub medical_history: Option<String>,
}

impl PatientDetails {
    pub fn new(user_id: String) -> Self {
        Self {
            user_id,
            ..Self::default()
        }
    }

    /// Age in whole years on `today`, if the birth date is known
    pub fn age_on(&self, today: NaiveDate) -> Option<u32> {
        self.date_of_birth.and_then(|dob| today.years_since(dob))
    }
}
