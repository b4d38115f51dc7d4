//! Doctor extension record, filled in by the complete-profile page.

use crate::{CoreError, DoctorStatus, Result as CoreErrorResult};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorDetails {
    /// Owning profile id
    pub user_id: String,
    pub specialization: String,
    pub license_number: String,
    pub experience_years: u32,
    /// Fee in minor currency units
    pub consultation_fee: u32,
    pub bio: Option<String>,
    /// Lowercase weekday names, e.g. "monday"
    pub available_days: Vec<String>,
    /// Free-form range such as "09:00-17:00"
    pub available_hours: String,
    pub status: DoctorStatus,
}

impl DoctorDetails {
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.specialization.trim().is_empty() {
            return Err(CoreError::validation("specialization cannot be empty"));
        }
        if self.license_number.trim().is_empty() {
            return Err(CoreError::validation("license_number cannot be empty"));
        }
        if let Some(day) = self
            .available_days
            .iter()
            .find(|d| !WEEKDAYS.contains(&d.as_str()))
        {
            return Err(CoreError::validation(format!(
                "'{}' is not a weekday",
                day
            )));
        }
        Ok(())
    }

    /// A doctor is bookable when active and available on at least one day
    pub fn is_bookable(&self) -> bool {
        self.status == DoctorStatus::Active && !self.available_days.is_empty()
    }
}

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];
