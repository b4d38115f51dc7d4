//! Profile entity - the role-bearing record attached to an identity.

use crate::{CoreError, Result as CoreErrorResult, Role};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Application profile keyed by the identity id.
/// Role-specific fields live in `DoctorDetails` / `PatientDetails`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Profile {
    /// Create a new profile as written by the signup flow
    pub fn new(id: String, email: String, full_name: String, role: Role) -> Self {
        Self {
            id,
            email,
            full_name,
            role,
            avatar_url: None,
            created_at: Utc::now(),
        }
    }

    /// Check the fields signup is required to provide
    #[track_caller]
    pub fn validate(&self) -> CoreErrorResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::validation("profile id cannot be empty"));
        }
        if !self.email.contains('@') {
            return Err(CoreError::validation(format!(
                "profile email '{}' is not an email address",
                self.email
            )));
        }
        if self.full_name.trim().is_empty() {
            return Err(CoreError::validation("profile full_name cannot be empty"));
        }
        Ok(())
    }
}

/// Outcome of looking up the profile for an identity.
///
/// "No record" and "record without a usable role" are separate answers;
/// backend failures are reported through `Err`, never as one of these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileLookup {
    Found(Profile),
    NotFound,
    RoleMissing,
}

impl ProfileLookup {
    pub fn into_profile(self) -> Option<Profile> {
        match self {
            Self::Found(profile) => Some(profile),
            Self::NotFound | Self::RoleMissing => None,
        }
    }
}
