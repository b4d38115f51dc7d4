use crate::RestClient;
use crate::client::rest_client::eq_filter;

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hs_core::{
    DoctorDetails, PatientDetails, Profile, ProfileLookup, ProfileRepository,
    Result as CoreErrorResult, Role,
};
use log::warn;
use serde::Deserialize;

const PROFILES: &str = "profiles";
const DOCTOR_DETAILS: &str = "doctor_details";
const PATIENT_DETAILS: &str = "patient_details";

/// Row as the table API returns it; `role` may be null or a value this
/// build does not know.
#[derive(Debug, Deserialize)]
pub(crate) struct ProfileRow {
    id: String,
    email: String,
    full_name: String,
    role: Option<String>,
    avatar_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl ProfileRow {
    pub(crate) fn role(&self) -> Option<Role> {
        self.role.as_deref().and_then(|r| Role::from_str(r).ok())
    }

    pub(crate) fn into_profile(self, role: Role) -> Profile {
        Profile {
            id: self.id,
            email: self.email,
            full_name: self.full_name,
            role,
            avatar_url: self.avatar_url,
            created_at: self.created_at,
        }
    }

    pub(crate) fn into_lookup(self) -> ProfileLookup {
        match self.role() {
            Some(role) => ProfileLookup::Found(self.into_profile(role)),
            None => {
                warn!("Profile {} has no usable role ({:?})", self.id, self.role);
                ProfileLookup::RoleMissing
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: Option<String>,
}

pub struct RestProfileRepository {
    client: Arc<RestClient>,
}

impl RestProfileRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileRepository {
    async fn get_profile(&self, id: &str) -> CoreErrorResult<ProfileLookup> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(
                PROFILES,
                &[("id", eq_filter(id)), ("select", "*".to_string())],
            )
            .await?;

        Ok(rows
            .into_iter()
            .next()
            .map_or(ProfileLookup::NotFound, ProfileRow::into_lookup))
    }

    async fn put_profile(&self, profile: &Profile) -> CoreErrorResult<()> {
        profile.validate()?;
        Ok(self.client.insert(PROFILES, profile, true).await?)
    }

    async fn count_by_role(&self) -> CoreErrorResult<HashMap<Role, u64>> {
        let rows: Vec<RoleRow> = self
            .client
            .select(PROFILES, &[("select", "role".to_string())])
            .await?;

        let mut counts = HashMap::new();
        for row in rows {
            if let Some(role) = row.role.as_deref().and_then(|r| Role::from_str(r).ok()) {
                *counts.entry(role).or_insert(0) += 1;
            }
        }
        Ok(counts)
    }

    async fn list_by_role(&self, role: Role) -> CoreErrorResult<Vec<Profile>> {
        let rows: Vec<ProfileRow> = self
            .client
            .select(
                PROFILES,
                &[
                    ("role", eq_filter(role.as_str())),
                    ("order", "full_name.asc".to_string()),
                ],
            )
            .await?;

        Ok(rows.into_iter().map(|row| row.into_profile(role)).collect())
    }

    async fn get_doctor_details(&self, user_id: &str) -> CoreErrorResult<Option<DoctorDetails>> {
        let rows: Vec<DoctorDetails> = self
            .client
            .select(DOCTOR_DETAILS, &[("user_id", eq_filter(user_id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn put_doctor_details(&self, details: &DoctorDetails) -> CoreErrorResult<()> {
        details.validate()?;
        Ok(self.client.insert(DOCTOR_DETAILS, details, true).await?)
    }

    async fn get_patient_details(&self, user_id: &str) -> CoreErrorResult<Option<PatientDetails>> {
        let rows: Vec<PatientDetails> = self
            .client
            .select(PATIENT_DETAILS, &[("user_id", eq_filter(user_id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn put_patient_details(&self, details: &PatientDetails) -> CoreErrorResult<()> {
        Ok(self.client.insert(PATIENT_DETAILS, details, true).await?)
    }
}
