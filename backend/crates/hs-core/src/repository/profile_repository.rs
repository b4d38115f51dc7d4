use crate::{DoctorDetails, PatientDetails, Profile, ProfileLookup, Result as CoreErrorResult, Role};

use std::collections::HashMap;

use async_trait::async_trait;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Look up the profile for an identity id.
    ///
    /// A missing record is `Ok(ProfileLookup::NotFound)`; `Err` is reserved
    /// for the backend being unreachable or refusing the read.
    async fn get_profile(&self, id: &str) -> CoreErrorResult<ProfileLookup>;

    /// Insert or replace a profile (signup write path)
    async fn put_profile(&self, profile: &Profile) -> CoreErrorResult<()>;

    /// Number of profiles per role, for the admin dashboard
    async fn count_by_role(&self) -> CoreErrorResult<HashMap<Role, u64>>;

    /// All profiles with the given role, ordered by name
    async fn list_by_role(&self, role: Role) -> CoreErrorResult<Vec<Profile>>;

    async fn get_doctor_details(&self, user_id: &str) -> CoreErrorResult<Option<DoctorDetails>>;

    async fn put_doctor_details(&self, details: &DoctorDetails) -> CoreErrorResult<()>;

    async fn get_patient_details(&self, user_id: &str) -> CoreErrorResult<Option<PatientDetails>>;

    async fn put_patient_details(&self, details: &PatientDetails) -> CoreErrorResult<()>;
}
