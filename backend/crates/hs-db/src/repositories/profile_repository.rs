use crate::repositories::{DATE_FORMAT, parse_date, parse_enum, parse_json, parse_timestamp, to_json};
use crate::{DbError, Result as DbErrorResult};

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use hs_core::{
    DoctorDetails, PatientDetails, Profile, ProfileLookup, ProfileRepository, Result as CoreErrorResult,
    Role,
};
use log::warn;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

/// Profiles and the role-specific detail records
pub struct SqliteProfileRepository {
    pool: SqlitePool,
}

impl SqliteProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_profile(&self, id: &str) -> DbErrorResult<ProfileLookup> {
        let row = sqlx::query(
            r#"
              SELECT id, email, full_name, role, avatar_url, created_at
              FROM profiles
              WHERE id = ?
              "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(ProfileLookup::NotFound);
        };

        let role: Option<String> = row.try_get("role")?;
        let Some(role) = role.as_deref().and_then(|r| Role::from_str(r).ok()) else {
            warn!("Profile {} has no usable role ({:?})", id, role);
            return Ok(ProfileLookup::RoleMissing);
        };

        Ok(ProfileLookup::Found(Self::profile_from_row(&row, role)?))
    }

    fn profile_from_row(row: &SqliteRow, role: Role) -> DbErrorResult<Profile> {
        Ok(Profile {
            id: row.try_get("id")?,
            email: row.try_get("email")?,
            full_name: row.try_get("full_name")?,
            role,
            avatar_url: row.try_get("avatar_url")?,
            created_at: parse_timestamp("profiles.created_at", row.try_get("created_at")?)?,
        })
    }

    pub async fn upsert_profile(&self, profile: &Profile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO profiles (id, email, full_name, role, avatar_url, created_at)
              VALUES (?, ?, ?, ?, ?, ?)
              ON CONFLICT(id) DO UPDATE SET
                  email = excluded.email,
                  full_name = excluded.full_name,
                  role = excluded.role,
                  avatar_url = excluded.avatar_url
              "#,
        )
        .bind(&profile.id)
        .bind(&profile.email)
        .bind(&profile.full_name)
        .bind(profile.role.as_str())
        .bind(&profile.avatar_url)
        .bind(profile.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn role_counts(&self) -> DbErrorResult<HashMap<Role, u64>> {
        let rows = sqlx::query(
            r#"
              SELECT role, COUNT(*) AS total
              FROM profiles
              WHERE role IS NOT NULL
              GROUP BY role
              "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut counts = HashMap::new();
        for row in rows {
            let role: String = row.try_get("role")?;
            let total: i64 = row.try_get("total")?;
            match Role::from_str(&role) {
                Ok(role) => {
                    counts.insert(role, total.max(0) as u64);
                }
                Err(_) => warn!("Skipping {} profile(s) with unknown role '{}'", total, role),
            }
        }

        Ok(counts)
    }

    pub async fn profiles_with_role(&self, role: Role) -> DbErrorResult<Vec<Profile>> {
        let rows = sqlx::query(
            r#"
              SELECT id, email, full_name, role, avatar_url, created_at
              FROM profiles
              WHERE role = ?
              ORDER BY full_name ASC
              "#,
        )
        .bind(role.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| Self::profile_from_row(row, role))
            .collect()
    }

    pub async fn find_doctor_details(&self, user_id: &str) -> DbErrorResult<Option<DoctorDetails>> {
        let row = sqlx::query(
            r#"
              SELECT user_id, specialization, license_number, experience_years,
                     consultation_fee, bio, available_days, available_hours, status
              FROM doctor_details
              WHERE user_id = ?
              "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let experience_years: i64 = row.try_get("experience_years")?;
        let consultation_fee: i64 = row.try_get("consultation_fee")?;
        let available_days: String = row.try_get("available_days")?;
        let status: String = row.try_get("status")?;

        Ok(Some(DoctorDetails {
            user_id: row.try_get("user_id")?,
            specialization: row.try_get("specialization")?,
            license_number: row.try_get("license_number")?,
            experience_years: u32::try_from(experience_years).map_err(|e| {
                DbError::decode("doctor_details.experience_years", experience_years.to_string(), e)
            })?,
            consultation_fee: u32::try_from(consultation_fee).map_err(|e| {
                DbError::decode("doctor_details.consultation_fee", consultation_fee.to_string(), e)
            })?,
            bio: row.try_get("bio")?,
            available_days: parse_json("doctor_details.available_days", &available_days)?,
            available_hours: row.try_get("available_hours")?,
            status: parse_enum("doctor_details.status", &status)?,
        }))
    }

    pub async fn upsert_doctor_details(&self, details: &DoctorDetails) -> DbErrorResult<()> {
        let available_days = to_json("doctor_details.available_days", &details.available_days)?;

        sqlx::query(
            r#"
              INSERT INTO doctor_details (
                  user_id, specialization, license_number, experience_years,
                  consultation_fee, bio, available_days, available_hours, status
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(user_id) DO UPDATE SET
                  specialization = excluded.specialization,
                  license_number = excluded.license_number,
                  experience_years = excluded.experience_years,
                  consultation_fee = excluded.consultation_fee,
                  bio = excluded.bio,
                  available_days = excluded.available_days,
                  available_hours = excluded.available_hours,
                  status = excluded.status
              "#,
        )
        .bind(&details.user_id)
        .bind(&details.specialization)
        .bind(&details.license_number)
        .bind(i64::from(details.experience_years))
        .bind(i64::from(details.consultation_fee))
        .bind(&details.bio)
        .bind(available_days)
        .bind(&details.available_hours)
        .bind(details.status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_patient_details(&self, user_id: &str) -> DbErrorResult<Option<PatientDetails>> {
        let row = sqlx::query(
            r#"
              SELECT user_id, date_of_birth, gender, blood_type, phone, address,
                     emergency_contact, medical_history
              FROM patient_details
              WHERE user_id = ?
              "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let date_of_birth: Option<String> = row.try_get("date_of_birth")?;
        let gender: Option<String> = row.try_get("gender")?;

        Ok(Some(PatientDetails {
            user_id: row.try_get("user_id")?,
            date_of_birth: date_of_birth
                .as_deref()
                .map(|d| parse_date("patient_details.date_of_birth", d))
                .transpose()?,
            gender: gender
                .as_deref()
                .map(|g| parse_enum("patient_details.gender", g))
                .transpose()?,
            blood_type: row.try_get("blood_type")?,
            phone: row.try_get("phone")?,
            address: row.try_get("address")?,
            emergency_contact: row.try_get("emergency_contact")?,
            medical_history: row.try_get("medical_history")?,
        }))
    }

    pub async fn upsert_patient_details(&self, details: &PatientDetails) -> DbErrorResult<()> {
        let date_of_birth = details
            .date_of_birth
            .map(|d| d.format(DATE_FORMAT).to_string());

        sqlx::query(
            r#"
              INSERT INTO patient_details (
                  user_id, date_of_birth, gender, blood_type, phone, address,
                  emergency_contact, medical_history
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
              ON CONFLICT(user_id) DO UPDATE SET
                  date_of_birth = excluded.date_of_birth,
                  gender = excluded.gender,
                  blood_type = excluded.blood_type,
                  phone = excluded.phone,
                  address = excluded.address,
                  emergency_contact = excluded.emergency_contact,
                  medical_history = excluded.medical_history
              "#,
        )
        .bind(&details.user_id)
        .bind(date_of_birth)
        .bind(details.gender.map(|g| g.as_str()))
        .bind(&details.blood_type)
        .bind(&details.phone)
        .bind(&details.address)
        .bind(&details.emergency_contact)
        .bind(&details.medical_history)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepository {
    async fn get_profile(&self, id: &str) -> CoreErrorResult<ProfileLookup> {
        Ok(self.find_profile(id).await?)
    }

    async fn put_profile(&self, profile: &Profile) -> CoreErrorResult<()> {
        profile.validate()?;
        Ok(self.upsert_profile(profile).await?)
    }

    async fn count_by_role(&self) -> CoreErrorResult<HashMap<Role, u64>> {
        Ok(self.role_counts().await?)
    }

    async fn list_by_role(&self, role: Role) -> CoreErrorResult<Vec<Profile>> {
        Ok(self.profiles_with_role(role).await?)
    }

    async fn get_doctor_details(&self, user_id: &str) -> CoreErrorResult<Option<DoctorDetails>> {
        Ok(self.find_doctor_details(user_id).await?)
    }

    async fn put_doctor_details(&self, details: &DoctorDetails) -> CoreErrorResult<()> {
        details.validate()?;
        Ok(self.upsert_doctor_details(details).await?)
    }

    async fn get_patient_details(&self, user_id: &str) -> CoreErrorResult<Option<PatientDetails>> {
        Ok(self.find_patient_details(user_id).await?)
    }

    async fn put_patient_details(&self, details: &PatientDetails) -> CoreErrorResult<()> {
        Ok(self.upsert_patient_details(details).await?)
    }
}
