use crate::repositories::{
    DATE_FORMAT, TIME_FORMAT, parse_date, parse_enum, parse_time, parse_timestamp, parse_uuid,
};
use crate::{DbError, Result as DbErrorResult};

use async_trait::async_trait;
use hs_core::{
    Appointment, AppointmentRepository, AppointmentStatus, CoreError, Result as CoreErrorResult,
};
use log::debug;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const SELECT_APPOINTMENT: &str = r#"
    SELECT id, patient_id, doctor_id, appointment_date, appointment_time,
           status, reason, notes, created_at
    FROM appointments
"#;

pub struct SqliteAppointmentRepository {
    pool: SqlitePool,
}

impl SqliteAppointmentRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, appointment: &Appointment) -> DbErrorResult<()> {
        sqlx::query(
            r#"
              INSERT INTO appointments (
                  id, patient_id, doctor_id, appointment_date, appointment_time,
                  status, reason, notes, created_at
              ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
              "#,
        )
        .bind(appointment.id.to_string())
        .bind(&appointment.patient_id)
        .bind(&appointment.doctor_id)
        .bind(appointment.appointment_date.format(DATE_FORMAT).to_string())
        .bind(appointment.time_label())
        .bind(appointment.status.as_str())
        .bind(&appointment.reason)
        .bind(&appointment.notes)
        .bind(appointment.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find(&self, id: Uuid) -> DbErrorResult<Option<Appointment>> {
        let row = sqlx::query(&format!("{SELECT_APPOINTMENT} WHERE id = ?"))
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    /// `column` is one of the fixed id columns, never user input
    async fn list_where(&self, column: &str, value: &str) -> DbErrorResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "{SELECT_APPOINTMENT} WHERE {column} = ? ORDER BY appointment_date DESC, appointment_time DESC"
        ))
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    pub async fn all(&self) -> DbErrorResult<Vec<Appointment>> {
        let rows = sqlx::query(&format!(
            "{SELECT_APPOINTMENT} ORDER BY appointment_date DESC, appointment_time DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    /// Write the new status only if the row still holds `expected`.
    /// Returns false when the row is gone or another writer moved it first.
    pub async fn save_status(
        &self,
        appointment: &Appointment,
        expected: AppointmentStatus,
    ) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
              UPDATE appointments
              SET status = ?, notes = ?
              WHERE id = ? AND status = ?
              "#,
        )
        .bind(appointment.status.as_str())
        .bind(&appointment.notes)
        .bind(appointment.id.to_string())
        .bind(expected.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    fn from_row(row: &SqliteRow) -> DbErrorResult<Appointment> {
        let id: String = row.try_get("id")?;
        let date: String = row.try_get("appointment_date")?;
        let time: String = row.try_get("appointment_time")?;
        let status: String = row.try_get("status")?;

        Ok(Appointment {
            id: parse_uuid("appointments.id", &id)?,
            patient_id: row.try_get("patient_id")?,
            doctor_id: row.try_get("doctor_id")?,
            appointment_date: parse_date("appointments.appointment_date", &date)?,
            appointment_time: parse_time("appointments.appointment_time", &time)?,
            status: parse_enum("appointments.status", &status)?,
            reason: row.try_get("reason")?,
            notes: row.try_get("notes")?,
            created_at: parse_timestamp("appointments.created_at", row.try_get("created_at")?)?,
        })
    }
}

/// Slot clashes surface as a UNIQUE violation on the partial index
fn slot_conflict(err: DbError, appointment: &Appointment) -> CoreError {
    if err.is_unique_violation() {
        CoreError::conflict(format!(
            "doctor {} already has an appointment on {} at {}",
            appointment.doctor_id,
            appointment.appointment_date.format(DATE_FORMAT),
            appointment.appointment_time.format(TIME_FORMAT)
        ))
    } else {
        err.into()
    }
}

#[async_trait]
impl AppointmentRepository for SqliteAppointmentRepository {
    async fn create(&self, appointment: &Appointment) -> CoreErrorResult<()> {
        self.insert(appointment)
            .await
            .map_err(|e| slot_conflict(e, appointment))?;
        debug!("Booked appointment {}", appointment.id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreErrorResult<Option<Appointment>> {
        Ok(self.find(id).await?)
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Appointment>> {
        Ok(self.list_where("patient_id", patient_id).await?)
    }

    async fn list_for_doctor(&self, doctor_id: &str) -> CoreErrorResult<Vec<Appointment>> {
        Ok(self.list_where("doctor_id", doctor_id).await?)
    }

    async fn list_all(&self) -> CoreErrorResult<Vec<Appointment>> {
        Ok(self.all().await?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> CoreErrorResult<Appointment> {
        let mut appointment = self
            .find(id)
            .await?
            .ok_or_else(|| CoreError::not_found("appointment", id.to_string()))?;

        let read_status = appointment.status;
        appointment.transition(status)?;
        if notes.is_some() {
            appointment.notes = notes;
        }

        if !self.save_status(&appointment, read_status).await? {
            return Err(match self.find(id).await? {
                Some(current) => CoreError::conflict(format!(
                    "appointment {} moved to {} before it could be {}",
                    id, current.status, status
                )),
                None => CoreError::not_found("appointment", id.to_string()),
            });
        }
        Ok(appointment)
    }
}
