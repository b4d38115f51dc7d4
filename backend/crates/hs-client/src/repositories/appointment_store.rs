use crate::RestClient;
use crate::client::rest_client::eq_filter;

use std::sync::Arc;

use async_trait::async_trait;
use hs_core::{
    Appointment, AppointmentRepository, AppointmentStatus, CoreError, Result as CoreErrorResult,
};
use log::debug;
use serde::Serialize;
use uuid::Uuid;

const APPOINTMENTS: &str = "appointments";
const NEWEST_FIRST: &str = "appointment_date.desc,appointment_time.desc";

#[derive(Serialize)]
struct StatusPatch<'a> {
    status: AppointmentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<&'a str>,
}

pub struct RestAppointmentRepository {
    client: Arc<RestClient>,
}

impl RestAppointmentRepository {
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    async fn list_where(&self, column: &str, value: &str) -> CoreErrorResult<Vec<Appointment>> {
        Ok(self
            .client
            .select(
                APPOINTMENTS,
                &[(column, eq_filter(value)), ("order", NEWEST_FIRST.to_string())],
            )
            .await?)
    }
}

#[async_trait]
impl AppointmentRepository for RestAppointmentRepository {
    /// The backend's unique slot index answers 409, surfaced as `Conflict`
    async fn create(&self, appointment: &Appointment) -> CoreErrorResult<()> {
        self.client.insert(APPOINTMENTS, appointment, false).await?;
        debug!("Booked appointment {}", appointment.id);
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> CoreErrorResult<Option<Appointment>> {
        let rows: Vec<Appointment> = self
            .client
            .select(APPOINTMENTS, &[("id", eq_filter(id))])
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn list_for_patient(&self, patient_id: &str) -> CoreErrorResult<Vec<Appointment>> {
        self.list_where("patient_id", patient_id).await
    }

    async fn list_for_doctor(&self, doctor_id: &str) -> CoreErrorResult<Vec<Appointment>> {
        self.list_where("doctor_id", doctor_id).await
    }

    async fn list_all(&self) -> CoreErrorResult<Vec<Appointment>> {
        Ok(self
            .client
            .select(APPOINTMENTS, &[("order", NEWEST_FIRST.to_string())])
            .await?)
    }

    async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
        notes: Option<String>,
    ) -> CoreErrorResult<Appointment> {
        let mut appointment = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| CoreError::not_found("appointment", id.to_string()))?;
        let read_status = appointment.status;
        appointment.transition(status)?;

        let patch = StatusPatch {
            status,
            notes: notes.as_deref(),
        };
        // Filtering on the status just read makes the check and the write one request
        let rows: Vec<Appointment> = self
            .client
            .update(
                APPOINTMENTS,
                &[("id", eq_filter(id)), ("status", eq_filter(read_status))],
                &patch,
            )
            .await?;

        if let Some(updated) = rows.into_iter().next() {
            return Ok(updated);
        }
        match self.find_by_id(id).await? {
            Some(current) => Err(CoreError::conflict(format!(
                "appointment {} moved to {} before it could be {}",
                id, current.status, status
            ))),
            None => Err(CoreError::not_found("appointment", id.to_string())),
        }
    }
}
