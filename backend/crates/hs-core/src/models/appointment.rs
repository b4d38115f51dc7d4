//! Appointment entity - a patient's booked slot with a doctor.

use crate::{AppointmentStatus, CoreError, Result as CoreErrorResult};

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TIME_FORMAT: &str = "%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: String,
    pub doctor_id: String,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub status: AppointmentStatus,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input collected by the booking form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub patient_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    /// "HH:MM"
    pub time: String,
    pub reason: Option<String>,
}

impl Appointment {
    /// Validate a booking request against `today` and build a scheduled appointment.
    #[track_caller]
    pub fn book(request: BookingRequest, today: NaiveDate) -> CoreErrorResult<Self> {
        if request.patient_id.is_empty() || request.doctor_id.is_empty() {
            return Err(CoreError::validation("patient and doctor are required"));
        }
        if request.patient_id == request.doctor_id {
            return Err(CoreError::validation("a user cannot book themselves"));
        }
        if request.date < today {
            return Err(CoreError::validation(format!(
                "appointment date {} is in the past",
                request.date
            )));
        }
        let time = NaiveTime::parse_from_str(&request.time, TIME_FORMAT).map_err(|_| {
            CoreError::validation(format!(
                "appointment time '{}' must be HH:MM",
                request.time
            ))
        })?;

        Ok(Self {
            id: Uuid::new_v4(),
            patient_id: request.patient_id,
            doctor_id: request.doctor_id,
            appointment_date: request.date,
            appointment_time: time,
            status: AppointmentStatus::Scheduled,
            reason: request.reason.filter(|r| !r.trim().is_empty()),
            notes: None,
            created_at: Utc::now(),
        })
    }

    /// Two scheduled appointments for the same doctor in the same slot
    pub fn conflicts_with(&self, other: &Appointment) -> bool {
        self.id != other.id
            && self.status == AppointmentStatus::Scheduled
            && other.status == AppointmentStatus::Scheduled
            && self.doctor_id == other.doctor_id
            && self.appointment_date == other.appointment_date
            && self.appointment_time == other.appointment_time
    }

    /// Scheduled and not before `today`
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.status == AppointmentStatus::Scheduled && self.appointment_date >= today
    }

    /// Move to `next`, rejecting transitions out of a final status
    #[track_caller]
    pub fn transition(&mut self, next: AppointmentStatus) -> CoreErrorResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::validation(format!(
                "cannot move appointment from {} to {}",
                self.status, next
            )));
        }
        self.status = next;
        Ok(())
    }

    pub fn time_label(&self) -> String {
        self.appointment_time.format(TIME_FORMAT).to_string()
    }
}
