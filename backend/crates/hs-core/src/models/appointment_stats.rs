use crate::{Appointment, AppointmentStatus};

use chrono::NaiveDate;
use serde::Serialize;

/// Stat-card counts shown on the patient and doctor dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AppointmentStats {
    pub total: usize,
    pub scheduled: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub upcoming: usize,
}

impl AppointmentStats {
    pub fn compute(appointments: &[Appointment], today: NaiveDate) -> Self {
        appointments
            .iter()
            .fold(Self::default(), |mut stats, appointment| {
                stats.total += 1;
                match appointment.status {
                    AppointmentStatus::Scheduled => stats.scheduled += 1,
                    AppointmentStatus::Completed => stats.completed += 1,
                    AppointmentStatus::Cancelled => stats.cancelled += 1,
                }
                if appointment.is_upcoming(today) {
                    stats.upcoming += 1;
                }
                stats
            })
    }
}
