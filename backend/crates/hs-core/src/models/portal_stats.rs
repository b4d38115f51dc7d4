use crate::{AppointmentStats, Role};

use std::collections::HashMap;

use serde::Serialize;

/// Admin dashboard summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PortalStats {
    pub patients: u64,
    pub doctors: u64,
    pub admins: u64,
    pub appointments: AppointmentStats,
}

impl PortalStats {
    pub fn new(role_counts: &HashMap<Role, u64>, appointments: AppointmentStats) -> Self {
        let count = |role| role_counts.get(&role).copied().unwrap_or(0);
        Self {
            patients: count(Role::Patient),
            doctors: count(Role::Doctor),
            admins: count(Role::Admin),
            appointments,
        }
    }

    pub fn total_users(&self) -> u64 {
        self.patients + self.doctors + self.admins
    }
}
