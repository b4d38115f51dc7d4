mod appointment;
mod appointment_stats;
mod diagnosis;
mod doctor_details;
mod profile;
mod role;
