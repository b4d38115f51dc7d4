use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },

    #[error("Invalid role: {value} {location}")]
    InvalidRole {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid appointment status: {value} {location}")]
    InvalidAppointmentStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid record type: {value} {location}")]
    InvalidRecordType {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid doctor status: {value} {location}")]
    InvalidDoctorStatus {
        value: String,
        location: ErrorLocation,
    },

    #[error("Invalid gender: {value} {location}")]
    InvalidGender {
        value: String,
        location: ErrorLocation,
    },

    #[error("{entity} not found: {id} {location}")]
    NotFound {
        entity: &'static str,
        id: String,
        location: ErrorLocation,
    },

    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    #[error("{backend} store error: {message} {location}")]
    Store {
        backend: &'static str,
        message: String,
        location: ErrorLocation,
    },

    #[error("UUID parse error: {source} {location}")]
    Uuid {
        source: uuid::Error,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error
    #[track_caller]
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a not-found error for an entity id
    #[track_caller]
    pub fn not_found<S: Into<String>>(entity: &'static str, id: S) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a conflict error (slot already taken, duplicate record)
    #[track_caller]
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create a backend failure error (network, permission, database)
    #[track_caller]
    pub fn store<S: Into<String>>(backend: &'static str, message: S) -> Self {
        Self::Store {
            backend,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Backend failures are the only errors worth surfacing as "try again"
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store { .. })
    }
}

impl From<uuid::Error> for CoreError {
    #[track_caller]
    fn from(source: uuid::Error) -> Self {
        Self::Uuid {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
