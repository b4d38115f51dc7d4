use std::panic::Location;

use error_location::ErrorLocation;
use hs_core::CoreError;
use thiserror::Error;

pub(crate) const BACKEND: &str = "sqlite";

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLx error: {source} {location}")]
    Sqlx {
        source: sqlx::Error,
        location: ErrorLocation,
    },

    #[error("Migration error: {message} {location}")]
    Migration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Database initialization failed: {message} {location}")]
    Initialization {
        message: String,
        location: ErrorLocation,
    },

    #[error("Corrupt {column} value '{value}': {message} {location}")]
    Decode {
        column: &'static str,
        value: String,
        message: String,
        location: ErrorLocation,
    },
}

impl DbError {
    #[track_caller]
    pub(crate) fn decode(column: &'static str, value: impl Into<String>, message: impl ToString) -> Self {
        Self::Decode {
            column,
            value: value.into(),
            message: message.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the statement hit a UNIQUE constraint
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::Sqlx {
                source: sqlx::Error::Database(db),
                ..
            } => db.is_unique_violation(),
            _ => false,
        }
    }
}

impl From<sqlx::Error> for DbError {
    #[track_caller]
    fn from(source: sqlx::Error) -> Self {
        Self::Sqlx {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<DbError> for CoreError {
    #[track_caller]
    fn from(err: DbError) -> Self {
        CoreError::store(BACKEND, err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DbError>;
