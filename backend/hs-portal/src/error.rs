use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortalError {
    #[error("Config error: {0}")]
    Config(#[from] hs_config::ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] hs_db::DbError),

    #[error("REST client error: {0}")]
    Client(#[from] hs_client::ClientError),

    #[error("Auth error: {0}")]
    Auth(#[from] hs_auth::AuthError),

    #[error("Route error: {0}")]
    Guard(#[from] hs_guard::GuardError),

    #[error("Failed to read JWT key file {path}: {source}")]
    JwtKeyFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No session signing key configured {location}")]
    MissingSigningKey { location: ErrorLocation },

    #[error("Logger error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    #[error("{message}")]
    Command {
        message: String,
        location: ErrorLocation,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortalError {
    #[track_caller]
    pub fn logger<S: Into<String>>(message: S) -> Self {
        Self::Logger {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Bad shell input; the message is shown to the user as-is
    #[track_caller]
    pub fn command<S: Into<String>>(message: S) -> Self {
        Self::Command {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
