use std::panic::Location;

use error_location::ErrorLocation;
use hs_core::CoreError;
use thiserror::Error;

pub(crate) const BACKEND: &str = "rest";

/// PostgREST reports unique violations with the Postgres SQLSTATE
const UNIQUE_VIOLATION: &str = "23505";

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to backend timed out: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("API error: {message} (status: {status}, code: {code}) {location}")]
    Api {
        status: u16,
        code: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },

    #[error("Client configuration error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },
}

impl ClientError {
    /// Transport failure; timeouts get their own variant
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ClientError::Timeout {
                message: err.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }
        ClientError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Response body did not match the expected row shape
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        ClientError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    #[track_caller]
    pub fn api_error(status: u16, code: String, message: String) -> Self {
        ClientError::Api {
            status,
            code,
            message,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn config<S: Into<String>>(message: S) -> Self {
        ClientError::Config {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The write collided with an existing row
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Api { status: 409, .. })
            || matches!(self, Self::Api { code, .. } if code == UNIQUE_VIOLATION)
    }
}

impl From<reqwest::Error> for ClientError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        ClientError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for ClientError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        ClientError::from_json(err)
    }
}

impl From<ClientError> for CoreError {
    #[track_caller]
    fn from(err: ClientError) -> Self {
        if err.is_conflict() {
            CoreError::conflict(err.to_string())
        } else {
            CoreError::store(BACKEND, err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
