use std::time::Duration;

use error_location::ErrorLocation;
use hs_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Identity stream error: {message} {location}")]
    IdentityStream {
        message: String,
        location: ErrorLocation,
    },

    #[error("Profile fetch failed: {source} {location}")]
    ProfileFetch {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("Profile fetch timed out after {timeout:?} {location}")]
    ProfileFetchTimeout {
        timeout: Duration,
        location: ErrorLocation,
    },

    #[error("Sign-out rejected: {message} {location}")]
    SignOut {
        message: String,
        location: ErrorLocation,
    },

    #[error("Identity changed while the request was in flight {location}")]
    IdentityChanged { location: ErrorLocation },

    #[error("Invalid token: {message} {location}")]
    InvalidToken {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token expired {location}")]
    TokenExpired { location: ErrorLocation },

    #[error("JWT decode failed: {source} {location}")]
    JwtDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
        location: ErrorLocation,
    },

    #[error("Invalid claim '{claim}': {message} {location}")]
    InvalidClaim {
        claim: String,
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    /// Short reason suitable for an error indicator, without the source location
    pub fn reason(&self) -> String {
        match self {
            Self::IdentityStream { message, .. } => message.clone(),
            Self::ProfileFetch { source, .. } => match source {
                CoreError::Store { message, .. } => message.clone(),
                other => other.to_string(),
            },
            Self::ProfileFetchTimeout { timeout, .. } => {
                format!("profile lookup timed out after {}s", timeout.as_secs())
            }
            Self::SignOut { message, .. } => message.clone(),
            Self::IdentityChanged { .. } => "identity changed".to_string(),
            Self::InvalidToken { message, .. } => message.clone(),
            Self::TokenExpired { .. } => "session expired".to_string(),
            Self::JwtDecode { source, .. } => source.to_string(),
            Self::InvalidClaim { claim, message, .. } => format!("{claim}: {message}"),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
