use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use hs_core::{Identity, Role};
use serde::{Deserialize, Serialize};

const MAX_SUBJECT_LENGTH: usize = 128;

/// Access token claims as issued by the identity service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity id)
    pub sub: String,
    /// Email the identity signed in with
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration timestamp (Unix)
    pub exp: i64,
    /// Issued at timestamp (Unix)
    pub iat: i64,
    /// Role hint; the profile record stays authoritative
    #[serde(default)]
    pub role: Option<String>,
}

impl SessionClaims {
    /// Validate claims after JWT signature verification
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.sub.is_empty() {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub (identity id) cannot be empty".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        if self.sub.len() > MAX_SUBJECT_LENGTH {
            return Err(AuthError::InvalidClaim {
                claim: "sub".to_string(),
                message: "sub exceeds maximum length".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(email) = &self.email
            && !email.contains('@')
        {
            return Err(AuthError::InvalidClaim {
                claim: "email".to_string(),
                message: format!("'{}' is not an email address", email),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(role) = &self.role
            && Role::from_str(role).is_err()
        {
            return Err(AuthError::InvalidClaim {
                claim: "role".to_string(),
                message: format!("unknown role '{}'", role),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    pub fn identity(&self) -> Identity {
        Identity::new(self.sub.clone(), self.email.clone())
    }
}
