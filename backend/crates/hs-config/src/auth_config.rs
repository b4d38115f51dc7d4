use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_PROFILE_FETCH_TIMEOUT_SECS,
    MAX_PROFILE_FETCH_TIMEOUT_SECS, MIN_JWT_SECRET_LENGTH, MIN_PROFILE_FETCH_TIMEOUT_SECS,
};

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

/// Session token verification and profile lookup settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HS256 shared secret used by the identity service
    pub jwt_secret: Option<String>,
    /// RS256 public key (PEM), relative to the config directory
    pub jwt_public_key_path: Option<String>,
    /// Upper bound on a single profile lookup
    pub profile_fetch_timeout_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            jwt_public_key_path: None,
            profile_fetch_timeout_secs: DEFAULT_PROFILE_FETCH_TIMEOUT_SECS,
        }
    }
}

impl AuthConfig {
    pub fn profile_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.profile_fetch_timeout_secs)
    }

    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if !(MIN_PROFILE_FETCH_TIMEOUT_SECS..=MAX_PROFILE_FETCH_TIMEOUT_SECS)
            .contains(&self.profile_fetch_timeout_secs)
        {
            return Err(ConfigError::auth(format!(
                "profile_fetch_timeout_secs must be {}-{}, got {}",
                MIN_PROFILE_FETCH_TIMEOUT_SECS,
                MAX_PROFILE_FETCH_TIMEOUT_SECS,
                self.profile_fetch_timeout_secs
            )));
        }

        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::auth(
                "auth requires either jwt_secret or jwt_public_key_path",
            )),
            (Some(_), Some(_)) => Err(ConfigError::auth(
                "jwt_secret and jwt_public_key_path are mutually exclusive",
            )),
            (Some(secret), None) => {
                if secret.len() < MIN_JWT_SECRET_LENGTH {
                    return Err(ConfigError::auth(format!(
                        "jwt_secret must be at least {} characters",
                        MIN_JWT_SECRET_LENGTH
                    )));
                }
                Ok(())
            }
            (None, Some(key_path)) => {
                let path = Path::new(key_path);
                if path.is_absolute() || key_path.contains("..") {
                    return Err(ConfigError::auth(
                        "jwt_public_key_path must be relative and cannot contain '..'",
                    ));
                }
                if !config_dir.join(path).exists() {
                    return Err(ConfigError::auth(format!(
                        "jwt_public_key_path '{}' does not exist in {}",
                        key_path,
                        config_dir.display()
                    )));
                }
                Ok(())
            }
        }
    }
}
