use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_DATABASE_FILENAME, DEFAULT_REQUEST_TIMEOUT_SECS,
    MAX_REQUEST_TIMEOUT_SECS,
};

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

/// Which adapter backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Local relational store
    #[default]
    Sqlite,
    /// Hosted REST backend
    Rest,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Rest => "rest",
        }
    }
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    #[track_caller]
    fn from_str(s: &str) -> ConfigErrorResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "rest" => Ok(Self::Rest),
            other => Err(ConfigError::backend(format!(
                "unknown backend kind '{}', expected 'sqlite' or 'rest'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// SQLite file, relative to the config directory
    pub database_path: String,
    /// Base URL of the REST backend, e.g. "https://project.example.co"
    pub rest_url: Option<String>,
    /// Public API key sent with every REST request
    pub anon_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::default(),
            database_path: String::from(DEFAULT_DATABASE_FILENAME),
            rest_url: None,
            anon_key: None,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl BackendConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.request_timeout_secs == 0 || self.request_timeout_secs > MAX_REQUEST_TIMEOUT_SECS {
            return Err(ConfigError::backend(format!(
                "request_timeout_secs must be 1-{}, got {}",
                MAX_REQUEST_TIMEOUT_SECS, self.request_timeout_secs
            )));
        }

        match self.kind {
            BackendKind::Sqlite => {
                let db_path = Path::new(&self.database_path);
                if self.database_path.is_empty()
                    || db_path.is_absolute()
                    || self.database_path.contains("..")
                {
                    return Err(ConfigError::backend(
                        "database_path must be relative and cannot contain '..'",
                    ));
                }
            }
            BackendKind::Rest => {
                let url = self.rest_url.as_deref().ok_or_else(|| {
                    ConfigError::backend("rest_url is required when kind = \"rest\"")
                })?;
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::backend(format!(
                        "rest_url '{}' must start with http:// or https://",
                        url
                    )));
                }
                if self.anon_key.as_deref().is_none_or(str::is_empty) {
                    return Err(ConfigError::backend(
                        "anon_key is required when kind = \"rest\"",
                    ));
                }
            }
        }

        Ok(())
    }
}
