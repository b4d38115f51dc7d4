use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_ADMIN_HOME_PATH, DEFAULT_DOCTOR_HOME_PATH,
    DEFAULT_HOME_PATH, DEFAULT_LOGIN_PATH, DEFAULT_PATIENT_HOME_PATH, DEFAULT_SIGNUP_PATH,
};

use std::collections::HashSet;

use serde::Deserialize;

/// Well-known paths the navigation guard redirects to
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub home: String,
    pub login: String,
    pub signup: String,
    pub patient_home: String,
    pub doctor_home: String,
    pub admin_home: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            home: String::from(DEFAULT_HOME_PATH),
            login: String::from(DEFAULT_LOGIN_PATH),
            signup: String::from(DEFAULT_SIGNUP_PATH),
            patient_home: String::from(DEFAULT_PATIENT_HOME_PATH),
            doctor_home: String::from(DEFAULT_DOCTOR_HOME_PATH),
            admin_home: String::from(DEFAULT_ADMIN_HOME_PATH),
        }
    }
}

impl RoutesConfig {
    fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("home", &self.home),
            ("login", &self.login),
            ("signup", &self.signup),
            ("patient_home", &self.patient_home),
            ("doctor_home", &self.doctor_home),
            ("admin_home", &self.admin_home),
        ]
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        let mut seen = HashSet::new();
        for (name, path) in self.entries() {
            if !path.starts_with('/') {
                return Err(ConfigError::routes(format!(
                    "routes.{} must start with '/', got '{}'",
                    name, path
                )));
            }
            if path.contains(['?', '#']) {
                return Err(ConfigError::routes(format!(
                    "routes.{} must be a bare path, got '{}'",
                    name, path
                )));
            }
            if !seen.insert(path) {
                return Err(ConfigError::routes(format!(
                    "routes.{} reuses path '{}'",
                    name, path
                )));
            }
        }
        Ok(())
    }
}
