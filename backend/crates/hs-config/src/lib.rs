mod auth_config;
mod backend_config;
mod config;
mod error;
mod log_level;
mod logging_config;
mod routes_config;

pub use auth_config::AuthConfig;
pub use backend_config::{BackendConfig, BackendKind};
pub use config::Config;
pub use error::{ConfigError, ConfigErrorResult};
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use routes_config::RoutesConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "HS_CONFIG_DIR";
const DEFAULT_CONFIG_DIR_NAME: &str = ".healthsync";
const CONFIG_FILE_NAME: &str = "config.toml";

const DEFAULT_DATABASE_FILENAME: &str = "healthsync.db";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

const DEFAULT_PROFILE_FETCH_TIMEOUT_SECS: u64 = 10;
const MIN_PROFILE_FETCH_TIMEOUT_SECS: u64 = 1;
const MAX_PROFILE_FETCH_TIMEOUT_SECS: u64 = 300;
const MIN_JWT_SECRET_LENGTH: usize = 32;

const DEFAULT_HOME_PATH: &str = "/";
const DEFAULT_LOGIN_PATH: &str = "/login";
const DEFAULT_SIGNUP_PATH: &str = "/signup";
const DEFAULT_PATIENT_HOME_PATH: &str = "/patient/dashboard";
const DEFAULT_DOCTOR_HOME_PATH: &str = "/doctor/dashboard";
const DEFAULT_ADMIN_HOME_PATH: &str = "/admin/dashboard";

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;
