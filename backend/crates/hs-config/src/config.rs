use crate::{
    AuthConfig, BackendConfig, BackendKind, CONFIG_DIR_ENV, CONFIG_FILE_NAME, ConfigError,
    ConfigErrorResult, DEFAULT_CONFIG_DIR_NAME, LoggingConfig, RoutesConfig,
};

use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub backend: BackendConfig,
    pub auth: AuthConfig,
    pub routes: RoutesConfig,
    pub logging: LoggingConfig,
    /// Directory the config was loaded from; relative paths resolve against it
    #[serde(skip)]
    pub config_dir: PathBuf,
}

impl Config {
    /// Load config from the default directory.
    ///
    /// Loading order:
    /// 1. Check for HS_CONFIG_DIR env var, else use ./.healthsync/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply HS_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        Self::load_from(Self::config_dir()?)
    }

    /// Load config from an explicit directory (steps 2-4 of `load`).
    pub fn load_from(config_dir: PathBuf) -> ConfigErrorResult<Self> {
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILE_NAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.config_dir = config_dir;
        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Priority: HS_CONFIG_DIR env var > ./.healthsync/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR_NAME))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.backend.validate()?;
        self.auth.validate(&self.config_dir)?;
        self.routes.validate()?;

        if let Some(file) = &self.logging.file
            && (file.is_empty() || file.contains(['/', '\\']))
        {
            return Err(ConfigError::logging(
                "logging.file must be a bare file name inside logging.dir",
            ));
        }

        Ok(())
    }

    /// Absolute path to the SQLite database file.
    pub fn database_path(&self) -> PathBuf {
        self.config_dir.join(&self.backend.database_path)
    }

    /// Absolute path to the RS256 public key, if configured.
    pub fn jwt_public_key_path(&self) -> Option<PathBuf> {
        self.auth
            .jwt_public_key_path
            .as_ref()
            .map(|p| self.config_dir.join(p))
    }

    /// Absolute path to the log file, if file logging is configured.
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.logging
            .file
            .as_ref()
            .map(|file| self.config_dir.join(&self.logging.dir).join(file))
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded from {}:", self.config_dir.display());

        match self.backend.kind {
            BackendKind::Sqlite => info!("  backend: sqlite ({})", self.backend.database_path),
            BackendKind::Rest => info!(
                "  backend: rest ({}, timeout={}s)",
                self.backend.rest_url.as_deref().unwrap_or("<unset>"),
                self.backend.request_timeout_secs
            ),
        }

        let token_algorithm = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };
        info!(
            "  auth: {} tokens, profile fetch timeout={}s",
            token_algorithm, self.auth.profile_fetch_timeout_secs
        );

        info!(
            "  routes: login={}, signup={}, homes=[{}, {}, {}]",
            self.routes.login,
            self.routes.signup,
            self.routes.patient_home,
            self.routes.doctor_home,
            self.routes.admin_home
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Backend
        Self::apply_env_parse("HS_BACKEND_KIND", &mut self.backend.kind);
        Self::apply_env_string("HS_DATABASE_PATH", &mut self.backend.database_path);
        Self::apply_env_option_string("HS_REST_URL", &mut self.backend.rest_url);
        Self::apply_env_option_string("HS_ANON_KEY", &mut self.backend.anon_key);
        Self::apply_env_parse(
            "HS_REQUEST_TIMEOUT_SECS",
            &mut self.backend.request_timeout_secs,
        );

        // Auth
        Self::apply_env_option_string("HS_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "HS_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );
        Self::apply_env_parse(
            "HS_PROFILE_FETCH_TIMEOUT_SECS",
            &mut self.auth.profile_fetch_timeout_secs,
        );

        // Routes
        Self::apply_env_string("HS_ROUTE_LOGIN", &mut self.routes.login);
        Self::apply_env_string("HS_ROUTE_SIGNUP", &mut self.routes.signup);

        // Logging
        Self::apply_env_parse("HS_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("HS_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("HS_LOG_FILE", &mut self.logging.file);
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
