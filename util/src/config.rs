//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.
//!
//! Most callers use the free accessor functions at the bottom of this module
//! (`config::host()`, `config::llm_model()`, ...) instead of holding the lock.

use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub cors_origins: String,
    pub admin_username: String,
    pub admin_password: String,
    pub admin_full_name: String,
    pub llm_api_key: String,
    pub llm_api_url: String,
    pub llm_model: String,
    pub llm_timeout_secs: u64,
    pub llm_prompt_char_limit: usize,
    pub max_upload_bytes: usize,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

/// Parses `key` into `T`, falling back to `default` when unset or malformed.
fn parsed_or<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => match raw.trim().parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!("Ignoring malformed value for {key}: {raw:?}");
                default
            }
        },
        Err(_) => default,
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every value has a default, so a bare environment yields a working
    /// development configuration (grading calls fail until `LLM_API_KEY` is set).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: var_or("APP_ENV", "development"),
            project_name: var_or("PROJECT_NAME", "assignment-checker"),
            log_level: var_or("LOG_LEVEL", "api=info"),
            log_file: var_or("LOG_FILE", "api.log"),
            log_to_stdout: var_or("LOG_TO_STDOUT", "false") == "true",
            database_path: var_or("DATABASE_PATH", "data/assignment_checker.db"),
            host: var_or("HOST", "127.0.0.1"),
            port: parsed_or("PORT", 3000),
            cors_origins: var_or("CORS_ORIGINS", "*"),
            admin_username: var_or("ADMIN_USERNAME", "admin"),
            admin_password: var_or("ADMIN_PASSWORD", "admin123"),
            admin_full_name: var_or("ADMIN_FULL_NAME", "Administrator"),
            llm_api_key: env::var("LLM_API_KEY").unwrap_or_default(),
            llm_api_url: var_or("LLM_API_URL", "https://api.openai.com/v1/chat/completions"),
            llm_model: var_or("LLM_MODEL", "gpt-4o"),
            llm_timeout_secs: parsed_or("LLM_TIMEOUT_SECS", 120),
            llm_prompt_char_limit: parsed_or("LLM_PROMPT_CHAR_LIMIT", 3000),
            max_upload_bytes: parsed_or("MAX_UPLOAD_BYTES", 10 * 1024 * 1024),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_database_path(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.database_path = value.into());
    }

    pub fn set_admin_credentials(username: impl Into<String>, password: impl Into<String>) {
        let (username, password) = (username.into(), password.into());
        AppConfig::set_field(|cfg| {
            cfg.admin_username = username;
            cfg.admin_password = password;
        });
    }

    pub fn set_llm_api_key(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.llm_api_key = value.into());
    }

    pub fn set_llm_api_url(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.llm_api_url = value.into());
    }

    pub fn set_llm_prompt_char_limit(value: usize) {
        AppConfig::set_field(|cfg| cfg.llm_prompt_char_limit = value);
    }

    pub fn set_max_upload_bytes(value: usize) {
        AppConfig::set_field(|cfg| cfg.max_upload_bytes = value);
    }
}

// --- Free accessors ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn database_path() -> String {
    AppConfig::global().database_path.clone()
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

/// Allowed CORS origins. An empty list means "any origin".
pub fn cors_origins() -> Vec<String> {
    AppConfig::global()
        .cors_origins
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(str::to_owned)
        .collect()
}

pub fn admin_username() -> String {
    AppConfig::global().admin_username.clone()
}

pub fn admin_password() -> String {
    AppConfig::global().admin_password.clone()
}

pub fn admin_full_name() -> String {
    AppConfig::global().admin_full_name.clone()
}

pub fn llm_api_key() -> String {
    AppConfig::global().llm_api_key.clone()
}

pub fn llm_api_url() -> String {
    AppConfig::global().llm_api_url.clone()
}

pub fn llm_model() -> String {
    AppConfig::global().llm_model.clone()
}

pub fn llm_timeout_secs() -> u64 {
    AppConfig::global().llm_timeout_secs
}

pub fn llm_prompt_char_limit() -> usize {
    AppConfig::global().llm_prompt_char_limit
}

pub fn max_upload_bytes() -> usize {
    AppConfig::global().max_upload_bytes
}
