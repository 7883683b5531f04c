use anyhow::Result;
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::{defaults, envconfig::EnvConfig, validate};
use crate::db::dao::OtpPolicy;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub database: Option<DatabaseConfig>,
    pub lifecycle: LifecycleConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        <Self as EnvConfig>::from_env()
    }
}

impl EnvConfig for AppConfig {
    fn validate(&self) -> Result<()> {
        validate::validate(self)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub rust_log: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            rust_log: defaults::DEFAULT_RUST_LOG.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_db_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_db_min_idle")]
    pub min_idle: u32,
    /// Create missing tables and columns from the entity definitions on
    /// connect.
    #[serde(default = "default_db_sync_schema")]
    pub sync_schema: bool,
    #[serde(default = "default_db_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    /// Emit every SQL statement through `tracing`.
    #[serde(default = "default_db_log_statements")]
    pub log_statements: bool,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: defaults::DEFAULT_DB_MAX_CONNECTIONS,
            min_idle: defaults::DEFAULT_DB_MIN_IDLE,
            sync_schema: defaults::DEFAULT_DB_SYNC_SCHEMA,
            connect_timeout_secs: defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS,
            log_statements: defaults::DEFAULT_DB_LOG_STATEMENTS,
        }
    }
}

/// Lifetimes of one-time passcodes and refresh sessions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifecycleConfig {
    pub otp_ttl_minutes: i64,
    pub otp_length: usize,
    pub session_ttl_days: i64,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            otp_ttl_minutes: defaults::DEFAULT_OTP_TTL_MINUTES,
            otp_length: defaults::DEFAULT_OTP_LENGTH,
            session_ttl_days: defaults::DEFAULT_SESSION_TTL_DAYS,
        }
    }
}

impl LifecycleConfig {
    pub fn otp_policy(&self) -> OtpPolicy {
        OtpPolicy {
            ttl: Duration::minutes(self.otp_ttl_minutes),
            length: self.otp_length,
        }
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::days(self.session_ttl_days)
    }
}

fn default_db_max_connections() -> u32 {
    defaults::DEFAULT_DB_MAX_CONNECTIONS
}

fn default_db_min_idle() -> u32 {
    defaults::DEFAULT_DB_MIN_IDLE
}

fn default_db_sync_schema() -> bool {
    defaults::DEFAULT_DB_SYNC_SCHEMA
}

fn default_db_connect_timeout_secs() -> u64 {
    defaults::DEFAULT_DB_CONNECT_TIMEOUT_SECS
}

fn default_db_log_statements() -> bool {
    defaults::DEFAULT_DB_LOG_STATEMENTS
}

#[cfg(test)]
mod tests {
    use ::config as config_rs;

    use super::{AppConfig, LifecycleConfig};
    use crate::config::EnvConfig;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let source: config_rs::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        AppConfig::from_sources(None, AppConfig::environment().source(Some(source)))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = load(&[("APP_DATABASE__URL", "sqlite::memory:")]).expect("config should load");
        let database = cfg.database.expect("database section should be present");

        assert_eq!(database.max_connections, 10);
        assert_eq!(database.min_idle, 2);
        assert!(database.sync_schema);
        assert_eq!(cfg.lifecycle.otp_length, 6);
        assert_eq!(cfg.lifecycle.otp_ttl_minutes, 10);
        assert_eq!(cfg.lifecycle.session_ttl_days, 30);
    }

    #[test]
    fn nested_keys_parse_typed_values() {
        let cfg = load(&[
            ("APP_DATABASE__URL", "postgres://localhost/rentals"),
            ("APP_DATABASE__MAX_CONNECTIONS", "4"),
            ("APP_DATABASE__MIN_IDLE", "1"),
            ("APP_DATABASE__SYNC_SCHEMA", "false"),
            ("APP_LIFECYCLE__OTP_LENGTH", "8"),
        ])
        .expect("config should load");
        let database = cfg.database.expect("database section should be present");

        assert_eq!(database.max_connections, 4);
        assert!(!database.sync_schema);
        assert_eq!(cfg.lifecycle.otp_length, 8);
    }

    #[test]
    fn validation_reports_every_problem() {
        let err = load(&[
            ("APP_DATABASE__URL", " "),
            ("APP_DATABASE__MAX_CONNECTIONS", "1"),
            ("APP_DATABASE__MIN_IDLE", "3"),
            ("APP_LIFECYCLE__OTP_LENGTH", "2"),
        ])
        .expect_err("config should be rejected");
        let message = format!("{err:#}");

        assert!(message.contains("database.url must not be empty"), "{message}");
        assert!(message.contains("database.min_idle (3)"), "{message}");
        assert!(message.contains("lifecycle.otp_length"), "{message}");
    }

    #[test]
    fn lifecycle_converts_to_policies() {
        let lifecycle = LifecycleConfig {
            otp_ttl_minutes: 5,
            otp_length: 8,
            session_ttl_days: 7,
        };

        let policy = lifecycle.otp_policy();
        assert_eq!(policy.ttl, chrono::Duration::minutes(5));
        assert_eq!(policy.length, 8);
        assert_eq!(lifecycle.session_ttl(), chrono::Duration::days(7));
    }

    #[test]
    fn environment_overrides_file_values() {
        let path = std::env::temp_dir().join(format!("rental_data_{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(
            &path,
            "[database]\nurl = \"sqlite::memory:\"\nmax_connections = 3\n\n[lifecycle]\notp_length = 8\n",
        )
        .expect("config file should be written");
        let env: config_rs::Map<String, String> =
            [("APP_LIFECYCLE__OTP_LENGTH".to_string(), "5".to_string())]
                .into_iter()
                .collect();

        let loaded = AppConfig::from_sources(
            Some(&path),
            AppConfig::environment().source(Some(env)),
        );
        std::fs::remove_file(&path).ok();
        let cfg = loaded.expect("config should load");

        let database = cfg.database.expect("database section should be present");
        assert_eq!(database.url, "sqlite::memory:");
        assert_eq!(database.max_connections, 3);
        assert_eq!(database.connect_timeout_secs, 5);
        assert_eq!(cfg.lifecycle.otp_length, 5);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = config_rs::Config::builder()
            .set_override("logging.colour", "always")
            .and_then(|builder| builder.build())
            .and_then(|settings| settings.try_deserialize::<AppConfig>());
        assert!(err.is_err());
    }
}
