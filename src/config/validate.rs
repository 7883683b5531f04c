use anyhow::{Result, bail};

use super::{AppConfig, defaults};

pub fn validate(cfg: &AppConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if cfg.logging.rust_log.trim().is_empty() {
        errors.push("logging.rust_log must not be empty".to_string());
    }

    if let Some(database) = cfg.database.as_ref() {
        if database.url.trim().is_empty() {
            errors.push("database.url must not be empty".to_string());
        }

        if database.max_connections == 0 {
            errors.push("database.max_connections must be > 0".to_string());
        }

        if database.connect_timeout_secs == 0 {
            errors.push("database.connect_timeout_secs must be > 0".to_string());
        }

        if database.min_idle > database.max_connections {
            errors.push(format!(
                "database.min_idle ({}) must be <= database.max_connections ({})",
                database.min_idle, database.max_connections
            ));
        }
    }

    let lifecycle = &cfg.lifecycle;
    if lifecycle.otp_ttl_minutes <= 0 {
        errors.push("lifecycle.otp_ttl_minutes must be > 0".to_string());
    }

    if !(defaults::MIN_OTP_LENGTH..=defaults::MAX_OTP_LENGTH).contains(&lifecycle.otp_length) {
        errors.push(format!(
            "lifecycle.otp_length must be between {} and {}",
            defaults::MIN_OTP_LENGTH,
            defaults::MAX_OTP_LENGTH
        ));
    }

    if lifecycle.session_ttl_days <= 0 {
        errors.push("lifecycle.session_ttl_days must be > 0".to_string());
    }

    if errors.is_empty() {
        return Ok(());
    }

    bail!("invalid app config:\n- {}", errors.join("\n- "))
}
