use std::path::PathBuf;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    // Empty strings count as unset so `.env` templates can leave keys blank.
    let optional = |var: &str| -> Option<String> {
        lookup(var).ok().filter(|v| !v.trim().is_empty())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("KITBAG_ENV", "development"));
    let log_level = or_default("KITBAG_LOG_LEVEL", "info");

    let feed_path = PathBuf::from(or_default("KITBAG_FEED_PATH", "./data/supplier-feed.csv"));
    let feed_url = optional("KITBAG_FEED_URL");
    let api_url = or_default("KITBAG_API_URL", "http://localhost:8080");
    let output_path = PathBuf::from(or_default(
        "KITBAG_OUTPUT_PATH",
        "./generated/catalog.json",
    ));
    let rules_path = optional("KITBAG_RULES_PATH").map(PathBuf::from);

    let start_id = parse_u32("KITBAG_START_ID", "1")?;
    let request_timeout_secs = parse_u64("KITBAG_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("KITBAG_USER_AGENT", "kitbag/0.1 (catalog-import)");
    let max_retries = parse_u32("KITBAG_MAX_RETRIES", "3")?;
    let retry_backoff_base_secs = parse_u64("KITBAG_RETRY_BACKOFF_BASE_SECS", "2")?;

    Ok(AppConfig {
        env,
        log_level,
        feed_path,
        feed_url,
        api_url,
        output_path,
        rules_path,
        start_id,
        request_timeout_secs,
        user_agent,
        max_retries,
        retry_backoff_base_secs,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
