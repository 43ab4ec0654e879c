use crate::app_config::{AppConfig, SmtpConfig, SnowConfig};
use crate::ConfigError;

const DEFAULT_INSTANCE_URL: &str = "https://hnseu.service-now.com";
const DEFAULT_TABLE: &str = "u_hns_sites_view__no_cpe_";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
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
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u16 = |var: &str, default: &str| -> Result<u16, ConfigError> {
        or_default(var, default)
            .parse::<u16>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| invalid(var, format!("expected a boolean, got \"{raw}\"")))
    };

    let log_level = or_default("SITEALERT_LOG_LEVEL", "info");

    let page_limit = parse_u32("SNOW_PAGE_LIMIT", "10000")?;
    if page_limit == 0 {
        return Err(invalid("SNOW_PAGE_LIMIT", "must be greater than zero".into()));
    }

    let snow = SnowConfig {
        username: require("SNOW_USERNAME")?,
        password: require("SNOW_PASSWORD")?,
        instance_url: or_default("SNOW_INSTANCE_URL", DEFAULT_INSTANCE_URL),
        table: or_default("SNOW_TABLE", DEFAULT_TABLE),
        paginate: parse_bool("SNOW_PAGINATE", "false")?,
        page_limit,
        request_timeout_secs: parse_u64("SNOW_REQUEST_TIMEOUT_SECS", "30")?,
        user_agent: or_default("SITEALERT_USER_AGENT", "sitealert/0.1 (site-alerts)"),
    };

    // Mail settings are all-or-nothing, keyed on SMTP_HOST.
    let smtp = match lookup("SMTP_HOST") {
        Ok(host) => Some(SmtpConfig {
            host,
            port: parse_u16("SMTP_PORT", "465")?,
            username: require("SMTP_USERNAME")?,
            password: require("SMTP_PASSWORD")?,
            from: require("EMAIL_FROM")?,
        }),
        Err(_) => None,
    };

    Ok(AppConfig {
        log_level,
        snow,
        smtp,
    })
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
