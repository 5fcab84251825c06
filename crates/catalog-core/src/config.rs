use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;

use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Loads `.env` (if any) and then reads [`AppConfig`] from the process
/// environment.
///
/// # Errors
///
/// Returns `ConfigError` if `CATALOG_API_BASE_URL` is missing or any
/// variable holds an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Reads [`AppConfig`] from the process environment as it stands, without
/// touching `.env`.
///
/// # Errors
///
/// As [`load_app_config`].
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Variable lookup with defaults and typed parsing over an arbitrary source.
struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    fn required(&self, var: &str) -> Result<String, ConfigError> {
        (self.lookup)(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    }

    fn optional(&self, var: &str) -> Option<String> {
        (self.lookup)(var).ok().filter(|v| !v.trim().is_empty())
    }

    fn string(&self, var: &str, default: &str) -> String {
        self.optional(var).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, var: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(var) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("'{raw}': {e}"),
            }),
        }
    }
}

/// Builds the config from `lookup` so tests can feed a map instead of
/// mutating the process environment.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let vars = Vars { lookup };

    let api_base_url = vars.required("CATALOG_API_BASE_URL")?;
    if !(api_base_url.starts_with("http://") || api_base_url.starts_with("https://")) {
        return Err(ConfigError::InvalidEnvVar {
            var: "CATALOG_API_BASE_URL".to_string(),
            reason: format!("expected an http(s) URL, got '{api_base_url}'"),
        });
    }

    Ok(AppConfig {
        api_base_url,
        api_token: vars.optional("CATALOG_API_TOKEN"),
        env: parse_environment(&vars.string("CATALOG_ENV", "development"))?,
        log_level: vars.string("CATALOG_LOG_LEVEL", "info"),
        attributes_path: PathBuf::from(
            vars.string("CATALOG_ATTRIBUTES_PATH", "./config/attributes.yaml"),
        ),
        request_timeout_secs: vars.parsed("CATALOG_REQUEST_TIMEOUT_SECS", 30)?,
        user_agent: vars.string("CATALOG_USER_AGENT", "catalog-admin/0.1"),
        max_retries: vars.parsed("CATALOG_MAX_RETRIES", 3)?,
        retry_backoff_base_ms: vars.parsed("CATALOG_RETRY_BACKOFF_BASE_MS", 500)?,
    })
}

fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    [
        Environment::Development,
        Environment::Test,
        Environment::Production,
    ]
    .into_iter()
    .find(|env| env.as_str() == s)
    .ok_or_else(|| ConfigError::InvalidEnvVar {
        var: "CATALOG_ENV".to_string(),
        reason: format!("unknown environment '{s}'"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
