use std::fmt;
use std::path::PathBuf;

/// Deployment environment, from `CATALOG_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Test => "test",
            Self::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone)]
pub struct AppConfig {
    /// Root of the catalog REST API, e.g. `https://shop.example.com/api`.
    pub api_base_url: String,
    /// Bearer token forwarded on every API request, when present.
    pub api_token: Option<String>,
    pub env: Environment,
    pub log_level: String,
    /// Offline attribute catalog used by the `variants` and `payload` commands.
    pub attributes_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
}

// Hand-written so the token never reaches logs.
impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = self.api_token.as_ref().map(|_| "[redacted]");
        f.debug_struct("AppConfig")
            .field("api_base_url", &self.api_base_url)
            .field("api_token", &token)
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("attributes_path", &self.attributes_path)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(token: Option<&str>) -> AppConfig {
        AppConfig {
            api_base_url: "https://shop.example.com/api".to_string(),
            api_token: token.map(str::to_string),
            env: Environment::Test,
            log_level: "debug".to_string(),
            attributes_path: PathBuf::from("./config/attributes.yaml"),
            request_timeout_secs: 30,
            user_agent: "catalog-admin/0.1".to_string(),
            max_retries: 3,
            retry_backoff_base_ms: 500,
        }
    }

    #[test]
    fn debug_redacts_api_token() {
        let rendered = format!("{:?}", sample(Some("super-secret")));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("[redacted]"));
    }

    #[test]
    fn debug_shows_none_when_token_absent() {
        let rendered = format!("{:?}", sample(None));
        assert!(rendered.contains("api_token: None"));
    }

    #[test]
    fn environment_display_matches_env_var_spelling() {
        for env in [Environment::Development, Environment::Test, Environment::Production] {
            assert_eq!(env.to_string(), env.as_str());
        }
        assert_eq!(Environment::Production.to_string(), "production");
    }
}
