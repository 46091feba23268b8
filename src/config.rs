//! Process configuration from environment variables.
//!
//! All values are read once at startup. A missing required value or a
//! malformed `BASE_URL` aborts the process before any job runs — jobs
//! must never discover configuration problems mid-flight.

use thiserror::Error;
use tracing::info;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} not found in environment variables")]
    Missing(&'static str),
    #[error("BASE_URL is not a valid URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
}

/// Environment configuration for one process run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Article search API credential for daily jobs.
    pub news_api_key: String,
    /// Separate credential pool for weekly jobs. Only required when the
    /// process is started in weekly mode.
    pub news_api_key_weekly: Option<String>,
    /// LLM credential.
    pub openai_api_key: String,
    /// LLM model id.
    pub openai_model: String,
    /// Relational store connection string.
    pub database_url: String,
    /// Public URL prefix used for unsubscribe link composition by the
    /// dispatch worker; rendered into the `{{base_url}}` token.
    pub base_url: String,
}

const DEFAULT_BASE_URL: &str = "https://www.thecuriodaily.com";

impl AppConfig {
    /// Read configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = var("BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Url::parse(&base_url)?;

        let config = Self {
            news_api_key: var("NEWS_API_KEY").ok_or(ConfigError::Missing("NEWS_API_KEY"))?,
            news_api_key_weekly: var("NEWS_API_KEY_Weekly"),
            openai_api_key: var("OPENAI_API_KEY").ok_or(ConfigError::Missing("OPENAI_API_KEY"))?,
            openai_model: var("OPENAI_MODEL").ok_or(ConfigError::Missing("OPENAI_MODEL"))?,
            database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            base_url,
        };

        info!(model = %config.openai_model, base_url = %config.base_url, "Configuration loaded");
        Ok(config)
    }

    /// The weekly credential, required when running weekly jobs.
    pub fn require_weekly_key(&self) -> Result<&str, ConfigError> {
        self.news_api_key_weekly
            .as_deref()
            .ok_or(ConfigError::Missing("NEWS_API_KEY_Weekly"))
    }
}

fn var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_weekly_key_present() {
        let config = AppConfig {
            news_api_key: "k".to_string(),
            news_api_key_weekly: Some("wk".to_string()),
            openai_api_key: "ok".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            database_url: "postgres://localhost/curio".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert_eq!(config.require_weekly_key().unwrap(), "wk");
    }

    #[test]
    fn test_require_weekly_key_missing() {
        let config = AppConfig {
            news_api_key: "k".to_string(),
            news_api_key_weekly: None,
            openai_api_key: "ok".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            database_url: "postgres://localhost/curio".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        };
        assert!(matches!(config.require_weekly_key(), Err(ConfigError::Missing(_))));
    }
}
