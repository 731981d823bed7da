//! Application configuration
//!
//! Loaded from a JSON file; the environment and API key can be overridden
//! through environment variables so secrets stay out of the file.

use anyhow::{Context, Result};
use app_state::FetchFailurePolicy;
use app_ui::{CoordinatorConfig, ModalResetPolicy};
use marketplace_client::{
    ClientConfig, Environment, NetworkEnvironmentUrl, RequestError, RetryConfig,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Overrides the configured environment
pub const ENV_VAR_ENVIRONMENT: &str = "ROSE_BEDSHEET_ENV";

/// Overrides the configured API key
pub const ENV_VAR_API_KEY: &str = "ROSE_BEDSHEET_API_KEY";

/// Invalid configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Environment override could not be parsed
    #[error("Invalid ROSE_BEDSHEET_ENV value: {0}")]
    InvalidEnvironment(String),

    /// Request timeout must be positive
    #[error("Request timeout must be at least one second")]
    InvalidTimeout,

    /// Backend settings are unusable
    #[error("Backend configuration error: {0}")]
    Backend(#[from] RequestError),
}

/// Settings for the whole application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Active deployment stage
    pub environment: Environment,
    /// Base URL per stage
    pub urls: NetworkEnvironmentUrl,
    /// Supabase API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Retries for network-class failures
    pub max_retries: usize,
    /// Splash screen delay in milliseconds
    pub splash_delay_ms: u64,
    /// Modal handling on root flow changes
    pub modal_reset_policy: ModalResetPolicy,
    /// List handling when a fetch fails
    pub fetch_failure_policy: FetchFailurePolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            urls: NetworkEnvironmentUrl::default(),
            api_key: None,
            request_timeout_secs: 30,
            max_retries: 0,
            splash_delay_ms: 1000,
            modal_reset_policy: ModalResetPolicy::KeepModals,
            fetch_failure_policy: FetchFailurePolicy::KeepPrevious,
        }
    }
}

impl AppConfig {
    /// Load a config file and apply environment overrides
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let mut config: AppConfig =
            serde_json::from_str(&content).with_context(|| "Failed to parse config file")?;

        config
            .apply_env_overrides()
            .with_context(|| "Failed to apply environment overrides")?;
        config.validate().with_context(|| format!("Invalid config file: {:?}", path))?;

        tracing::info!(environment = %config.environment, "configuration loaded");
        Ok(config)
    }

    /// Load a config file when it exists, defaults otherwise
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(?path, "no config file, using defaults");
        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ROSE_BEDSHEET_ENV` and `ROSE_BEDSHEET_API_KEY`
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(
            std::env::var(ENV_VAR_ENVIRONMENT).ok(),
            std::env::var(ENV_VAR_API_KEY).ok(),
        )
    }

    /// Apply explicit overrides; blank values are ignored
    pub fn apply_overrides(
        &mut self,
        environment: Option<String>,
        api_key: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(environment) = environment.filter(|v| !v.trim().is_empty()) {
            self.environment = environment
                .parse()
                .map_err(|_| ConfigError::InvalidEnvironment(environment.clone()))?;
        }
        if let Some(api_key) = api_key.filter(|v| !v.trim().is_empty()) {
            self.api_key = Some(api_key);
        }
        Ok(())
    }

    /// Check that the active environment is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        self.urls.url_for(self.environment)?;
        Ok(())
    }

    /// HTTP client settings for the active environment
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        let mut client = ClientConfig::for_environment(&self.urls, self.environment)?
            .with_timeout(Duration::from_secs(self.request_timeout_secs));

        if self.max_retries > 0 {
            client = client.with_retry(RetryConfig::new(self.max_retries));
        }
        if let Some(api_key) = &self.api_key {
            client = client.with_api_key(api_key.as_str());
        }
        Ok(client)
    }

    /// Coordinator settings
    pub fn coordinator_config(&self) -> CoordinatorConfig {
        CoordinatorConfig::default()
            .with_splash_delay(Duration::from_millis(self.splash_delay_ms))
            .with_modal_reset_policy(self.modal_reset_policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_is_development() {
        let config = AppConfig::default();
        assert_eq!(config.environment, Environment::Development);
        assert!(config.validate().is_ok());

        let client = config.client_config().unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:54321/rest/v1");
        assert_eq!(client.timeout, Duration::from_secs(30));
        assert_eq!(client.retry.max_retries, 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"splash_delay_ms": 250, "fetch_failure_policy": "clear"}"#)
                .unwrap();

        assert_eq!(config.splash_delay_ms, 250);
        assert_eq!(config.fetch_failure_policy, FetchFailurePolicy::Clear);
        assert_eq!(config.modal_reset_policy, ModalResetPolicy::KeepModals);
        assert_eq!(
            config.coordinator_config().splash_delay,
            Duration::from_millis(250)
        );
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        config.urls.production = "https://api.example.com/rest/v1".to_string();

        config
            .apply_overrides(Some("prod".to_string()), Some("secret".to_string()))
            .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.api_key.as_deref(), Some("secret"));

        let client = config.client_config().unwrap();
        assert_eq!(client.default_headers.get("apikey"), Some(&"secret".to_string()));
    }

    #[test]
    fn test_blank_overrides_ignored() {
        let mut config = AppConfig::default();
        config.apply_overrides(Some("  ".to_string()), Some(String::new())).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_unknown_environment_override() {
        let mut config = AppConfig::default();
        let err = config.apply_overrides(Some("qa".to_string()), None).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvironment(v) if v == "qa"));
    }

    #[test]
    fn test_unprovisioned_environment_is_invalid() {
        let config = AppConfig {
            environment: Environment::Staging,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Backend(_))));
        assert!(config.client_config().is_err());
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let config = AppConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidTimeout)));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{ not json").unwrap();

        let err = AppConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
