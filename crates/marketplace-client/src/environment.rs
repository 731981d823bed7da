//! Backend environment selection
//!
//! The backend base URL differs per deployment stage. Which stage is active
//! is decided by configuration, not by this crate.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::rest::RequestError;

/// Local Supabase REST endpoint used during development
pub const LOCAL_SUPABASE_REST_URL: &str = "http://127.0.0.1:54321/rest/v1";

/// Deployment stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development stack
    #[default]
    Development,
    /// Staging deployment
    Staging,
    /// Production deployment
    Production,
}

impl Environment {
    /// Lowercase name of the environment
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(RequestError::Configuration(format!(
                "unknown environment '{other}'"
            ))),
        }
    }
}

/// Base URLs for each deployment stage
///
/// An empty URL means the stage has not been provisioned yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkEnvironmentUrl {
    /// Development base URL
    pub development: String,
    /// Staging base URL
    #[serde(default)]
    pub staging: String,
    /// Production base URL
    #[serde(default)]
    pub production: String,
}

impl Default for NetworkEnvironmentUrl {
    fn default() -> Self {
        Self {
            development: LOCAL_SUPABASE_REST_URL.to_string(),
            staging: String::new(),
            production: String::new(),
        }
    }
}

impl NetworkEnvironmentUrl {
    /// Create a set of environment URLs
    pub fn new(
        development: impl Into<String>,
        staging: impl Into<String>,
        production: impl Into<String>,
    ) -> Self {
        Self {
            development: development.into(),
            staging: staging.into(),
            production: production.into(),
        }
    }

    /// Resolve the base URL for an environment
    ///
    /// # Examples
    /// ```
    /// use marketplace_client::{Environment, NetworkEnvironmentUrl};
    ///
    /// let urls = NetworkEnvironmentUrl::default();
    /// assert!(urls.url_for(Environment::Development).is_ok());
    /// assert!(urls.url_for(Environment::Production).is_err());
    /// ```
    pub fn url_for(&self, environment: Environment) -> Result<&str, RequestError> {
        let url = match environment {
            Environment::Development => &self.development,
            Environment::Staging => &self.staging,
            Environment::Production => &self.production,
        };

        if url.trim().is_empty() {
            return Err(RequestError::Configuration(format!(
                "no base URL configured for {environment}"
            )));
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_supabase() {
        let urls = NetworkEnvironmentUrl::default();
        assert_eq!(urls.url_for(Environment::Development).unwrap(), LOCAL_SUPABASE_REST_URL);
    }

    #[test]
    fn test_missing_url_is_configuration_error() {
        let urls = NetworkEnvironmentUrl::new("http://localhost", "", "  ");
        let err = urls.url_for(Environment::Staging).unwrap_err();
        assert!(matches!(err, RequestError::Configuration(_)));
        assert!(err.to_string().contains("staging"));
        assert!(urls.url_for(Environment::Production).is_err());
    }

    #[test]
    fn test_environment_from_str() {
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
        assert_eq!("Staging".parse::<Environment>().unwrap(), Environment::Staging);
        assert_eq!(" dev ".parse::<Environment>().unwrap(), Environment::Development);
        assert!("qa".parse::<Environment>().is_err());
    }

    #[test]
    fn test_environment_serialization() {
        let json = serde_json::to_string(&Environment::Production).unwrap();
        assert_eq!(json, "\"production\"");
    }
}
