//! Session check
//!
//! The coordinator asks this collaborator, once at startup, whether a valid
//! session exists before leaving the splash screen.

use async_trait::async_trait;

/// Session lookup failure
#[derive(Debug, thiserror::Error)]
pub enum AuthCheckError {
    /// Session store could not be read
    #[error("Session lookup failed: {0}")]
    Lookup(String),

    /// Backend rejected the session validation call
    #[error("Session validation failed: {0}")]
    Backend(#[from] marketplace_client::RequestError),
}

/// Answers whether the user currently holds a valid session
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthCheck: Send + Sync {
    /// Check session validity
    async fn is_authenticated(&self) -> Result<bool, AuthCheckError>;
}

/// Fixed answer, used until a real session store is wired in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAuthCheck {
    authenticated: bool,
}

impl StaticAuthCheck {
    /// Always reports no session
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
        }
    }

    /// Always reports a valid session
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
        }
    }
}

impl Default for StaticAuthCheck {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

#[async_trait]
impl AuthCheck for StaticAuthCheck {
    async fn is_authenticated(&self) -> Result<bool, AuthCheckError> {
        Ok(self.authenticated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_check() {
        assert!(!StaticAuthCheck::default().is_authenticated().await.unwrap());
        assert!(StaticAuthCheck::authenticated().is_authenticated().await.unwrap());
    }

    #[tokio::test]
    async fn test_mock_check_error() {
        let mut check = MockAuthCheck::new();
        check
            .expect_is_authenticated()
            .times(1)
            .returning(|| Err(AuthCheckError::Lookup("keychain locked".to_string())));

        let err = check.is_authenticated().await.unwrap_err();
        assert!(err.to_string().contains("keychain locked"));
    }
}
