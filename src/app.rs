//! Application assembly
//!
//! Builds the HTTP client, seller service, view model and coordinator from
//! an [`AppConfig`] and wires them together.

use app_state::{AuthCheck, SellerViewModel};
use app_ui::Coordinator;
use marketplace_client::{RestClient, RestSellerService, SellerService};
use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::config::{AppConfig, ConfigError};

/// Fully wired application core
#[derive(Debug)]
pub struct App {
    config: AppConfig,
    coordinator: Arc<Coordinator>,
    seller: Arc<SellerViewModel>,
}

impl App {
    /// Build the application for the configured environment
    pub fn new(config: AppConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let client = RestClient::new(config.client_config()?)?;
        tracing::info!(
            environment = %config.environment,
            base_url = client.base_url(),
            "backend client ready"
        );

        Ok(Self::with_seller_service(config, Arc::new(RestSellerService::new(client))))
    }

    /// Build the application around an existing seller service
    pub fn with_seller_service(config: AppConfig, service: Arc<dyn SellerService>) -> Self {
        let seller = Arc::new(SellerViewModel::new(service, config.fetch_failure_policy));
        let coordinator = Arc::new(Coordinator::new(config.coordinator_config()));

        Self {
            config,
            coordinator,
            seller,
        }
    }

    /// Run the startup session check, once
    pub fn start(&self, auth_check: Arc<dyn AuthCheck>) -> Option<JoinHandle<()>> {
        self.coordinator.start(auth_check)
    }

    /// Active configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Navigation coordinator
    pub fn coordinator(&self) -> &Arc<Coordinator> {
        &self.coordinator
    }

    /// Seller view model
    pub fn seller(&self) -> &Arc<SellerViewModel> {
        &self.seller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::RootView;
    use marketplace_client::Environment;

    #[test]
    fn test_new_with_defaults() {
        let app = App::new(AppConfig::default()).unwrap();
        assert_eq!(app.coordinator().root(), RootView::Splash);
        assert!(app.seller().colors().get().is_empty());
    }

    #[test]
    fn test_new_rejects_unprovisioned_environment() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(matches!(App::new(config), Err(ConfigError::Backend(_))));
    }
}
