//! Rose Bedsheet client core
//!
//! Headless core of the Rose Bedsheet marketplace app. The member crates
//! provide the backend client ([`marketplace_client`]), observable state and
//! view models ([`app_state`]) and navigation ([`app_ui`]); this crate adds
//! configuration, logging setup and the [`App`] that wires them together.
//!
//! # Example
//!
//! ```no_run
//! use rose_bedsheet::{init_tracing, App, AppConfig, StaticAuthCheck};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     init_tracing();
//!
//!     let config = AppConfig::load_or_default("rose-bedsheet.json".as_ref())?;
//!     let app = App::new(config)?;
//!
//!     if let Some(startup) = app.start(Arc::new(StaticAuthCheck::unauthenticated())) {
//!         startup.await?;
//!     }
//!     app.seller().fetch_listing_form_attributes().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod logging;

pub use app::App;
pub use config::{AppConfig, ConfigError, ENV_VAR_API_KEY, ENV_VAR_ENVIRONMENT};
pub use logging::init_tracing;

pub use app_state::{AuthCheck, AuthCheckError, FetchFailurePolicy, StaticAuthCheck};
pub use app_ui::ModalResetPolicy;
