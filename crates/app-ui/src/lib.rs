//! Navigation layer for Rose Bedsheet
//!
//! This crate holds the headless navigation state a rendering layer binds
//! to: the screen registry, per-flow routers, the authentication navigator
//! and the app coordinator.
//!
//! # Modules
//!
//! - [`navigation`] - Router, destination trait and completion channels
//! - [`destinations`] - Screens and modals of each flow
//! - [`auth`] - Authentication flow navigator
//! - [`coordinator`] - Root flow, tabs and global modals
//!
//! # Example
//!
//! ```rust
//! use app_ui::{AppScreen, AppTab, Coordinator, RootView};
//!
//! let coordinator = Coordinator::default();
//! assert_eq!(coordinator.root(), RootView::Splash);
//!
//! coordinator.show_main_app();
//! coordinator.select_tab(AppTab::Home);
//! coordinator.push_to_home(AppScreen::ItemDetail { item_id: "123".to_string() });
//!
//! assert_eq!(coordinator.home_router().depth(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod auth;
pub mod coordinator;
pub mod destinations;
pub mod navigation;

pub use auth::AuthNavigator;
pub use coordinator::{Coordinator, CoordinatorConfig, ModalResetPolicy, DEFAULT_SPLASH_DELAY};
pub use destinations::{
    AppScreen, AppTab, CartFullscreenDestination, CartNavigationDestination, CartRouter,
    ProductDetailDestination, ProductDetailRouter, RootView, SellerFullscreenDestination,
    SellerNavigationDestination, SellerRouter, SellerSheetDestination, TabRouter,
};
pub use navigation::{
    Completion, CompletionReceiver, Destination, NoDestination, Router, RouterState,
};
