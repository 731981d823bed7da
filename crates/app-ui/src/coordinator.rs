//! App coordinator
//!
//! Owns the root flow, the selected tab, every per-flow router and the
//! app-wide sheet and fullscreen slots. Created once at startup and shared
//! as an `Arc`.

use app_state::{AuthCheck, Published};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::auth::AuthNavigator;
use crate::destinations::{
    AppScreen, AppTab, CartRouter, ProductDetailRouter, RootView, SellerRouter, TabRouter,
};

/// Default time the splash screen stays up before the session check
pub const DEFAULT_SPLASH_DELAY: Duration = Duration::from_secs(1);

// =============================================================================
// Configuration
// =============================================================================

/// Whether root flow changes also clear presented modals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ModalResetPolicy {
    /// Only navigation stacks are reset
    #[default]
    KeepModals,
    /// Stacks are reset and every sheet and fullscreen slot is cleared
    ClearModals,
}

/// Coordinator settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// How long the splash screen shows before the session check
    pub splash_delay: Duration,
    /// Modal handling on root flow changes
    pub modal_reset_policy: ModalResetPolicy,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            splash_delay: DEFAULT_SPLASH_DELAY,
            modal_reset_policy: ModalResetPolicy::default(),
        }
    }
}

impl CoordinatorConfig {
    /// Set the splash delay
    pub fn with_splash_delay(mut self, delay: Duration) -> Self {
        self.splash_delay = delay;
        self
    }

    /// Set the modal reset policy
    pub fn with_modal_reset_policy(mut self, policy: ModalResetPolicy) -> Self {
        self.modal_reset_policy = policy;
        self
    }
}

// =============================================================================
// Coordinator
// =============================================================================

/// Top-level navigation owner
#[derive(Debug)]
pub struct Coordinator {
    config: CoordinatorConfig,
    started: AtomicBool,
    root: Published<RootView>,
    selected_tab: Published<AppTab>,
    auth: AuthNavigator,
    home: TabRouter,
    profile: TabRouter,
    seller: SellerRouter,
    cart: CartRouter,
    product_detail: ProductDetailRouter,
    sheet: Published<Option<AppScreen>>,
    fullscreen_cover: Published<Option<AppScreen>>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl Coordinator {
    /// Create a coordinator showing the splash screen
    pub fn new(config: CoordinatorConfig) -> Self {
        Self {
            config,
            started: AtomicBool::new(false),
            root: Published::new(RootView::Splash),
            selected_tab: Published::new(AppTab::Home),
            auth: AuthNavigator::new(),
            home: TabRouter::new("home"),
            profile: TabRouter::new("profile"),
            seller: SellerRouter::new("seller"),
            cart: CartRouter::new("cart"),
            product_detail: ProductDetailRouter::new("product_detail"),
            sheet: Published::default(),
            fullscreen_cover: Published::default(),
        }
    }

    /// Active settings
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    // =========================================================================
    // Startup
    // =========================================================================

    /// Run the startup session check
    ///
    /// After the splash delay the check decides between the main app and the
    /// authentication flow. A failing check counts as no session. The task
    /// does nothing if the coordinator was dropped in the meantime.
    ///
    /// Only the first call spawns the check; later calls return `None`.
    pub fn start(self: &Arc<Self>, auth_check: Arc<dyn AuthCheck>) -> Option<JoinHandle<()>> {
        if self.started.swap(true, Ordering::SeqCst) {
            tracing::warn!("startup already running, ignoring repeated start");
            return None;
        }

        let coordinator = Arc::downgrade(self);
        let delay = self.config.splash_delay;

        Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let authenticated = match auth_check.is_authenticated().await {
                Ok(authenticated) => authenticated,
                Err(e) => {
                    tracing::warn!(error = %e, "session check failed, continuing unauthenticated");
                    false
                }
            };

            let Some(coordinator) = coordinator.upgrade() else {
                tracing::debug!("coordinator dropped before startup finished");
                return;
            };

            tracing::info!(authenticated, "startup session check finished");
            if authenticated {
                coordinator.show_main_app();
            } else {
                coordinator.show_authentication_flow();
            }
        }))
    }

    // =========================================================================
    // Root Flow
    // =========================================================================

    /// Show the splash screen
    pub fn show_splash(&self) {
        self.switch_root(RootView::Splash);
    }

    /// Show the authentication flow
    pub fn show_authentication_flow(&self) {
        self.switch_root(RootView::Authentication);
    }

    /// Show the main app
    pub fn show_main_app(&self) {
        self.switch_root(RootView::MainApp);
    }

    /// Log out, returning to the authentication flow
    pub fn handle_logout(&self) {
        tracing::info!("logout");
        self.show_authentication_flow();
    }

    fn switch_root(&self, root: RootView) {
        tracing::info!(root = root.id(), "root flow changed");
        self.root.modify_if(|current| {
            let changed = *current != root;
            *current = root;
            changed
        });

        match self.config.modal_reset_policy {
            ModalResetPolicy::KeepModals => self.reset_all_navigation_paths(),
            ModalResetPolicy::ClearModals => self.reset_all_navigation_states(),
        }
    }

    /// Current root flow
    pub fn root(&self) -> RootView {
        self.root.get()
    }

    /// Subscribe to root flow changes
    pub fn subscribe_root(&self) -> watch::Receiver<RootView> {
        self.root.subscribe()
    }

    // =========================================================================
    // Tabs
    // =========================================================================

    /// Select a tab; stacks are left untouched
    pub fn select_tab(&self, tab: AppTab) {
        self.selected_tab.modify_if(|current| {
            let changed = *current != tab;
            *current = tab;
            changed
        });
    }

    /// Selected tab
    pub fn selected_tab(&self) -> AppTab {
        self.selected_tab.get()
    }

    /// Subscribe to tab changes
    pub fn subscribe_tab(&self) -> watch::Receiver<AppTab> {
        self.selected_tab.subscribe()
    }

    /// Push onto the home stack
    pub fn push_to_home(&self, screen: AppScreen) {
        self.home.navigate(screen);
    }

    /// Pop the home stack
    pub fn pop_from_home(&self) -> bool {
        self.home.back()
    }

    /// Return the home stack to its root
    pub fn pop_to_home_root(&self) {
        self.home.reset();
    }

    /// Push onto the profile stack
    pub fn push_to_profile(&self, screen: AppScreen) {
        self.profile.navigate(screen);
    }

    /// Pop the profile stack
    pub fn pop_from_profile(&self) -> bool {
        self.profile.back()
    }

    /// Return the profile stack to its root
    pub fn pop_to_profile_root(&self) {
        self.profile.reset();
    }

    // =========================================================================
    // Global Modals
    // =========================================================================

    /// Present an app-wide sheet
    pub fn present_sheet(&self, screen: AppScreen) {
        tracing::debug!(screen = %screen.id(), "present global sheet");
        self.sheet.set(Some(screen));
    }

    /// Dismiss the app-wide sheet
    pub fn dismiss_sheet(&self) -> Option<AppScreen> {
        take_slot(&self.sheet)
    }

    /// Present an app-wide fullscreen cover
    pub fn present_fullscreen_cover(&self, screen: AppScreen) {
        tracing::debug!(screen = %screen.id(), "present global fullscreen cover");
        self.fullscreen_cover.set(Some(screen));
    }

    /// Dismiss the app-wide fullscreen cover
    pub fn dismiss_fullscreen_cover(&self) -> Option<AppScreen> {
        take_slot(&self.fullscreen_cover)
    }

    /// Dismiss global settings from whichever slot shows it, sheet first
    pub fn dismiss_global_settings(&self) -> bool {
        if self.sheet.read(|s| s.as_ref() == Some(&AppScreen::GlobalSettings)) {
            self.dismiss_sheet();
            true
        } else if self
            .fullscreen_cover
            .read(|s| s.as_ref() == Some(&AppScreen::GlobalSettings))
        {
            self.dismiss_fullscreen_cover();
            true
        } else {
            false
        }
    }

    /// Presented app-wide sheet
    pub fn presented_sheet(&self) -> Option<AppScreen> {
        self.sheet.get()
    }

    /// Presented app-wide fullscreen cover
    pub fn presented_fullscreen_cover(&self) -> Option<AppScreen> {
        self.fullscreen_cover.get()
    }

    /// Subscribe to the app-wide sheet slot
    pub fn subscribe_sheet(&self) -> watch::Receiver<Option<AppScreen>> {
        self.sheet.subscribe()
    }

    /// Subscribe to the app-wide fullscreen slot
    pub fn subscribe_fullscreen_cover(&self) -> watch::Receiver<Option<AppScreen>> {
        self.fullscreen_cover.subscribe()
    }

    // =========================================================================
    // Resets
    // =========================================================================

    /// Empty every owned navigation stack
    pub fn reset_all_navigation_paths(&self) {
        self.auth.reset();
        self.home.reset();
        self.profile.reset();
        self.seller.reset();
        self.cart.reset();
        self.product_detail.reset();
    }

    /// Empty every stack and clear every modal slot
    pub fn reset_all_navigation_states(&self) {
        self.auth.reset();
        self.home.reset_all();
        self.profile.reset_all();
        self.seller.reset_all();
        self.cart.reset_all();
        self.product_detail.reset_all();
        take_slot(&self.sheet);
        take_slot(&self.fullscreen_cover);
    }

    // =========================================================================
    // Routers
    // =========================================================================

    /// Authentication flow navigator
    pub fn auth_navigator(&self) -> &AuthNavigator {
        &self.auth
    }

    /// Home tab router
    pub fn home_router(&self) -> &TabRouter {
        &self.home
    }

    /// Profile tab router
    pub fn profile_router(&self) -> &TabRouter {
        &self.profile
    }

    /// Seller flow router
    pub fn seller_router(&self) -> &SellerRouter {
        &self.seller
    }

    /// Cart flow router
    pub fn cart_router(&self) -> &CartRouter {
        &self.cart
    }

    /// Product detail router
    pub fn product_detail_router(&self) -> &ProductDetailRouter {
        &self.product_detail
    }
}

fn take_slot(slot: &Published<Option<AppScreen>>) -> Option<AppScreen> {
    let mut taken = None;
    slot.modify_if(|current| {
        taken = current.take();
        taken.is_some()
    });
    taken
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destinations::{CartNavigationDestination, SellerSheetDestination};
    use app_state::{AuthCheckError, StaticAuthCheck};
    use async_trait::async_trait;
    use mockall::mock;

    mock! {
        pub Session {}

        #[async_trait]
        impl AuthCheck for Session {
            async fn is_authenticated(&self) -> Result<bool, AuthCheckError>;
        }
    }

    fn item(id: &str) -> AppScreen {
        AppScreen::ItemDetail {
            item_id: id.to_string(),
        }
    }

    fn populated(policy: ModalResetPolicy) -> Coordinator {
        let coordinator =
            Coordinator::new(CoordinatorConfig::default().with_modal_reset_policy(policy));
        coordinator.auth_navigator().push(AppScreen::Signup);
        coordinator.push_to_home(item("1"));
        coordinator.push_to_profile(AppScreen::EditProfile);
        coordinator.cart_router().navigate(CartNavigationDestination::Cart);
        coordinator.seller_router().present_sheet(SellerSheetDestination::Payment);
        coordinator.present_sheet(AppScreen::GlobalSettings);
        coordinator.present_fullscreen_cover(AppScreen::CreateItemForm);
        coordinator
    }

    #[test]
    fn test_initial_state() {
        let coordinator = Coordinator::default();
        assert_eq!(coordinator.root(), RootView::Splash);
        assert_eq!(coordinator.selected_tab(), AppTab::Home);
        assert!(coordinator.presented_sheet().is_none());
        assert_eq!(coordinator.config().splash_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_root_change_resets_stacks_keeps_modals() {
        let coordinator = populated(ModalResetPolicy::KeepModals);
        coordinator.show_main_app();

        assert_eq!(coordinator.root(), RootView::MainApp);
        assert_eq!(coordinator.auth_navigator().depth(), 0);
        assert!(coordinator.home_router().is_empty());
        assert!(coordinator.profile_router().is_empty());
        assert!(coordinator.cart_router().is_empty());
        assert_eq!(coordinator.presented_sheet(), Some(AppScreen::GlobalSettings));
        assert_eq!(coordinator.presented_fullscreen_cover(), Some(AppScreen::CreateItemForm));
        assert_eq!(coordinator.seller_router().sheet(), Some(SellerSheetDestination::Payment));
    }

    #[test]
    fn test_root_change_clears_modals_when_configured() {
        let coordinator = populated(ModalResetPolicy::ClearModals);
        coordinator.show_authentication_flow();

        assert!(coordinator.home_router().is_empty());
        assert!(coordinator.presented_sheet().is_none());
        assert!(coordinator.presented_fullscreen_cover().is_none());
        assert!(coordinator.seller_router().sheet().is_none());
    }

    #[test]
    fn test_select_tab_leaves_stacks() {
        let coordinator = Coordinator::default();
        coordinator.push_to_home(item("1"));
        let rx = coordinator.subscribe_tab();

        coordinator.select_tab(AppTab::Profile);
        assert_eq!(coordinator.selected_tab(), AppTab::Profile);
        assert_eq!(coordinator.home_router().depth(), 1);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_tab_stack_helpers() {
        let coordinator = Coordinator::default();
        coordinator.push_to_home(item("1"));
        coordinator.push_to_home(item("2"));
        assert!(coordinator.pop_from_home());
        assert_eq!(coordinator.home_router().top(), Some(item("1")));
        coordinator.pop_to_home_root();
        assert!(!coordinator.pop_from_home());

        coordinator.push_to_profile(AppScreen::ProfileSettings);
        coordinator.push_to_profile(AppScreen::EditProfile);
        assert!(coordinator.pop_from_profile());
        coordinator.pop_to_profile_root();
        assert!(coordinator.profile_router().is_empty());
    }

    #[test]
    fn test_dismiss_global_settings_prefers_sheet() {
        let coordinator = Coordinator::default();
        coordinator.present_sheet(AppScreen::GlobalSettings);
        coordinator.present_fullscreen_cover(AppScreen::GlobalSettings);

        assert!(coordinator.dismiss_global_settings());
        assert!(coordinator.presented_sheet().is_none());
        assert_eq!(coordinator.presented_fullscreen_cover(), Some(AppScreen::GlobalSettings));

        assert!(coordinator.dismiss_global_settings());
        assert!(coordinator.presented_fullscreen_cover().is_none());
        assert!(!coordinator.dismiss_global_settings());
    }

    #[test]
    fn test_dismiss_global_settings_ignores_other_screens() {
        let coordinator = Coordinator::default();
        coordinator.present_sheet(AppScreen::CreateItemForm);
        assert!(!coordinator.dismiss_global_settings());
        assert_eq!(coordinator.dismiss_sheet(), Some(AppScreen::CreateItemForm));
    }

    #[test]
    fn test_reset_all_navigation_states() {
        let coordinator = populated(ModalResetPolicy::KeepModals);
        coordinator.reset_all_navigation_states();

        assert_eq!(coordinator.root(), RootView::Splash);
        assert!(coordinator.home_router().state().is_idle());
        assert!(coordinator.seller_router().state().is_idle());
        assert!(coordinator.presented_sheet().is_none());
        assert!(coordinator.presented_fullscreen_cover().is_none());
    }

    #[test]
    fn test_logout_returns_to_authentication() {
        let coordinator = Coordinator::default();
        coordinator.show_main_app();
        coordinator.push_to_home(item("1"));

        coordinator.handle_logout();
        assert_eq!(coordinator.root(), RootView::Authentication);
        assert!(coordinator.home_router().is_empty());
    }

    #[test]
    fn test_root_subscriber_not_notified_for_same_root() {
        let coordinator = Coordinator::default();
        let rx = coordinator.subscribe_root();

        coordinator.show_splash();
        assert!(!rx.has_changed().unwrap());

        coordinator.show_main_app();
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_unauthenticated_after_delay() {
        let coordinator = Arc::new(Coordinator::default());
        let handle = coordinator
            .start(Arc::new(StaticAuthCheck::unauthenticated()))
            .unwrap();

        tokio::time::sleep(Duration::from_millis(999)).await;
        assert_eq!(coordinator.root(), RootView::Splash);

        handle.await.unwrap();
        assert_eq!(coordinator.root(), RootView::Authentication);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_authenticated() {
        let coordinator = Arc::new(Coordinator::new(
            CoordinatorConfig::default().with_splash_delay(Duration::from_millis(250)),
        ));
        let mut session = MockSession::new();
        session.expect_is_authenticated().times(1).returning(|| Ok(true));

        coordinator.start(Arc::new(session)).unwrap().await.unwrap();
        assert_eq!(coordinator.root(), RootView::MainApp);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_start_is_ignored() {
        let coordinator = Arc::new(Coordinator::default());
        let mut session = MockSession::new();
        session.expect_is_authenticated().times(1).returning(|| Ok(true));
        let session: Arc<dyn AuthCheck> = Arc::new(session);

        let first = coordinator.start(session.clone());
        assert!(first.is_some());
        assert!(coordinator.start(session.clone()).is_none());

        first.unwrap().await.unwrap();
        assert_eq!(coordinator.root(), RootView::MainApp);

        // Still ignored once the first check has finished
        assert!(coordinator.start(session).is_none());
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(coordinator.root(), RootView::MainApp);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_failed_check_counts_as_unauthenticated() {
        let coordinator = Arc::new(Coordinator::default());
        let mut session = MockSession::new();
        session
            .expect_is_authenticated()
            .returning(|| Err(AuthCheckError::Lookup("keychain locked".to_string())));

        coordinator.start(Arc::new(session)).unwrap().await.unwrap();
        assert_eq!(coordinator.root(), RootView::Authentication);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_after_drop_is_noop() {
        let coordinator = Arc::new(Coordinator::default());
        let rx = coordinator.subscribe_root();
        let handle = coordinator
            .start(Arc::new(StaticAuthCheck::authenticated()))
            .unwrap();
        drop(coordinator);

        handle.await.unwrap();
        assert_eq!(*rx.borrow(), RootView::Splash);
    }
}
