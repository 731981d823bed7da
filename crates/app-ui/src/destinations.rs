//! Screen registry
//!
//! Closed sets of destinations per flow, plus the root flow and tab
//! identifiers the coordinator tracks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::navigation::{Completion, Destination, NoDestination, Router};

// =============================================================================
// App Screens
// =============================================================================

/// Every screen of the app shell
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "screen", content = "params", rename_all = "camelCase")]
pub enum AppScreen {
    /// Launch screen shown during the startup check
    Splash,

    // Authentication flow
    /// Login (root of the authentication flow)
    Login,
    /// Account creation
    Signup,
    /// Password reset
    ForgotPassword,
    /// One-time code entry
    #[serde(rename_all = "camelCase")]
    OtpVerification {
        /// Address the code was sent to
        email: String,
    },

    // Home tab
    /// Home (root of the home tab)
    Home,
    /// Listing detail
    #[serde(rename_all = "camelCase")]
    ItemDetail {
        /// Listing id
        item_id: String,
    },
    /// New listing form
    CreateItemForm,

    // Profile tab
    /// Profile (root of the profile tab)
    Profile,
    /// Profile settings
    ProfileSettings,
    /// Profile editor
    EditProfile,

    /// App-wide settings, shown modally
    GlobalSettings,
}

impl AppScreen {
    /// Stable identifier
    pub fn id(&self) -> String {
        match self {
            AppScreen::Splash => "splash".to_string(),
            AppScreen::Login => "login".to_string(),
            AppScreen::Signup => "signup".to_string(),
            AppScreen::ForgotPassword => "forgotPassword".to_string(),
            AppScreen::OtpVerification { email } => format!("otpVerification-{email}"),
            AppScreen::Home => "home".to_string(),
            AppScreen::ItemDetail { item_id } => format!("itemDetail-{item_id}"),
            AppScreen::CreateItemForm => "createItemForm".to_string(),
            AppScreen::Profile => "profile".to_string(),
            AppScreen::ProfileSettings => "profileSettings".to_string(),
            AppScreen::EditProfile => "editProfile".to_string(),
            AppScreen::GlobalSettings => "globalSettings".to_string(),
        }
    }

    /// Navigation bar title
    pub fn title(&self) -> String {
        match self {
            AppScreen::Splash => "Splash".to_string(),
            AppScreen::Login => "Login".to_string(),
            AppScreen::Signup => "Sign Up".to_string(),
            AppScreen::ForgotPassword => "Reset Password".to_string(),
            AppScreen::OtpVerification { .. } => "Verify OTP".to_string(),
            AppScreen::Home => "Home".to_string(),
            AppScreen::ItemDetail { item_id } => format!("Item {item_id}"),
            AppScreen::CreateItemForm => "New Item".to_string(),
            AppScreen::Profile => "My Profile".to_string(),
            AppScreen::ProfileSettings => "Profile Settings".to_string(),
            AppScreen::EditProfile => "Edit Profile".to_string(),
            AppScreen::GlobalSettings => "Global Settings".to_string(),
        }
    }

    /// Whether this screen may be pushed onto the authentication stack
    pub fn is_auth_step(&self) -> bool {
        matches!(
            self,
            AppScreen::Signup | AppScreen::ForgotPassword | AppScreen::OtpVerification { .. }
        )
    }
}

impl Destination for AppScreen {
    fn id(&self) -> String {
        AppScreen::id(self)
    }
}

impl fmt::Display for AppScreen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id())
    }
}

// =============================================================================
// Root Flow and Tabs
// =============================================================================

/// Top-level flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RootView {
    /// Splash screen
    #[default]
    Splash,
    /// Login and account creation
    Authentication,
    /// Tabbed main app
    MainApp,
}

impl RootView {
    /// Stable identifier
    pub fn id(&self) -> &'static str {
        match self {
            RootView::Splash => "rootSplash",
            RootView::Authentication => "rootAuth",
            RootView::MainApp => "rootMainApp",
        }
    }
}

/// Main app tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppTab {
    /// Home tab
    #[default]
    Home,
    /// Profile tab
    Profile,
}

// =============================================================================
// Seller Flow
// =============================================================================

/// Screens pushed in the seller flow
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SellerNavigationDestination {
    /// Seller dashboard
    SellerDashboard {
        /// Signalled when the seller leaves the dashboard
        on_done: Completion<()>,
    },
    /// Create-listing form
    SellerForm {
        /// Signalled when the listing was submitted
        on_done: Completion<()>,
    },
}

impl Destination for SellerNavigationDestination {
    fn id(&self) -> String {
        match self {
            SellerNavigationDestination::SellerDashboard { on_done } => {
                format!("sellerDashboard-{}", on_done.id())
            }
            SellerNavigationDestination::SellerForm { on_done } => {
                format!("sellerForm-{}", on_done.id())
            }
        }
    }
}

/// Sheets of the seller flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SellerSheetDestination {
    /// Payment method picker
    Payment,
}

impl Destination for SellerSheetDestination {
    fn id(&self) -> String {
        match self {
            SellerSheetDestination::Payment => "payment".to_string(),
        }
    }
}

/// Fullscreen covers of the seller flow
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SellerFullscreenDestination {
    /// Hosted payment page
    OnlinePayment {
        /// Page to load
        payment_url: String,
        /// Signalled when the payment page closes
        on_done: Completion<()>,
    },
}

impl Destination for SellerFullscreenDestination {
    fn id(&self) -> String {
        match self {
            SellerFullscreenDestination::OnlinePayment { .. } => "onlinePayment".to_string(),
        }
    }
}

// =============================================================================
// Cart Flow
// =============================================================================

/// Screens pushed in the cart flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartNavigationDestination {
    /// Cart contents
    Cart,
}

impl Destination for CartNavigationDestination {
    fn id(&self) -> String {
        "cart".to_string()
    }
}

/// Fullscreen covers of the cart flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CartFullscreenDestination {
    /// Item preview
    Item,
}

impl Destination for CartFullscreenDestination {
    fn id(&self) -> String {
        "item".to_string()
    }
}

// =============================================================================
// Product Detail Flow
// =============================================================================

/// Screens pushed from a product page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductDetailDestination {
    /// Reviews of a product
    Reviews {
        /// Product id
        product_id: String,
    },
}

impl Destination for ProductDetailDestination {
    fn id(&self) -> String {
        match self {
            ProductDetailDestination::Reviews { product_id } => format!("reviews-{product_id}"),
        }
    }
}

// =============================================================================
// Router Aliases
// =============================================================================

/// Seller flow router
pub type SellerRouter =
    Router<SellerNavigationDestination, SellerSheetDestination, SellerFullscreenDestination>;

/// Cart flow router; the flow has no sheets
pub type CartRouter = Router<CartNavigationDestination, NoDestination, CartFullscreenDestination>;

/// Product detail router; the flow has no modals
pub type ProductDetailRouter = Router<ProductDetailDestination, NoDestination, NoDestination>;

/// Home and profile tab router
pub type TabRouter = Router<AppScreen, AppScreen, AppScreen>;

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> AppScreen {
        AppScreen::ItemDetail {
            item_id: id.to_string(),
        }
    }

    #[test]
    fn test_screen_ids() {
        assert_eq!(AppScreen::Splash.id(), "splash");
        assert_eq!(AppScreen::ForgotPassword.id(), "forgotPassword");
        assert_eq!(
            AppScreen::OtpVerification {
                email: "a@b.com".to_string(),
            }
            .id(),
            "otpVerification-a@b.com"
        );
        assert_eq!(item("123").id(), "itemDetail-123");
    }

    #[test]
    fn test_payload_makes_screens_distinct() {
        let a = item("1");
        let b = item("2");
        assert_ne!(a, b);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_titles() {
        assert_eq!(AppScreen::Profile.title(), "My Profile");
        assert_eq!(item("9").title(), "Item 9");
        assert_eq!(AppScreen::CreateItemForm.title(), "New Item");
    }

    #[test]
    fn test_auth_steps() {
        assert!(AppScreen::Signup.is_auth_step());
        assert!(AppScreen::OtpVerification {
            email: String::new(),
        }
        .is_auth_step());
        assert!(!AppScreen::Login.is_auth_step());
        assert!(!AppScreen::Home.is_auth_step());
    }

    #[test]
    fn test_screen_serialization() {
        let screen = item("42");
        let json = serde_json::to_string(&screen).unwrap();
        assert_eq!(json, r#"{"screen":"itemDetail","params":{"itemId":"42"}}"#);

        let back: AppScreen = serde_json::from_str(&json).unwrap();
        assert_eq!(back, screen);
    }

    #[test]
    fn test_root_and_tab_defaults() {
        assert_eq!(RootView::default(), RootView::Splash);
        assert_eq!(RootView::MainApp.id(), "rootMainApp");
        assert_eq!(AppTab::default(), AppTab::Home);
    }

    #[test]
    fn test_seller_destinations_compare_by_completion() {
        let (done, _rx) = Completion::new();
        let (other, _rx2) = Completion::new();

        let form = SellerNavigationDestination::SellerForm {
            on_done: done.clone(),
        };
        assert_eq!(form, SellerNavigationDestination::SellerForm { on_done: done });
        assert_ne!(form, SellerNavigationDestination::SellerForm { on_done: other });
    }

    #[tokio::test]
    async fn test_seller_router_round_trip() {
        let router = SellerRouter::new("seller");
        let (done, rx) = Completion::new();

        router.navigate(SellerNavigationDestination::SellerForm { on_done: done });
        router.present_sheet(SellerSheetDestination::Payment);

        if let Some(SellerNavigationDestination::SellerForm { on_done }) = router.top() {
            on_done.complete(());
        }
        router.back();

        assert_eq!(rx.wait().await, Some(()));
        assert!(router.is_empty());
        assert_eq!(router.sheet(), Some(SellerSheetDestination::Payment));
    }

    #[test]
    fn test_online_payment_cover() {
        let router = SellerRouter::new("seller");
        let (done, _rx) = Completion::new();
        router.present_fullscreen(SellerFullscreenDestination::OnlinePayment {
            payment_url: "https://pay.example.com/session/1".to_string(),
            on_done: done,
        });

        assert_eq!(router.fullscreen().map(|d| d.id()), Some("onlinePayment".to_string()));
    }

    #[test]
    fn test_cart_and_product_routers() {
        let cart = CartRouter::new("cart");
        cart.navigate(CartNavigationDestination::Cart);
        cart.present_fullscreen(CartFullscreenDestination::Item);
        assert_eq!(cart.depth(), 1);
        assert!(cart.sheet().is_none());

        let product = ProductDetailRouter::new("product_detail");
        product.navigate(ProductDetailDestination::Reviews {
            product_id: "p1".to_string(),
        });
        assert_eq!(product.top().map(|d| d.id()), Some("reviews-p1".to_string()));
    }
}
