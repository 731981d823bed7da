//! Authentication flow navigator
//!
//! Login is the implicit root of the flow; only the follow-up steps are
//! pushed onto the stack.

use tokio::sync::watch;

use crate::destinations::AppScreen;
use crate::navigation::{NoDestination, Router, RouterState};

/// Router of the authentication flow
#[derive(Debug)]
pub struct AuthNavigator {
    router: Router<AppScreen, NoDestination, NoDestination>,
}

impl Default for AuthNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthNavigator {
    /// Create an empty navigator
    pub fn new() -> Self {
        Self {
            router: Router::new("auth"),
        }
    }

    /// Push an authentication step
    ///
    /// Screens outside the flow are rejected and leave the stack unchanged.
    pub fn push(&self, screen: AppScreen) -> bool {
        if !screen.is_auth_step() {
            tracing::warn!(screen = %screen.id(), "rejected non-auth screen push");
            return false;
        }
        self.router.navigate(screen);
        true
    }

    /// Remove the top step
    pub fn pop(&self) -> bool {
        self.router.back()
    }

    /// Remove up to `count` steps
    pub fn pop_count(&self, count: usize) -> usize {
        self.router.pop(count)
    }

    /// Return to login
    pub fn pop_to_root(&self) {
        self.router.reset();
    }

    /// Clear the flow
    pub fn reset(&self) {
        self.router.reset();
    }

    /// Current steps, first pushed first
    pub fn path(&self) -> Vec<AppScreen> {
        self.router.path()
    }

    /// Number of pushed steps
    pub fn depth(&self) -> usize {
        self.router.depth()
    }

    /// Subscribe to changes
    pub fn subscribe(
        &self,
    ) -> watch::Receiver<RouterState<AppScreen, NoDestination, NoDestination>> {
        self.router.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn otp() -> AppScreen {
        AppScreen::OtpVerification {
            email: "test@example.com".to_string(),
        }
    }

    #[test]
    fn test_push_accepts_auth_steps() {
        let nav = AuthNavigator::new();
        assert!(nav.push(AppScreen::Signup));
        assert!(nav.push(AppScreen::ForgotPassword));
        assert!(nav.push(otp()));
        assert_eq!(nav.path(), vec![AppScreen::Signup, AppScreen::ForgotPassword, otp()]);
    }

    #[test]
    fn test_push_rejects_other_screens() {
        let nav = AuthNavigator::new();
        nav.push(AppScreen::Signup);
        let rx = nav.subscribe();

        assert!(!nav.push(AppScreen::Home));
        assert!(!nav.push(AppScreen::Login));
        assert!(!nav.push(AppScreen::GlobalSettings));

        assert_eq!(nav.depth(), 1);
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_pop_variants() {
        let nav = AuthNavigator::new();
        assert!(!nav.pop());

        nav.push(AppScreen::Signup);
        nav.push(otp());
        nav.push(AppScreen::ForgotPassword);

        assert!(nav.pop());
        assert_eq!(nav.pop_count(5), 2);
        assert_eq!(nav.pop_count(0), 0);
        assert_eq!(nav.depth(), 0);
    }

    #[test]
    fn test_pop_to_root_and_reset() {
        let nav = AuthNavigator::new();
        nav.push(AppScreen::Signup);
        nav.push(otp());
        nav.pop_to_root();
        assert_eq!(nav.depth(), 0);

        nav.push(AppScreen::Signup);
        nav.reset();
        assert!(nav.path().is_empty());
    }
}
