//! Route gating and the forced-logout protocol.
//!
//! SYSTEM CONTEXT
//! ==============
//! The navigation layer asks `RouteGuard::check` before every transition and
//! owns the redirect itself through a `Navigator`. `force_logout` is the one
//! proactive recovery path: whoever sees a 401 on an authenticated call
//! clears the session and sends the user back to the login entry point.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::session::SessionManager;

/// Login entry point.
pub const LOGIN_ROUTE: &str = "/login";
/// Landing route for an authenticated user.
pub const HOME_ROUTE: &str = "/";

/// Who may enter a route.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Access {
    /// Anyone.
    #[default]
    Public,
    /// Only an authenticated session.
    Protected,
    /// Only an anonymous session (the login screen).
    GuestOnly,
}

/// Outcome of a guard check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Redirect(&'static str),
}

/// Performs screen transitions.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Pure access rule.
#[must_use]
pub fn decide(authenticated: bool, access: Access) -> Decision {
    match (access, authenticated) {
        (Access::Protected, false) => Decision::Redirect(LOGIN_ROUTE),
        (Access::GuestOnly, true) => Decision::Redirect(HOME_ROUTE),
        _ => Decision::Allow,
    }
}

/// Clear the session, then navigate to the login entry point.
pub fn force_logout(session: &SessionManager, navigator: &dyn Navigator) {
    warn!("server rejected session token; forcing logout");
    session.logout();
    navigator.navigate(LOGIN_ROUTE);
}

/// Gate in front of the navigation layer.
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<SessionManager>,
    navigator: Arc<dyn Navigator>,
}

impl RouteGuard {
    #[must_use]
    pub fn new(session: Arc<SessionManager>, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }

    /// Decide without side effects.
    #[must_use]
    pub fn check(&self, access: Access) -> Decision {
        decide(self.session.is_authenticated(), access)
    }

    /// Navigate to `route`, or to the redirect target when the guard refuses.
    /// Returns whether `route` itself was entered.
    pub fn enter(&self, route: &str, access: Access) -> bool {
        match self.check(access) {
            Decision::Allow => {
                self.navigator.navigate(route);
                true
            }
            Decision::Redirect(target) => {
                debug!(%route, %target, "navigation redirected");
                self.navigator.navigate(target);
                false
            }
        }
    }

    /// Run the forced-logout protocol with this guard's navigator.
    pub fn force_logout(&self) {
        force_logout(&self.session, self.navigator.as_ref());
    }
}
