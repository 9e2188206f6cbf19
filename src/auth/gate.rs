//! Route gating on session presence

use crate::auth::session::AuthState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Public sign-in view
    Login,
    /// Protected admin panel
    Panel,
}

impl Route {
    pub fn is_protected(self) -> bool {
        matches!(self, Route::Panel)
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Panel => "/panel",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Session not read yet; show a placeholder
    Loading,
    Render,
    Redirect(Route),
}

pub struct AuthGate;

impl AuthGate {
    pub fn evaluate(route: Route, state: AuthState) -> RouteDecision {
        match (state, route.is_protected()) {
            (AuthState::Unknown, _) => RouteDecision::Loading,
            (AuthState::Unauthenticated, true) => RouteDecision::Redirect(Route::Login),
            (AuthState::Authenticated, false) => RouteDecision::Redirect(Route::Panel),
            _ => RouteDecision::Render,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_panel_visit_goes_to_login() {
        assert_eq!(
            AuthGate::evaluate(Route::Panel, AuthState::Unauthenticated),
            RouteDecision::Redirect(Route::Login)
        );
    }

    #[test]
    fn authenticated_login_visit_goes_to_panel() {
        assert_eq!(
            AuthGate::evaluate(Route::Login, AuthState::Authenticated),
            RouteDecision::Redirect(Route::Panel)
        );
    }

    #[test]
    fn matching_routes_render() {
        assert_eq!(
            AuthGate::evaluate(Route::Panel, AuthState::Authenticated),
            RouteDecision::Render
        );
        assert_eq!(
            AuthGate::evaluate(Route::Login, AuthState::Unauthenticated),
            RouteDecision::Render
        );
    }

    #[test]
    fn unknown_state_is_loading_everywhere() {
        assert_eq!(AuthGate::evaluate(Route::Panel, AuthState::Unknown), RouteDecision::Loading);
        assert_eq!(AuthGate::evaluate(Route::Login, AuthState::Unknown), RouteDecision::Loading);
    }
}
