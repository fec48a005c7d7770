use crate::state::AuthState;

pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// What a view should do given the current auth state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Auth is still resolving; show a spinner, never the protected view.
    Placeholder,
    Render,
    Redirect(&'static str),
}

/// Decision for a view that requires a signed-in user.
pub fn gate(state: &AuthState) -> RouteDecision {
    if state.loading {
        RouteDecision::Placeholder
    } else if state.is_authenticated() {
        RouteDecision::Render
    } else {
        RouteDecision::Redirect(LOGIN_PATH)
    }
}

/// Decision for the login and register views.
pub fn guest_gate(state: &AuthState) -> RouteDecision {
    if state.is_authenticated() {
        RouteDecision::Redirect(DASHBOARD_PATH)
    } else {
        RouteDecision::Render
    }
}
