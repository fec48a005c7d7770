use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// The signed-in user as reported by `GET /api/auth`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub date: DateTime<Utc>,
}

/// Snapshot of the client's authentication.
///
/// `is_authenticated` is `None` until the first bootstrap resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub token: Option<String>,
    pub identity: Option<Identity>,
    pub is_authenticated: Option<bool>,
    pub loading: bool,
}

impl AuthState {
    /// State at process start, seeded with whatever token was persisted.
    pub fn initial(token: Option<String>) -> Self {
        Self {
            token,
            identity: None,
            is_authenticated: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated == Some(true)
    }
}

/// Every transition the auth state can take
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    UserLoaded(Identity),
    RegisterSuccess { token: String },
    LoginSuccess { token: String },
    RegisterFail,
    LoginFail,
    AuthError,
    Logout,
    NoToken,
    AccountDeleted,
}

/// Apply one action to a state, producing the next state.
pub fn reduce(state: &AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::UserLoaded(identity) => AuthState {
            identity: Some(identity),
            is_authenticated: Some(true),
            loading: false,
            ..state.clone()
        },
        AuthAction::RegisterSuccess { token } | AuthAction::LoginSuccess { token } => AuthState {
            token: Some(token),
            is_authenticated: Some(true),
            loading: false,
            ..state.clone()
        },
        AuthAction::RegisterFail
        | AuthAction::LoginFail
        | AuthAction::AuthError
        | AuthAction::Logout
        | AuthAction::AccountDeleted => AuthState {
            token: None,
            identity: None,
            is_authenticated: Some(false),
            loading: false,
        },
        AuthAction::NoToken => AuthState {
            is_authenticated: Some(false),
            loading: false,
            ..state.clone()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> Identity {
        Identity {
            id: "7d4f0c1e-0000-4000-8000-000000000001".to_string(),
            name: "Ada".to_string(),
            email: "ada@x.com".to_string(),
            avatar: None,
            date: Utc::now(),
        }
    }

    fn signed_in() -> AuthState {
        AuthState {
            token: Some("t".to_string()),
            identity: Some(identity()),
            is_authenticated: Some(true),
            loading: false,
        }
    }

    #[test]
    fn test_initial_state_is_loading_and_unknown() {
        let state = AuthState::initial(Some("t".to_string()));
        assert!(state.loading);
        assert_eq!(state.is_authenticated, None);
        assert_eq!(state.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_user_loaded() {
        let loaded = identity();
        let state = reduce(
            &AuthState::initial(Some("t".to_string())),
            AuthAction::UserLoaded(loaded.clone()),
        );

        assert!(state.is_authenticated());
        assert!(!state.loading);
        assert_eq!(state.identity, Some(loaded));
        assert_eq!(state.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_login_success_sets_token() {
        let state = reduce(
            &AuthState::initial(None),
            AuthAction::LoginSuccess { token: "fresh".to_string() },
        );

        assert_eq!(state.token.as_deref(), Some("fresh"));
        assert!(state.is_authenticated());
        assert!(!state.loading);
    }

    #[test]
    fn test_every_failure_clears_the_session() {
        for action in [
            AuthAction::RegisterFail,
            AuthAction::LoginFail,
            AuthAction::AuthError,
            AuthAction::Logout,
            AuthAction::AccountDeleted,
        ] {
            let state = reduce(&signed_in(), action.clone());
            assert_eq!(state.token, None, "{action:?}");
            assert_eq!(state.identity, None, "{action:?}");
            assert_eq!(state.is_authenticated, Some(false), "{action:?}");
            assert!(!state.loading, "{action:?}");
        }
    }

    #[test]
    fn test_no_token() {
        let state = reduce(&AuthState::initial(None), AuthAction::NoToken);
        assert_eq!(state.is_authenticated, Some(false));
        assert!(!state.loading);
    }
}
