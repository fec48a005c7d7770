use std::sync::atomic::AtomicU64;
use std::sync::atomic::Ordering;
use std::time::Duration;

use tokio::sync::watch;

use crate::alert::AlertKind;
use crate::alert::Alerts;
use crate::api::AuthApi;
use crate::error::ClientError;
use crate::state::reduce;
use crate::state::AuthAction;
use crate::state::AuthState;
use crate::storage::TokenStorage;

pub const ACCOUNT_DELETED_MESSAGE: &str = "Your account has been permanently deleted";

/// Explicit container for the client's auth state.
///
/// All transitions go through [`AuthAction`]s. Every operation captures the
/// session epoch when it starts and a response that arrives under an older
/// epoch is dropped with [`ClientError::Superseded`]. Login, register, logout
/// and bootstrap advance the epoch up front; account deletion advances it
/// only once the server has confirmed the deletion.
pub struct AuthSession<A: AuthApi, S: TokenStorage> {
    api: A,
    storage: S,
    alerts: Alerts,
    state: watch::Sender<AuthState>,
    epoch: AtomicU64,
}

impl<A: AuthApi, S: TokenStorage> AuthSession<A, S> {
    /// Build a session seeded with the persisted token, if any.
    pub fn new(api: A, storage: S, alert_timeout: Duration) -> Self {
        let token = storage.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read persisted token");
            None
        });
        let (state, _) = watch::channel(AuthState::initial(token));

        Self {
            api,
            storage,
            alerts: Alerts::new(alert_timeout),
            state,
            epoch: AtomicU64::new(0),
        }
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn alerts(&self) -> &Alerts {
        &self.alerts
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn dispatch(&self, action: AuthAction) {
        tracing::debug!(?action, "Auth transition");
        self.state.send_modify(|state| *state = reduce(state, action));
    }

    fn advance_epoch(&self) -> u64 {
        self.epoch.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, epoch: u64, operation: &str) -> bool {
        let current = self.epoch.load(Ordering::SeqCst);
        if current != epoch {
            tracing::debug!(operation, epoch, current, "Discarding stale response");
            return false;
        }
        true
    }

    fn clear_storage(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!(error = %e, "Could not clear persisted token");
        }
    }

    fn alert_failure(&self, error: &ClientError) {
        for msg in error.messages() {
            self.alerts.push(msg, AlertKind::Danger);
        }
    }

    /// Resolve the persisted token into an identity, or settle as signed out.
    ///
    /// Makes no network call when no token is stored.
    pub async fn bootstrap(&self) {
        let epoch = self.advance_epoch();

        match self.storage.load() {
            // Failures are already reflected in state and alerts.
            Ok(Some(token)) => {
                let _ = self.load_user(epoch, &token).await;
            }
            Ok(None) => self.dispatch(AuthAction::NoToken),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read persisted token");
                self.dispatch(AuthAction::AuthError);
            }
        }
    }

    async fn load_user(&self, epoch: u64, token: &str) -> Result<(), ClientError> {
        let result = self.api.current_user(token).await;
        if !self.is_current(epoch, "load_user") {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(identity) => {
                tracing::info!(user_id = %identity.id, "Session restored");
                self.dispatch(AuthAction::UserLoaded(identity));
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Current user lookup failed");
                self.alert_failure(&e);
                self.clear_storage();
                self.dispatch(AuthAction::AuthError);
                Err(e)
            }
        }
    }

    /// Sign in and load the identity behind the new token.
    ///
    /// # Errors
    /// * `Rejected`, `Transport`, `Decode`, `Storage` - Sign-in or the identity
    ///   lookup failed; the failure was also raised as alerts
    /// * `Superseded` - A newer operation started first; nothing was applied
    pub async fn login(&self, email: &str, secret: &str) -> Result<(), ClientError> {
        let epoch = self.advance_epoch();
        let result = self.api.login(email, secret).await;

        self.complete_sign_in(
            epoch,
            result,
            |token| AuthAction::LoginSuccess { token },
            AuthAction::LoginFail,
        )
        .await
    }

    /// Create an account, sign in with it and load its identity.
    ///
    /// # Errors
    /// Same outcomes as [`AuthSession::login`].
    pub async fn register(&self, name: &str, email: &str, secret: &str) -> Result<(), ClientError> {
        let epoch = self.advance_epoch();
        let result = self.api.register(name, email, secret).await;

        self.complete_sign_in(
            epoch,
            result,
            |token| AuthAction::RegisterSuccess { token },
            AuthAction::RegisterFail,
        )
        .await
    }

    async fn complete_sign_in(
        &self,
        epoch: u64,
        result: Result<String, ClientError>,
        success: impl FnOnce(String) -> AuthAction,
        failure: AuthAction,
    ) -> Result<(), ClientError> {
        if !self.is_current(epoch, "sign_in") {
            return Err(ClientError::Superseded);
        }

        let outcome = result.and_then(|token| {
            self.storage.store(&token)?;
            Ok(token)
        });

        match outcome {
            Ok(token) => {
                self.dispatch(success(token.clone()));
                self.load_user(epoch, &token).await
            }
            Err(e) => {
                self.alert_failure(&e);
                self.clear_storage();
                self.dispatch(failure);
                Err(e)
            }
        }
    }

    /// Forget the session locally; no network call.
    pub fn logout(&self) {
        self.advance_epoch();
        self.clear_storage();
        self.dispatch(AuthAction::Logout);
        tracing::info!("Logged out");
    }

    /// Permanently delete the signed-in account.
    ///
    /// On failure the auth state and the epoch are left as they were, so a
    /// bootstrap still in flight settles normally.
    ///
    /// # Errors
    /// * `Rejected`, `Transport`, `Decode` - Deletion failed; raised as an alert
    /// * `Superseded` - The session changed while the request was in flight
    pub async fn delete_account(&self) -> Result<(), ClientError> {
        let epoch = self.epoch.load(Ordering::SeqCst);

        let Some(token) = self.snapshot().token else {
            let error = ClientError::Rejected {
                status: 401,
                messages: vec!["No token, authorization denied".to_string()],
            };
            self.alert_failure(&error);
            return Err(error);
        };

        let result = self.api.delete_account(&token).await;
        if !self.is_current(epoch, "delete_account") {
            return Err(ClientError::Superseded);
        }

        match result {
            Ok(()) => {
                self.advance_epoch();
                self.clear_storage();
                self.dispatch(AuthAction::AccountDeleted);
                self.alerts.push(ACCOUNT_DELETED_MESSAGE, AlertKind::Success);
                Ok(())
            }
            Err(e) => {
                self.alert_failure(&e);
                Err(e)
            }
        }
    }
}
