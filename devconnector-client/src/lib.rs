//! Client side of DevConnector authentication.
//!
//! [`AuthSession`] owns the auth state, the persisted token and the alert
//! queue. Views read snapshots from [`AuthSession::subscribe`] and decide
//! what to show with [`route::gate`].
//!
//! ```no_run
//! use devconnector_client::api::HttpAuthApi;
//! use devconnector_client::config::ClientConfig;
//! use devconnector_client::storage::FileTokenStorage;
//! use devconnector_client::AuthSession;
//!
//! # async fn run() -> Result<(), devconnector_client::ClientError> {
//! let config = ClientConfig::from_env();
//! let session = AuthSession::new(
//!     HttpAuthApi::new(config.clone()),
//!     FileTokenStorage::in_data_dir("devconnector"),
//!     config.alert_timeout,
//! );
//!
//! session.bootstrap().await;
//! session.login("ada@example.com", "secret1").await?;
//! # Ok(())
//! # }
//! ```

pub mod alert;
pub mod api;
pub mod config;
pub mod error;
pub mod route;
pub mod session;
pub mod state;
pub mod storage;

pub use error::ClientError;
pub use session::AuthSession;
pub use state::reduce;
pub use state::AuthAction;
pub use state::AuthState;
pub use state::Identity;
