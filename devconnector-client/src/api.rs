use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use reqwest::Response;
use serde::Deserialize;
use serde_json::json;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::Identity;

/// Header carrying the session token
pub const AUTH_TOKEN_HEADER: &str = "x-auth-token";

/// Server operations the session depends on.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Create an account and return its token.
    async fn register(&self, name: &str, email: &str, secret: &str) -> Result<String, ClientError>;

    /// Exchange credentials for a token.
    async fn login(&self, email: &str, secret: &str) -> Result<String, ClientError>;

    /// Identity behind a token.
    async fn current_user(&self, token: &str) -> Result<Identity, ClientError>;

    /// Permanently delete the token owner's account.
    async fn delete_account(&self, token: &str) -> Result<(), ClientError>;
}

/// `AuthApi` over HTTP
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    client: Client,
    config: ClientConfig,
}

#[derive(Deserialize)]
struct TokenBody {
    token: String,
}

#[derive(Deserialize)]
struct ErrorEntry {
    msg: String,
}

/// Either `{"errors":[{"msg":..}]}` or `{"msg":..}`
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    List { errors: Vec<ErrorEntry> },
    Single { msg: String },
}

impl HttpAuthApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn with_client(client: Client, config: ClientConfig) -> Self {
        Self { client, config }
    }

    /// Pass success responses through; turn anything else into `Rejected`.
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let messages = match serde_json::from_str::<ErrorBody>(&text) {
            Ok(ErrorBody::List { errors }) => errors.into_iter().map(|e| e.msg).collect(),
            Ok(ErrorBody::Single { msg }) => vec![msg],
            Err(_) => vec![status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()],
        };

        tracing::debug!(status = status.as_u16(), ?messages, "Request rejected");
        Err(ClientError::Rejected {
            status: status.as_u16(),
            messages,
        })
    }

    async fn token_from(response: Response) -> Result<String, ClientError> {
        let body: TokenBody = Self::check(response).await?.json().await?;
        Ok(body.token)
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn register(&self, name: &str, email: &str, secret: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.config.endpoint("/api/users"))
            .json(&json!({ "name": name, "email": email, "secret": secret }))
            .send()
            .await?;

        Self::token_from(response).await
    }

    async fn login(&self, email: &str, secret: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.config.endpoint("/api/auth"))
            .json(&json!({ "email": email, "secret": secret }))
            .send()
            .await?;

        Self::token_from(response).await
    }

    async fn current_user(&self, token: &str) -> Result<Identity, ClientError> {
        let response = self
            .client
            .get(self.config.endpoint("/api/auth"))
            .header(AUTH_TOKEN_HEADER, token)
            .send()
            .await?;

        Ok(Self::check(response).await?.json().await?)
    }

    async fn delete_account(&self, token: &str) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.config.endpoint("/api/profile"))
            .header(AUTH_TOKEN_HEADER, token)
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }
}
