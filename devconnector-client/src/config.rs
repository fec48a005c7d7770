use std::time::Duration;

/// Default server URL
const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// How long an alert stays visible
pub const DEFAULT_ALERT_TIMEOUT: Duration = Duration::from_millis(4000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub alert_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            alert_timeout: DEFAULT_ALERT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            ..Self::default()
        }
    }

    /// Server URL from `CLIENT_API_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        std::env::var("CLIENT_API_URL")
            .map(Self::new)
            .unwrap_or_default()
    }

    pub fn with_alert_timeout(mut self, timeout: Duration) -> Self {
        self.alert_timeout = timeout;
        self
    }

    /// Get the full URL for an API endpoint
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:5000/");
        assert_eq!(config.endpoint("/api/auth"), "http://localhost:5000/api/auth");
        assert_eq!(config.alert_timeout, DEFAULT_ALERT_TIMEOUT);
    }
}
