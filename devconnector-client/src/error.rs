use thiserror::Error;

/// Failures seen by the client
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientError {
    /// The server answered with a non-success status.
    #[error("Request rejected ({status}): {}", messages.join("; "))]
    Rejected { status: u16, messages: Vec<String> },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Storage error: {0}")]
    Storage(String),

    /// A newer session operation started before this one finished; its
    /// outcome was not applied.
    #[error("Superseded by a newer session operation")]
    Superseded,
}

impl ClientError {
    /// Messages suitable for showing to the user, one alert each.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ClientError::Rejected { messages, .. } if !messages.is_empty() => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ClientError::Decode(e.to_string())
        } else {
            ClientError::Transport(e.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(e: std::io::Error) -> Self {
        ClientError::Storage(e.to_string())
    }
}
