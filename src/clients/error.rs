use crate::telemetry::error_chain_fmt;
use reqwest::StatusCode;

#[derive(thiserror::Error)]
pub enum ClientError {
    #[error("Failed to execute request.")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to generate token: {status} - {body}")]
    Authentication { status: StatusCode, body: String },
    #[error("Failed to fetch {endpoint}: {status} - {message}")]
    Fetch {
        endpoint: &'static str,
        status: StatusCode,
        message: String,
    },
    #[error("Failed to deserialize the body of a {status} response.")]
    Deserialization {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },
}

impl std::fmt::Debug for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ClientError {
    /// Status code of the response that caused the error, if one was received.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Transport(e) => e.status(),
            ClientError::Authentication { status, .. }
            | ClientError::Fetch { status, .. }
            | ClientError::Deserialization { status, .. } => Some(*status),
        }
    }
}
