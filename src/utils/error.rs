use reqwest::StatusCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error ({status}): {message}")]
    Status { status: StatusCode, message: String },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("Not logged in")]
    Unauthenticated,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Session storage error")]
    Session(#[from] std::io::Error),

    #[error("Session format error")]
    SessionFormat(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

impl ClientError {
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::NotFound(_) => Some(StatusCode::NOT_FOUND),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::Timeout => "TIMEOUT",
            ClientError::Status { .. } => "HTTP_ERROR",
            ClientError::NotFound(_) => "NOT_FOUND",
            ClientError::Decode(_) => "DECODE_ERROR",
            ClientError::Unauthenticated => "UNAUTHENTICATED",
            ClientError::Forbidden(_) => "FORBIDDEN",
            ClientError::Validation(_) => "VALIDATION_ERROR",
            ClientError::Session(_) => "SESSION_ERROR",
            ClientError::SessionFormat(_) => "SESSION_FORMAT_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// True when the request never produced an HTTP response.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, ClientError::Network(_))
    }

    /// Text suitable for a notification shown to the user.
    pub fn public_message(&self) -> String {
        match self {
            ClientError::Status { message, .. }
            | ClientError::NotFound(message)
            | ClientError::Forbidden(message)
            | ClientError::Validation(message) => message.clone(),
            ClientError::Network(_) => {
                "No response received from server. Backend may be down.".to_string()
            }
            ClientError::Timeout => "Connection timed out. Server may be overloaded.".to_string(),
            ClientError::Decode(_) => "The server returned an unexpected response.".to_string(),
            ClientError::Unauthenticated => "You must be logged in.".to_string(),
            ClientError::Session(_) | ClientError::SessionFormat(_) => {
                "Your saved session could not be read.".to_string()
            }
            ClientError::Config(msg) => msg.clone(),
        }
    }

    pub fn log(&self) {
        match self {
            ClientError::Network(e) => {
                error!(code = self.code(), error = ?e, "Request failed");
            }
            ClientError::Session(e) => {
                error!(code = self.code(), error = ?e, "Session storage failed");
            }
            ClientError::SessionFormat(e) => {
                error!(code = self.code(), error = ?e, "Session file is corrupt");
            }
            _ => {
                error!(code = self.code(), message = %self, "Client error");
            }
        }
    }
}
