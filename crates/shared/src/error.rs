//! HTTP client error taxonomy

use serde::Deserialize;

/// Shown for any failure where no response was received
pub const CONNECTION_ERROR_MESSAGE: &str = "Connection error. Please try again.";

/// Shown when an authenticated call is attempted without a session
pub const NOT_AUTHENTICATED_MESSAGE: &str = "You need to be logged in to do that.";

/// Failure of a single backend request
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientError {
    /// No response (DNS, refused connection, timeout)
    #[error("connection error: {0}")]
    Transport(String),

    /// Non-2xx response, with the backend's `detail` when it sent one
    #[error("backend returned {status}: {}", detail.as_deref().unwrap_or("no detail"))]
    Backend { status: u16, detail: Option<String> },

    /// 2xx response whose body did not match the expected shape
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// Authenticated endpoint called without a session; nothing was sent
    #[error("not logged in")]
    NotAuthenticated,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// `{ "detail": ... }` error body. FastAPI sends a string for handled
/// errors and a list of `{ "msg": ... }` objects for validation errors.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

impl ClientError {
    /// Build a backend error from a status code and raw response body
    pub fn from_response(status: u16, body: &str) -> Self {
        let detail = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail)
            .and_then(|detail| match detail {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Array(items) => {
                    let messages: Vec<String> = items
                        .iter()
                        .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                        .map(str::to_string)
                        .collect();
                    (!messages.is_empty()).then(|| messages.join("; "))
                }
                _ => None,
            });

        Self::Backend { status, detail }
    }

    /// The backend's `detail` string, if any
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Backend { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    /// Message for the user; `fallback` is used when the backend gave no detail
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Transport(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            Self::Backend {
                detail: Some(detail),
                ..
            } => detail.clone(),
            Self::Backend { detail: None, .. } | Self::Decode(_) => fallback.to_string(),
            Self::NotAuthenticated => NOT_AUTHENTICATED_MESSAGE.to_string(),
        }
    }
}
