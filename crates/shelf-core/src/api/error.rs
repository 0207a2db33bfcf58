//! Typed failures of backend calls.

use std::fmt;

use serde_json::Value;

/// Error category, mirroring how the UI reacts to a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The backend answered with a non-success status.
    HttpStatus,
    /// The request never produced a response (connection refused, DNS, TLS).
    Transport,
    /// The response body could not be decoded into the expected type.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Transport => write!(f, "transport"),
            ApiErrorKind::Decode => write!(f, "decode"),
        }
    }
}

/// Failure of a single backend call.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// HTTP status, when the backend answered.
    pub status: Option<u16>,
    /// `detail` string from the backend's error body, when present.
    pub detail: Option<String>,
    /// One-line summary suitable for logs.
    pub message: String,
}

impl ApiError {
    /// Builds an HTTP status error, extracting `{"detail": "..."}` when the
    /// body carries one.
    pub fn http_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        let message = match &detail {
            Some(detail) => format!("HTTP {status}: {detail}"),
            None => format!("HTTP {status}"),
        };
        Self {
            kind: ApiErrorKind::HttpStatus,
            status: Some(status),
            detail,
            message,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            status: None,
            detail: None,
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            status: None,
            detail: None,
            message: message.into(),
        }
    }

    /// True when the backend rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::decode(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}

/// Only string details are surfaced; validation errors arrive as arrays.
fn extract_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    json.get("detail")?.as_str().map(ToString::to_string)
}

/// Result type for backend calls.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_extracts_detail() {
        let err = ApiError::http_status(400, r#"{"detail": "Username already registered"}"#);
        assert_eq!(err.kind, ApiErrorKind::HttpStatus);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.detail.as_deref(), Some("Username already registered"));
        assert_eq!(err.to_string(), "HTTP 400: Username already registered");
    }

    #[test]
    fn test_http_status_ignores_non_string_detail() {
        let err = ApiError::http_status(422, r#"{"detail": [{"loc": ["body"], "msg": "x"}]}"#);
        assert_eq!(err.detail, None);
        assert_eq!(err.to_string(), "HTTP 422");
    }

    #[test]
    fn test_http_status_plain_body() {
        let err = ApiError::http_status(500, "Internal Server Error");
        assert_eq!(err.detail, None);
        assert!(!err.is_unauthorized());
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::http_status(401, "").is_unauthorized());
        assert!(!ApiError::transport("refused").is_unauthorized());
    }
}
