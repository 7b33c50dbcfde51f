//! Error types for talking to the webmail backend

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// HTTP 401. The backend either rejected the credentials or the
    /// session cookie is gone.
    #[error("unauthorized{}", .0.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Unauthorized(Option<String>),

    #[error("server returned {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Server { status: u16, message: Option<String> },

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    /// The `error` field the backend put in its JSON body, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized(m) | ApiError::Server { message: m, .. } => m.as_deref(),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_only_for_http_errors() {
        let e = ApiError::Server {
            status: 404,
            message: Some("no such recipient".into()),
        };
        assert_eq!(e.server_message(), Some("no such recipient"));
        assert_eq!(e.to_string(), "server returned 404: no such recipient");

        let e = ApiError::Network("connection refused".into());
        assert_eq!(e.server_message(), None);
        assert!(!e.is_unauthorized());

        assert_eq!(ApiError::Unauthorized(None).to_string(), "unauthorized");
    }
}
