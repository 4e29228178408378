use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::errors::DomainError;

/// Errors that can occur when talking to a PostgREST endpoint
#[derive(Error, Debug)]
pub enum StoreError {
    /// Malformed query or payload (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or wrong API key (HTTP 401)
    #[error("Invalid API key - authentication failed")]
    Unauthorized,

    /// Row level security or role denied the request (HTTP 403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Unknown table or function (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Unique or foreign key violation (HTTP 409)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded - too many requests")]
    RateLimitExceeded,

    /// Server side failure (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl StoreError {
    /// Classify a non-success response.
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 => Self::Unauthorized,
            403 => Self::Forbidden(body),
            404 => Self::NotFound(body),
            409 => Self::Conflict(body),
            429 => Self::RateLimitExceeded,
            500..=599 => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// HTTP status behind this error, if it came from a response.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::InvalidRequest(_) => Some(StatusCode::BAD_REQUEST),
            Self::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            Self::Forbidden(_) => Some(StatusCode::FORBIDDEN),
            Self::NotFound(_) => Some(StatusCode::NOT_FOUND),
            Self::Conflict(_) => Some(StatusCode::CONFLICT),
            Self::RateLimitExceeded => Some(StatusCode::TOO_MANY_REQUESTS),
            Self::ServerError(status, _) | Self::UnknownError(status, _) => Some(*status),
            Self::NetworkError(err) => err.status(),
            Self::JsonError(_) => None,
        }
    }

    /// Returns true if retrying the same request could succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::RateLimitExceeded | Self::ServerError(_, _) | Self::NetworkError(_)
        )
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NetworkError(e) => DomainError::StoreRequest(e.to_string()),
            StoreError::JsonError(e) => DomainError::SerializationError(e.to_string()),
            other => {
                let status = other.status().map_or(0, |s| s.as_u16());
                DomainError::StoreStatus {
                    status,
                    body: other.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert!(matches!(
            StoreError::from_status(StatusCode::UNAUTHORIZED, String::new()),
            StoreError::Unauthorized
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::CONFLICT, "duplicate key".to_string()),
            StoreError::Conflict(_)
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::BAD_GATEWAY, String::new()),
            StoreError::ServerError(StatusCode::BAD_GATEWAY, _)
        ));
        assert!(matches!(
            StoreError::from_status(StatusCode::IM_A_TEAPOT, String::new()),
            StoreError::UnknownError(_, _)
        ));
    }

    #[test]
    fn test_transient_errors() {
        assert!(StoreError::RateLimitExceeded.is_transient());
        assert!(StoreError::ServerError(StatusCode::SERVICE_UNAVAILABLE, String::new())
            .is_transient());
        assert!(!StoreError::Unauthorized.is_transient());
        assert!(!StoreError::InvalidRequest("bad filter".to_string()).is_transient());
    }

    #[test]
    fn test_into_domain_error_keeps_status() {
        let err: DomainError =
            StoreError::from_status(StatusCode::FORBIDDEN, "rls".to_string()).into();
        match err {
            DomainError::StoreStatus { status, body } => {
                assert_eq!(status, 403);
                assert!(body.contains("rls"));
            }
            other => panic!("Expected StoreStatus, got {other:?}"),
        }
    }
}
