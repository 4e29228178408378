//! Domain errors for the folio content layer.

use thiserror::Error;

/// Domain-level errors that can occur while reading or writing content.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Store request failed: {0}")]
    StoreRequest(String),

    #[error("Store returned {status}: {body}")]
    StoreStatus { status: u16, body: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Returns true if the failure came from the remote store rather than
    /// from local validation or decoding.
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::StoreRequest(_) | Self::StoreStatus { .. })
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}
