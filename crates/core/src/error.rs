//! Error types for each step of the outbound call lifecycle.
//!
//! Callers can tell a rejected request apart from a provider outage or a failed
//! session write without inspecting message strings.

/// The call request failed a precondition; nothing was sent to the provider's call API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid 'to' phone")]
    InvalidDestination,
    #[error("Can only call mobile phones")]
    IneligibleLineType,
}

/// A request to the telephony provider could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Transport(String),
    #[error("Provider rejected request (HTTP {status}, code {code:?}): {message}")]
    Api {
        status: u16,
        code: Option<i64>,
        message: String,
    },
    #[error("Unexpected provider response: {0}")]
    Decode(String),
}

/// The session configuration could not be written to, or read from, its store.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Session store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session config could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid conversation id for session store: {0:?}")]
    InvalidKey(String),
}

/// Any failure surfaced by [`crate::outbound_call::OutboundCall`].
#[derive(Debug, thiserror::Error)]
pub enum OutboundCallError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
    #[error("Call has not been placed yet")]
    NotStarted,
    #[error("Call was already placed with sid {0}")]
    AlreadyStarted(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        assert_eq!(
            ValidationError::InvalidDestination.to_string(),
            "Invalid 'to' phone"
        );
        assert_eq!(
            ValidationError::IneligibleLineType.to_string(),
            "Can only call mobile phones"
        );
    }

    #[test]
    fn test_outbound_error_is_transparent() {
        let err: OutboundCallError = ValidationError::InvalidDestination.into();
        assert_eq!(err.to_string(), "Invalid 'to' phone");

        let err: OutboundCallError = ProviderError::Api {
            status: 404,
            code: Some(20404),
            message: "The requested resource was not found".to_string(),
        }
        .into();
        assert!(matches!(err, OutboundCallError::Provider(_)));
        assert!(err.to_string().contains("HTTP 404"));
    }
}
