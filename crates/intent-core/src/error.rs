//! # Payment Error Types
//!
//! Typed error handling for the payment-intents service.
//! Every operation returns `Result<T, PaymentError>`; nothing is retried, so
//! each variant is terminal for the request that produced it.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed or missing request input. The message is shown to the caller verbatim.
    #[error("{0}")]
    Validation(String),

    /// No stored record for the requested id
    #[error("Payment not found: {payment_id}")]
    PaymentNotFound { payment_id: String },

    /// The payment processor rejected the request (bad amount, bad key, ...)
    #[error("Gateway error [{provider}]: {message}")]
    Gateway { provider: String, message: String },

    /// The payment processor could not be reached
    #[error("Gateway unavailable: {0}")]
    GatewayUnavailable(String),

    /// Key-value store read or write failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl PaymentError {
    /// Shorthand for a validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        PaymentError::Validation(message.into())
    }

    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::Validation(_) => 400,
            PaymentError::PaymentNotFound { .. } => 404,
            PaymentError::Gateway { .. } => 502,
            PaymentError::GatewayUnavailable(_) => 503,
            PaymentError::Storage(_) => 500,
            PaymentError::Serialization(_) => 500,
        }
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
