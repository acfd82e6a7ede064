//! # Payment Error Types
//!
//! Typed error handling for the checkout proxy.
//! All gateway operations return `Result<T, PaymentError>`.
//!
//! Every variant keeps a stable machine-readable [`PaymentError::code`] and a
//! deliberate HTTP mapping via [`PaymentError::status_code`]. The HTTP edge
//! uses the mapping for the response status but never echoes the message.

use thiserror::Error;

/// Core error type for all gateway operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing API credentials, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Provider answered a credential exchange with a non-success status
    #[error("Provider error [{provider}]: request failed with status {status}")]
    ProviderHttp { provider: String, status: u16 },

    /// Provider response body was not valid JSON (carries the raw body text)
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Network/HTTP transport error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid request data from the client
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Stable error kind, used in server-side logs
    pub fn code(&self) -> &'static str {
        match self {
            PaymentError::Configuration(_) => "configuration_error",
            PaymentError::ProviderHttp { .. } => "provider_http_error",
            PaymentError::MalformedResponse(_) => "malformed_provider_response",
            PaymentError::Network(_) => "network_error",
            PaymentError::InvalidRequest(_) => "invalid_request",
            PaymentError::Internal(_) => "internal_error",
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Anything that went wrong between us and the provider is a server-side
    /// failure; only malformed client input maps to 4xx.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::Configuration(_) => 500,
            PaymentError::ProviderHttp { .. } => 500,
            PaymentError::MalformedResponse(_) => 500,
            PaymentError::Network(_) => 500,
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::Internal(_) => 500,
        }
    }
}

/// Result type alias for gateway operations
pub type PaymentResult<T> = Result<T, PaymentError>;
