//! Adapter error types.

/// Failure reported by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and refused the request.
    #[error("identity provider rejected the request: {message}")]
    Rejected {
        /// The provider's own error text, classified by substring.
        message: String,
    },
    /// The provider could not be reached or the call failed in transit.
    #[error("identity provider transport failure: {reason}")]
    Transport { reason: String },
}

impl ProviderError {
    /// Provider-supplied text, if the provider answered at all.
    pub fn provider_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message } => Some(message),
            Self::Transport { .. } => None,
        }
    }
}

/// Failure delivering a contact request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// The relay refused the payload.
    #[error("contact relay rejected the request: {reason}")]
    Rejected { reason: String },
    /// The relay could not be reached.
    #[error("contact relay unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be an http(s) origin, got {value:?}")]
    InvalidOrigin { var: String, value: String },
    #[error("{var} must be a non-negative integer of milliseconds, got {value:?}")]
    InvalidDuration { var: String, value: String },
}
