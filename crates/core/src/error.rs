//! Error types for the Fieldwise domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Fieldwise operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Synthesis errors ---
    #[error("API key is missing.")]
    MissingCredential,

    #[error("Prompt is empty: no project context was supplied.")]
    EmptyProjectContext,

    #[error("{provider} returned an empty response.")]
    EmptyGeneration { provider: String },

    // --- Provider errors ---
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Non-success HTTP status from a generation request; `message` is the raw body.
    #[error("{provider} request failed ({status_code}): {message}")]
    ApiError {
        provider: String,
        status_code: u16,
        message: String,
    },

    /// A success status whose body could not be parsed.
    #[error("{provider} returned an unreadable response: {message}")]
    InvalidResponse { provider: String, message: String },

    /// Non-success HTTP status from a credential check.
    #[error("API key validation failed ({status_code}): {message}")]
    KeyRejected { status_code: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("API key is required.")]
    MissingKey,

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// The HTTP status attached to this error, if the provider answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { status_code, .. } | Self::KeyRejected { status_code, .. } => {
                Some(*status_code)
            }
            Self::InvalidResponse { .. } => Some(200),
            Self::Network(_) | Self::MissingKey | Self::NotConfigured(_) => None,
        }
    }

    /// The raw response detail carried by the error, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::ApiError { message, .. }
            | Self::KeyRejected { message, .. }
            | Self::InvalidResponse { message, .. } => Some(message),
            Self::Network(_) | Self::MissingKey | Self::NotConfigured(_) => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("Invalid project: {0}")]
    InvalidProject(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_message_is_stable() {
        assert_eq!(Error::MissingCredential.to_string(), "API key is missing.");
    }

    #[test]
    fn provider_error_displays_status_and_detail() {
        let err = Error::Provider(ProviderError::ApiError {
            provider: "OpenAI".into(),
            status_code: 401,
            message: "{\"error\":\"bad key\"}".into(),
        });
        let text = err.to_string();
        assert!(text.starts_with("OpenAI request failed (401)"));
        assert!(text.contains("bad key"));
    }

    #[test]
    fn provider_error_exposes_status() {
        let err = ProviderError::KeyRejected {
            status_code: 403,
            message: "forbidden".into(),
        };
        assert_eq!(err.status_code(), Some(403));
        assert_eq!(err.detail(), Some("forbidden"));
        assert_eq!(ProviderError::Network("dns".into()).status_code(), None);
    }
}
