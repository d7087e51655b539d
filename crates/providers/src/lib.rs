//! Text-generation provider implementations for Fieldwise.
//!
//! All providers implement the `fieldwise_core::Provider` trait.
//! The router builds one provider per configured credential.

pub mod gemini;
pub mod openai_compat;
pub mod router;

pub use gemini::GeminiProvider;
pub use openai_compat::OpenAiCompatProvider;
pub use router::ProviderRouter;

use fieldwise_core::{Provider, ProviderError, ProviderId};
use std::sync::Arc;
use std::time::Duration;

/// Timeout applied to every provider HTTP call.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Build the provider for `id` with the given credential and optional base URL override.
pub fn build_provider(id: ProviderId, api_key: &str, api_url: Option<&str>) -> Arc<dyn Provider> {
    match id {
        ProviderId::Gemini => {
            let mut provider = GeminiProvider::new(api_key);
            if let Some(url) = api_url {
                provider = provider.with_base_url(url);
            }
            Arc::new(provider)
        }
        _ => {
            let base_url = api_url.unwrap_or_else(|| openai_compat::default_base_url(id));
            Arc::new(OpenAiCompatProvider::new(id, base_url, api_key))
        }
    }
}

/// Check a credential against a provider. An empty key never reaches the network.
pub async fn validate_key(
    id: ProviderId,
    api_key: &str,
    api_url: Option<&str>,
) -> Result<(), ProviderError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(ProviderError::MissingKey);
    }
    build_provider(id, api_key, api_url).validate_key().await
}

/// Shared HTTP client with the crate-wide timeout.
pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// A transport failure, stripped of the request URL (Gemini carries its key in the query).
pub(crate) fn network_error(error: reqwest::Error) -> ProviderError {
    ProviderError::Network(error.without_url().to_string())
}

/// A success response whose body could not be decoded.
pub(crate) fn decode_error(provider: &str, error: reqwest::Error) -> ProviderError {
    ProviderError::InvalidResponse {
        provider: provider.into(),
        message: format!("Failed to parse response: {}", error.without_url()),
    }
}

/// Decode an error body as JSON, or wrap it as `{ "rawText": ... }`.
pub fn parse_error_body(detail: &str) -> serde_json::Value {
    serde_json::from_str(detail).unwrap_or_else(|_| serde_json::json!({ "rawText": detail }))
}
