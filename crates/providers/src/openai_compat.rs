//! OpenAI-compatible provider implementation.
//!
//! Works with: OpenAI, Groq, DeepSeek, and any endpoint that exposes
//! `/chat/completions` and `/models` with bearer authentication.
//!
//! Supports:
//! - Single-turn chat completions (one user message, no streaming)
//! - Credential checks via model listing

use async_trait::async_trait;
use fieldwise_core::error::ProviderError;
use fieldwise_core::provider::*;
use serde::Deserialize;
use tracing::{debug, warn};

/// Default base URL for the OpenAI-compatible providers.
pub fn default_base_url(id: ProviderId) -> &'static str {
    match id {
        ProviderId::OpenAi => "https://api.openai.com/v1",
        ProviderId::Groq => "https://api.groq.com/openai/v1",
        ProviderId::DeepSeek => "https://api.deepseek.com/v1",
        ProviderId::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
    }
}

/// An OpenAI-compatible text-generation provider.
pub struct OpenAiCompatProvider {
    id: ProviderId,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(id: ProviderId, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            id,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: crate::http_client(),
        }
    }

    /// Create an OpenAI provider (convenience constructor).
    pub fn openai(api_key: impl Into<String>) -> Self {
        Self::new(ProviderId::OpenAi, default_base_url(ProviderId::OpenAi), api_key)
    }

    /// Create a Groq provider (convenience constructor).
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new(ProviderId::Groq, default_base_url(ProviderId::Groq), api_key)
    }

    /// Create a DeepSeek provider (convenience constructor).
    pub fn deepseek(api_key: impl Into<String>) -> Self {
        Self::new(ProviderId::DeepSeek, default_base_url(ProviderId::DeepSeek), api_key)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn request_body(request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "model": request.model,
            "messages": [{ "role": "user", "content": request.prompt }],
            "temperature": request.temperature,
        })
    }
}

#[async_trait]
impl Provider for OpenAiCompatProvider {
    fn id(&self) -> ProviderId {
        self.id
    }

    fn describe(&self, request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "url": self.completions_url(),
            "method": "POST",
            "headers": {
                "Content-Type": "application/json",
                "Authorization": "Bearer ***",
            },
            "body": Self::request_body(request),
            "model": request.model,
            "temperature": request.temperature,
        })
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generation, ProviderError> {
        let provider = self.id.display_name();

        debug!(provider = %self.id, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&Self::request_body(&request))
            .send()
            .await
            .map_err(crate::network_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(provider = %self.id, status = status.as_u16(), body = %error_body, "Provider returned error");
            return Err(ProviderError::ApiError {
                provider: provider.into(),
                status_code: status.as_u16(),
                message: error_body,
            });
        }

        let raw: serde_json::Value = response
            .json()
            .await
            .map_err(|e| crate::decode_error(provider, e))?;

        let text = serde_json::from_value::<ApiResponse>(raw.clone())
            .ok()
            .and_then(|parsed| parsed.choices.into_iter().next())
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        Ok(Generation { text, raw })
    }

    async fn validate_key(&self) -> std::result::Result<(), ProviderError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .map_err(crate::network_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::KeyRejected {
                status_code: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }
}

// --- API types ---

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    #[serde(default)]
    content: Option<String>,
}
