//! Gemini native provider implementation.
//!
//! Uses the Generative Language API directly (not the OpenAI-compatible proxy).
//!
//! Differences from OpenAI-style providers:
//! - The API key travels as a `key=` query parameter, not a header
//! - Prompts are `contents[].parts[].text`, temperature lives in `generationConfig`
//! - Usage is reported under `usageMetadata`

use async_trait::async_trait;
use fieldwise_core::error::ProviderError;
use fieldwise_core::provider::*;
use serde::Deserialize;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client: crate::http_client(),
        }
    }

    /// Create with a custom base URL (e.g., for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn generate_url(&self, model: &str, key: &str) -> String {
        format!("{}/{model}:generateContent?key={key}", self.base_url)
    }

    fn request_body(request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": { "temperature": request.temperature },
        })
    }
}

/// Mask the value of a `key=` query parameter.
pub fn sanitize_url(url: &str) -> String {
    let Some(query_start) = url.find('?') else {
        return url.to_string();
    };
    let (base, query) = url.split_at(query_start + 1);
    let params: Vec<String> = query
        .split('&')
        .map(|param| match param.split_once('=') {
            Some((name, _)) if name.eq_ignore_ascii_case("key") => format!("{name}=***"),
            _ => param.to_string(),
        })
        .collect();
    format!("{base}{}", params.join("&"))
}

#[async_trait]
impl Provider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    fn describe(&self, request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "url": sanitize_url(&self.generate_url(&request.model, &self.api_key)),
            "method": "POST",
            "headers": { "Content-Type": "application/json" },
            "body": Self::request_body(request),
            "model": request.model,
            "temperature": request.temperature,
        })
    }

    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generation, ProviderError> {
        let provider = ProviderId::Gemini.display_name();

        debug!(provider = "gemini", model = %request.model, "Sending generateContent request");

        let response = self
            .client
            .post(self.generate_url(&request.model, &self.api_key))
            .header("Content-Type", "application/json")
            .json(&Self::request_body(&request))
            .send()
            .await
            .map_err(crate::network_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(provider = "gemini", status = status.as_u16(), body = %error_body, "Provider returned error");
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

        let text = serde_json::from_value::<GeminiResponse>(raw.clone())
            .ok()
            .and_then(|parsed| parsed.candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .and_then(|content| content.parts.into_iter().next())
            .and_then(|part| part.text)
            .map(|text| text.trim().to_string())
            .unwrap_or_default();

        Ok(Generation { text, raw })
    }

    async fn validate_key(&self) -> std::result::Result<(), ProviderError> {
        let url = format!("{}?key={}", self.base_url, self.api_key);
        let response = self
            .client
            .get(&url)
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

    fn extract_usage(&self, raw: &serde_json::Value) -> Option<Usage> {
        if raw.is_null() {
            return None;
        }
        let meta = &raw["usageMetadata"];
        Some(Usage {
            prompt_tokens: meta["promptTokenCount"].as_u64(),
            completion_tokens: meta["candidatesTokenCount"].as_u64(),
            total_tokens: meta["totalTokenCount"].as_u64(),
        })
    }
}

// --- API types ---

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}
