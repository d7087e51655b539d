//! Provider trait: the abstraction over text-generation backends.
//!
//! A Provider turns one prompt into one piece of text. The synthesis engine
//! never knows which backend it talks to; it only picks a [`ProviderId`]
//! from settings and hands the prompt over.
//!
//! Implementations: OpenAI-compatible (OpenAI, Groq, DeepSeek) and Gemini.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::error::ProviderError;

/// The fixed set of supported providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderId {
    OpenAi,
    Gemini,
    Groq,
    DeepSeek,
}

impl ProviderId {
    /// Fallback order used when no primary provider is usable.
    pub const FALLBACK_ORDER: [ProviderId; 4] =
        [Self::OpenAi, Self::Gemini, Self::Groq, Self::DeepSeek];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Gemini => "gemini",
            Self::Groq => "groq",
            Self::DeepSeek => "deepseek",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::OpenAi => "OpenAI",
            Self::Gemini => "Gemini",
            Self::Groq => "Groq",
            Self::DeepSeek => "DeepSeek",
        }
    }

    /// Parse a provider id; unknown ids yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "openai" => Some(Self::OpenAi),
            "gemini" => Some(Self::Gemini),
            "groq" => Some(Self::Groq),
            "deepseek" => Some(Self::DeepSeek),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One generation call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub prompt: String,

    /// The model to use (e.g., "gpt-4o-mini", "gemini-1.5-flash")
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_temperature() -> f32 {
    0.2
}

/// A successful provider answer: the trimmed text plus the raw response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    /// Trimmed output text; may be empty, callers decide what that means.
    pub text: String,

    /// The decoded response body, kept for debug telemetry.
    pub raw: serde_json::Value,
}

/// Token usage information. Any count may be missing from the provider's answer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub prompt_tokens: Option<u64>,
    pub completion_tokens: Option<u64>,
    pub total_tokens: Option<u64>,
}

impl Usage {
    /// Total tokens, falling back to prompt + completion.
    pub fn total(&self) -> Option<u64> {
        self.total_tokens.or(match (self.prompt_tokens, self.completion_tokens) {
            (Some(prompt), Some(completion)) => Some(prompt + completion),
            _ => None,
        })
    }

    /// Read OpenAI-style `usage.{prompt,completion,total}_tokens`.
    pub fn from_openai(raw: &serde_json::Value) -> Option<Self> {
        if raw.is_null() {
            return None;
        }
        let usage = &raw["usage"];
        Some(Self {
            prompt_tokens: usage["prompt_tokens"].as_u64(),
            completion_tokens: usage["completion_tokens"].as_u64(),
            total_tokens: usage["total_tokens"].as_u64(),
        })
    }
}

/// Badge text for a request's token cost.
pub fn format_usage(usage: Option<&Usage>) -> String {
    match usage.and_then(Usage::total) {
        Some(total) => format!("Request cost: {total} tokens"),
        None => "Request cost: no data".into(),
    }
}

/// The core Provider trait.
///
/// Every backend implements this trait. Failures never retry: a non-success
/// status surfaces as [`ProviderError::ApiError`] carrying the raw body.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Which provider this is.
    fn id(&self) -> ProviderId;

    /// A credential-masked description of the HTTP request `generate` would send.
    fn describe(&self, request: &GenerationRequest) -> serde_json::Value {
        serde_json::json!({
            "provider": self.id().as_str(),
            "model": request.model,
            "temperature": request.temperature,
        })
    }

    /// Send the prompt and return the generated text.
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> std::result::Result<Generation, ProviderError>;

    /// Check that the configured credential is accepted. No side effects beyond the call.
    async fn validate_key(&self) -> std::result::Result<(), ProviderError>;

    /// Pull token usage out of a raw response body.
    fn extract_usage(&self, raw: &serde_json::Value) -> Option<Usage> {
        Usage::from_openai(raw)
    }
}
