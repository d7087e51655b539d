//! The fill entry point: one request in, one tagged response out.
//!
//! `FillService` ties the pipeline to its collaborators: it records the field
//! in the recent list, synthesizes the prompt, resolves a provider and sends a
//! single generation request. Every failure becomes `FillResponse { ok: false }`.

use std::sync::Arc;

use fieldwise_config::{Settings, resolve_api_key, resolve_provider};
use fieldwise_core::error::{Error, ProviderError, Result};
use fieldwise_core::fill::{FillRequest, FillResponse};
use fieldwise_core::provider::{GenerationRequest, Usage};
use fieldwise_core::store::WorkspaceStore;
use fieldwise_providers::{ProviderRouter, parse_error_body, router::build_from_settings};
use tracing::{debug, info, warn};

use crate::prompt::synthesize;

/// Payloads collected along the way, reported when the request asked for debug output.
#[derive(Debug, Default)]
struct Trace {
    prompt: Option<String>,
    request: Option<serde_json::Value>,
    response: Option<serde_json::Value>,
    usage: Option<Option<Usage>>,
}

/// Turns fill requests into generated text.
pub struct FillService {
    settings: Settings,
    router: ProviderRouter,
    store: Option<Arc<dyn WorkspaceStore>>,
}

impl FillService {
    /// Create a service over an explicit router.
    pub fn new(settings: Settings, router: ProviderRouter) -> Self {
        Self {
            settings,
            router,
            store: None,
        }
    }

    /// Create a service with one provider per configured credential.
    pub fn from_settings(settings: Settings) -> Self {
        let router = build_from_settings(&settings);
        Self::new(settings, router)
    }

    /// Attach a store so every request updates the recent field list.
    pub fn with_store(mut self, store: Arc<dyn WorkspaceStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle one fill request. Never fails; errors are reported in the response.
    pub async fn fill(&self, request: FillRequest) -> FillResponse {
        self.record_recent(&request.field_label).await;

        let mut trace = Trace::default();
        let outcome = self.generate(&request, &mut trace).await;

        let mut response = match outcome {
            Ok(text) => FillResponse::success(text),
            Err(e) => {
                warn!(field = %request.field_label, error = %e, "Fill request failed");
                if let Error::Provider(provider_error) = &e {
                    trace.response = provider_error.detail().map(parse_error_body);
                }
                FillResponse::failure(e.to_string())
            }
        };

        if request.debug {
            response.prompt = trace.prompt;
            response.request = trace.request;
            response.response = trace.response;
            if response.ok {
                response.usage = trace.usage;
            }
        }

        response
    }

    async fn record_recent(&self, label: &str) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(e) = store.record_recent_field(label).await {
            warn!(store = store.name(), error = %e, "Failed to update recent fields");
        }
    }

    async fn generate(&self, request: &FillRequest, trace: &mut Trace) -> Result<String> {
        let plan = synthesize(&self.settings, request);
        debug!(
            field_type = %plan.field_type,
            limit = ?plan.limit,
            "Synthesized prompt"
        );
        trace.prompt = Some(plan.prompt.clone());

        let provider_id = resolve_provider(&self.settings).ok_or(Error::MissingCredential)?;
        if resolve_api_key(&self.settings, provider_id).is_empty() {
            return Err(Error::MissingCredential);
        }

        if plan.prompt.is_empty() {
            return Err(Error::EmptyProjectContext);
        }

        let provider = self.router.get(provider_id).ok_or_else(|| {
            ProviderError::NotConfigured(provider_id.display_name().to_string())
        })?;

        let generation_request = GenerationRequest {
            prompt: plan.prompt,
            model: self.settings.model_for(provider_id),
            temperature: self.settings.temperature,
        };
        trace.request = Some(provider.describe(&generation_request));

        info!(provider = %provider_id, model = %generation_request.model, "Requesting field text");
        let generation = provider.generate(generation_request).await?;

        trace.usage = Some(provider.extract_usage(&generation.raw));
        trace.response = Some(generation.raw);

        if generation.text.trim().is_empty() {
            return Err(Error::EmptyGeneration {
                provider: provider_id.display_name().to_string(),
            });
        }

        Ok(generation.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fieldwise_core::error::StoreError;
    use fieldwise_core::field::FieldMeta;
    use fieldwise_core::project::Project;
    use fieldwise_core::provider::{Generation, Provider, ProviderId};
    use fieldwise_core::recent::RecentFields;
    use std::sync::Mutex;

    /// A provider that replays a fixed answer and remembers what it was asked.
    struct ScriptedProvider {
        id: ProviderId,
        answer: std::result::Result<Generation, ProviderError>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn replying(id: ProviderId, text: &str) -> Arc<Self> {
            Arc::new(Self {
                id,
                answer: Ok(Generation {
                    text: text.into(),
                    raw: serde_json::json!({
                        "usage": { "prompt_tokens": 20, "completion_tokens": 5 }
                    }),
                }),
                prompts: Mutex::new(vec![]),
            })
        }

        fn failing(id: ProviderId, error: ProviderError) -> Arc<Self> {
            Arc::new(Self {
                id,
                answer: Err(error),
                prompts: Mutex::new(vec![]),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl Provider for ScriptedProvider {
        fn id(&self) -> ProviderId {
            self.id
        }

        async fn generate(
            &self,
            request: GenerationRequest,
        ) -> std::result::Result<Generation, ProviderError> {
            self.prompts.lock().unwrap().push(request.prompt);
            self.answer.clone()
        }

        async fn validate_key(&self) -> std::result::Result<(), ProviderError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        recent: Mutex<RecentFields>,
    }

    #[async_trait]
    impl WorkspaceStore for RecordingStore {
        fn name(&self) -> &str {
            "recording"
        }

        async fn projects(&self) -> std::result::Result<Vec<Project>, StoreError> {
            Ok(vec![])
        }

        async fn save_projects(&self, _projects: Vec<Project>) -> std::result::Result<(), StoreError> {
            Ok(())
        }

        async fn recent_fields(&self) -> std::result::Result<RecentFields, StoreError> {
            Ok(self.recent.lock().unwrap().clone())
        }

        async fn save_recent_fields(&self, recent: RecentFields) -> std::result::Result<(), StoreError> {
            *self.recent.lock().unwrap() = recent;
            Ok(())
        }
    }

    fn settings_with_key(id: ProviderId) -> Settings {
        let mut settings = Settings::default();
        settings.providers.get_mut(id).api_key = Some("test-key".into());
        settings
    }

    fn service(settings: Settings, provider: Arc<ScriptedProvider>) -> FillService {
        let mut router = ProviderRouter::new();
        router.register(provider.id, provider);
        FillService::new(settings, router)
    }

    fn request(label: &str, debug: bool) -> FillRequest {
        FillRequest {
            project: Some(Project::new("Acme", "Rocket-powered roller skates")),
            field_label: label.into(),
            field_meta: Some(FieldMeta::from_label(label)),
            debug,
            ..FillRequest::default()
        }
    }

    #[tokio::test]
    async fn successful_fill_returns_text_only() {
        let provider = ScriptedProvider::replying(ProviderId::OpenAi, "hello@acme.io");
        let service = service(settings_with_key(ProviderId::OpenAi), provider.clone());

        let response = service.fill(request("E-mail address", false)).await;
        assert!(response.ok);
        assert_eq!(response.text.as_deref(), Some("hello@acme.io"));
        assert!(response.prompt.is_none());
        assert!(response.usage.is_none());

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("- Field type: email."));
        assert!(prompts[0].ends_with("- Hard limit: 64 characters."));
    }

    #[tokio::test]
    async fn debug_fill_attaches_payloads() {
        let provider = ScriptedProvider::replying(ProviderId::Groq, "Skate faster");
        let service = service(settings_with_key(ProviderId::Groq), provider);

        let response = service.fill(request("Tagline", true)).await;
        assert!(response.ok);
        assert!(response.prompt.unwrap().contains("- Field type: tagline."));
        assert_eq!(response.request.unwrap()["model"], "llama-3.1-8b-instant");
        assert!(response.response.is_some());
        let usage = response.usage.unwrap().unwrap();
        assert_eq!(usage.total(), Some(25));
    }

    #[tokio::test]
    async fn missing_key_never_calls_provider() {
        let provider = ScriptedProvider::replying(ProviderId::OpenAi, "x");
        let service = service(Settings::default(), provider.clone());

        let response = service.fill(request("Title", false)).await;
        assert!(!response.ok);
        assert_eq!(response.error.as_deref(), Some("API key is missing."));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn missing_project_is_rejected_before_network() {
        let provider = ScriptedProvider::replying(ProviderId::OpenAi, "x");
        let service = service(settings_with_key(ProviderId::OpenAi), provider.clone());

        let mut req = request("Title", true);
        req.project = None;
        let response = service.fill(req).await;
        assert!(!response.ok);
        assert_eq!(
            response.error,
            Some(Error::EmptyProjectContext.to_string())
        );
        assert_eq!(response.prompt.as_deref(), Some(""));
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn blank_generation_is_an_error() {
        let provider = ScriptedProvider::replying(ProviderId::DeepSeek, "   ");
        let service = service(settings_with_key(ProviderId::DeepSeek), provider);

        let response = service.fill(request("Title", false)).await;
        assert!(!response.ok);
        assert_eq!(
            response.error.as_deref(),
            Some("DeepSeek returned an empty response.")
        );
    }

    #[tokio::test]
    async fn provider_failure_exposes_parsed_detail_in_debug() {
        let provider = ScriptedProvider::failing(
            ProviderId::Gemini,
            ProviderError::ApiError {
                provider: "Gemini".into(),
                status_code: 400,
                message: r#"{"error":{"message":"bad model"}}"#.into(),
            },
        );
        let service = service(settings_with_key(ProviderId::Gemini), provider);

        let response = service.fill(request("Title", true)).await;
        assert!(!response.ok);
        assert!(response.error.unwrap().starts_with("Gemini request failed (400)"));
        assert_eq!(response.response.unwrap()["error"]["message"], "bad model");
        assert!(response.request.is_some());
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn unregistered_provider_is_reported() {
        let provider = ScriptedProvider::replying(ProviderId::OpenAi, "x");
        let service = service(settings_with_key(ProviderId::Groq), provider);

        let response = service.fill(request("Title", false)).await;
        assert_eq!(
            response.error.as_deref(),
            Some("Provider not configured: Groq")
        );
    }

    #[tokio::test]
    async fn every_request_updates_recent_fields() {
        let store = Arc::new(RecordingStore::default());
        let provider = ScriptedProvider::replying(ProviderId::OpenAi, "x");
        let service = service(Settings::default(), provider).with_store(store.clone());

        service.fill(request("Title", false)).await;
        service.fill(request("Bio", false)).await;
        service.fill(request("title", false)).await;

        let recent = store.recent.lock().unwrap().clone();
        assert_eq!(recent.as_slice(), ["title".to_string(), "Bio".to_string()]);
    }
}
