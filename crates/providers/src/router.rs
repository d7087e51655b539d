//! Provider router: holds one provider per configured credential.
//!
//! Handles provider creation from settings and lookup by [`ProviderId`].

use std::collections::BTreeMap;
use std::sync::Arc;

use fieldwise_config::{Settings, resolve_api_key};
use fieldwise_core::provider::{Provider, ProviderId};

/// Routes generation requests to the correct provider.
#[derive(Default)]
pub struct ProviderRouter {
    providers: BTreeMap<ProviderId, Arc<dyn Provider>>,
}

impl ProviderRouter {
    /// Create an empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider, replacing any previous one with the same id.
    pub fn register(&mut self, id: ProviderId, provider: Arc<dyn Provider>) {
        self.providers.insert(id, provider);
    }

    /// Get a specific provider.
    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn Provider>> {
        self.providers.get(&id).cloned()
    }
}

/// Build one provider for every provider that has a credential.
pub fn build_from_settings(settings: &Settings) -> ProviderRouter {
    let mut router = ProviderRouter::new();

    for id in ProviderId::FALLBACK_ORDER {
        let api_key = resolve_api_key(settings, id);
        if api_key.is_empty() {
            continue;
        }
        let api_url = settings
            .providers
            .get(id)
            .api_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty());
        router.register(id, crate::build_provider(id, &api_key, api_url));
    }

    router
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenAiCompatProvider;

    fn registered(router: &ProviderRouter) -> Vec<ProviderId> {
        ProviderId::FALLBACK_ORDER
            .into_iter()
            .filter(|id| router.get(*id).is_some())
            .collect()
    }

    fn settings_with(keys: &[(ProviderId, &str)]) -> Settings {
        let mut settings = Settings::default();
        for (id, key) in keys {
            settings.providers.get_mut(*id).api_key = Some((*key).into());
        }
        settings
    }

    #[test]
    fn router_register_and_lookup() {
        let mut router = ProviderRouter::new();
        router.register(ProviderId::Groq, Arc::new(OpenAiCompatProvider::groq("gsk")));

        assert!(router.get(ProviderId::Groq).is_some());
        assert!(router.get(ProviderId::OpenAi).is_none());
        assert_eq!(registered(&router), vec![ProviderId::Groq]);
    }

    #[test]
    fn build_skips_blank_credentials() {
        let settings = settings_with(&[
            (ProviderId::OpenAi, "  "),
            (ProviderId::Gemini, "k1"),
            (ProviderId::DeepSeek, "k3"),
        ]);
        let router = build_from_settings(&settings);
        assert_eq!(registered(&router), vec![ProviderId::Gemini, ProviderId::DeepSeek]);
    }

    #[test]
    fn built_providers_answer_to_their_own_id() {
        let settings = settings_with(&[(ProviderId::Gemini, "k1"), (ProviderId::Groq, "k2")]);
        let router = build_from_settings(&settings);
        assert_eq!(router.get(ProviderId::Groq).unwrap().id(), ProviderId::Groq);
        assert_eq!(router.get(ProviderId::Gemini).unwrap().id(), ProviderId::Gemini);
    }

    #[test]
    fn empty_settings_build_empty_router() {
        let router = build_from_settings(&Settings::default());
        assert!(registered(&router).is_empty());
    }
}
