//! Provider/credential resolution: picks exactly one provider from settings.
//!
//! Deterministic: the primary provider wins when it has a credential,
//! otherwise the first provider in [`ProviderId::FALLBACK_ORDER`] that has one.

use crate::Settings;
use fieldwise_core::ProviderId;

/// The trimmed credential for a provider, or `""` when absent.
pub fn resolve_api_key(settings: &Settings, provider: ProviderId) -> String {
    settings
        .providers
        .get(provider)
        .api_key
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string()
}

/// Pick the provider to use, or `None` when no provider has a credential.
pub fn resolve_provider(settings: &Settings) -> Option<ProviderId> {
    let has_key = |id: ProviderId| !resolve_api_key(settings, id).is_empty();

    let preferred = settings
        .primary_provider
        .as_deref()
        .and_then(ProviderId::parse);
    if let Some(id) = preferred.filter(|id| has_key(*id)) {
        return Some(id);
    }

    ProviderId::FALLBACK_ORDER.into_iter().find(|id| has_key(*id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(keys: &[(ProviderId, &str)], primary: Option<&str>) -> Settings {
        let mut settings = Settings {
            primary_provider: primary.map(String::from),
            ..Settings::default()
        };
        for (id, key) in keys {
            settings.providers.get_mut(*id).api_key = Some(key.to_string());
        }
        settings
    }

    #[test]
    fn primary_with_key_wins() {
        let settings = settings_with(
            &[(ProviderId::OpenAi, "k0"), (ProviderId::Groq, "k2")],
            Some("groq"),
        );
        assert_eq!(resolve_provider(&settings), Some(ProviderId::Groq));
    }

    #[test]
    fn primary_without_key_falls_back_in_order() {
        let settings = settings_with(
            &[
                (ProviderId::OpenAi, ""),
                (ProviderId::Gemini, "k1"),
                (ProviderId::Groq, "k2"),
            ],
            Some("openai"),
        );
        assert_eq!(resolve_provider(&settings), Some(ProviderId::Gemini));
    }

    #[test]
    fn whitespace_only_key_counts_as_missing() {
        let settings = settings_with(
            &[(ProviderId::OpenAi, "   "), (ProviderId::DeepSeek, " ds ")],
            None,
        );
        assert_eq!(resolve_provider(&settings), Some(ProviderId::DeepSeek));
        assert_eq!(resolve_api_key(&settings, ProviderId::DeepSeek), "ds");
    }

    #[test]
    fn no_credentials_resolves_nothing() {
        let settings = settings_with(&[], Some("gemini"));
        assert_eq!(resolve_provider(&settings), None);
        assert_eq!(resolve_api_key(&settings, ProviderId::Gemini), "");
    }

    #[test]
    fn unknown_primary_is_ignored() {
        let settings = settings_with(&[(ProviderId::Groq, "k")], Some("anthropic"));
        assert_eq!(resolve_provider(&settings), Some(ProviderId::Groq));
        assert_eq!(resolve_api_key(&settings, ProviderId::Groq), "k");
    }
}
