//! `fieldwise providers` / `fieldwise validate-key`: Provider listing and key checks.

use fieldwise_config::{Settings, default_model, resolve_api_key, resolve_provider};
use fieldwise_core::ProviderId;
use fieldwise_providers::{gemini, openai_compat};

fn base_url(settings: &Settings, id: ProviderId) -> String {
    settings
        .providers
        .get(id)
        .api_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(match id {
            ProviderId::Gemini => gemini::DEFAULT_BASE_URL,
            _ => openai_compat::default_base_url(id),
        })
        .to_string()
}

fn env_var(id: ProviderId) -> String {
    format!("{}_API_KEY", id.as_str().to_ascii_uppercase())
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = super::load_settings()?;
    let active = resolve_provider(&settings);

    println!("🤖 Supported Providers");
    println!("======================");
    println!();
    println!(
        "  {:<10} {:<58} {:<26} {:<18} Key",
        "Provider", "Base URL", "Default model", "Env var"
    );
    for id in ProviderId::FALLBACK_ORDER {
        let configured = if resolve_api_key(&settings, id).is_empty() {
            "—"
        } else if active == Some(id) {
            "✅ (active)"
        } else {
            "✅"
        };
        println!(
            "  {:<10} {:<58} {:<26} {:<18} {}",
            id.as_str(),
            base_url(&settings, id),
            default_model(id),
            env_var(id),
            configured
        );
    }

    println!();
    println!("  Resolution order:");
    println!("    primary_provider when it has a key, then openai → gemini → groq → deepseek");
    println!();
    println!("  Custom endpoints:");
    println!("    [providers.openai]");
    println!("    api_url = \"https://your-custom-endpoint.com/v1\"");
    println!("    api_key = \"your-key\"");

    Ok(())
}

/// Check a key against its provider. Defaults to the resolved provider and its stored key.
pub async fn validate(
    provider: Option<String>,
    key: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = super::load_settings()?;

    let id = match provider.as_deref() {
        Some(name) => ProviderId::parse(name).ok_or_else(|| format!("Unknown provider '{name}'"))?,
        None => resolve_provider(&settings).unwrap_or(ProviderId::OpenAi),
    };
    let key = key.unwrap_or_else(|| resolve_api_key(&settings, id));
    let api_url = settings.providers.get(id).api_url.clone();

    println!("🔑 Checking {} key...", id.display_name());
    match fieldwise_providers::validate_key(id, &key, api_url.as_deref()).await {
        Ok(()) => {
            println!("   ✅ Key accepted");
            Ok(())
        }
        Err(e) => {
            println!("   ❌ {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_vars_follow_provider_ids() {
        assert_eq!(env_var(ProviderId::OpenAi), "OPENAI_API_KEY");
        assert_eq!(env_var(ProviderId::DeepSeek), "DEEPSEEK_API_KEY");
    }

    #[test]
    fn base_url_prefers_override() {
        let mut settings = Settings::default();
        assert_eq!(
            base_url(&settings, ProviderId::Gemini),
            gemini::DEFAULT_BASE_URL
        );
        settings.providers.groq.api_url = Some(" http://localhost:9000/v1 ".into());
        assert_eq!(
            base_url(&settings, ProviderId::Groq),
            "http://localhost:9000/v1"
        );
    }
}
