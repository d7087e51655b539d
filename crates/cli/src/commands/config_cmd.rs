//! `fieldwise config`: Configuration management commands.

use fieldwise_config::{DescriptionLimitTier, Settings, resolve_api_key, resolve_provider};
use fieldwise_core::ProviderId;
use fieldwise_store::trim_descriptions;

/// Problems worth reporting that do not stop the settings from loading.
fn warnings(settings: &Settings) -> Vec<String> {
    let mut warnings = Vec::new();

    if resolve_provider(settings).is_none() {
        warnings.push(
            "No API key set (add one under [providers.<name>] or export OPENAI_API_KEY)".into(),
        );
    }

    if let Some(primary) = settings.primary_provider.as_deref() {
        match ProviderId::parse(primary) {
            None => warnings.push(format!("Unknown primary provider '{primary}'")),
            Some(id) if resolve_api_key(settings, id).is_empty() => warnings.push(format!(
                "Primary provider {} has no API key; another provider will be used",
                id.display_name()
            )),
            Some(_) => {}
        }
    }

    if settings.field_presets.iter().any(|preset| preset.limit().is_none()) {
        warnings.push(
            "One or more field presets have an invalid max_len and will be ignored".into(),
        );
    }

    warnings
}

pub async fn validate() -> Result<(), Box<dyn std::error::Error>> {
    println!("🔍 Validating configuration...");

    match Settings::load() {
        Ok(settings) => {
            println!("   ✅ Config parsed successfully");

            let found = warnings(&settings);
            if found.is_empty() {
                println!("   ✅ All checks passed");
            } else {
                println!();
                for w in &found {
                    println!("   ⚠️  {w}");
                }
            }

            let provider = resolve_provider(&settings);
            println!();
            println!(
                "   Provider:     {}",
                provider.map_or("none", |id| id.display_name())
            );
            if let Some(id) = provider {
                println!("   Model:        {}", settings.model_for(id));
            }
            println!("   Language:     {}", settings.language());
            println!("   Temperature:  {}", settings.temperature);
            println!(
                "   Tier:         {} ({} chars)",
                settings.description_limit_tier.as_str(),
                settings.description_limit_tier.max_chars()
            );
            println!("   Presets:      {}", settings.field_presets.len());
        }
        Err(e) => {
            println!("   ❌ Config error: {e}");
            return Err(e.into());
        }
    }

    Ok(())
}

pub async fn show() -> Result<(), Box<dyn std::error::Error>> {
    let settings = super::load_settings()?;
    let toml_str = toml::to_string_pretty(&settings.masked())?;
    println!("{toml_str}");
    Ok(())
}

pub async fn path() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", Settings::config_path().display());
    Ok(())
}

/// Change the description tier. Lowering it trims stored descriptions to the new cap.
pub async fn set_tier(tier: &str) -> Result<(), Box<dyn std::error::Error>> {
    let tier = DescriptionLimitTier::parse(tier)
        .ok_or_else(|| format!("Unknown tier '{tier}' (expected small, medium or large)"))?;

    let path = Settings::config_path();
    let mut settings = Settings::load_from(&path)?;
    let previous = settings.description_limit_tier;
    settings.description_limit_tier = tier;
    settings.save_to(&path)?;

    println!(
        "✅ Description tier: {} → {} ({} chars)",
        previous.as_str(),
        tier.as_str(),
        tier.max_chars()
    );

    if tier.max_chars() < previous.max_chars() {
        let store = super::open_store();
        let trimmed = trim_descriptions(&store, tier.max_chars()).await?;
        if trimmed > 0 {
            println!("   ✂️  Trimmed {trimmed} project description(s) to fit");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_valid() {
        let path = Settings::config_path();
        assert!(path.to_str().unwrap().ends_with("config.toml"));
    }

    #[test]
    fn default_settings_warn_about_missing_key() {
        let found = warnings(&Settings::default());
        assert_eq!(found.len(), 1);
        assert!(found[0].starts_with("No API key set"));
    }

    #[test]
    fn primary_without_key_is_flagged() {
        let mut settings = Settings::default();
        settings.primary_provider = Some("groq".into());
        settings.providers.openai.api_key = Some("sk-test".into());
        assert_eq!(
            warnings(&settings),
            vec!["Primary provider Groq has no API key; another provider will be used"]
        );

        settings.primary_provider = Some("claude".into());
        assert_eq!(warnings(&settings), vec!["Unknown primary provider 'claude'"]);
    }
}
