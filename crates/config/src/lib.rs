//! Settings loading, validation, and management for Fieldwise.
//!
//! Loads settings from `~/.fieldwise/config.toml` with environment
//! variable overrides. Validates all settings at startup.

pub mod resolve;

pub use resolve::{resolve_api_key, resolve_provider};

use fieldwise_core::ProviderId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The prompt template used when settings carry none.
pub const DEFAULT_TEMPLATE: &str = "Product description: {{description}}\n\
Field label: {{fieldLabel}}\n\
Field placeholder: {{fieldPlaceholder}}, use for context only, do not copy into the text.\n\
Current value: {{fieldValue}}, If similar to a recent answer, rephrase or pick a different angle.\n\
\n\
Instructions:\n\
- Output only the final text for the field. No explanations.\n\
- Language: {{language}}.\n\
- Target length: 30-100 characters.\n\
- Hard limit: 200 characters.";

/// The root settings structure.
///
/// Maps directly to `~/.fieldwise/config.toml`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Preferred provider; ignored when it has no credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_provider: Option<String>,

    /// Output language for generated text
    #[serde(default = "default_language")]
    pub language: String,

    /// Sampling temperature sent to the provider
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Cap on project description length
    #[serde(default)]
    pub description_limit_tier: DescriptionLimitTier,

    /// Per-label hard-limit overrides
    #[serde(default)]
    pub field_presets: Vec<FieldPreset>,

    /// Prompt template; blank means the built-in default
    #[serde(default = "default_template")]
    pub prompt_template: String,

    /// Credentials and models per provider
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_language() -> String {
    "English".into()
}
fn default_temperature() -> f32 {
    0.2
}
fn default_template() -> String {
    DEFAULT_TEMPLATE.into()
}

/// Redact a secret string for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("primary_provider", &self.primary_provider)
            .field("language", &self.language)
            .field("temperature", &self.temperature)
            .field("description_limit_tier", &self.description_limit_tier)
            .field("field_presets", &self.field_presets)
            .field("prompt_template", &self.prompt_template)
            .field("providers", &self.providers)
            .finish()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("api_key", &redact(&self.api_key))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .finish()
    }
}

/// One credential/model pair per supported provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,

    #[serde(default)]
    pub gemini: ProviderConfig,

    #[serde(default)]
    pub groq: ProviderConfig,

    #[serde(default)]
    pub deepseek: ProviderConfig,
}

impl ProvidersConfig {
    pub fn get(&self, id: ProviderId) -> &ProviderConfig {
        match id {
            ProviderId::OpenAi => &self.openai,
            ProviderId::Gemini => &self.gemini,
            ProviderId::Groq => &self.groq,
            ProviderId::DeepSeek => &self.deepseek,
        }
    }

    pub fn get_mut(&mut self, id: ProviderId) -> &mut ProviderConfig {
        match id {
            ProviderId::OpenAi => &mut self.openai,
            ProviderId::Gemini => &mut self.gemini,
            ProviderId::Groq => &mut self.groq,
            ProviderId::DeepSeek => &mut self.deepseek,
        }
    }
}

#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Override the provider's base URL (proxies, tests)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// The model used for a provider when settings name none.
pub fn default_model(id: ProviderId) -> &'static str {
    match id {
        ProviderId::OpenAi => "gpt-4o-mini",
        ProviderId::Gemini => "gemini-1.5-flash",
        ProviderId::Groq => "llama-3.1-8b-instant",
        ProviderId::DeepSeek => "deepseek-chat",
    }
}

/// A user-defined hard-limit override for one field label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPreset {
    pub label: String,

    /// Maximum characters; non-finite or non-positive values are ignored
    pub max_len: f64,
}

impl FieldPreset {
    /// The preset limit rounded to the nearest whole character count.
    ///
    /// Values that are not finite, or that round below one character, are unusable.
    pub fn limit(&self) -> Option<u32> {
        let rounded = self.max_len.round();
        if rounded.is_finite() && rounded >= 1.0 {
            Some(rounded.min(u32::MAX as f64) as u32)
        } else {
            None
        }
    }
}

/// Normalize a field label for preset lookup: trimmed and lower-cased.
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Project description cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionLimitTier {
    #[default]
    Small,
    Medium,
    Large,
}

impl DescriptionLimitTier {
    /// Maximum description length in characters.
    pub fn max_chars(&self) -> usize {
        match self {
            Self::Small => 200,
            Self::Medium => 300,
            Self::Large => 500,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "small" => Some(Self::Small),
            "medium" => Some(Self::Medium),
            "large" => Some(Self::Large),
            _ => None,
        }
    }
}

impl Settings {
    /// Load settings from the default path (~/.fieldwise/config.toml).
    ///
    /// Also checks environment variables:
    /// - `OPENAI_API_KEY`, `GEMINI_API_KEY`, `GROQ_API_KEY`, `DEEPSEEK_API_KEY`
    ///   (only when the file has no key for that provider)
    /// - `FIELDWISE_PROVIDER`, `FIELDWISE_LANGUAGE`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Self::load_from(&Self::config_path())?;
        settings.apply_env_overrides(|key| std::env::var(key).ok());
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let settings: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Write settings to a file, creating its directory if needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let write_error = |reason: String| ConfigError::WriteError {
            path: path.to_path_buf(),
            reason,
        };
        let content = toml::to_string_pretty(self).map_err(|e| write_error(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| write_error(e.to_string()))
    }

    /// A copy with every credential replaced by `***`, for display.
    pub fn masked(&self) -> Self {
        let mut masked = self.clone();
        for id in ProviderId::FALLBACK_ORDER {
            let provider = masked.providers.get_mut(id);
            if provider.api_key.is_some() {
                provider.api_key = Some("***".into());
            }
        }
        masked
    }

    /// Apply environment overrides through a lookup function.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        for (id, var) in [
            (ProviderId::OpenAi, "OPENAI_API_KEY"),
            (ProviderId::Gemini, "GEMINI_API_KEY"),
            (ProviderId::Groq, "GROQ_API_KEY"),
            (ProviderId::DeepSeek, "DEEPSEEK_API_KEY"),
        ] {
            let provider = self.providers.get_mut(id);
            if provider.api_key.is_none() {
                provider.api_key = lookup(var).filter(|key| !key.trim().is_empty());
            }
        }

        if let Some(provider) = lookup("FIELDWISE_PROVIDER") {
            self.primary_provider = Some(provider);
        }

        if let Some(language) = lookup("FIELDWISE_LANGUAGE") {
            self.language = language;
        }
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".fieldwise")
    }

    /// Path of the settings file.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::ValidationError(
                "temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if self.field_presets.iter().any(|p| p.label.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "field presets need a non-empty label".into(),
            ));
        }

        Ok(())
    }

    /// The template to render: the configured one, or the default when blank.
    pub fn template(&self) -> &str {
        if self.prompt_template.trim().is_empty() {
            DEFAULT_TEMPLATE
        } else {
            &self.prompt_template
        }
    }

    /// The output language, defaulting to English.
    pub fn language(&self) -> &str {
        let language = self.language.trim();
        if language.is_empty() { "English" } else { language }
    }

    /// The model configured for a provider, or its default.
    pub fn model_for(&self, id: ProviderId) -> String {
        self.providers
            .get(id)
            .model
            .as_deref()
            .map(str::trim)
            .filter(|model| !model.is_empty())
            .unwrap_or_else(|| default_model(id))
            .to_string()
    }

    /// The preset whose normalized label matches `label`.
    pub fn preset_for(&self, label: &str) -> Option<&FieldPreset> {
        let normalized = normalize_label(label);
        if normalized.is_empty() {
            return None;
        }
        self.field_presets
            .iter()
            .find(|preset| normalize_label(&preset.label) == normalized)
    }

    /// Generate a default config TOML string (for `init` command).
    pub fn default_toml() -> String {
        let settings = Self::default();
        toml::to_string_pretty(&settings).unwrap_or_default()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            primary_provider: None,
            language: default_language(),
            temperature: default_temperature(),
            description_limit_tier: DescriptionLimitTier::default(),
            field_presets: vec![],
            prompt_template: default_template(),
            providers: ProvidersConfig::default(),
        }
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Failed to write config file at {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
