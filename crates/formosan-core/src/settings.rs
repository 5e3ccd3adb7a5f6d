//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub rules: RuleSettings,
    pub convert: ConvertSettings,
    pub normalize: NormalizeSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuleSettings {
    pub placeholder: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertSettings {
    end_punctuation: Vec<String>,
    /// Parsed `end_punctuation`, one char per entry.
    #[serde(skip)]
    end_punctuation_parsed: Vec<char>,
}

impl ConvertSettings {
    pub fn end_punctuation(&self) -> &[char] {
        &self.end_punctuation_parsed
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeSettings {
    #[serde(default)]
    pub leading_s_languages: Vec<String>,
    #[serde(default)]
    pub keep_upper_r_languages: Vec<String>,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    s.convert.end_punctuation_parsed = parse_end_punctuation(&s.convert.end_punctuation)?;
    Ok(s)
}

fn parse_end_punctuation(raw: &[String]) -> Result<Vec<char>, SettingsError> {
    let mut result = Vec::with_capacity(raw.len());
    for entry in raw {
        let mut chars = entry.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => result.push(c),
            _ => {
                return Err(SettingsError::InvalidValue {
                    field: "convert.end_punctuation".to_string(),
                    reason: format!("{entry:?} must be exactly one character"),
                })
            }
        }
    }
    Ok(result)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.rules.placeholder.is_empty() {
        return Err(SettingsError::InvalidValue {
            field: "rules.placeholder".to_string(),
            reason: "must be non-empty".to_string(),
        });
    }

    let norm = &s.normalize;
    if let Some(both) = norm
        .leading_s_languages
        .iter()
        .find(|lang| norm.keep_upper_r_languages.contains(lang))
    {
        return Err(SettingsError::InvalidValue {
            field: "normalize".to_string(),
            reason: format!("{both} is listed under more than one case policy"),
        });
    }

    Ok(())
}
