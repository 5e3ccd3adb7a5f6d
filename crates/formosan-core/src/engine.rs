use std::path::Path;

use tracing::debug_span;

use crate::convert::{convert, ConversionResult};
use crate::normalize::{normalize_with, CasePolicy};
use crate::rules::{LanguageRuleSet, RuleError, RuleTable};
use crate::settings::{settings, NormalizeSettings, Settings};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
}

/// Conversion entry point: a rule table plus the case policies and end
/// punctuation it is used with.
///
/// Immutable after construction, so one instance can serve conversions from
/// many threads.
#[derive(Debug, Clone)]
pub struct FormosanG2p {
    table: RuleTable,
    end_punctuation: Vec<char>,
    normalize: NormalizeSettings,
}

impl FormosanG2p {
    /// Engine configured from the global settings.
    pub fn new(table: RuleTable) -> Self {
        Self::with_settings(table, settings())
    }

    pub fn with_settings(table: RuleTable, settings: &Settings) -> Self {
        Self {
            table,
            end_punctuation: settings.convert.end_punctuation().to_vec(),
            normalize: settings.normalize.clone(),
        }
    }

    /// Load the CSV rule source at `path` with the global settings.
    pub fn open(path: &Path) -> Result<Self, RuleError> {
        Self::open_with_settings(path, settings())
    }

    /// Load the CSV rule source at `path`, reading its placeholder and the
    /// engine configuration from `settings`.
    pub fn open_with_settings(path: &Path, settings: &Settings) -> Result<Self, RuleError> {
        let table = RuleTable::open_with_placeholder(path, &settings.rules.placeholder)?;
        Ok(Self::with_settings(table, settings))
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn end_punctuation(&self) -> &[char] {
        &self.end_punctuation
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.table.languages()
    }

    pub fn rule_set(&self, language: &str) -> Result<&LanguageRuleSet, EngineError> {
        self.table
            .get(language)
            .ok_or_else(|| EngineError::UnknownLanguage(language.to_string()))
    }

    pub fn case_policy(&self, language: &str) -> CasePolicy {
        CasePolicy::for_language(language, &self.normalize)
    }

    /// Normalize `text` for `language` and convert it with the configured
    /// end punctuation.
    pub fn convert(&self, text: &str, language: &str) -> Result<ConversionResult, EngineError> {
        self.convert_with_punctuation(text, language, &self.end_punctuation)
    }

    /// Like [`convert`](Self::convert) with a caller-supplied end punctuation set.
    pub fn convert_with_punctuation(
        &self,
        text: &str,
        language: &str,
        end_punctuation: &[char],
    ) -> Result<ConversionResult, EngineError> {
        let _span = debug_span!("g2p", language).entered();
        let rules = self.rule_set(language)?;
        let normalized = normalize_with(text, self.case_policy(language));
        Ok(convert(&normalized, rules, end_punctuation))
    }
}
