//! Grapheme-to-phoneme rule tables.
//!
//! A `RuleTable` maps a language tag (`Language` or `Language_Dialect`) to a
//! `LanguageRuleSet`: the language's graphemes ordered longest first, with
//! equal-length graphemes kept in rule-source order. The table is built once
//! and shared read-only by every conversion.

mod builder;
mod defaults;
mod source;

use std::collections::BTreeMap;
use std::io;
use std::path::Path;

pub use builder::{language_tag, RuleTableBuilder};
pub use defaults::SUPPLEMENTARY_G2P;

/// Configuration errors raised while building a rule table.
///
/// Rows are 1-based record numbers in the rule source (the header is row 1).
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("row {row}: invalid UTF-8")]
    InvalidUtf8 { row: usize },

    #[error("rule source has no header row")]
    MissingHeader,

    #[error("missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("empty header in column {column}")]
    EmptyHeader { column: usize },

    #[error("duplicate header: {0}")]
    DuplicateHeader(String),

    #[error("row {row}: expected {expected} fields, found {found}")]
    FieldCount {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("row {row}: empty language")]
    MissingLanguage { row: usize },

    #[error("empty grapheme for language {0}")]
    EmptyGrapheme(String),

    #[error("no phoneme for grapheme {grapheme:?} in language {language}")]
    EmptyPhonemes { language: String, grapheme: String },
}

/// A single grapheme → phoneme rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    grapheme: String,
    chars: Box<[char]>,
    phonemes: Vec<String>,
}

impl Rule {
    fn new(grapheme: String, phonemes: Vec<String>) -> Self {
        let chars = grapheme.chars().collect();
        Self {
            grapheme,
            chars,
            phonemes,
        }
    }

    pub fn grapheme(&self) -> &str {
        &self.grapheme
    }

    /// Grapheme length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub(crate) fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The substitution emitted by the segmenter (first alternate).
    pub fn canonical(&self) -> &str {
        &self.phonemes[0]
    }

    /// All alternates, canonical first.
    pub fn phonemes(&self) -> &[String] {
        &self.phonemes
    }
}

/// Rules for one language in matching order: longer graphemes first, ties in
/// insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageRuleSet {
    rules: Vec<Rule>,
}

impl LanguageRuleSet {
    /// Build a rule set from `(grapheme, alternates)` pairs in priority order.
    ///
    /// No supplementary defaults are merged; later duplicates replace the
    /// phonemes of earlier ones in place.
    pub fn from_entries<I, G, P>(entries: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = (G, Vec<P>)>,
        G: Into<String>,
        P: Into<String>,
    {
        let mut builder = builder::RuleSetBuilder::default();
        for (grapheme, phonemes) in entries {
            let grapheme = grapheme.into();
            if grapheme.is_empty() {
                return Err(RuleError::EmptyGrapheme(String::new()));
            }
            let phonemes: Vec<String> = phonemes.into_iter().map(Into::into).collect();
            if phonemes.is_empty() {
                return Err(RuleError::EmptyPhonemes {
                    language: String::new(),
                    grapheme,
                });
            }
            builder.insert(grapheme, phonemes);
        }
        Ok(builder.finish())
    }

    pub(crate) fn sorted(mut rules: Vec<Rule>) -> Self {
        // stable: equal lengths keep insertion order
        rules.sort_by_key(|r| std::cmp::Reverse(r.len()));
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Exact lookup by grapheme.
    pub fn get(&self, grapheme: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.grapheme == grapheme)
    }

    /// Length in characters of the longest grapheme.
    pub fn max_grapheme_len(&self) -> usize {
        self.rules.first().map_or(0, Rule::len)
    }
}

impl<'a> IntoIterator for &'a LanguageRuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

/// Rule sets keyed by language tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    languages: BTreeMap<String, LanguageRuleSet>,
}

impl RuleTable {
    pub fn builder() -> RuleTableBuilder {
        RuleTableBuilder::new()
    }

    /// Parse a CSV rule source (`Language,Dialect,<grapheme>...`).
    pub fn from_csv_str(csv: &str) -> Result<Self, RuleError> {
        Self::from_csv_bytes(csv.as_bytes())
    }

    /// Parse a CSV rule source using `placeholder` as the "no rule" cell.
    pub fn from_csv_str_with_placeholder(csv: &str, placeholder: &str) -> Result<Self, RuleError> {
        Self::from_csv_bytes_with_placeholder(csv.as_bytes(), placeholder)
    }

    /// Parse raw CSV bytes. An optional UTF-8 BOM is skipped; a field that
    /// is not UTF-8 is reported with its row.
    pub fn from_csv_bytes(csv: &[u8]) -> Result<Self, RuleError> {
        source::parse_rule_csv(csv, RuleTableBuilder::new())
    }

    pub fn from_csv_bytes_with_placeholder(
        csv: &[u8],
        placeholder: &str,
    ) -> Result<Self, RuleError> {
        source::parse_rule_csv(csv, RuleTableBuilder::with_placeholder(placeholder))
    }

    /// Read and parse a CSV rule source file.
    pub fn open(path: &Path) -> Result<Self, RuleError> {
        Self::from_csv_bytes(&std::fs::read(path)?)
    }

    /// Read and parse a CSV rule source file with an explicit placeholder.
    pub fn open_with_placeholder(path: &Path, placeholder: &str) -> Result<Self, RuleError> {
        Self::from_csv_bytes_with_placeholder(&std::fs::read(path)?, placeholder)
    }

    pub fn get(&self, language: &str) -> Option<&LanguageRuleSet> {
        self.languages.get(language)
    }

    pub fn contains(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// Language tags in sorted order.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LanguageRuleSet)> {
        self.languages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}
