//! Lexicon builder: aggregates transcript/IPA corpora into per-language word
//! lists and phoneme inventories.
//!
//! Each corpus file is one language group. Transcript and IPA are aligned
//! word by word; every transcript word collects the set of IPA forms it was
//! seen with, and every IPA word contributes its `-`-separated phonemes to
//! the group's inventory.

mod io;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

pub use io::{load_corpus_dirs, load_jsonl, read_vowels, write_lexicon};

/// Characters stripped from transcript and IPA words before aggregation.
pub const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', '?', '!'];

#[derive(Debug, thiserror::Error)]
pub enum LexiconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}:{line}: invalid corpus record: {source}", .path.display())]
    Record {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },

    #[error("{group}: transcript has {transcript} words but IPA has {ipa}")]
    WordCountMismatch {
        group: String,
        transcript: usize,
        ipa: usize,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn remove_punctuation(text: &str) -> String {
    text.chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect()
}

/// Word list and phoneme inventory of one language group.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LanguageGroup {
    pub word2ipa: BTreeMap<String, BTreeSet<String>>,
    pub phonemes: BTreeSet<String>,
}

#[derive(Debug, Default)]
pub struct Lexicon {
    groups: BTreeMap<String, LanguageGroup>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one aligned utterance to `group`.
    ///
    /// Word pairs whose transcript word is empty after punctuation removal
    /// are skipped.
    pub fn add_utterance(
        &mut self,
        group: &str,
        transcript: &str,
        ipa: &str,
    ) -> Result<(), LexiconError> {
        let words: Vec<&str> = transcript.split_whitespace().collect();
        let ipa_words: Vec<&str> = ipa.split_whitespace().collect();
        if words.len() != ipa_words.len() {
            return Err(LexiconError::WordCountMismatch {
                group: group.to_string(),
                transcript: words.len(),
                ipa: ipa_words.len(),
            });
        }

        let entry = self.groups.entry(group.to_string()).or_default();
        for (word, ipa_word) in words.into_iter().zip(ipa_words) {
            let word = remove_punctuation(word);
            let ipa_word = remove_punctuation(ipa_word);
            if word.is_empty() {
                continue;
            }
            entry.phonemes.extend(
                ipa_word
                    .split('-')
                    .filter(|p| !p.is_empty())
                    .map(str::to_string),
            );
            entry.word2ipa.entry(word).or_default().insert(ipa_word);
        }
        Ok(())
    }

    pub fn get(&self, group: &str) -> Option<&LanguageGroup> {
        self.groups.get(group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &LanguageGroup)> {
        self.groups.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Union of every group's phoneme inventory.
    pub fn phonemes(&self) -> BTreeSet<&str> {
        self.groups
            .values()
            .flat_map(|g| g.phonemes.iter().map(String::as_str))
            .collect()
    }

    /// All phonemes that are not in `vowels`, sorted.
    pub fn consonants(&self, vowels: &[String]) -> Vec<String> {
        self.phonemes()
            .into_iter()
            .filter(|p| !vowels.iter().any(|v| v == *p))
            .map(str::to_string)
            .collect()
    }
}
