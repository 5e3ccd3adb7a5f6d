//! Whole-utterance IPA conversion.
//!
//! Words are segmented independently and joined with spaces; phoneme units
//! within a word are joined with `-`. A single OOV character anywhere voids
//! the whole utterance: the result then carries only the OOV characters.

use std::collections::BTreeSet;

use tracing::{debug, debug_span};

use crate::rules::LanguageRuleSet;
use crate::segment::segment;

/// Separator between phoneme units of one word.
pub const UNIT_SEPARATOR: &str = "-";

/// Outcome of converting one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionResult {
    /// Every word converted.
    Ipa(String),
    /// No output. Carries the sorted, distinct OOV characters (empty when the
    /// input had no words at all).
    Oov(Vec<char>),
}

impl ConversionResult {
    pub fn ipa(&self) -> Option<&str> {
        match self {
            ConversionResult::Ipa(s) => Some(s.as_str()),
            ConversionResult::Oov(_) => None,
        }
    }

    /// OOV characters; empty on success.
    pub fn oov(&self) -> &[char] {
        match self {
            ConversionResult::Ipa(_) => &[],
            ConversionResult::Oov(chars) => chars.as_slice(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ConversionResult::Ipa(_))
    }

    /// Split into `(ipa, oov)`, the shape collaborators record.
    pub fn into_parts(self) -> (Option<String>, Vec<char>) {
        match self {
            ConversionResult::Ipa(s) => (Some(s), Vec::new()),
            ConversionResult::Oov(chars) => (None, chars),
        }
    }
}

/// Convert already-normalized `text` with one language's rules.
///
/// A trailing character of a word found in `end_punctuation` is detached
/// before segmentation and appended to the word's phoneme string.
pub fn convert(
    text: &str,
    rules: &LanguageRuleSet,
    end_punctuation: &[char],
) -> ConversionResult {
    let _span = debug_span!("convert", chars = text.chars().count()).entered();
    let mut words = Vec::new();
    let mut oov = BTreeSet::new();

    for word in text.split_whitespace() {
        let (stem, punct) = split_end_punctuation(word, end_punctuation);
        let seg = segment(stem, rules);
        if !seg.is_complete() {
            oov.extend(seg.oov);
            continue;
        }

        let mut ipa = seg.units.join(UNIT_SEPARATOR);
        if let Some(p) = punct {
            ipa.push(p);
        }
        words.push(ipa);
    }

    if !oov.is_empty() || words.is_empty() {
        debug!(oov_count = oov.len(), "no result");
        return ConversionResult::Oov(oov.into_iter().collect());
    }

    ConversionResult::Ipa(words.join(" "))
}

fn split_end_punctuation<'a>(
    word: &'a str,
    end_punctuation: &[char],
) -> (&'a str, Option<char>) {
    match word.chars().next_back() {
        Some(last) if end_punctuation.contains(&last) => {
            (&word[..word.len() - last.len_utf8()], Some(last))
        }
        _ => (word, None),
    }
}
