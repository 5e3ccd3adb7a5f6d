//! Language-specific case folding applied before segmentation.

use crate::settings::{settings, NormalizeSettings};

/// How a language folds case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CasePolicy {
    /// Lowercase everything except an uppercase `S` as the first character.
    KeepLeadingUpperS,
    /// Lowercase everything except uppercase `R`, which is a distinct grapheme.
    KeepUpperR,
    Lowercase,
}

impl CasePolicy {
    /// Resolve the policy for a language tag.
    ///
    /// A tag matches a configured language name when it equals the name or is
    /// a dialect of it (`<name>_<dialect>`).
    pub fn for_language(language: &str, settings: &NormalizeSettings) -> Self {
        let listed = |names: &[String]| names.iter().any(|name| is_language(language, name));
        if listed(&settings.leading_s_languages) {
            CasePolicy::KeepLeadingUpperS
        } else if listed(&settings.keep_upper_r_languages) {
            CasePolicy::KeepUpperR
        } else {
            CasePolicy::Lowercase
        }
    }
}

fn is_language(tag: &str, name: &str) -> bool {
    match tag.strip_prefix(name) {
        Some(rest) => rest.is_empty() || rest.starts_with('_'),
        None => false,
    }
}

/// Trim and case-fold `raw_text` for `language` using the global settings.
pub fn normalize(raw_text: &str, language: &str) -> String {
    normalize_with(
        raw_text,
        CasePolicy::for_language(language, &settings().normalize),
    )
}

/// Trim and case-fold `raw_text` with an explicit policy.
pub fn normalize_with(raw_text: &str, policy: CasePolicy) -> String {
    let text = raw_text.trim();
    let mut out = String::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        let keep = match policy {
            CasePolicy::KeepLeadingUpperS => i == 0 && ch == 'S',
            CasePolicy::KeepUpperR => ch == 'R',
            CasePolicy::Lowercase => false,
        };
        if keep {
            out.push(ch);
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}
