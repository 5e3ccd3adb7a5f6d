//! Greedy longest-match segmentation of a word into phoneme units.
//!
//! Rules are tried in rule-set order (longest grapheme first, ties in
//! rule-source order) and the first rule that fits wins. A match is never
//! revisited. Characters no rule covers are copied through as literal units
//! and reported as OOV.

use std::collections::BTreeSet;

use crate::rules::{LanguageRuleSet, Rule};

/// Result of segmenting one word.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    /// Canonical phonemes and literal runs, left to right.
    pub units: Vec<String>,
    /// Characters that matched no rule.
    pub oov: BTreeSet<char>,
}

impl Segmentation {
    pub fn is_complete(&self) -> bool {
        self.oov.is_empty()
    }
}

/// Segment `text` against `rules`.
pub fn segment(text: &str, rules: &LanguageRuleSet) -> Segmentation {
    let chars: Vec<char> = text.chars().collect();
    let mut consumed = vec![false; chars.len()];
    let mut result = Segmentation::default();
    let mut literal = String::new();

    let mut i = 0;
    while i < chars.len() {
        if consumed[i] {
            i += 1;
            continue;
        }

        match find_rule(&chars, &consumed, i, rules) {
            Some(rule) => {
                if !literal.is_empty() {
                    result.units.push(std::mem::take(&mut literal));
                }
                result.units.push(rule.canonical().to_string());
                let end = i + rule.len();
                consumed[i..end].fill(true);
                i = end;
            }
            None => {
                literal.push(chars[i]);
                result.oov.insert(chars[i]);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        result.units.push(literal);
    }

    result
}

/// First rule in rule-set order that matches at `pos` over unconsumed positions.
fn find_rule<'r>(
    chars: &[char],
    consumed: &[bool],
    pos: usize,
    rules: &'r LanguageRuleSet,
) -> Option<&'r Rule> {
    let remaining = chars.len() - pos;
    rules.iter().find(|rule| {
        let len = rule.len();
        len <= remaining
            && chars[pos..pos + len] == *rule.chars()
            && !consumed[pos..pos + len].iter().any(|&c| c)
    })
}
