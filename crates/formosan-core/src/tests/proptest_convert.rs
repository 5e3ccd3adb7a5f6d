//! Property-based tests for rule ordering, segmentation and conversion.
//!
//! Generates random words over the fixture alphabet via proptest and checks
//! the invariants that must hold for every input.

use proptest::prelude::*;

use super::{make_test_engine, make_test_table};
use crate::rules::{LanguageRuleSet, Rule};
use crate::segment::segment;
use crate::ConversionResult;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Characters every Amis fixture word may contain without producing OOV.
const AMIS_CHARS: &[char] = &[
    'a', 'i', 'e', 'o', 'u', 'n', 'g', 't', 'k', 's', 'r', 'm', 'p', 'h', 'w', 'y', '\'',
];

fn arb_word() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(AMIS_CHARS), 1..10)
        .prop_map(|chars| chars.into_iter().collect())
}

fn arb_sentence() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_word(), 1..6)
}

fn arb_grapheme() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec!['a', 'b', 'n', 'g', 'ʉ']), 1..4)
        .prop_map(|chars| chars.into_iter().collect())
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn conversion_is_deterministic(words in arb_sentence()) {
        let g2p = make_test_engine();
        let text = words.join(" ");
        let first = g2p.convert(&text, "Amis").unwrap();
        let second = g2p.convert(&text, "Amis").unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn known_alphabet_always_converts(words in arb_sentence()) {
        let g2p = make_test_engine();
        let result = g2p.convert(&words.join(" "), "Amis").unwrap();
        let ipa = result.ipa().expect("fixture alphabet must convert");
        prop_assert_eq!(ipa.split(' ').count(), words.len());
    }

    #[test]
    fn one_oov_voids_everything(
        words in arb_sentence(),
        target in any::<prop::sample::Index>(),
        offset in any::<prop::sample::Index>(),
    ) {
        let g2p = make_test_engine();
        let mut words = words;
        let w = target.index(words.len());
        let mut chars: Vec<char> = words[w].chars().collect();
        chars.insert(offset.index(chars.len() + 1), 'x');
        words[w] = chars.into_iter().collect();

        let result = g2p.convert(&words.join(" "), "Amis").unwrap();
        prop_assert_eq!(result, ConversionResult::Oov(vec!['x']));
    }

    #[test]
    fn identity_rules_reconstruct_text(word in "[abng]{0,12}") {
        let rules = LanguageRuleSet::from_entries(
            ["ngg", "ng", "a", "b", "n", "g"].map(|g| (g, vec![g])),
        ).unwrap();
        let seg = segment(&word, &rules);
        prop_assert!(seg.is_complete());
        prop_assert_eq!(seg.units.concat(), word);
    }

    #[test]
    fn no_single_n_before_g_when_digraph_exists(word in "[ang]{0,12}") {
        let rules = LanguageRuleSet::from_entries(
            [("n", "n"), ("g", "g"), ("a", "a"), ("ng", "ŋ")].map(|(g, p)| (g, vec![p])),
        ).unwrap();
        let seg = segment(&word, &rules);
        for pair in seg.units.windows(2) {
            prop_assert!(!(pair[0] == "n" && pair[1] == "g"));
        }
    }

    #[test]
    fn rule_sets_sorted_with_stable_ties(graphemes in prop::collection::vec(arb_grapheme(), 1..12)) {
        let rules = LanguageRuleSet::from_entries(
            graphemes.iter().map(|g| (g.clone(), vec![g.clone()])),
        ).unwrap();

        // first-occurrence order of the distinct inputs
        let mut distinct: Vec<&String> = Vec::new();
        for g in &graphemes {
            if !distinct.contains(&g) {
                distinct.push(g);
            }
        }
        let mut expected = distinct.clone();
        expected.sort_by_key(|g| std::cmp::Reverse(g.chars().count()));

        let got: Vec<&str> = rules.iter().map(Rule::grapheme).collect();
        let expected: Vec<&str> = expected.into_iter().map(String::as_str).collect();
        prop_assert_eq!(got, expected);
    }
}

#[test]
fn every_language_has_supplementary_defaults() {
    let table = make_test_table();
    for (language, rules) in table.iter() {
        for (grapheme, _) in crate::rules::SUPPLEMENTARY_G2P {
            assert!(rules.get(grapheme).is_some(), "{language} lacks {grapheme}");
        }
    }
}
