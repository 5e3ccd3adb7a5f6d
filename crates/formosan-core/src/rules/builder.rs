use std::collections::{BTreeMap, HashMap};

use tracing::{debug, debug_span};

use super::defaults::SUPPLEMENTARY_G2P;
use super::{LanguageRuleSet, Rule, RuleError, RuleTable};

/// Compose the language tag for a rule-source row.
///
/// A missing dialect (empty or `placeholder`) yields `Language`, otherwise
/// `Language_Dialect`.
pub fn language_tag(language: &str, dialect: Option<&str>, placeholder: &str) -> String {
    match dialect.map(str::trim) {
        Some(d) if !d.is_empty() && d != placeholder => format!("{language}_{d}"),
        _ => language.to_string(),
    }
}

/// Insertion-ordered grapheme map for one language.
#[derive(Default)]
pub(super) struct RuleSetBuilder {
    entries: Vec<(String, Vec<String>)>,
    index: HashMap<String, usize>,
}

impl RuleSetBuilder {
    /// Insert or replace. A replaced grapheme keeps its original position.
    pub(super) fn insert(&mut self, grapheme: String, phonemes: Vec<String>) {
        match self.index.get(&grapheme) {
            Some(&i) => self.entries[i].1 = phonemes,
            None => {
                self.index.insert(grapheme.clone(), self.entries.len());
                self.entries.push((grapheme, phonemes));
            }
        }
    }

    fn insert_if_absent(&mut self, grapheme: &str, phoneme: &str) {
        if !self.index.contains_key(grapheme) {
            self.insert(grapheme.to_string(), vec![phoneme.to_string()]);
        }
    }

    fn merge_supplementary(&mut self) {
        for (grapheme, phoneme) in SUPPLEMENTARY_G2P {
            self.insert_if_absent(grapheme, phoneme);
        }
    }

    pub(super) fn finish(self) -> LanguageRuleSet {
        let rules = self
            .entries
            .into_iter()
            .map(|(g, p)| Rule::new(g, p))
            .collect();
        LanguageRuleSet::sorted(rules)
    }
}

/// Accumulates rule-source rows into a `RuleTable`.
///
/// Each row adds its graphemes under the row's language tag and then merges
/// the supplementary single-letter defaults for graphemes the language does
/// not define. `build` sorts every language's rules longest first.
pub struct RuleTableBuilder {
    placeholder: String,
    languages: BTreeMap<String, RuleSetBuilder>,
}

impl Default for RuleTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleTableBuilder {
    /// Builder using the placeholder from the global settings.
    pub fn new() -> Self {
        Self::with_placeholder(&crate::settings::settings().rules.placeholder)
    }

    pub fn with_placeholder(placeholder: &str) -> Self {
        Self {
            placeholder: placeholder.to_string(),
            languages: BTreeMap::new(),
        }
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Add one row of `(grapheme, cell)` pairs for `language`/`dialect`.
    ///
    /// A cell equal to the placeholder (or empty) means "no rule"; any other
    /// cell is a comma-separated list of phoneme alternates. The whole row is
    /// validated before anything is inserted, so a rejected row leaves the
    /// builder unchanged. Returns the row's language tag.
    pub fn add_row<'a, I>(
        &mut self,
        language: &str,
        dialect: Option<&str>,
        cells: I,
    ) -> Result<String, RuleError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let language = language.trim();
        let tag = language_tag(language, dialect, &self.placeholder);

        let mut parsed = Vec::new();
        for (grapheme, cell) in cells {
            if grapheme.is_empty() {
                return Err(RuleError::EmptyGrapheme(tag));
            }
            let Some(phonemes) = parse_cell(cell, &self.placeholder) else {
                continue;
            };
            if phonemes.is_empty() {
                return Err(RuleError::EmptyPhonemes {
                    language: tag,
                    grapheme: grapheme.to_string(),
                });
            }
            parsed.push((grapheme.to_string(), phonemes));
        }

        let set = self.languages.entry(tag.clone()).or_default();
        for (grapheme, phonemes) in parsed {
            set.insert(grapheme, phonemes);
        }
        set.merge_supplementary();
        Ok(tag)
    }

    pub fn build(self) -> RuleTable {
        let _span = debug_span!("build_rule_table", languages = self.languages.len()).entered();
        let languages: BTreeMap<String, LanguageRuleSet> = self
            .languages
            .into_iter()
            .map(|(tag, set)| (tag, set.finish()))
            .collect();
        for (tag, set) in &languages {
            debug!(language = tag.as_str(), rules = set.len());
        }
        RuleTable { languages }
    }
}

/// `None` for a "no rule" cell; otherwise the trimmed, non-empty alternates.
fn parse_cell(cell: &str, placeholder: &str) -> Option<Vec<String>> {
    let cell = cell.trim();
    if cell.is_empty() || cell == placeholder {
        return None;
    }
    Some(
        cell.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graphemes<'a>(table: &'a RuleTable, tag: &str) -> Vec<&'a str> {
        table.get(tag).unwrap().iter().map(Rule::grapheme).collect()
    }

    #[test]
    fn tag_without_dialect() {
        assert_eq!(language_tag("Amis", None, "-"), "Amis");
        assert_eq!(language_tag("Amis", Some("-"), "-"), "Amis");
        assert_eq!(language_tag("Amis", Some(""), "-"), "Amis");
    }

    #[test]
    fn tag_with_dialect() {
        assert_eq!(language_tag("Amis", Some("Coastal"), "-"), "Amis_Coastal");
        assert_eq!(language_tag("Amis", Some(" Coastal "), "-"), "Amis_Coastal");
    }

    #[test]
    fn placeholder_cells_are_skipped() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", None, [("ng", "ŋ"), ("x", "-"), ("k", "")])
            .unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        assert!(set.get("ng").is_some());
        assert!(set.get("x").is_none());
        assert!(set.get("k").is_none());
    }

    #[test]
    fn custom_placeholder() {
        let mut b = RuleTableBuilder::with_placeholder("N/A");
        b.add_row("Amis", Some("N/A"), [("x", "N/A"), ("-", "-")])
            .unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        assert!(set.get("x").is_none());
        assert_eq!(set.get("-").unwrap().canonical(), "-");
    }

    #[test]
    fn alternates_are_split_and_trimmed() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", None, [("e", "ə, e ,"), ("o", "o,u")])
            .unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        assert_eq!(set.get("e").unwrap().phonemes(), &["ə", "e"]);
        assert_eq!(set.get("o").unwrap().canonical(), "o");
    }

    #[test]
    fn cell_of_only_commas_is_an_error() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        let err = b.add_row("Amis", None, [("e", ",,")]).unwrap_err();
        assert!(
            matches!(err, RuleError::EmptyPhonemes { ref language, ref grapheme } if language == "Amis" && grapheme == "e")
        );
    }

    #[test]
    fn rejected_row_leaves_builder_unchanged() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        let err = b.add_row("Thao", None, [("a", "a"), ("", "x")]).unwrap_err();
        assert!(matches!(err, RuleError::EmptyGrapheme(_)));
        b.add_row("Amis", None, [("a", "a")]).unwrap();
        let err = b.add_row("Amis", None, [("a", "ɑ"), ("e", ",")]).unwrap_err();
        assert!(matches!(err, RuleError::EmptyPhonemes { .. }));

        let table = b.build();
        assert!(!table.contains("Thao"));
        let amis = table.get("Amis").unwrap();
        assert_eq!(amis.get("a").unwrap().canonical(), "a");
        assert_eq!(amis.len(), SUPPLEMENTARY_G2P.len() + 1);
    }

    #[test]
    fn empty_grapheme_is_an_error() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        let err = b.add_row("Amis", None, [("", "a")]).unwrap_err();
        assert!(matches!(err, RuleError::EmptyGrapheme(_)));
    }

    #[test]
    fn supplementary_defaults_are_merged() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", None, [("a", "a")]).unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        for (grapheme, phoneme) in SUPPLEMENTARY_G2P {
            assert_eq!(set.get(grapheme).unwrap().canonical(), *phoneme);
        }
        assert_eq!(set.len(), SUPPLEMENTARY_G2P.len() + 1);
    }

    #[test]
    fn language_rule_overrides_default() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", None, [("c", "ts"), ("y", "i")]).unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        assert_eq!(set.get("c").unwrap().canonical(), "ts");
        assert_eq!(set.get("y").unwrap().canonical(), "i");
        // defined columns precede the merged defaults among single letters
        let singles: Vec<&str> = graphemes(&table, "Amis").into_iter().take(2).collect();
        assert_eq!(singles, vec!["c", "y"]);
    }

    #[test]
    fn all_placeholder_row_still_gets_defaults() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Thao", None, [("a", "-")]).unwrap();
        let table = b.build();
        assert_eq!(table.get("Thao").unwrap().len(), SUPPLEMENTARY_G2P.len());
    }

    #[test]
    fn rows_for_same_tag_merge() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", None, [("a", "a"), ("i", "i")]).unwrap();
        b.add_row("Amis", Some("-"), [("a", "ɑ"), ("ng", "ŋ")])
            .unwrap();
        let table = b.build();
        let set = table.get("Amis").unwrap();
        assert_eq!(set.get("a").unwrap().canonical(), "ɑ");
        assert_eq!(graphemes(&table, "Amis")[..3], ["ng", "a", "i"]);
    }

    #[test]
    fn dialects_are_separate_languages() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Amis", Some("Coastal"), [("e", "ə")]).unwrap();
        b.add_row("Amis", Some("Southern"), [("e", "e")]).unwrap();
        let table = b.build();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("Amis_Coastal").unwrap().get("e").unwrap().canonical(),
            "ə"
        );
        assert_eq!(
            table.get("Amis_Southern").unwrap().get("e").unwrap().canonical(),
            "e"
        );
    }

    #[test]
    fn build_sorts_by_length_with_stable_ties() {
        let mut b = RuleTableBuilder::with_placeholder("-");
        b.add_row("Paiwan", None, [("t", "t"), ("dr", "ɖ"), ("tj", "c"), ("ng", "ŋ")])
            .unwrap();
        let table = b.build();
        assert_eq!(graphemes(&table, "Paiwan")[..4], ["dr", "tj", "ng", "t"]);
    }
}
