//! Table-driven grapheme-to-IPA conversion for Formosan languages.
//!
//! A [`RuleTable`](rules::RuleTable) is built once from a CSV rule source.
//! [`FormosanG2p`] normalizes input per language, segments each word by
//! greedy longest match and returns either the IPA string or the OOV
//! characters that blocked it.

pub mod convert;
pub mod engine;
pub mod normalize;
pub mod rules;
pub mod segment;
pub mod settings;

#[cfg(test)]
mod tests;

pub use convert::{convert, ConversionResult};
pub use engine::{EngineError, FormosanG2p};
pub use normalize::{normalize, CasePolicy};
pub use rules::{LanguageRuleSet, Rule, RuleError, RuleTable};
pub use segment::{segment, Segmentation};
