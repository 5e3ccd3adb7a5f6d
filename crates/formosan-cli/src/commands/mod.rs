pub mod config_ops;
pub mod convert_ops;
pub mod lexicon_ops;
pub mod rules_ops;
