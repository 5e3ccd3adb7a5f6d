//! Command-line surface and lexicon builder for the Formosan G2P engine.

pub mod commands;
pub mod lexicon;
pub mod trace_init;
