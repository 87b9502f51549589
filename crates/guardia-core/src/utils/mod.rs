//! Utility functions for string comparison and cleanup.

pub mod ids;
pub mod text;

pub use ids::IdSequence;
pub use text::{contains_folded, eq_folded, fold, strip_prefix_folded, strip_word_prefix_folded};
