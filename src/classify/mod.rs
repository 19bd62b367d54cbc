//! Difficulty and thematic category assignment.
//!
//! Both classifiers are pure functions of a word's core fields plus the
//! lexicon tables; nothing here looks at neighbouring entries.

pub mod category;
pub mod difficulty;

pub use category::{CategoryClassifier, GENERAL};
pub use difficulty::{DefinitionComplexity, DifficultyClassifier, DifficultyScore};
