use std::collections::BTreeSet;

use crate::lexicon::{CategoryRule, Lexicon};

pub const GENERAL: &str = "general";

const KEYWORD_POINTS: u32 = 2;
const PATTERN_POINTS: u32 = 3;
const ASSIGN_THRESHOLD: u32 = 3;

/// Keyword/pattern scorer over the combined word, definition and example.
pub struct CategoryClassifier {
    rules: Vec<CategoryRule>,
}

impl CategoryClassifier {
    pub fn new(lexicon: &Lexicon) -> Self {
        CategoryClassifier {
            rules: lexicon.categories.clone(),
        }
    }

    /// Every category scoring at least the threshold, or `{"general"}` when
    /// none does. Never empty.
    pub fn categorize(&self, word: &str, definition: &str, example: &str) -> BTreeSet<String> {
        let assigned: BTreeSet<String> = self
            .scores(word, definition, example)
            .into_iter()
            .filter(|(_, score)| *score >= ASSIGN_THRESHOLD)
            .map(|(name, _)| name.to_string())
            .collect();

        if assigned.is_empty() {
            BTreeSet::from([GENERAL.to_string()])
        } else {
            assigned
        }
    }

    /// Raw score per category, in table order. Matching is plain substring.
    pub fn scores(&self, word: &str, definition: &str, example: &str) -> Vec<(&str, u32)> {
        let text = format!("{} {} {}", word, definition, example).to_lowercase();
        self.rules
            .iter()
            .map(|rule| {
                let keywords = rule.keywords.iter().filter(|k| text.contains(k.as_str())).count() as u32;
                let patterns = rule.patterns.iter().filter(|p| text.contains(p.as_str())).count() as u32;
                (
                    rule.name.as_str(),
                    keywords * KEYWORD_POINTS + patterns * PATTERN_POINTS,
                )
            })
            .collect()
    }
}
