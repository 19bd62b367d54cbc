use std::collections::BTreeMap;

use crate::lexicon::{EtymologyGroup, Lexicon, MemoryAid};
use crate::metrics::{count_syllables, split_syllables};

pub const UNKNOWN_ORIGIN: &str = "Mixed/Unknown";

const MAX_TIPS: usize = 3;
const SYLLABLE_TIP_MIN: usize = 4;

/// Etymology guess, memory aid and study tips. All three depend on the word
/// alone.
pub struct EnrichmentGenerator {
    etymology: Vec<EtymologyGroup>,
    memory_aids: Vec<MemoryAid>,
    confusion_pairs: BTreeMap<String, String>,
}

impl EnrichmentGenerator {
    pub fn new(lexicon: &Lexicon) -> Self {
        EnrichmentGenerator {
            etymology: lexicon.etymology.clone(),
            memory_aids: lexicon.memory_aids.clone(),
            confusion_pairs: lexicon.confusion_pairs.clone(),
        }
    }

    /// First origin group whose markers match; groups are checked in table order.
    pub fn guess_etymology(&self, word: &str) -> String {
        let word = word.to_lowercase();
        self.etymology
            .iter()
            .find(|g| g.matches(&word))
            .map_or_else(|| UNKNOWN_ORIGIN.to_string(), |g| g.origin.clone())
    }

    pub fn create_memory_aid(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        match self.memory_aids.iter().find(|a| lower.starts_with(a.prefix.as_str())) {
            Some(aid) => format!("{}- = {}", aid.prefix.to_uppercase(), aid.gloss),
            None => format!("Break down '{}' into parts", word),
        }
    }

    pub fn generate_learning_tips(&self, word: &str) -> Vec<String> {
        let mut tips = Vec::new();

        if count_syllables(word) >= SYLLABLE_TIP_MIN {
            tips.push(format!("Break into syllables: {}", split_syllables(word).join("-")));
        }

        let origin = self.guess_etymology(word);
        if origin != UNKNOWN_ORIGIN {
            tips.push(format!("Has {} origins", origin));
        }

        if let Some(other) = self.confusion_pairs.get(&word.to_lowercase()) {
            tips.push(format!("Don't confuse with '{}'", other));
        }

        tips.truncate(MAX_TIPS);
        tips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator() -> EnrichmentGenerator {
        EnrichmentGenerator::new(&Lexicon::embedded().unwrap())
    }

    #[test]
    fn etymology_groups_in_order() {
        let g = generator();
        assert_eq!(g.guess_etymology("ubiquitous"), "Latin");
        assert_eq!(g.guess_etymology("abate"), "Latin");
        assert_eq!(g.guess_etymology("philanthropy"), "Greek");
        assert_eq!(g.guess_etymology("grievance"), "French");
        assert_eq!(g.guess_etymology("hardship"), "Germanic");
        assert_eq!(g.guess_etymology("abyss"), UNKNOWN_ORIGIN);
        // Latin suffix checked before the Greek infix.
        assert_eq!(g.guess_etymology("philosophic"), "Latin");
    }

    #[test]
    fn memory_aid_by_prefix() {
        let g = generator();
        assert_eq!(g.create_memory_aid("abate"), "AB- = away from");
        assert_eq!(g.create_memory_aid("transient"), "TRANS- = across");
        assert_eq!(g.create_memory_aid("dissent"), "DIS- = not/opposite");
        assert_eq!(g.create_memory_aid("ubiquitous"), "Break down 'ubiquitous' into parts");
    }

    #[test]
    fn first_listed_prefix_wins() {
        // "de" is listed before "dis"; "dis" never shadows a "de" word.
        assert_eq!(generator().create_memory_aid("deride"), "DE- = away/down");
    }

    #[test]
    fn tips_for_long_latin_word() {
        assert_eq!(
            generator().generate_learning_tips("ubiquitous"),
            ["Break into syllables: u-bi-qui-tous", "Has Latin origins"]
        );
    }

    #[test]
    fn confusion_tip() {
        assert_eq!(
            generator().generate_learning_tips("affect"),
            ["Don't confuse with 'effect'"]
        );
    }

    #[test]
    fn short_plain_word_gets_no_tips() {
        assert!(generator().generate_learning_tips("abyss").is_empty());
    }

    #[test]
    fn never_more_than_three() {
        // syllables + Latin + confusion
        let mut lexicon = Lexicon::embedded().unwrap();
        lexicon
            .confusion_pairs
            .insert("ubiquitous".into(), "iniquitous".into());
        let tips = EnrichmentGenerator::new(&lexicon).generate_learning_tips("ubiquitous");
        assert_eq!(tips.len(), 3);
        assert_eq!(tips[2], "Don't confuse with 'iniquitous'");
    }
}
