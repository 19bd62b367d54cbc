use std::collections::HashSet;

use crate::lexicon::Lexicon;
use crate::metrics::{count_syllables, has_complex_morphology, word_length};
use crate::types::{Difficulty, PartOfSpeech};

/// Average token length above which a definition reads as complex.
const COMPLEX_AVG_TOKEN_LEN: f64 = 6.0;
/// Average token length above which a definition reads as moderate.
const MODERATE_AVG_TOKEN_LEN: f64 = 5.0;
/// Greek/Latin spelling markers only count for words longer than this.
const ORIGIN_MIN_WORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionComplexity {
    Simple,
    Moderate,
    Complex,
}

impl DefinitionComplexity {
    fn points(self) -> i32 {
        match self {
            DefinitionComplexity::Simple => 0,
            DefinitionComplexity::Moderate => 1,
            DefinitionComplexity::Complex => 2,
        }
    }
}

/// Per-factor breakdown of a difficulty score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DifficultyScore {
    pub length: i32,
    pub syllables: i32,
    pub morphology: i32,
    pub definition: i32,
    pub part_of_speech: i32,
    pub origin: i32,
    pub common_word: i32,
}

impl DifficultyScore {
    pub fn total(&self) -> i32 {
        self.length
            + self.syllables
            + self.morphology
            + self.definition
            + self.part_of_speech
            + self.origin
            + self.common_word
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_score(self.total())
    }
}

pub struct DifficultyClassifier {
    prefixes: Vec<String>,
    suffixes: Vec<String>,
    complex_phrases: Vec<String>,
    common_words: HashSet<String>,
    origin_markers: Vec<String>,
}

impl DifficultyClassifier {
    pub fn new(lexicon: &Lexicon) -> Self {
        DifficultyClassifier {
            prefixes: lexicon.prefixes.clone(),
            suffixes: lexicon.suffixes.clone(),
            complex_phrases: lexicon.complex_phrases.clone(),
            common_words: lexicon.common_words.iter().cloned().collect(),
            origin_markers: lexicon.origin_markers.clone(),
        }
    }

    pub fn classify(&self, word: &str, definition: &str, part_of_speech: PartOfSpeech) -> Difficulty {
        self.score(word, definition, part_of_speech).difficulty()
    }

    pub fn score(&self, word: &str, definition: &str, part_of_speech: PartOfSpeech) -> DifficultyScore {
        let word = word.to_lowercase();
        let len = word_length(&word);

        let length = match len {
            0..=4 => 0,
            5..=7 => 1,
            _ => 2,
        };
        let syllables = match count_syllables(&word) {
            0..=2 => 0,
            3 => 1,
            _ => 2,
        };
        let morphology = if has_complex_morphology(&word, &self.prefixes, &self.suffixes) {
            2
        } else {
            0
        };
        let part_of_speech = if part_of_speech.is_core() { 0 } else { 1 };
        let origin = if len > ORIGIN_MIN_WORD_LEN
            && self.origin_markers.iter().any(|m| word.contains(m.as_str()))
        {
            1
        } else {
            0
        };
        let common_word = if self.common_words.contains(&word) { -2 } else { 0 };

        DifficultyScore {
            length,
            syllables,
            morphology,
            definition: self.definition_complexity(definition).points(),
            part_of_speech,
            origin,
            common_word,
        }
    }

    pub fn definition_complexity(&self, definition: &str) -> DefinitionComplexity {
        let lower = definition.to_lowercase();
        let has_complex_language = self
            .complex_phrases
            .iter()
            .any(|p| lower.contains(p.as_str()));

        let tokens: Vec<&str> = lower.split_whitespace().collect();
        let avg = if tokens.is_empty() {
            0.0
        } else {
            tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / tokens.len() as f64
        };

        if has_complex_language || avg > COMPLEX_AVG_TOKEN_LEN {
            DefinitionComplexity::Complex
        } else if avg > MODERATE_AVG_TOKEN_LEN {
            DefinitionComplexity::Moderate
        } else {
            DefinitionComplexity::Simple
        }
    }
}
