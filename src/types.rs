use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// One source page as produced by the PDF text dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPageText {
    #[serde(rename = "page")]
    pub page_number: i64,
    pub text: String,
}

/// Where a candidate came from: page plus inclusive line range of its body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceSpan {
    pub page: i64,
    pub first_line: usize,
    pub last_line: usize,
}

/// Provisional parse result. Dropped unless it passes validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub part_of_speech_raw: Option<String>,
    pub definition_raw: String,
    pub example_raw: String,
    pub source_span: SourceSpan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
    Adjective,
    Adverb,
    Unknown,
}

impl PartOfSpeech {
    /// Map a raw abbreviation (`adj.`, `n`, ...). `None` when the token is
    /// outside the fixed abbreviation set.
    pub fn from_abbreviation(raw: &str) -> Option<Self> {
        match raw.trim().trim_end_matches('.').to_ascii_lowercase().as_str() {
            "n" => Some(PartOfSpeech::Noun),
            "v" => Some(PartOfSpeech::Verb),
            "adj" => Some(PartOfSpeech::Adjective),
            "adv" => Some(PartOfSpeech::Adverb),
            _ => None,
        }
    }

    /// Noun, verb and adjective carry no difficulty penalty.
    pub fn is_core(self) -> bool {
        matches!(
            self,
            PartOfSpeech::Noun | PartOfSpeech::Verb | PartOfSpeech::Adjective
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "noun" => Some(PartOfSpeech::Noun),
            "verb" => Some(PartOfSpeech::Verb),
            "adjective" => Some(PartOfSpeech::Adjective),
            "adverb" => Some(PartOfSpeech::Adverb),
            "unknown" => Some(PartOfSpeech::Unknown),
            other => PartOfSpeech::from_abbreviation(other),
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Cutover points: ≤2 easy, 3..=5 medium, ≥6 hard.
    pub fn from_score(score: i32) -> Self {
        if score <= 2 {
            Difficulty::Easy
        } else if score <= 5 {
            Difficulty::Medium
        } else {
            Difficulty::Hard
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The fields recovered from text. Write-once: every derived field of a
/// [`VocabularyEntry`] is computed from these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreFields {
    pub word: String,
    pub part_of_speech: PartOfSpeech,
    pub definition: String,
    pub example: String,
    pub page: i64,
}

/// One finished dataset record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub word: String,
    pub part_of_speech: PartOfSpeech,
    pub definition: String,
    pub example: String,
    pub difficulty: Difficulty,
    pub categories: BTreeSet<String>,
    pub word_length: usize,
    pub syllable_count: usize,
    pub etymology: String,
    pub memory_aid: String,
    pub learning_tips: Vec<String>,
    pub page: i64,
}

impl VocabularyEntry {
    pub fn has_category(&self, category: &str) -> bool {
        self.categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}
