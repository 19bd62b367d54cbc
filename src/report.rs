//! The `{metadata, statistics, vocabulary}` wrapper written by `extract --report`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::settings::Strictness;
use crate::types::{Difficulty, VocabularyEntry};

pub const TITLE: &str = "SAT Vocabulary - Educational Dataset";
pub const DESCRIPTION: &str =
    "SAT vocabulary with difficulty assessment, categorization, and learning aids";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Length of the longest-word and most-syllable rankings.
pub const TOP_RANKED: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
    pub description: String,
    pub version: String,
    pub source: String,
    pub total_entries: usize,
    pub generated_at: DateTime<Utc>,
    pub strictness: Strictness,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub total_words: usize,
    pub difficulty_distribution: BTreeMap<String, usize>,
    /// An entry counts once under each of its categories.
    pub category_distribution: BTreeMap<String, usize>,
    pub part_of_speech_distribution: BTreeMap<String, usize>,
    pub average_word_length: f64,
    pub average_syllable_count: f64,
    #[serde(default)]
    pub longest_words: Vec<RankedWord>,
    #[serde(default)]
    pub most_syllables: Vec<RankedWord>,
    /// category -> difficulty -> entries.
    #[serde(default)]
    pub category_difficulty: BTreeMap<String, BTreeMap<String, usize>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedWord {
    pub word: String,
    pub value: usize,
    pub difficulty: Difficulty,
}

/// Share of hard words in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryHardness {
    pub category: String,
    pub hard_percent: f64,
    pub total: usize,
}

impl Statistics {
    pub fn from_entries(entries: &[VocabularyEntry]) -> Self {
        let total = entries.len();
        let average = |f: fn(&VocabularyEntry) -> usize| -> f64 {
            if total == 0 {
                0.0
            } else {
                round1(entries.iter().map(f).sum::<usize>() as f64 / total as f64)
            }
        };

        Statistics {
            total_words: total,
            difficulty_distribution: sorted_counts(entries.iter().map(|e| e.difficulty.to_string())),
            category_distribution: sorted_counts(entries.iter().flat_map(|e| e.categories.iter().cloned())),
            part_of_speech_distribution: sorted_counts(
                entries.iter().map(|e| e.part_of_speech.to_string()),
            ),
            average_word_length: average(|e| e.word_length),
            average_syllable_count: average(|e| e.syllable_count),
            longest_words: top_by(entries, |e| e.word_length),
            most_syllables: top_by(entries, |e| e.syllable_count),
            category_difficulty: category_difficulty(entries),
        }
    }

    /// Categories with at least `min_words` entries, highest share of hard
    /// words first. Percentages are rounded to one decimal.
    pub fn hardest_categories(&self, min_words: usize) -> Vec<CategoryHardness> {
        self.category_difficulty
            .iter()
            .filter_map(|(category, levels)| {
                let total: usize = levels.values().sum();
                if total == 0 || total < min_words {
                    return None;
                }
                let hard = levels.get(Difficulty::Hard.as_str()).copied().unwrap_or(0);
                Some(CategoryHardness {
                    category: category.clone(),
                    hard_percent: round1(hard as f64 * 100.0 / total as f64),
                    total,
                })
            })
            .sorted_by(|a, b| {
                b.hard_percent
                    .total_cmp(&a.hard_percent)
                    .then_with(|| a.category.cmp(&b.category))
            })
            .collect()
    }
}

/// Highest `measure` first; equal values keep dataset order.
fn top_by(entries: &[VocabularyEntry], measure: fn(&VocabularyEntry) -> usize) -> Vec<RankedWord> {
    entries
        .iter()
        .sorted_by_key(|e| std::cmp::Reverse(measure(e)))
        .take(TOP_RANKED)
        .map(|e| RankedWord {
            word: e.word.clone(),
            value: measure(e),
            difficulty: e.difficulty,
        })
        .collect()
}

fn category_difficulty(entries: &[VocabularyEntry]) -> BTreeMap<String, BTreeMap<String, usize>> {
    let mut matrix: BTreeMap<String, BTreeMap<String, usize>> = BTreeMap::new();
    for e in entries {
        for category in &e.categories {
            *matrix
                .entry(category.clone())
                .or_default()
                .entry(e.difficulty.to_string())
                .or_default() += 1;
        }
    }
    matrix
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: Metadata,
    pub statistics: Statistics,
    pub vocabulary: Vec<VocabularyEntry>,
}

impl Dataset {
    pub fn new(vocabulary: Vec<VocabularyEntry>, source: &str, strictness: Strictness) -> Self {
        Dataset {
            metadata: Metadata {
                title: TITLE.to_string(),
                description: DESCRIPTION.to_string(),
                version: VERSION.to_string(),
                source: source.to_string(),
                total_entries: vocabulary.len(),
                generated_at: Utc::now(),
                strictness,
            },
            statistics: Statistics::from_entries(&vocabulary),
            vocabulary,
        }
    }
}

fn sorted_counts(keys: impl Iterator<Item = String>) -> BTreeMap<String, usize> {
    keys.counts().into_iter().collect()
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
