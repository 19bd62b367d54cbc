use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::report::Statistics;
use crate::types::{Difficulty, PartOfSpeech, VocabularyEntry};

/// Read-only filters over a finished dataset. Results keep dataset order.
pub struct VocabularyQuery {
    entries: Vec<VocabularyEntry>,
}

impl VocabularyQuery {
    pub fn new(entries: Vec<VocabularyEntry>) -> Self {
        VocabularyQuery { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn word(&self, word: &str) -> Option<&VocabularyEntry> {
        self.entries.iter().find(|e| e.word.eq_ignore_ascii_case(word.trim()))
    }

    pub fn by_difficulty(&self, difficulty: Difficulty) -> Vec<&VocabularyEntry> {
        self.filter(|e| e.difficulty == difficulty)
    }

    pub fn by_category(&self, category: &str) -> Vec<&VocabularyEntry> {
        let category = category.trim();
        self.filter(|e| e.has_category(category))
    }

    pub fn by_part_of_speech(&self, pos: PartOfSpeech) -> Vec<&VocabularyEntry> {
        self.filter(|e| e.part_of_speech == pos)
    }

    /// Inclusive on both ends.
    pub fn by_length(&self, min: usize, max: usize) -> Vec<&VocabularyEntry> {
        self.filter(|e| (min..=max).contains(&e.word_length))
    }

    pub fn by_syllables(&self, count: usize) -> Vec<&VocabularyEntry> {
        self.filter(|e| e.syllable_count == count)
    }

    /// Up to `count` distinct entries drawn at random, optionally limited to
    /// one difficulty and/or category.
    pub fn random<R: Rng + ?Sized>(
        &self,
        count: usize,
        difficulty: Option<Difficulty>,
        category: Option<&str>,
        rng: &mut R,
    ) -> Vec<&VocabularyEntry> {
        let category = category.map(str::trim);
        let pool = self.filter(|e| {
            difficulty.map_or(true, |d| e.difficulty == d)
                && category.map_or(true, |c| e.has_category(c))
        });
        pool.choose_multiple(rng, count).copied().collect()
    }

    /// Every category with its entry count, most common first.
    pub fn categories(&self) -> Vec<(String, usize)> {
        self.entries
            .iter()
            .flat_map(|e| e.categories.iter().cloned())
            .counts()
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
            .collect()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_entries(&self.entries)
    }

    fn filter(&self, keep: impl Fn(&VocabularyEntry) -> bool) -> Vec<&VocabularyEntry> {
        self.entries.iter().filter(|e| keep(e)).collect()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::lexicon::Lexicon;
    use crate::pipeline::Pipeline;
    use crate::settings::ValidationRules;
    use crate::types::RawPageText;

    fn query() -> VocabularyQuery {
        let pipeline = Pipeline::new(&Lexicon::embedded().unwrap(), ValidationRules::default());
        let pages: Vec<RawPageText> = [(3, "page_a"), (7, "page_b")]
            .into_iter()
            .map(|(page_number, name)| RawPageText {
                page_number,
                text: std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap(),
            })
            .collect();
        VocabularyQuery::new(pipeline.run(&pages).entries)
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let q = query();
        assert_eq!(q.word("ABATE").map(|e| e.page), Some(3));
        assert!(q.word("zephyr").is_none());
    }

    #[test]
    fn filters() {
        let q = query();
        assert_eq!(q.len(), 8);
        let verbs = q.by_part_of_speech(PartOfSpeech::Verb);
        assert!(verbs.iter().any(|e| e.word == "affect"));
        assert!(verbs.iter().all(|e| e.part_of_speech == PartOfSpeech::Verb));

        let adjectives: Vec<&str> = q
            .by_part_of_speech(PartOfSpeech::Adjective)
            .iter()
            .map(|e| e.word.as_str())
            .collect();
        assert_eq!(adjectives, ["ubiquitous", "unbelievable"]);

        assert!(q.by_length(10, 12).iter().all(|e| (10..=12).contains(&e.word_length)));
        assert_eq!(q.by_length(12, 12).len(), 1);
        assert!(q.by_syllables(4).iter().any(|e| e.word == "ubiquitous"));
        let hard = q.by_difficulty(Difficulty::Hard);
        assert!(hard.iter().any(|e| e.word == "unbelievable"));
        assert!(hard.iter().all(|e| e.difficulty == Difficulty::Hard));
        assert!(q.by_difficulty(Difficulty::Easy).iter().any(|e| e.word == "abate"));
    }

    #[test]
    fn category_filter_ignores_case() {
        let q = query();
        let upper = q.by_category("TIME_CHANGE");
        assert!(upper.iter().any(|e| e.word == "ubiquitous"));
        assert_eq!(upper.len(), q.by_category("time_change").len());
    }

    #[test]
    fn category_counts_cover_every_tag() {
        let q = query();
        let cats = q.categories();
        let tagged: usize = q.entries.iter().map(|e| e.categories.len()).sum();
        assert_eq!(cats.iter().map(|(_, n)| n).sum::<usize>(), tagged);
        assert!(cats.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn stats_match_dataset() {
        let q = query();
        let s = q.statistics();
        assert_eq!(s.total_words, q.len());
        assert_eq!(s.difficulty_distribution.values().sum::<usize>(), q.len());
        assert_eq!(s.longest_words[0].word, "unbelievable");
        assert_eq!(s.longest_words.len(), q.len());
        let tagged: usize = s
            .category_difficulty
            .values()
            .flat_map(|levels| levels.values())
            .sum();
        assert_eq!(tagged, s.category_distribution.values().sum::<usize>());
    }

    fn words(rows: &[&VocabularyEntry]) -> Vec<String> {
        rows.iter().map(|e| e.word.clone()).collect()
    }

    #[test]
    fn random_is_reproducible_with_a_seed() {
        let q = query();
        let a = q.random(3, None, None, &mut StdRng::seed_from_u64(7));
        let b = q.random(3, None, None, &mut StdRng::seed_from_u64(7));
        assert_eq!(a.len(), 3);
        assert_eq!(words(&a), words(&b));
        assert!(words(&a).iter().all_unique());
    }

    #[test]
    fn random_respects_filters() {
        let q = query();
        let mut rng = StdRng::seed_from_u64(1);
        let hard = q.random(10, Some(Difficulty::Hard), None, &mut rng);
        assert_eq!(hard.len(), q.by_difficulty(Difficulty::Hard).len());
        assert!(hard.iter().all(|e| e.difficulty == Difficulty::Hard));

        let timed = q.random(10, None, Some("Time_Change"), &mut rng);
        assert!(!timed.is_empty());
        assert!(timed.iter().all(|e| e.has_category("time_change")));

        assert!(q.random(0, None, None, &mut rng).is_empty());
        assert!(q.random(5, None, Some("no_such_category"), &mut rng).is_empty());
    }
}
