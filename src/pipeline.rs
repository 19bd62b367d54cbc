use std::collections::BTreeMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;
use tracing::info;

use crate::classify::{CategoryClassifier, DifficultyClassifier};
use crate::dedup::dedup_and_sort;
use crate::enrich::EnrichmentGenerator;
use crate::error::Result;
use crate::lexicon::Lexicon;
use crate::metrics::{count_syllables, word_length};
use crate::parser::{EntryExtractor, PageExtraction};
use crate::settings::{Settings, ValidationRules};
use crate::types::{CoreFields, RawPageText, VocabularyEntry};

/// Aggregate counts for one run. Rejections are summarized here rather than
/// reported per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub pages: usize,
    pub candidates: usize,
    pub accepted: usize,
    pub duplicates: usize,
    pub skipped_malformed: usize,
    pub skipped_invalid: usize,
    pub by_reason: BTreeMap<&'static str, usize>,
}

impl RunStats {
    fn record(&mut self, page: &PageExtraction) {
        self.pages += 1;
        self.accepted += page.entries.len();
        self.candidates += page.entries.len() + page.rejected.len();
        for (_, reason) in &page.rejected {
            if reason.is_malformed() {
                self.skipped_malformed += 1;
            } else {
                self.skipped_invalid += 1;
            }
            *self.by_reason.entry(reason.as_str()).or_default() += 1;
        }
    }

    pub fn skipped(&self) -> usize {
        self.skipped_malformed + self.skipped_invalid
    }
}

#[derive(Debug, Clone, Default)]
pub struct PipelineOutput {
    pub entries: Vec<VocabularyEntry>,
    pub stats: RunStats,
}

/// Extraction, dedup, classification and enrichment over a batch of pages.
///
/// Pages are independent until dedup, so extraction may run on rayon.
/// Everything from dedup on is a single ordered pass.
pub struct Pipeline {
    extractor: EntryExtractor,
    difficulty: DifficultyClassifier,
    categories: CategoryClassifier,
    enrichment: EnrichmentGenerator,
    parallel: bool,
}

impl Pipeline {
    pub fn new(lexicon: &Lexicon, rules: ValidationRules) -> Self {
        Pipeline {
            extractor: EntryExtractor::new(lexicon, rules),
            difficulty: DifficultyClassifier::new(lexicon),
            categories: CategoryClassifier::new(lexicon),
            enrichment: EnrichmentGenerator::new(lexicon),
            parallel: true,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let lexicon = settings.lexicon()?;
        Ok(Pipeline::new(&lexicon, settings.rules()).with_parallel(settings.parallel))
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn rules(&self) -> &ValidationRules {
        self.extractor.rules()
    }

    pub fn extract_page(&self, page: &RawPageText) -> PageExtraction {
        self.extractor.extract_page(page)
    }

    /// Per-page extraction; output order matches input order either way.
    pub fn extract_pages(&self, pages: &[RawPageText]) -> Vec<PageExtraction> {
        if self.parallel {
            self.extract_parallel(pages)
        } else {
            pages.iter().map(|p| self.extract_page(p)).collect()
        }
    }

    #[cfg(feature = "rayon")]
    fn extract_parallel(&self, pages: &[RawPageText]) -> Vec<PageExtraction> {
        pages.par_iter().map(|p| self.extract_page(p)).collect()
    }

    #[cfg(not(feature = "rayon"))]
    fn extract_parallel(&self, pages: &[RawPageText]) -> Vec<PageExtraction> {
        pages.iter().map(|p| self.extract_page(p)).collect()
    }

    /// Dedup across pages (lowest page number wins), then derive every
    /// remaining field.
    pub fn finish(&self, mut pages: Vec<PageExtraction>) -> PipelineOutput {
        pages.sort_by_key(|p| p.page);

        let mut stats = RunStats::default();
        for page in &pages {
            stats.record(page);
        }

        let cores: Vec<CoreFields> = pages.into_iter().flat_map(|p| p.entries).collect();
        let unique = dedup_and_sort(cores);
        stats.duplicates = stats.accepted - unique.len();

        let entries: Vec<VocabularyEntry> = unique.into_iter().map(|c| self.build_entry(c)).collect();

        info!(
            pages = stats.pages,
            candidates = stats.candidates,
            accepted = stats.accepted,
            duplicates = stats.duplicates,
            skipped_malformed = stats.skipped_malformed,
            skipped_invalid = stats.skipped_invalid,
            entries = entries.len(),
            "extraction finished"
        );

        PipelineOutput { entries, stats }
    }

    pub fn run(&self, pages: &[RawPageText]) -> PipelineOutput {
        self.finish(self.extract_pages(pages))
    }

    /// Derived fields come from the core fields only.
    pub fn build_entry(&self, core: CoreFields) -> VocabularyEntry {
        let difficulty = self
            .difficulty
            .classify(&core.word, &core.definition, core.part_of_speech);
        let categories = self
            .categories
            .categorize(&core.word, &core.definition, &core.example);

        VocabularyEntry {
            difficulty,
            categories,
            word_length: word_length(&core.word),
            syllable_count: count_syllables(&core.word),
            etymology: self.enrichment.guess_etymology(&core.word),
            memory_aid: self.enrichment.create_memory_aid(&core.word),
            learning_tips: self.enrichment.generate_learning_tips(&core.word),
            word: core.word,
            part_of_speech: core.part_of_speech,
            definition: core.definition,
            example: core.example,
            page: core.page,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::metrics::mentions_word;
    use crate::settings::Strictness;
    use crate::types::{Difficulty, PartOfSpeech};

    fn pipeline(strictness: Strictness) -> Pipeline {
        Pipeline::new(
            &Lexicon::embedded().unwrap(),
            ValidationRules::for_strictness(strictness),
        )
    }

    fn page(page_number: i64, fixture: &str) -> RawPageText {
        let text = std::fs::read_to_string(format!("tests/fixtures/{}.txt", fixture)).unwrap();
        RawPageText { page_number, text }
    }

    fn all_pages() -> Vec<RawPageText> {
        vec![page(3, "page_a"), page(5, "page_noisy"), page(7, "page_b")]
    }

    fn words(out: &PipelineOutput) -> Vec<&str> {
        out.entries.iter().map(|e| e.word.as_str()).collect()
    }

    /// Lay entries back out the way the source pages do.
    fn render(entries: &[VocabularyEntry]) -> String {
        let mut out = String::new();
        for e in entries {
            let pos = match e.part_of_speech {
                PartOfSpeech::Noun => "(n.)\n",
                PartOfSpeech::Verb => "(v.)\n",
                PartOfSpeech::Adjective => "(adj.)\n",
                PartOfSpeech::Adverb => "(adv.)\n",
                PartOfSpeech::Unknown => "",
            };
            out.push_str(&format!("{}\n{}{}\n({})\n", e.word, pos, e.definition, e.example));
        }
        out
    }

    #[test]
    fn earliest_page_wins() {
        let out = pipeline(Strictness::Lenient).run(&[page(7, "page_b"), page(3, "page_a")]);
        let abate = out.entries.iter().find(|e| e.word == "abate").unwrap();
        assert_eq!(abate.page, 3);
        assert_eq!(abate.definition, "To lessen in intensity or degree");
        assert_eq!(out.stats.duplicates, 1);
        assert_eq!(
            words(&out),
            ["abase", "abate", "abdicate", "aberration", "abhor", "affect", "ubiquitous", "unbelievable"]
        );
    }

    #[test]
    fn words_are_unique() {
        let out = pipeline(Strictness::Lenient).run(&all_pages());
        let keys: HashSet<String> = out.entries.iter().map(|e| e.word.to_lowercase()).collect();
        assert_eq!(keys.len(), out.entries.len());
    }

    #[test]
    fn examples_mention_their_word() {
        let out = pipeline(Strictness::Lenient).run(&all_pages());
        assert!(!out.entries.is_empty());
        for e in &out.entries {
            assert!(mentions_word(&e.example, &e.word), "{}", e.word);
        }
    }

    #[test]
    fn short_definitions_never_survive() {
        for strictness in [Strictness::Lenient, Strictness::Strict] {
            let p = pipeline(strictness);
            let min = p.rules().min_definition_len;
            for e in p.run(&all_pages()).entries {
                assert!(e.definition.chars().count() >= min, "{}", e.word);
            }
        }
    }

    #[test]
    fn rerun_on_output_is_stable() {
        let p = pipeline(Strictness::Lenient);
        let first = p.run(&all_pages());
        let again = p.run(&[RawPageText {
            page_number: 1,
            text: render(&first.entries),
        }]);
        assert_eq!(words(&again), words(&first));
        assert_eq!(again.stats.skipped(), 0);
    }

    #[test]
    fn ubiquitous_scenario() {
        let out = pipeline(Strictness::Lenient).run(&[page(7, "page_b")]);
        let e = out.entries.iter().find(|e| e.word == "ubiquitous").unwrap();
        assert_eq!(e.difficulty, Difficulty::Medium);
        assert_eq!(e.word_length, 10);
        assert_eq!(e.syllable_count, 4);
        assert_eq!(e.part_of_speech, PartOfSpeech::Adjective);
        assert!(e.categories.contains("time_change"));
        assert_eq!(e.etymology, "Latin");
        assert_eq!(e.learning_tips[0], "Break into syllables: u-bi-qui-tous");
    }

    #[test]
    fn tiny_parenthetical_is_rejected() {
        let out = pipeline(Strictness::Lenient).run(&[RawPageText {
            page_number: 1,
            text: "abate\n(v.)\nto lessen\n(ok)".into(),
        }]);
        assert!(out.entries.is_empty());
        assert_eq!(out.stats.skipped_malformed, 1);
        assert_eq!(out.stats.by_reason.get("missing_example"), Some(&1));
    }

    #[test]
    fn stats_add_up() {
        let out = pipeline(Strictness::Lenient).run(&all_pages());
        let s = &out.stats;
        assert_eq!(s.pages, 3);
        assert_eq!(s.candidates, s.accepted + s.skipped());
        assert_eq!(s.accepted - s.duplicates, out.entries.len());
        assert_eq!(s.by_reason.values().sum::<usize>(), s.skipped());
    }

    #[test]
    fn parallel_matches_sequential() {
        let pages = all_pages();
        let par = pipeline(Strictness::Lenient).run(&pages);
        let seq = pipeline(Strictness::Lenient).with_parallel(false).run(&pages);
        assert_eq!(par.entries, seq.entries);
        assert_eq!(par.stats, seq.stats);
    }

    #[test]
    fn derived_fields_follow_core() {
        let p = pipeline(Strictness::Lenient);
        let e = p.build_entry(CoreFields {
            word: "unbelievable".into(),
            part_of_speech: PartOfSpeech::Adjective,
            definition: "Too improbable to be credited".into(),
            example: "Her story was so unbelievable that nobody trusted it.".into(),
            page: 7,
        });
        assert_eq!(e.difficulty, Difficulty::Hard);
        assert_eq!(e.memory_aid, "Break down 'unbelievable' into parts");
        assert_eq!(e.syllable_count, 5);
    }

    #[test]
    fn empty_input() {
        let out = pipeline(Strictness::Lenient).run(&[]);
        assert!(out.entries.is_empty());
        assert_eq!(out.stats, RunStats::default());
    }
}
