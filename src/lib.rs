//! SAT vocabulary extraction: raw PDF page text in, classified and enriched
//! word entries out.

pub mod classify;
pub mod dedup;
pub mod enrich;
pub mod error;
pub mod lexicon;
pub mod metrics;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod settings;
pub mod store;
pub mod text;
pub mod types;

pub use error::{PipelineError, Result};
pub use lexicon::Lexicon;
pub use normalize::normalize;
pub use pipeline::{Pipeline, PipelineOutput, RunStats};
pub use settings::{Settings, Strictness, ValidationRules};
pub use types::{Difficulty, PartOfSpeech, RawPageText, VocabularyEntry};

/// Run the whole pipeline with the embedded lexicon and lenient validation.
pub fn extract_and_classify(pages: &[RawPageText]) -> Result<Vec<VocabularyEntry>> {
    let pipeline = Pipeline::new(&Lexicon::embedded()?, ValidationRules::default());
    Ok(pipeline.run(pages).entries)
}
