use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::metrics::mentions_word;
use crate::settings::ValidationRules;
use crate::types::{Candidate, CoreFields, PartOfSpeech};

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+(-[a-z]+)*$").unwrap());

/// Why a headword did not become an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Error)]
pub enum Rejection {
    #[error("no example parenthetical in entry body")]
    MissingExample,
    #[error("unclosed parenthesis in entry body")]
    UnbalancedParens,
    #[error("word is not a lowercase letter/hyphen token")]
    WordShape,
    #[error("part of speech outside the abbreviation set")]
    PartOfSpeech,
    #[error("definition too short")]
    ShortDefinition,
    #[error("definition is mostly non-letters")]
    DefinitionNoise,
    #[error("example too short")]
    ShortExample,
    #[error("example does not use the word")]
    ExampleMissingWord,
}

impl Rejection {
    /// The body did not have the expected layout at all, as opposed to a
    /// parsed candidate failing a gate.
    pub fn is_malformed(self) -> bool {
        matches!(self, Rejection::MissingExample | Rejection::UnbalancedParens)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rejection::MissingExample => "missing_example",
            Rejection::UnbalancedParens => "unbalanced_parens",
            Rejection::WordShape => "word_shape",
            Rejection::PartOfSpeech => "part_of_speech",
            Rejection::ShortDefinition => "short_definition",
            Rejection::DefinitionNoise => "definition_noise",
            Rejection::ShortExample => "short_example",
            Rejection::ExampleMissingWord => "example_missing_word",
        }
    }
}

/// Letters as a fraction of all characters (spaces included).
pub fn alpha_ratio(s: &str) -> f64 {
    let total = s.chars().count();
    if total == 0 {
        return 0.0;
    }
    let letters = s.chars().filter(|c| c.is_ascii_alphabetic()).count();
    letters as f64 / total as f64
}

/// All-or-nothing gate. A candidate that fails any clause is dropped whole.
pub fn validate(candidate: &Candidate, rules: &ValidationRules) -> Result<CoreFields, Rejection> {
    let word = candidate.word.as_str();
    if word.len() < 2 || !WORD_RE.is_match(word) {
        return Err(Rejection::WordShape);
    }

    let part_of_speech = match candidate.part_of_speech_raw.as_deref() {
        None => PartOfSpeech::Unknown,
        Some(raw) => PartOfSpeech::from_abbreviation(raw).ok_or(Rejection::PartOfSpeech)?,
    };

    let definition = candidate.definition_raw.as_str();
    if definition.chars().count() < rules.min_definition_len {
        return Err(Rejection::ShortDefinition);
    }
    if alpha_ratio(definition) < rules.min_alpha_ratio {
        return Err(Rejection::DefinitionNoise);
    }

    let example = candidate.example_raw.as_str();
    if example.chars().count() < rules.min_example_len {
        return Err(Rejection::ShortExample);
    }
    if !mentions_word(example, word) {
        return Err(Rejection::ExampleMissingWord);
    }

    Ok(CoreFields {
        word: word.to_string(),
        part_of_speech,
        definition: definition.to_string(),
        example: example.to_string(),
        page: candidate.source_span.page,
    })
}
