use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lexicon::Lexicon;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

impl Strictness {
    pub fn as_str(self) -> &'static str {
        match self {
            Strictness::Lenient => "lenient",
            Strictness::Strict => "strict",
        }
    }
}

/// Thresholds of the candidate validation gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationRules {
    pub min_definition_len: usize,
    pub min_alpha_ratio: f64,
    pub min_example_len: usize,
    /// Shortest parenthetical that can be taken as the example sentence.
    pub min_example_paren_len: usize,
}

impl ValidationRules {
    pub fn for_strictness(strictness: Strictness) -> Self {
        match strictness {
            Strictness::Lenient => ValidationRules {
                min_definition_len: 3,
                min_alpha_ratio: 0.5,
                min_example_len: 10,
                min_example_paren_len: 15,
            },
            Strictness::Strict => ValidationRules {
                min_definition_len: 5,
                min_alpha_ratio: 0.6,
                min_example_len: 20,
                min_example_paren_len: 20,
            },
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        ValidationRules::for_strictness(Strictness::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub strictness: Strictness,
    pub lexicon_path: Option<PathBuf>,
    pub parallel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            strictness: Strictness::Lenient,
            lexicon_path: None,
            parallel: true,
        }
    }
}

impl Settings {
    /// Defaults, then the optional config file, then `VOCAB_*` variables.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("strictness", Strictness::Lenient.as_str())?
            .set_default("parallel", true)?;
        if let Some(path) = file {
            builder = builder.add_source(File::from(path));
        }
        let settings = builder
            .add_source(Environment::with_prefix("VOCAB"))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }

    pub fn rules(&self) -> ValidationRules {
        ValidationRules::for_strictness(self.strictness)
    }

    pub fn lexicon(&self) -> Result<Lexicon> {
        match &self.lexicon_path {
            Some(path) => Lexicon::from_path(path),
            None => Lexicon::embedded(),
        }
    }
}
