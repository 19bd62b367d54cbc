//! Classifier tables, loaded once and handed to classifier constructors.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{PipelineError, Result};

const LEXICON_JSON: &str = include_str!("../lexicon.json");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    /// +2 per keyword found anywhere in the analyzed text.
    pub keywords: Vec<String>,
    /// +3 per pattern found anywhere in the analyzed text.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerRule {
    Suffix,
    Contains,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EtymologyGroup {
    pub origin: String,
    pub rule: MarkerRule,
    pub markers: Vec<String>,
}

impl EtymologyGroup {
    pub fn matches(&self, word: &str) -> bool {
        self.markers.iter().any(|m| match self.rule {
            MarkerRule::Suffix => word.ends_with(m.as_str()),
            MarkerRule::Contains => word.contains(m.as_str()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MemoryAid {
    pub prefix: String,
    pub gloss: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Lexicon {
    pub stoplist: Vec<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
    pub complex_phrases: Vec<String>,
    pub common_words: Vec<String>,
    pub origin_markers: Vec<String>,
    pub categories: Vec<CategoryRule>,
    pub etymology: Vec<EtymologyGroup>,
    pub memory_aids: Vec<MemoryAid>,
    pub confusion_pairs: BTreeMap<String, String>,
}

impl Lexicon {
    /// The tables compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(LEXICON_JSON)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| PipelineError::io(path, e))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut lexicon: Lexicon = serde_json::from_str(raw)?;
        lexicon.lowercase();
        lexicon.check()?;
        Ok(lexicon)
    }

    pub fn stoplist_set(&self) -> HashSet<String> {
        self.stoplist.iter().cloned().collect()
    }

    fn lowercase(&mut self) {
        let lower_all = |v: &mut Vec<String>| {
            for s in v.iter_mut() {
                *s = s.trim().to_lowercase();
            }
        };
        lower_all(&mut self.stoplist);
        lower_all(&mut self.prefixes);
        lower_all(&mut self.suffixes);
        lower_all(&mut self.complex_phrases);
        lower_all(&mut self.common_words);
        lower_all(&mut self.origin_markers);
        for c in &mut self.categories {
            lower_all(&mut c.keywords);
            lower_all(&mut c.patterns);
        }
        for g in &mut self.etymology {
            lower_all(&mut g.markers);
        }
        for aid in &mut self.memory_aids {
            aid.prefix = aid.prefix.trim().to_lowercase();
        }
        self.confusion_pairs = std::mem::take(&mut self.confusion_pairs)
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v.trim().to_string()))
            .collect();
    }

    fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for c in &self.categories {
            if c.name.trim().is_empty() {
                return Err(PipelineError::Lexicon("category with empty name".into()));
            }
            if c.name == "general" {
                return Err(PipelineError::Lexicon(
                    "\"general\" is the fallback category and cannot be scored".into(),
                ));
            }
            if !seen.insert(c.name.as_str()) {
                return Err(PipelineError::Lexicon(format!(
                    "duplicate category {:?}",
                    c.name
                )));
            }
        }
        let empty_term = self
            .prefixes
            .iter()
            .chain(&self.suffixes)
            .chain(&self.origin_markers)
            .chain(self.categories.iter().flat_map(|c| c.keywords.iter().chain(&c.patterns)))
            .chain(self.etymology.iter().flat_map(|g| &g.markers))
            .any(|s| s.is_empty());
        if empty_term || self.memory_aids.iter().any(|a| a.prefix.is_empty()) {
            return Err(PipelineError::Lexicon("empty match term".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_tables_load() {
        let lex = Lexicon::embedded().unwrap();
        assert_eq!(lex.categories.len(), 15);
        assert_eq!(lex.memory_aids.len(), 12);
        assert_eq!(lex.etymology.len(), 4);
        assert_eq!(lex.etymology[0].origin, "Latin");
        assert!(lex.categories.iter().any(|c| c.name == "emotions_psychology"));
        assert!(lex.stoplist_set().contains("vocabulary"));
    }

    #[test]
    fn terms_are_lowercased() {
        let raw = LEXICON_JSON.replace("\"sat\"", "\"SAT\"");
        let lex = Lexicon::from_json(&raw).unwrap();
        assert!(lex.stoplist.contains(&"sat".to_string()));
    }

    #[test]
    fn duplicate_category_rejected() {
        let raw = LEXICON_JSON.replace("\"name\": \"art_culture\"", "\"name\": \"time_change\"");
        assert!(matches!(
            Lexicon::from_json(&raw),
            Err(PipelineError::Lexicon(_))
        ));
    }

    #[test]
    fn general_is_reserved() {
        let raw = LEXICON_JSON.replace("\"name\": \"art_culture\"", "\"name\": \"general\"");
        assert!(Lexicon::from_json(&raw).is_err());
    }

    #[test]
    fn etymology_rules() {
        let lex = Lexicon::embedded().unwrap();
        assert!(lex.etymology[0].matches("ubiquitous"));
        assert!(lex.etymology[1].matches("philanthropy"));
        assert!(!lex.etymology[1].matches("abate"));
    }
}
