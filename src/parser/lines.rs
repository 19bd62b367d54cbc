use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::lexicon::Lexicon;

static MARKER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z]+(?: [a-z]+)?$").unwrap());
static POS_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\([nvadj.]+\)").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A headword on its own line: starts a new entry.
    Marker(String),
    /// Running headers, section letters, page numbers.
    Noise,
    Body(String),
}

pub struct LineClassifier {
    stoplist: HashSet<String>,
}

impl LineClassifier {
    pub fn new(lexicon: &Lexicon) -> Self {
        LineClassifier {
            stoplist: lexicon.stoplist_set(),
        }
    }

    /// Classify a page. A two-word marker ("vir tuoso") only stands when the
    /// next non-noise line opens with a part-of-speech token; otherwise it is a
    /// short definition line such as "to hate".
    pub fn classify_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<Line> {
        let mut out: Vec<Line> = lines.iter().map(|l| self.classify(l.as_ref())).collect();
        for i in 0..out.len() {
            let demoted = match &out[i] {
                Line::Marker(word) if word.contains(' ') && !pos_follows(&out[i + 1..]) => {
                    Line::Body(word.clone())
                }
                _ => continue,
            };
            out[i] = demoted;
        }
        out
    }

    pub fn classify(&self, line: &str) -> Line {
        let line = line.trim();
        if is_noise_line(line) {
            return Line::Noise;
        }
        if self.is_marker(line) {
            return Line::Marker(line.to_string());
        }
        Line::Body(line.to_string())
    }

    /// One or two lowercase words, at least 3 chars, not made up of stoplist words.
    fn is_marker(&self, line: &str) -> bool {
        line.len() >= 3
            && MARKER_RE.is_match(line)
            && !line.split(' ').all(|w| self.stoplist.contains(w))
    }
}

fn pos_follows(rest: &[Line]) -> bool {
    match rest.iter().find(|l| **l != Line::Noise) {
        Some(Line::Body(text)) => POS_START_RE.is_match(text),
        _ => false,
    }
}

fn is_noise_line(s: &str) -> bool {
    s.len() <= 2
        || s.to_lowercase().contains("sat vocabulary")
        || s.chars().all(|c| c.is_ascii_digit() || c == ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> LineClassifier {
        LineClassifier::new(&Lexicon::embedded().unwrap())
    }

    #[test]
    fn headword_is_marker() {
        let c = classifier();
        assert_eq!(c.classify("abate"), Line::Marker("abate".into()));
        assert_eq!(c.classify("vir tuoso"), Line::Marker("vir tuoso".into()));
    }

    #[test]
    fn three_words_or_capitals_are_body() {
        let c = classifier();
        assert!(matches!(c.classify("to lower in rank"), Line::Body(_)));
        assert!(matches!(c.classify("Abate"), Line::Body(_)));
        assert!(matches!(c.classify("(v.)"), Line::Body(_)));
        assert!(matches!(c.classify("well-known"), Line::Body(_)));
    }

    #[test]
    fn stoplist_lines_are_not_markers() {
        let c = classifier();
        assert!(matches!(c.classify("vocabulary"), Line::Body(_)));
        assert!(matches!(c.classify("most common"), Line::Body(_)));
        assert!(matches!(c.classify("the"), Line::Body(_)));
        // only one stoplisted token: still a headword
        assert!(matches!(c.classify("the abyss"), Line::Marker(_)));
    }

    #[test]
    fn two_word_definition_is_not_a_headword() {
        let c = classifier();
        let lines = c.classify_lines(&["abhor", "(v.)", "to hate", "(I abhor liars!!)"]);
        assert_eq!(lines[0], Line::Marker("abhor".into()));
        assert_eq!(lines[2], Line::Body("to hate".into()));

        let lines = c.classify_lines(&["vir tuoso", "SAT Vocabulary", "(n.)", "a person with masterly ability"]);
        assert_eq!(lines[0], Line::Marker("vir tuoso".into()));
        assert_eq!(lines[1], Line::Noise);
    }

    #[test]
    fn noise() {
        let c = classifier();
        assert_eq!(c.classify("A"), Line::Noise);
        assert_eq!(c.classify("ab"), Line::Noise);
        assert_eq!(c.classify("42"), Line::Noise);
        assert_eq!(c.classify("SAT Vocabulary - The 1000 Most Common Words"), Line::Noise);
    }
}
