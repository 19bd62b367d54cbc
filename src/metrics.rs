//! Word-shape measurements shared by the classifiers and the enrichment step.
//!
//! Syllable counting is a vowel-group approximation, not phonetics. It is
//! reproducible, which is all the difficulty score needs.

const VOWELS: &str = "aeiouy";

fn is_vowel(c: char) -> bool {
    VOWELS.contains(c)
}

/// Vowel-group syllable estimate.
///
/// Count maximal runs of `a e i o u y`; a final `e` is silent when more than one
/// group exists; a final consonant + `le` forms its own syllable; never below 1.
pub fn count_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut prev_vowel = false;
    for c in word.chars() {
        let v = is_vowel(c);
        if v && !prev_vowel {
            count += 1;
        }
        prev_vowel = v;
    }

    if word.ends_with('e') && count > 1 {
        count -= 1;
    }

    if let Some(stem) = word.strip_suffix("le") {
        if stem.chars().last().is_some_and(|c| c.is_ascii_alphabetic() && !is_vowel(c)) {
            count += 1;
        }
    }

    count.max(1)
}

/// Split a word into vowel-group chunks for display ("u-bi-qui-tous").
/// Trailing consonants attach to the last chunk.
pub fn split_syllables(word: &str) -> Vec<String> {
    let word = word.to_lowercase();
    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut chars = word.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if is_vowel(c) && !chars.peek().is_some_and(|n| is_vowel(*n)) {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        match chunks.last_mut() {
            Some(last) => last.push_str(&current),
            None => chunks.push(current),
        }
    }
    chunks
}

pub fn word_length(word: &str) -> usize {
    word.chars().count()
}

/// Two or more prefix matches, two or more suffix matches, or one of each.
pub fn has_complex_morphology(word: &str, prefixes: &[String], suffixes: &[String]) -> bool {
    let word = word.to_lowercase();
    let prefix_count = prefixes.iter().filter(|p| word.starts_with(p.as_str())).count();
    let suffix_count = suffixes.iter().filter(|s| word.ends_with(s.as_str())).count();
    prefix_count >= 2 || suffix_count >= 2 || (prefix_count >= 1 && suffix_count >= 1)
}

/// Strip one inflection (`-ing`, `-ed`, `-s`, checked in that order).
/// `None` when nothing was stripped or fewer than three letters remain.
pub fn deinflect(word: &str) -> Option<&str> {
    let root = ["ing", "ed", "s"]
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))?;
    if root.chars().count() >= 3 {
        Some(root)
    } else {
        None
    }
}

/// Case-insensitive check that `text` uses `word` or its de-inflected root.
pub fn mentions_word(text: &str, word: &str) -> bool {
    let text = text.to_lowercase();
    let word = word.to_lowercase();
    if word.is_empty() {
        return false;
    }
    text.contains(&word) || deinflect(&word).is_some_and(|root| text.contains(root))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    // Expected values follow the vowel-group rule, not a dictionary.
    #[test]
    fn syllables_by_vowel_groups() {
        assert_eq!(count_syllables("ubiquitous"), 4);
        assert_eq!(count_syllables("abate"), 2);
        assert_eq!(count_syllables("trouble"), 2);
        assert_eq!(count_syllables("able"), 2);
        assert_eq!(count_syllables("unbelievable"), 5);
        assert_eq!(count_syllables("rhythm"), 1);
        assert_eq!(count_syllables("the"), 1);
        assert_eq!(count_syllables("brr"), 1);
    }

    #[test]
    fn le_after_vowel_is_not_extra() {
        // "ale": groups a, e -> silent e -> 1; preceded by a vowel so no -le bonus
        assert_eq!(count_syllables("ale"), 1);
    }

    #[test]
    fn split_for_display() {
        assert_eq!(split_syllables("ubiquitous").join("-"), "u-bi-qui-tous");
        assert_eq!(split_syllables("abate").join("-"), "a-ba-te");
        assert_eq!(split_syllables("brr"), vec!["brr".to_string()]);
    }

    #[test]
    fn morphology() {
        let prefixes = strings(&["un", "re", "in", "dis"]);
        let suffixes = strings(&["able", "ous", "ly", "ness"]);
        assert!(has_complex_morphology("unbelievable", &prefixes, &suffixes));
        assert!(!has_complex_morphology("ubiquitous", &prefixes, &suffixes));
        let suffixes2 = strings(&["ness", "ess"]);
        assert!(has_complex_morphology("boldness", &[], &suffixes2));
        // two prefixes: "in" and "inter"
        let prefixes2 = strings(&["in", "inter"]);
        assert!(has_complex_morphology("intercede", &prefixes2, &[]));
        assert!(!has_complex_morphology("abate", &prefixes, &suffixes));
    }

    #[test]
    fn deinflection() {
        assert_eq!(deinflect("abated"), Some("abat"));
        assert_eq!(deinflect("relishing"), Some("relish"));
        assert_eq!(deinflect("alms"), Some("alm"));
        assert_eq!(deinflect("bed"), None);
        assert_eq!(deinflect("abate"), None);
    }

    #[test]
    fn mention_check() {
        assert!(mentions_word("The storm ABATE soon.", "abate"));
        assert!(mentions_word("They kept relish in the jar", "relishing"));
        assert!(!mentions_word("Nothing relevant here", "abate"));
    }
}
