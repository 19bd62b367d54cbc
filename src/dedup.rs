use itertools::Itertools;

use crate::types::CoreFields;

pub trait Headword {
    fn headword(&self) -> &str;
}

impl Headword for CoreFields {
    fn headword(&self) -> &str {
        &self.word
    }
}

/// Keep the first occurrence of each word (case-insensitive) in input order,
/// then sort by lowercase word. Input order must be ascending page order for
/// "earliest page wins" to hold.
pub fn dedup_and_sort<T: Headword>(items: Vec<T>) -> Vec<T> {
    let mut kept: Vec<T> = items
        .into_iter()
        .unique_by(|item| item.headword().to_lowercase())
        .collect();
    kept.sort_by_cached_key(|item| item.headword().to_lowercase());
    kept
}
