use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::bodies::EntryBody;
use super::validate::Rejection;
use crate::normalize::collapse_whitespace;
use crate::types::{Candidate, SourceSpan};

static POS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(([nvadj.]+)\)").unwrap());

/// Recover word / part of speech / definition / example from one entry body.
///
/// Layout: optional `(pos)` token, definition text, then the example as the
/// longest outermost parenthetical of at least `min_example_len` chars (first
/// one wins a tie). Nested groups stay inside the one that encloses them. No
/// such parenthetical, or a `(` that is never closed, means the body is not an
/// entry.
pub fn parse_body(
    body: &EntryBody,
    page: i64,
    min_example_len: usize,
) -> Result<Candidate, Rejection> {
    let text = body.text();

    let pos = POS_RE.captures(&text);
    let def_start = pos.as_ref().and_then(|c| c.get(0)).map_or(0, |m| m.end());
    let part_of_speech_raw = pos
        .as_ref()
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let rest = &text[def_start..];
    let mut best: Option<(usize, &str)> = None;
    for span in outermost_parens(rest)? {
        let inner = &rest[span.start + 1..span.end - 1];
        let len = inner.trim().len();
        if len < min_example_len {
            continue;
        }
        if best.map_or(true, |(_, b)| len > b.trim().len()) {
            best = Some((span.start, inner));
        }
    }
    let (example_start, example_inner) = best.ok_or(Rejection::MissingExample)?;

    Ok(Candidate {
        word: repair_word(&body.word),
        part_of_speech_raw,
        definition_raw: clean_definition(&rest[..example_start]),
        example_raw: collapse_whitespace(example_inner),
        source_span: SourceSpan {
            page,
            first_line: body.first_line,
            last_line: body.last_line,
        },
    })
}

/// Byte ranges of the top-level `(...)` groups in `s`, parentheses included.
/// A `)` with nothing open is ignored.
fn outermost_parens(s: &str) -> Result<Vec<Range<usize>>, Rejection> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in s.char_indices() {
        match c {
            '(' => {
                if depth == 0 {
                    start = i;
                }
                depth += 1;
            }
            ')' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    spans.push(start..i + 1);
                }
            }
            _ => {}
        }
    }
    if depth > 0 {
        return Err(Rejection::UnbalancedParens);
    }
    Ok(spans)
}

/// Rejoin a headword the PDF split in two ("vir tuoso"). Only when both halves
/// are alphabetic and one of them is short; otherwise left as-is.
pub fn repair_word(word: &str) -> String {
    let parts: Vec<&str> = word.split_whitespace().collect();
    if parts.len() == 2
        && parts.iter().all(|p| p.chars().all(|c| c.is_ascii_alphabetic()))
        && parts.iter().any(|p| p.len() <= 5)
    {
        return parts.concat().to_lowercase();
    }
    collapse_whitespace(word).to_lowercase()
}

pub fn clean_definition(raw: &str) -> String {
    let stripped = POS_RE.replace_all(raw, " ");
    let collapsed = collapse_whitespace(&stripped);
    let trimmed = collapsed
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | ';' | ':' | '-' | '*'))
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric());
    capitalize_first(trimmed)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
