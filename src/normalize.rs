//! Character cleanup applied to raw page text before extraction.
//!
//! PDF extraction of the source list produces Mac Roman mojibake (`Õ` for an
//! apostrophe, `Þ` for the `fi` ligature) next to ordinary typographic
//! punctuation. Known characters are mapped to ASCII; every other non-ASCII
//! character is deleted. Line breaks survive because the extractor reads them
//! as layout.

/// Fixed replacement table. Anything non-ASCII not listed here is dropped.
const REPLACEMENTS: &[(char, &str)] = &[
    ('Õ', "'"),
    ('Ó', "\""),
    ('Ò', "\""),
    ('Þ', "fi"),
    ('ß', "fl"),
    ('È', "A"),
    ('É', "E"),
    ('Í', "I"),
    ('Ñ', "-"),
    ('Ð', "-"),
    ('¥', "Y"),
    ('†', "+"),
    ('‡', "++"),
    ('…', "..."),
    ('•', "*"),
    ('‚', ","),
    ('„', "\""),
    ('\u{2018}', "'"),
    ('\u{2019}', "'"),
    ('\u{201B}', "'"),
    ('\u{201C}', "\""),
    ('\u{201D}', "\""),
    ('\u{201F}', "\""),
    ('\u{2012}', "-"),
    ('\u{2013}', "-"),
    ('\u{2014}', "-"),
    ('\u{2015}', "-"),
    ('\u{2212}', "-"),
    ('\u{FB00}', "ff"),
    ('\u{FB01}', "fi"),
    ('\u{FB02}', "fl"),
    ('\u{FB03}', "ffi"),
    ('\u{FB04}', "ffl"),
    // non-ASCII spaces
    ('\u{00A0}', " "),
    ('\u{1680}', " "),
    ('\u{2000}', " "),
    ('\u{2001}', " "),
    ('\u{2002}', " "),
    ('\u{2003}', " "),
    ('\u{2004}', " "),
    ('\u{2005}', " "),
    ('\u{2006}', " "),
    ('\u{2007}', " "),
    ('\u{2008}', " "),
    ('\u{2009}', " "),
    ('\u{200A}', " "),
    ('\u{2028}', " "),
    ('\u{2029}', " "),
    ('\u{202F}', " "),
    ('\u{205F}', " "),
    ('\u{3000}', " "),
    ('©', "(c)"),
    ('®', "(r)"),
    ('™', "(tm)"),
];

fn replacement(c: char) -> Option<&'static str> {
    REPLACEMENTS
        .iter()
        .find(|(from, _)| *from == c)
        .map(|(_, to)| *to)
}

/// Clean page text: map known artifacts to ASCII, delete the rest, collapse
/// runs of horizontal whitespace, trim every line and drop blank lines.
///
/// Idempotent: the output is pure ASCII with trimmed, non-empty lines, so a
/// second pass changes nothing.
pub fn normalize(text: &str) -> String {
    let mut ascii = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\r' => {}
            '\n' | '\t' | ' ' => ascii.push(c),
            c if c.is_ascii_control() => {}
            c if c.is_ascii() => ascii.push(c),
            c => {
                if let Some(rep) = replacement(c) {
                    ascii.push_str(rep);
                }
            }
        }
    }

    ascii
        .split('\n')
        .map(collapse_whitespace)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse every whitespace run (newlines included) to one space and trim.
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
