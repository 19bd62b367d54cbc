pub mod bodies;
pub mod candidate;
pub mod lines;
pub mod validate;

use tracing::{debug, trace};

use crate::lexicon::Lexicon;
use crate::settings::ValidationRules;
use crate::text::WorkingText;
use crate::types::{CoreFields, RawPageText, SourceSpan};
use lines::LineClassifier;
use validate::Rejection;

/// Everything one page produced: accepted core fields in page order, plus
/// the headwords that were skipped and why.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    pub page: i64,
    pub entries: Vec<CoreFields>,
    pub rejected: Vec<(SourceSpan, Rejection)>,
}

/// Three-pass page extractor: lines → entry bodies → validated candidates.
/// Never fails; anything it cannot parse is recorded as a rejection.
pub struct EntryExtractor {
    lines: LineClassifier,
    rules: ValidationRules,
}

impl EntryExtractor {
    pub fn new(lexicon: &Lexicon, rules: ValidationRules) -> Self {
        EntryExtractor {
            lines: LineClassifier::new(lexicon),
            rules,
        }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    pub fn extract_page(&self, page: &RawPageText) -> PageExtraction {
        let text = WorkingText::from_raw(&page.text);
        self.extract_text(page.page_number, &text)
    }

    pub fn extract_text(&self, page: i64, text: &WorkingText) -> PageExtraction {
        let classified = self.lines.classify_lines(text.lines());
        let bodies = bodies::cluster_bodies(&classified);

        let mut out = PageExtraction {
            page,
            ..Default::default()
        };

        for body in &bodies {
            let span = SourceSpan {
                page,
                first_line: body.first_line,
                last_line: body.last_line,
            };
            let result = candidate::parse_body(body, page, self.rules.min_example_paren_len)
                .and_then(|c| validate::validate(&c, &self.rules));
            match result {
                Ok(core) => {
                    trace!(page, word = %core.word, "accepted");
                    out.entries.push(core);
                }
                Err(reason) => {
                    debug!(page, word = %body.word, line = body.first_line, %reason, "skipped");
                    out.rejected.push((span, reason));
                }
            }
        }

        if out.entries.is_empty() && !text.is_empty() {
            debug!(
                page,
                chars = text.char_len(),
                sample = %text.sample(120),
                "page produced no entries"
            );
        }
        out
    }
}
