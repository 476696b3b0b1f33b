// WHY: Honour the author's own paragraph breaks when there are at least five

use tracing::debug;

use super::{Detection, ParagraphSource, ParagraphStrategy, PARAGRAPH_COUNT};
use crate::diagnostics::Warning;
use crate::normalizer::collapse_whitespace;

/// Non-empty blank-line-separated blocks of normalized text
pub fn blocks(text: &str) -> impl Iterator<Item = &str> {
    text.split("\n\n").map(str::trim).filter(|block| !block.is_empty())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct DoubleNewlineStrategy;

impl ParagraphStrategy for DoubleNewlineStrategy {
    fn name(&self) -> &'static str {
        "double_newline"
    }

    fn attempt(&self, text: &str) -> Option<Detection> {
        let found: Vec<&str> = blocks(text).collect();
        if found.len() < PARAGRAPH_COUNT {
            return None;
        }

        let mut warnings = Vec::new();
        if found.len() > PARAGRAPH_COUNT {
            debug!(found = found.len(), "more blank-line blocks than paragraphs, keeping the first five");
            warnings.push(Warning::ParagraphCountMismatch {
                found: found.len(),
                used: PARAGRAPH_COUNT,
            });
        }

        let sources = found
            .into_iter()
            .take(PARAGRAPH_COUNT)
            .map(|block| ParagraphSource::RawText(collapse_whitespace(block)))
            .collect();
        Detection::from_vec(sources, warnings)
    }
}
