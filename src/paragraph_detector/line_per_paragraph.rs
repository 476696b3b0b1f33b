// WHY: Some submissions put each paragraph on its own line with no blank line between

use super::{Detection, ParagraphSource, ParagraphStrategy, PARAGRAPH_COUNT};

#[derive(Debug, Default, Clone, Copy)]
pub struct LinePerParagraphStrategy;

impl ParagraphStrategy for LinePerParagraphStrategy {
    fn name(&self) -> &'static str {
        "line_per_paragraph"
    }

    fn attempt(&self, text: &str) -> Option<Detection> {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        if lines.len() != PARAGRAPH_COUNT {
            return None;
        }
        let sources = lines
            .into_iter()
            .map(|line| ParagraphSource::RawText(line.to_string()))
            .collect();
        Detection::from_vec(sources, Vec::new())
    }
}
