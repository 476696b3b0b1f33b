// WHY: Essays pasted without blank lines still break lines at paragraph ends
// A line opening with a transition cue right after a finished sentence starts a paragraph

use tracing::debug;

use super::cues::{ends_with_terminal, is_body_cue, is_conclusion_cue, is_generic_opener};
use super::{Detection, ParagraphSource, ParagraphStrategy, PARAGRAPH_COUNT};
use crate::config::SegmenterConfig;
use crate::normalizer::collapse_whitespace;

#[derive(Debug, Clone)]
pub struct LineHeuristicStrategy {
    generic_opener_min_prev_chars: usize,
    conclusion_scan_fraction: f64,
}

impl LineHeuristicStrategy {
    pub fn new(config: &SegmenterConfig) -> Self {
        Self {
            generic_opener_min_prev_chars: config.generic_opener_min_prev_chars,
            conclusion_scan_fraction: config.conclusion_scan_fraction,
        }
    }

    /// Line indices that open a paragraph; line 0 always does
    fn paragraph_starts(&self, lines: &[&str]) -> Vec<usize> {
        let mut starts = vec![0];
        for (index, pair) in lines.windows(2).enumerate() {
            let (previous, line) = (pair[0], pair[1]);
            if !ends_with_terminal(previous) {
                continue;
            }
            let generic = is_generic_opener(line)
                && previous.chars().count() > self.generic_opener_min_prev_chars;
            if is_body_cue(line) || is_conclusion_cue(line) || generic {
                starts.push(index + 1);
            }
        }
        starts
    }

    /// First conclusion cue in the trailing share of lines that is not already a start
    fn find_conclusion_start(&self, lines: &[&str], starts: &[usize]) -> Option<usize> {
        let tail = (lines.len() as f64 * self.conclusion_scan_fraction).ceil() as usize;
        let from = lines.len().saturating_sub(tail).max(1);
        (from..lines.len()).find(|&index| !starts.contains(&index) && is_conclusion_cue(lines[index]))
    }
}

impl ParagraphStrategy for LineHeuristicStrategy {
    fn name(&self) -> &'static str {
        "line_heuristic"
    }

    fn attempt(&self, text: &str) -> Option<Detection> {
        let lines: Vec<&str> = text.lines().map(str::trim).filter(|line| !line.is_empty()).collect();
        if lines.len() < PARAGRAPH_COUNT {
            return None;
        }

        let mut starts = self.paragraph_starts(&lines);
        debug!(starts = starts.len(), lines = lines.len(), "line heuristic paragraph starts");

        if starts.len() == PARAGRAPH_COUNT - 1 {
            let conclusion = self.find_conclusion_start(&lines, &starts)?;
            debug!(line = conclusion, "secondary scan placed the conclusion");
            starts.push(conclusion);
            starts.sort_unstable();
        }
        if starts.len() != PARAGRAPH_COUNT {
            return None;
        }

        let sources = starts
            .iter()
            .enumerate()
            .map(|(k, &start)| {
                let end = starts.get(k + 1).copied().unwrap_or(lines.len());
                ParagraphSource::RawText(collapse_whitespace(&lines[start..end].join(" ")))
            })
            .collect();
        Detection::from_vec(sources, Vec::new())
    }
}
