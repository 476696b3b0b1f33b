// WHY: Enforces the 3-to-5 rule per paragraph
// Excess sentences are merged into the last slot and deficits are only reported, never filled

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

use crate::config::SegmenterConfig;
use crate::diagnostics::Warning;
use crate::sentence_detector::MIN_SENTENCES;

/// Upper bound of sentences per paragraph
pub const MAX_SENTENCES: usize = 5;

/// Comma followed by a conjunction that can start an independent clause
const CONJUNCTION_SPLIT: &str = r"(?i:, (?:and|but|or|yet|so|for|nor|while|although|however|therefore|thus|hence|consequently|furthermore|moreover)\b)";

/// Brings a paragraph's sentence list into the 3-5 range where possible
#[derive(Debug, Clone)]
pub struct SentenceCountNormalizer {
    conjunction_split: Regex,
    long_sentence_chars: usize,
}

impl SentenceCountNormalizer {
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        Ok(Self {
            conjunction_split: Regex::new(CONJUNCTION_SPLIT)?,
            long_sentence_chars: config.long_sentence_chars,
        })
    }

    /// Normalize the sentences of the paragraph with 1-based index `paragraph`.
    ///
    /// Returns at most five sentences. Inputs with at least three sentences
    /// come back with three to five; shorter inputs come back unchanged along
    /// with a `SentenceCountOutOfRange` warning.
    pub fn normalize(&self, sentences: Vec<String>, paragraph: usize) -> (Vec<String>, Option<Warning>) {
        let count = sentences.len();
        match count {
            0..=2 => {
                debug!(paragraph, count, "paragraph below three sentences");
                (sentences, Some(Warning::SentenceCountOutOfRange { paragraph, count }))
            }
            4 => {
                let expanded = self.split_long_sentence(sentences);
                if expanded.len() > MAX_SENTENCES {
                    (merge_excess(expanded), None)
                } else {
                    (expanded, None)
                }
            }
            n if n > MAX_SENTENCES => {
                debug!(paragraph, count, "merging excess sentences into the fifth slot");
                (merge_excess(sentences), None)
            }
            _ => (sentences, None),
        }
    }

    /// Split the longest over-long sentence at the comma-conjunction nearest its middle.
    ///
    /// Best-effort structural guess: the list is returned untouched when no
    /// sentence qualifies.
    fn split_long_sentence(&self, mut sentences: Vec<String>) -> Vec<String> {
        let mut candidates: Vec<(usize, usize)> = sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| (index, sentence.chars().count()))
            .filter(|&(_, chars)| chars > self.long_sentence_chars)
            .collect();
        // Longest first; earlier sentence wins ties
        candidates.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (index, _) in candidates {
            if let Some((first, second)) = self.split_at_conjunction(&sentences[index]) {
                debug!(sentence = index + 1, "split long sentence at conjunction");
                sentences.splice(index..=index, [first, second]);
                return sentences;
            }
        }
        sentences
    }

    fn split_at_conjunction(&self, sentence: &str) -> Option<(String, String)> {
        let middle = sentence.len() / 2;
        let mat = self
            .conjunction_split
            .find_iter(sentence)
            .min_by_key(|mat| mat.start().abs_diff(middle))?;

        let head = sentence[..mat.start()].trim();
        // Skip ", " so the second half starts at the conjunction
        let tail = sentence[mat.start() + 2..].trim();
        if head.is_empty() || tail.is_empty() {
            return None;
        }

        Some((terminate(head.to_string()), terminate(capitalize_first(tail))))
    }
}

/// Keep sentences 1-4 and join the rest into sentence 5
pub fn merge_excess(mut sentences: Vec<String>) -> Vec<String> {
    if sentences.len() <= MAX_SENTENCES {
        return sentences;
    }
    let tail = sentences.split_off(MAX_SENTENCES - 1);
    sentences.push(collapse_period_artifacts(&tail.join(" ")));
    sentences
}

/// Replace ". ." runs left by joining with a single period
fn collapse_period_artifacts(text: &str) -> String {
    let mut result = text.to_string();
    while result.contains(". .") {
        result = result.replace(". .", ".");
    }
    result
}

fn terminate(mut sentence: String) -> String {
    if !sentence.ends_with(['.', '!', '?', '"', '\u{201D}']) {
        sentence = sentence.trim_end_matches([',', ';', ':']).to_string();
        sentence.push('.');
    }
    sentence
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether a paragraph's sentence count satisfies the 3-to-5 rule
pub fn in_range(count: usize) -> bool {
    (MIN_SENTENCES..=MAX_SENTENCES).contains(&count)
}
