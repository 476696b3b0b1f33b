// WHY: Last resort when the text carries no usable paragraph structure
// Splits the whole essay into sentences and deals them out over five paragraphs

use tracing::{debug, info};

use super::{Detection, ParagraphSource, ParagraphStrategy, PARAGRAPH_COUNT};
use crate::config::SegmenterConfig;
use crate::count_normalizer::MAX_SENTENCES;
use crate::diagnostics::Warning;
use crate::normalizer::collapse_whitespace;
use crate::sentence_detector::SentenceSplitter;

/// Always-successful strategy over the whole text's sentences
#[derive(Debug, Clone)]
pub struct RedistributionStrategy {
    splitter: SentenceSplitter,
    contiguous_min_sentences: usize,
    even_distribution_min_sentences: usize,
    permissive_min_sentences: usize,
}

impl RedistributionStrategy {
    pub fn new(config: &SegmenterConfig, splitter: SentenceSplitter) -> Self {
        Self {
            splitter,
            contiguous_min_sentences: config.contiguous_min_sentences,
            even_distribution_min_sentences: config.even_distribution_min_sentences,
            permissive_min_sentences: config.permissive_min_sentences,
        }
    }

    pub fn redistribute(&self, text: &str) -> Detection {
        let sentences = self.splitter.split(text);
        let count = sentences.len();

        if count >= self.contiguous_min_sentences {
            info!(sentences = count, "redistributing in contiguous groups of five");
            return Detection::new(contiguous_groups(sentences), Vec::new());
        }
        if count >= self.even_distribution_min_sentences {
            info!(sentences = count, "redistributing evenly");
            return Detection::new(distribute_evenly(sentences), Vec::new());
        }

        let permissive = self.splitter.split_permissive(text);
        debug!(quote_aware = count, permissive = permissive.len(), "retried with permissive split");
        let best = if permissive.len() > count { permissive } else { sentences };

        if best.len() >= self.permissive_min_sentences {
            info!(sentences = best.len(), "redistributing evenly after permissive retry");
            return Detection::new(distribute_evenly(best), Vec::new());
        }

        info!(sentences = best.len(), "too few sentences, splitting by length");
        let warnings = (1..=PARAGRAPH_COUNT)
            .map(|paragraph| Warning::LowConfidenceSplit { paragraph })
            .collect();
        Detection::new(split_by_length(text), warnings)
    }
}

impl ParagraphStrategy for RedistributionStrategy {
    fn name(&self) -> &'static str {
        "redistribution"
    }

    fn attempt(&self, text: &str) -> Option<Detection> {
        Some(self.redistribute(text))
    }
}

/// Groups of five in order; the last group keeps everything past the fourth
fn contiguous_groups(mut sentences: Vec<String>) -> [ParagraphSource; PARAGRAPH_COUNT] {
    let mut rest = sentences.split_off(MAX_SENTENCES.min(sentences.len()));
    let mut groups = vec![sentences];
    for _ in 1..PARAGRAPH_COUNT - 1 {
        let tail = rest.split_off(MAX_SENTENCES.min(rest.len()));
        groups.push(std::mem::replace(&mut rest, tail));
    }
    groups.push(rest);
    into_sources(groups)
}

/// Earlier paragraphs take the remainder, one sentence each
fn distribute_evenly(sentences: Vec<String>) -> [ParagraphSource; PARAGRAPH_COUNT] {
    let base = sentences.len() / PARAGRAPH_COUNT;
    let extra = sentences.len() % PARAGRAPH_COUNT;
    let mut iter = sentences.into_iter();
    let groups = (0..PARAGRAPH_COUNT)
        .map(|k| {
            let size = base + usize::from(k < extra);
            iter.by_ref().take(size).collect()
        })
        .collect();
    into_sources(groups)
}

fn into_sources(groups: Vec<Vec<String>>) -> [ParagraphSource; PARAGRAPH_COUNT] {
    let mut groups = groups.into_iter();
    std::array::from_fn(|_| ParagraphSource::PreSplitSentences(groups.next().unwrap_or_default()))
}

/// Five chunks of roughly equal character length, each cut moved forward to whitespace
pub fn split_by_length(text: &str) -> [ParagraphSource; PARAGRAPH_COUNT] {
    let text = text.trim();
    let offsets: Vec<usize> = text.char_indices().map(|(offset, _)| offset).collect();
    let total = offsets.len();

    let mut cuts = vec![0];
    for k in 1..PARAGRAPH_COUNT {
        let previous = cuts.last().copied().unwrap_or(0);
        let target = offsets.get(total * k / PARAGRAPH_COUNT).copied().unwrap_or(text.len());
        let from = target.max(previous);
        let cut = text[from..]
            .find(char::is_whitespace)
            .map_or(text.len(), |offset| from + offset);
        cuts.push(cut);
    }
    cuts.push(text.len());

    std::array::from_fn(|k| ParagraphSource::RawText(collapse_whitespace(&text[cuts[k]..cuts[k + 1]])))
}
