// WHY: Main splitter interface combining abbreviation protection, the quote state machine
// and the fallback ladder; the paragraph cascade and the pipeline both split through here

use anyhow::Result;
use tracing::debug;

pub mod abbreviations;
pub mod fallback;
pub mod quote_detector;

pub use abbreviations::{AbbreviationGuard, PERIOD_PLACEHOLDER};
pub use fallback::FallbackSplitter;
pub use quote_detector::{QuoteRules, QuoteState, QuoteStateMachine};

use crate::config::SegmenterConfig;

/// Paragraphs with fewer sentences than this trigger the fallback ladder
pub const MIN_SENTENCES: usize = 3;

/// Quote-aware sentence splitter.
///
/// `split` is total: it never fails, and in the worst case returns the whole
/// paragraph as one sentence (or nothing, when the text is only fragments).
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    machine: QuoteStateMachine,
    abbreviations: AbbreviationGuard,
    fallback: FallbackSplitter,
    min_fragment_chars: usize,
    semicolon_split_min_chars: usize,
}

impl SentenceSplitter {
    /// Create a splitter with the thresholds from `config`
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        Self::with_rules(config, QuoteRules::default(), AbbreviationGuard::new())
    }

    /// Create a splitter with default rules and thresholds
    pub fn with_default_rules() -> Result<Self> {
        Self::new(&SegmenterConfig::default())
    }

    /// Create a splitter with custom quote rules and abbreviations
    pub fn with_rules(
        config: &SegmenterConfig,
        rules: QuoteRules,
        abbreviations: AbbreviationGuard,
    ) -> Result<Self> {
        Ok(Self {
            machine: QuoteStateMachine::new(rules),
            abbreviations,
            fallback: FallbackSplitter::new()?,
            min_fragment_chars: config.min_fragment_chars,
            semicolon_split_min_chars: config.semicolon_split_min_chars,
        })
    }

    /// Split one paragraph into sentences
    pub fn split(&self, text: &str) -> Vec<String> {
        let protected = self.abbreviations.protect(text);
        let primary = self.finish(self.machine.detect_sentences(&protected));
        if primary.len() >= MIN_SENTENCES {
            return primary;
        }

        debug!("State machine found {} sentences, trying fallback ladder", primary.len());
        let mut best = primary;

        let terminal_pieces = self.fallback.split_terminal_capital(&protected);
        let rung_a = self.finish(terminal_pieces.clone());
        if rung_a.len() >= MIN_SENTENCES {
            debug!("Fallback rung (a) produced {} sentences", rung_a.len());
            return rung_a;
        }
        best = keep_larger(best, rung_a);

        let rung_b = self.finish(
            self.fallback
                .split_semicolons(&terminal_pieces, self.semicolon_split_min_chars),
        );
        if rung_b.len() >= MIN_SENTENCES {
            debug!("Fallback rung (b) produced {} sentences", rung_b.len());
            return rung_b;
        }
        best = keep_larger(best, rung_b);

        let rung_c = self.finish(self.fallback.split_quoted_terminal(&protected));
        if rung_c.len() >= MIN_SENTENCES {
            debug!("Fallback rung (c) produced {} sentences", rung_c.len());
            return rung_c;
        }
        keep_larger(best, rung_c)
    }

    /// Permissive whole-text split used when the quote-aware pass finds too few sentences
    pub fn split_permissive(&self, text: &str) -> Vec<String> {
        let protected = self.abbreviations.protect(text);
        self.finish(self.fallback.split_terminal_capital(&protected))
    }

    /// Restore abbreviation periods and drop short fragments
    fn finish(&self, sentences: Vec<String>) -> Vec<String> {
        sentences
            .into_iter()
            .map(|sentence| self.abbreviations.restore(&sentence))
            .filter(|sentence| sentence.chars().count() > self.min_fragment_chars)
            .collect()
    }
}

/// Ties go to the earlier candidate
fn keep_larger(best: Vec<String>, candidate: Vec<String>) -> Vec<String> {
    if candidate.len() > best.len() {
        candidate
    } else {
        best
    }
}
