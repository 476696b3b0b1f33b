// WHY: Turns normalized text into exactly five paragraph sources
// Strategies are tried in priority order and the first that succeeds wins

use tracing::{debug, info};

pub mod cues;
pub mod double_newline;
pub mod line_heuristic;
pub mod line_per_paragraph;
pub mod redistribution;

pub use double_newline::DoubleNewlineStrategy;
pub use line_heuristic::LineHeuristicStrategy;
pub use line_per_paragraph::LinePerParagraphStrategy;
pub use redistribution::RedistributionStrategy;

use crate::config::SegmenterConfig;
use crate::diagnostics::Warning;
use crate::sentence_detector::SentenceSplitter;

/// Number of paragraphs in a canonical essay
pub const PARAGRAPH_COUNT: usize = 5;

/// Content handed to sentence splitting for one paragraph
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParagraphSource {
    /// Paragraph text that still needs sentence splitting
    RawText(String),
    /// Sentences already split by whole-text redistribution
    PreSplitSentences(Vec<String>),
}

impl Default for ParagraphSource {
    fn default() -> Self {
        ParagraphSource::RawText(String::new())
    }
}

/// Successful strategy output
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    pub paragraphs: [ParagraphSource; PARAGRAPH_COUNT],
    pub warnings: Vec<Warning>,
}

impl Detection {
    pub fn new(paragraphs: [ParagraphSource; PARAGRAPH_COUNT], warnings: Vec<Warning>) -> Self {
        Self { paragraphs, warnings }
    }

    /// `None` unless exactly five sources were produced
    pub fn from_vec(paragraphs: Vec<ParagraphSource>, warnings: Vec<Warning>) -> Option<Self> {
        let paragraphs = paragraphs.try_into().ok()?;
        Some(Self { paragraphs, warnings })
    }
}

/// One way of finding paragraph boundaries
pub trait ParagraphStrategy: Send + Sync {
    /// Name used in logs
    fn name(&self) -> &'static str;

    /// Five paragraphs, or `None` when this strategy does not apply to the text
    fn attempt(&self, text: &str) -> Option<Detection>;
}

/// Ordered cascade of paragraph strategies
pub struct ParagraphBoundaryDetector {
    strategies: Vec<Box<dyn ParagraphStrategy>>,
}

impl ParagraphBoundaryDetector {
    /// Standard cascade: blank lines, line cues, one line each, redistribution
    pub fn new(config: &SegmenterConfig, splitter: SentenceSplitter) -> Self {
        Self::with_strategies(vec![
            Box::new(DoubleNewlineStrategy),
            Box::new(LineHeuristicStrategy::new(config)),
            Box::new(LinePerParagraphStrategy),
            Box::new(RedistributionStrategy::new(config, splitter)),
        ])
    }

    pub fn with_strategies(strategies: Vec<Box<dyn ParagraphStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|strategy| strategy.name()).collect()
    }

    /// Detect five paragraph sources in normalized text.
    ///
    /// Total: if no strategy applies, the text is cut into five chunks by
    /// length and every paragraph is flagged as low confidence.
    pub fn detect(&self, text: &str) -> ([ParagraphSource; PARAGRAPH_COUNT], Vec<Warning>) {
        let mut warnings = Vec::new();

        let blocks = double_newline::blocks(text).count();
        if (1..PARAGRAPH_COUNT).contains(&blocks) {
            debug!(blocks, "author paragraph breaks do not give five paragraphs");
            warnings.push(Warning::ParagraphCountMismatch {
                found: blocks,
                used: PARAGRAPH_COUNT,
            });
        }

        for strategy in &self.strategies {
            if let Some(detection) = strategy.attempt(text) {
                info!(strategy = strategy.name(), "paragraph boundaries detected");
                warnings.extend(detection.warnings);
                return (detection.paragraphs, warnings);
            }
            debug!(strategy = strategy.name(), "paragraph strategy did not apply");
        }

        info!("no paragraph strategy applied, splitting by length");
        warnings.extend((1..=PARAGRAPH_COUNT).map(|paragraph| Warning::LowConfidenceSplit { paragraph }));
        (redistribution::split_by_length(text), warnings)
    }
}

impl std::fmt::Debug for ParagraphBoundaryDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParagraphBoundaryDetector")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}
