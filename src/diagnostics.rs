// WHY: Side-channel for degradations noticed while segmenting
// Every stage pushes here instead of failing, so callers always get a full result

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Non-fatal condition recorded while building a segmentation.
///
/// Paragraph indices are 1-based and match `ParagraphBlock::ordinal`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Warning {
    /// Raw text was empty or whitespace-only
    EmptyInput,
    /// Blank-line detection found a block count other than five
    ParagraphCountMismatch { found: usize, used: usize },
    /// A paragraph finished with fewer than three sentences
    SentenceCountOutOfRange { paragraph: usize, count: usize },
    /// A paragraph was manufactured by the character-length fallback
    LowConfidenceSplit { paragraph: usize },
}

/// Discriminant of [`Warning`] for filtering without matching on payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningKind {
    EmptyInput,
    ParagraphCountMismatch,
    SentenceCountOutOfRange,
    LowConfidenceSplit,
}

impl Warning {
    pub fn kind(&self) -> WarningKind {
        match self {
            Warning::EmptyInput => WarningKind::EmptyInput,
            Warning::ParagraphCountMismatch { .. } => WarningKind::ParagraphCountMismatch,
            Warning::SentenceCountOutOfRange { .. } => WarningKind::SentenceCountOutOfRange,
            Warning::LowConfidenceSplit { .. } => WarningKind::LowConfidenceSplit,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::EmptyInput => write!(f, "input text was empty"),
            Warning::ParagraphCountMismatch { found, used } => {
                write!(f, "found {found} paragraph blocks, used {used}")
            }
            Warning::SentenceCountOutOfRange { paragraph, count } => {
                write!(f, "paragraph {paragraph} has {count} sentences (expected 3 to 5)")
            }
            Warning::LowConfidenceSplit { paragraph } => {
                write!(f, "paragraph {paragraph} was produced by a character-length split")
            }
        }
    }
}

/// Ordered collector of warnings shared by all pipeline stages
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: Warning) {
        debug!(warning = %warning, "segmentation warning");
        self.warnings.push(warning);
    }

    pub fn extend<I: IntoIterator<Item = Warning>>(&mut self, warnings: I) {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
