// WHY: Tunable thresholds for the segmentation heuristics
// Defaults reproduce the canonical five-paragraph behaviour; TOML overrides are for experimentation

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds consulted by the paragraph cascade, the sentence splitter and
/// the count normalizer. Missing TOML keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SegmenterConfig {
    /// Sentences longer than this (in chars) may be split when a paragraph has exactly four
    pub long_sentence_chars: usize,
    /// Minimum length of the previous line before a generic opener counts as a paragraph start
    pub generic_opener_min_prev_chars: usize,
    /// Trailing share of lines searched for a missing conclusion cue
    pub conclusion_scan_fraction: f64,
    /// Emitted sentences of this many chars or fewer are dropped as fragments
    pub min_fragment_chars: usize,
    /// Sentences longer than this are candidates for the semicolon fallback
    pub semicolon_split_min_chars: usize,
    /// Whole-text sentence count at which contiguous groups of five are used
    pub contiguous_min_sentences: usize,
    /// Whole-text sentence count at which sentences are distributed evenly
    pub even_distribution_min_sentences: usize,
    /// Below this count (after the permissive retry) the character-length split is used
    pub permissive_min_sentences: usize,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            long_sentence_chars: 150,
            generic_opener_min_prev_chars: 80,
            conclusion_scan_fraction: 0.3,
            min_fragment_chars: 3,
            semicolon_split_min_chars: 100,
            contiguous_min_sentences: 25,
            even_distribution_min_sentences: 20,
            permissive_min_sentences: 15,
        }
    }
}

impl SegmenterConfig {
    /// Parse a TOML document and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Invalid segmenter configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to load config file {}", path.display()))
    }

    /// Reject threshold combinations the cascade cannot honour
    pub fn validate(&self) -> Result<()> {
        if !(self.conclusion_scan_fraction > 0.0 && self.conclusion_scan_fraction <= 1.0) {
            bail!(
                "conclusion_scan_fraction must be in (0, 1], got {}",
                self.conclusion_scan_fraction
            );
        }
        if self.contiguous_min_sentences < 25 {
            bail!(
                "contiguous_min_sentences must be at least 25 to fill five groups of five, got {}",
                self.contiguous_min_sentences
            );
        }
        if self.even_distribution_min_sentences > self.contiguous_min_sentences {
            bail!(
                "even_distribution_min_sentences ({}) exceeds contiguous_min_sentences ({})",
                self.even_distribution_min_sentences,
                self.contiguous_min_sentences
            );
        }
        if self.permissive_min_sentences > self.even_distribution_min_sentences {
            bail!(
                "permissive_min_sentences ({}) exceeds even_distribution_min_sentences ({})",
                self.permissive_min_sentences,
                self.even_distribution_min_sentences
            );
        }
        if self.permissive_min_sentences < 15 {
            bail!(
                "permissive_min_sentences must be at least 15 to give each paragraph three sentences, got {}",
                self.permissive_min_sentences
            );
        }
        Ok(())
    }
}
