// WHY: The public entry point wiring normalizer, paragraph cascade, splitter,
// count normalizer and labels into one total, side-effect free call

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SegmenterConfig;
use crate::count_normalizer::SentenceCountNormalizer;
use crate::diagnostics::{Diagnostics, Warning, WarningKind};
use crate::labels::{function_tag, FunctionTag, ParagraphSlot};
use crate::normalizer::normalize_document;
use crate::paragraph_detector::{ParagraphBoundaryDetector, ParagraphSource};
use crate::sentence_detector::SentenceSplitter;

/// A labelled sentence; position and tag are fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    text: String,
    function_tag: FunctionTag,
    ordinal: usize,
}

impl Sentence {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn function_tag(&self) -> FunctionTag {
        self.function_tag
    }

    /// 1-based position within the paragraph
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphBlock {
    pub slot: ParagraphSlot,
    pub ordinal: usize,
    pub sentences: Vec<Sentence>,
}

impl ParagraphBlock {
    fn empty(slot: ParagraphSlot) -> Self {
        Self {
            slot,
            ordinal: slot.ordinal(),
            sentences: Vec::new(),
        }
    }

    fn labelled(slot: ParagraphSlot, texts: Vec<String>) -> Self {
        let sentences = texts
            .into_iter()
            .zip(1..)
            .filter_map(|(text, ordinal)| {
                function_tag(slot, ordinal).map(|function_tag| Sentence {
                    text,
                    function_tag,
                    ordinal,
                })
            })
            .collect();
        Self {
            slot,
            ordinal: slot.ordinal(),
            sentences,
        }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.sentences.iter().map(Sentence::text)
    }
}

/// Five-paragraph segmentation of one essay plus everything that went wrong on the way
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentationResult {
    pub paragraphs: [ParagraphBlock; 5],
    pub warnings: Vec<Warning>,
}

impl SegmentationResult {
    pub fn sentence_count(&self) -> usize {
        self.paragraphs.iter().map(|paragraph| paragraph.sentences.len()).sum()
    }

    pub fn warnings_of_kind(&self, kind: WarningKind) -> impl Iterator<Item = &Warning> {
        self.warnings.iter().filter(move |warning| warning.kind() == kind)
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn paragraph(&self, slot: ParagraphSlot) -> &ParagraphBlock {
        &self.paragraphs[slot.ordinal() - 1]
    }
}

/// Reusable, immutable segmentation pipeline; `Send + Sync`
#[derive(Debug)]
pub struct Segmenter {
    splitter: SentenceSplitter,
    detector: ParagraphBoundaryDetector,
    count_normalizer: SentenceCountNormalizer,
}

impl Segmenter {
    /// Build a pipeline from validated thresholds
    pub fn new(config: &SegmenterConfig) -> Result<Self> {
        config.validate()?;
        let splitter = SentenceSplitter::new(config)?;
        let detector = ParagraphBoundaryDetector::new(config, splitter.clone());
        let count_normalizer = SentenceCountNormalizer::new(config)?;
        info!("Segmenter initialized");
        Ok(Self {
            splitter,
            detector,
            count_normalizer,
        })
    }

    pub fn with_default_config() -> Result<Self> {
        Self::new(&SegmenterConfig::default())
    }

    /// Segment one essay. Never fails; degradations are reported as warnings.
    pub fn segment(&self, raw: &str) -> SegmentationResult {
        let mut diagnostics = Diagnostics::new();
        let text = normalize_document(raw);

        if text.is_empty() {
            diagnostics.push(Warning::EmptyInput);
            return SegmentationResult {
                paragraphs: ParagraphSlot::ALL.map(ParagraphBlock::empty),
                warnings: diagnostics.into_warnings(),
            };
        }

        let (sources, detection_warnings) = self.detector.detect(&text);
        diagnostics.extend(detection_warnings);

        let mut sources = sources.into_iter();
        let paragraphs = ParagraphSlot::ALL.map(|slot| {
            let sentences = match sources.next().unwrap_or_default() {
                ParagraphSource::RawText(paragraph) => self.splitter.split(&paragraph),
                ParagraphSource::PreSplitSentences(sentences) => sentences,
            };
            debug!(paragraph = slot.ordinal(), sentences = sentences.len(), "paragraph split");

            let (sentences, warning) = self.count_normalizer.normalize(sentences, slot.ordinal());
            if let Some(warning) = warning {
                diagnostics.push(warning);
            }
            ParagraphBlock::labelled(slot, sentences)
        });

        let result = SegmentationResult {
            paragraphs,
            warnings: diagnostics.into_warnings(),
        };
        info!(
            sentences = result.sentence_count(),
            warnings = result.warnings.len(),
            "essay segmented"
        );
        result
    }
}

/// Segment with the default configuration.
///
/// Fails only if the built-in patterns cannot be compiled.
pub fn segment(raw: &str) -> Result<SegmentationResult> {
    Ok(Segmenter::with_default_config()?.segment(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    static SHARED_SEGMENTER: OnceLock<Segmenter> = OnceLock::new();

    fn get_segmenter() -> &'static Segmenter {
        SHARED_SEGMENTER.get_or_init(|| Segmenter::with_default_config().unwrap())
    }

    #[test]
    fn test_segmenter_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Segmenter>();
    }

    #[test]
    fn test_empty_input() {
        for raw in ["", "  \n\r\n\t ", "<!-- nothing -->"] {
            let result = get_segmenter().segment(raw);
            assert_eq!(result.warnings, vec![Warning::EmptyInput]);
            assert_eq!(result.sentence_count(), 0);
            assert_eq!(result.paragraphs[4].slot, ParagraphSlot::Conclusion);
            assert_eq!(result.paragraphs[4].ordinal, 5);
        }
    }

    #[test]
    fn test_labels_follow_slot_tables() {
        let paragraph = "One sentence here. Two sentence here. Three sentence here.";
        let raw = vec![paragraph; 5].join("\n\n");
        let result = get_segmenter().segment(&raw);

        assert!(result.is_clean());
        let intro = result.paragraph(ParagraphSlot::Introduction);
        assert_eq!(intro.sentences[2].function_tag(), FunctionTag::Thesis);
        assert_eq!(intro.sentences[2].ordinal(), 3);
        let body = result.paragraph(ParagraphSlot::Body2);
        assert_eq!(body.sentences[0].function_tag(), FunctionTag::Topic);
        let conclusion = result.paragraph(ParagraphSlot::Conclusion);
        assert_eq!(conclusion.sentences[1].function_tag(), FunctionTag::Summary);
    }

    #[test]
    fn test_short_paragraph_reported_with_one_based_index() {
        let raw = "A first sentence. A second one. A third one.\n\n\
                   Too short.\n\n\
                   B first sentence. B second one. B third one.\n\n\
                   C first sentence. C second one. C third one.\n\n\
                   D first sentence. D second one. D third one.";
        let result = get_segmenter().segment(raw);
        assert_eq!(
            result.warnings,
            vec![Warning::SentenceCountOutOfRange { paragraph: 2, count: 1 }]
        );
        assert_eq!(result.paragraphs[1].sentences.len(), 1);
        assert_eq!(result.warnings_of_kind(WarningKind::SentenceCountOutOfRange).count(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SegmenterConfig {
            conclusion_scan_fraction: 0.0,
            ..Default::default()
        };
        assert!(Segmenter::new(&config).is_err());
    }

    #[test]
    fn test_result_serializes() {
        let result = get_segmenter().segment("Short text only.");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["paragraphs"].as_array().unwrap().len(), 5);
        assert_eq!(json["paragraphs"][0]["slot"], "introduction");
        assert_eq!(json["warnings"][0]["kind"], "paragraph_count_mismatch");
        assert_eq!(json["warnings"][0]["found"], 1);
        assert_eq!(json["warnings"][1]["kind"], "low_confidence_split");
    }
}
