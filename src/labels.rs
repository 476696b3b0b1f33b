// WHY: Rhetorical roles are assigned purely by position, never by content

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed structural positions of an essay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphSlot {
    Introduction,
    Body1,
    Body2,
    Body3,
    Conclusion,
}

impl ParagraphSlot {
    /// All slots in essay order
    pub const ALL: [ParagraphSlot; 5] = [
        ParagraphSlot::Introduction,
        ParagraphSlot::Body1,
        ParagraphSlot::Body2,
        ParagraphSlot::Body3,
        ParagraphSlot::Conclusion,
    ];

    /// 1-based position of the slot
    pub fn ordinal(self) -> usize {
        match self {
            ParagraphSlot::Introduction => 1,
            ParagraphSlot::Body1 => 2,
            ParagraphSlot::Body2 => 3,
            ParagraphSlot::Body3 => 4,
            ParagraphSlot::Conclusion => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ParagraphSlot::Introduction => "introduction",
            ParagraphSlot::Body1 => "body1",
            ParagraphSlot::Body2 => "body2",
            ParagraphSlot::Body3 => "body3",
            ParagraphSlot::Conclusion => "conclusion",
        }
    }
}

impl fmt::Display for ParagraphSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rhetorical function of a sentence within its paragraph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FunctionTag {
    Hook,
    LeadIn,
    Thesis,
    Elaboration,
    Roadmap,
    Topic,
    Evidence,
    Interpretation,
    Transition,
    Implication,
    Restatement,
    Summary,
    Closing,
    Universality,
    Resonance,
}

impl FunctionTag {
    pub fn as_str(self) -> &'static str {
        match self {
            FunctionTag::Hook => "hook",
            FunctionTag::LeadIn => "lead-in",
            FunctionTag::Thesis => "thesis",
            FunctionTag::Elaboration => "elaboration",
            FunctionTag::Roadmap => "roadmap",
            FunctionTag::Topic => "topic",
            FunctionTag::Evidence => "evidence",
            FunctionTag::Interpretation => "interpretation",
            FunctionTag::Transition => "transition",
            FunctionTag::Implication => "implication",
            FunctionTag::Restatement => "restatement",
            FunctionTag::Summary => "summary",
            FunctionTag::Closing => "closing",
            FunctionTag::Universality => "universality",
            FunctionTag::Resonance => "resonance",
        }
    }
}

impl fmt::Display for FunctionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const INTRODUCTION_TAGS: [FunctionTag; 5] = [
    FunctionTag::Hook,
    FunctionTag::LeadIn,
    FunctionTag::Thesis,
    FunctionTag::Elaboration,
    FunctionTag::Roadmap,
];

const BODY_TAGS: [FunctionTag; 5] = [
    FunctionTag::Topic,
    FunctionTag::Evidence,
    FunctionTag::Interpretation,
    FunctionTag::Transition,
    FunctionTag::Implication,
];

const CONCLUSION_TAGS: [FunctionTag; 5] = [
    FunctionTag::Restatement,
    FunctionTag::Summary,
    FunctionTag::Closing,
    FunctionTag::Universality,
    FunctionTag::Resonance,
];

/// Tag for the sentence at 1-based `ordinal` in `slot`; `None` outside 1..=5
pub fn function_tag(slot: ParagraphSlot, ordinal: usize) -> Option<FunctionTag> {
    let table = match slot {
        ParagraphSlot::Introduction => &INTRODUCTION_TAGS,
        ParagraphSlot::Body1 | ParagraphSlot::Body2 | ParagraphSlot::Body3 => &BODY_TAGS,
        ParagraphSlot::Conclusion => &CONCLUSION_TAGS,
    };
    ordinal.checked_sub(1).and_then(|index| table.get(index).copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_introduction_third_is_thesis() {
        assert_eq!(function_tag(ParagraphSlot::Introduction, 3), Some(FunctionTag::Thesis));
    }

    #[test]
    fn test_body_slots_share_table() {
        for slot in [ParagraphSlot::Body1, ParagraphSlot::Body2, ParagraphSlot::Body3] {
            assert_eq!(function_tag(slot, 1), Some(FunctionTag::Topic));
            assert_eq!(function_tag(slot, 4), Some(FunctionTag::Transition));
        }
    }

    #[test]
    fn test_full_table_strings() {
        let rows: Vec<Vec<&str>> = [ParagraphSlot::Introduction, ParagraphSlot::Body2, ParagraphSlot::Conclusion]
            .iter()
            .map(|&slot| (1..=5).filter_map(|i| function_tag(slot, i)).map(FunctionTag::as_str).collect())
            .collect();

        assert_eq!(rows[0], ["hook", "lead-in", "thesis", "elaboration", "roadmap"]);
        assert_eq!(rows[1], ["topic", "evidence", "interpretation", "transition", "implication"]);
        assert_eq!(rows[2], ["restatement", "summary", "closing", "universality", "resonance"]);
    }

    #[test]
    fn test_out_of_range_ordinals() {
        assert_eq!(function_tag(ParagraphSlot::Conclusion, 0), None);
        assert_eq!(function_tag(ParagraphSlot::Conclusion, 6), None);
    }

    #[test]
    fn test_serde_names_match_as_str() {
        assert_eq!(serde_json::to_string(&FunctionTag::LeadIn).unwrap(), "\"lead-in\"");
        assert_eq!(serde_json::to_string(&ParagraphSlot::Body1).unwrap(), "\"body1\"");
        assert_eq!(ParagraphSlot::Body3.to_string(), "body3");
    }
}
