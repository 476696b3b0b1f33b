// Sentence splitting behaviour on essay-style prose
// WHY: Quote and abbreviation handling are the most regression-prone parts of the splitter

mod integration;

use essay_seams::sentence_detector::{AbbreviationGuard, QuoteRules, SentenceSplitter};
use essay_seams::SegmenterConfig;
use integration::fixtures::DIALOGUE_PARAGRAPH;
use std::sync::OnceLock;

static SHARED_SPLITTER: OnceLock<SentenceSplitter> = OnceLock::new();

fn get_splitter() -> &'static SentenceSplitter {
    SHARED_SPLITTER.get_or_init(|| SentenceSplitter::with_default_rules().expect("default splitter"))
}

#[test]
fn test_dialogue_paragraph() {
    let sentences = get_splitter().split(DIALOGUE_PARAGRAPH);
    assert_eq!(
        sentences,
        vec![
            "Dr. Reyes asked the class, \"Who read the chapter? Be honest.\"",
            "Nobody answered at first.",
            "Then Ms. Patel's student said 'I did.'",
            "The room relaxed.",
        ]
    );
}

#[test]
fn test_reference_quote_case() {
    assert_eq!(
        get_splitter().split("He said \"Hello.\" She left."),
        vec!["He said \"Hello.\"", "She left."]
    );
}

#[test]
fn test_reference_abbreviation_case() {
    assert_eq!(get_splitter().split("Dr. Smith arrived. He left.").len(), 2);
}

#[test]
fn test_exclamation_and_question_marks() {
    let sentences = get_splitter().split("What a day! Did anyone expect it? Nobody did.");
    assert_eq!(sentences, vec!["What a day!", "Did anyone expect it?", "Nobody did."]);
}

#[test]
fn test_line_breaks_inside_sentences_collapsed() {
    let sentences = get_splitter().split("The storm\nkept going all night. By morning\n the field was flooded.");
    assert_eq!(sentences, vec!["The storm kept going all night.", "By morning the field was flooded."]);
}

#[test]
fn test_custom_abbreviations() {
    let guard = AbbreviationGuard::with_abbreviations(["Coach."]);
    let splitter = SentenceSplitter::with_rules(&SegmenterConfig::default(), QuoteRules::default(), guard).unwrap();

    let sentences = splitter.split("Coach. Lee won again. The team cheered.");
    assert_eq!(sentences, vec!["Coach. Lee won again.", "The team cheered."]);
    // Built-in titles are not part of a custom guard
    let unguarded = splitter.split("Dr. Lee won again. The team cheered.");
    assert!(!unguarded.contains(&"Dr. Lee won again.".to_string()));
}

#[test]
fn test_splitter_is_deterministic() {
    let first = get_splitter().split(DIALOGUE_PARAGRAPH);
    for _ in 0..10 {
        assert_eq!(get_splitter().split(DIALOGUE_PARAGRAPH), first);
    }
}
