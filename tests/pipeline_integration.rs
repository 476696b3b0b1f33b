// End-to-end segmentation scenarios through the public API
// WHY: Exercises normalizer, paragraph cascade, splitter, count normalizer and labels together

mod integration;

use essay_seams::{
    normalize_document, process_files_parallel, BatchOptions, FunctionTag, ParagraphSlot, Segmenter, Warning,
    WarningKind,
};
use integration::fixtures::{five_by_four_without_blank_lines, numbered_sentences, FIVE_BY_FOUR};
use integration::{paragraph_texts, TestFixture};
use std::sync::{Arc, OnceLock};

static SHARED_SEGMENTER: OnceLock<Segmenter> = OnceLock::new();

fn get_segmenter() -> &'static Segmenter {
    SHARED_SEGMENTER.get_or_init(|| Segmenter::with_default_config().expect("default segmenter"))
}

#[test]
fn test_five_paragraphs_of_four_sentences_is_clean() {
    let result = get_segmenter().segment(FIVE_BY_FOUR);

    assert!(result.is_clean(), "unexpected warnings: {:?}", result.warnings);
    for paragraph in &result.paragraphs {
        assert_eq!(paragraph.sentences.len(), 4, "paragraph {} sentence count", paragraph.ordinal);
    }
    let intro = result.paragraph(ParagraphSlot::Introduction);
    assert_eq!(
        intro.sentences[0].text(),
        "Every school day begins with a choice about how to spend the morning."
    );
    assert_eq!(intro.sentences[2].function_tag(), FunctionTag::Thesis);
    let conclusion = result.paragraph(ParagraphSlot::Conclusion);
    assert_eq!(conclusion.sentences[3].function_tag(), FunctionTag::Universality);
}

#[test]
fn test_blank_line_paragraphs_reproduced_verbatim() {
    let result = get_segmenter().segment(FIVE_BY_FOUR);
    let expected: Vec<String> = FIVE_BY_FOUR.split("\n\n").map(str::to_string).collect();
    let actual: Vec<String> = paragraph_texts(&result).iter().map(|sentences| sentences.join(" ")).collect();
    assert_eq!(actual, expected);
}

#[test]
fn test_line_heuristic_recovers_same_structure() {
    let flattened = five_by_four_without_blank_lines();
    let from_lines = get_segmenter().segment(&flattened);
    let from_blocks = get_segmenter().segment(FIVE_BY_FOUR);

    assert_eq!(from_lines.warnings, vec![Warning::ParagraphCountMismatch { found: 1, used: 5 }]);
    assert!(from_blocks.is_clean());
    assert_eq!(paragraph_texts(&from_lines), paragraph_texts(&from_blocks));
}

#[test]
fn test_crlf_and_comments_do_not_change_result() {
    let noisy = FIVE_BY_FOUR.replace('\n', "\r\n").replace(
        "Firstly,",
        "<!-- reviewer: strong opener -->Firstly,",
    );
    let clean = get_segmenter().segment(FIVE_BY_FOUR);
    assert_eq!(get_segmenter().segment(&noisy), clean);
}

#[test]
fn test_seven_sentence_paragraph_merged() {
    let paragraphs: Vec<String> = (0..5)
        .map(|i| if i == 1 { numbered_sentences(7) } else { numbered_sentences(3) })
        .collect();
    let result = get_segmenter().segment(&paragraphs.join("\n\n"));

    let body = result.paragraph(ParagraphSlot::Body1);
    assert_eq!(body.sentences.len(), 5);
    assert_eq!(
        body.sentences[4].text(),
        "Sentence number 5 makes a point. Sentence number 6 makes a point. Sentence number 7 makes a point."
    );
    assert_eq!(body.sentences[4].function_tag(), FunctionTag::Implication);
    assert!(result.is_clean());
}

#[test]
fn test_unstructured_essay_redistributed() {
    let result = get_segmenter().segment(&numbered_sentences(22));

    let counts: Vec<usize> = result.paragraphs.iter().map(|p| p.sentences.len()).collect();
    assert_eq!(counts, vec![5, 5, 4, 4, 4]);
    assert_eq!(result.sentence_count(), 22);
    assert_eq!(result.warnings, vec![Warning::ParagraphCountMismatch { found: 1, used: 5 }]);
}

#[test]
fn test_long_essay_overflow_lands_in_conclusion() {
    let result = get_segmenter().segment(&numbered_sentences(28));
    let counts: Vec<usize> = result.paragraphs.iter().map(|p| p.sentences.len()).collect();
    assert_eq!(counts, vec![5, 5, 5, 5, 5]);
    assert!(result.paragraphs[4].sentences[4].text().contains("number 28"));
}

#[test]
fn test_tiny_essay_flags_every_paragraph() {
    let raw = "Just one thought about school.";
    let result = get_segmenter().segment(raw);

    assert_eq!(result.warnings_of_kind(WarningKind::ParagraphCountMismatch).count(), 1);
    assert_eq!(result.warnings_of_kind(WarningKind::LowConfidenceSplit).count(), 5);
    assert_eq!(result.warnings_of_kind(WarningKind::SentenceCountOutOfRange).count(), 5);
    let rebuilt: Vec<String> = paragraph_texts(&result).concat();
    assert_eq!(rebuilt.join(" "), raw);
}

#[test]
fn test_empty_input_has_five_empty_paragraphs() {
    let result = get_segmenter().segment("\n\n   \r\n");
    assert_eq!(result.warnings, vec![Warning::EmptyInput]);
    assert!(result.paragraphs.iter().all(|p| p.sentences.is_empty()));
    let slots: Vec<ParagraphSlot> = result.paragraphs.iter().map(|p| p.slot).collect();
    assert_eq!(slots, ParagraphSlot::ALL);
}

#[test]
fn test_normalizer_idempotent_on_fixture() {
    let once = normalize_document(FIVE_BY_FOUR);
    assert_eq!(normalize_document(&once), once);
}

#[tokio::test]
async fn test_batch_processing_of_files() {
    let fixture = TestFixture::new();
    let first = fixture.create_essay_file("class_a/first.txt", FIVE_BY_FOUR);
    let second = fixture.create_essay_file("class_b/second.txt", &numbered_sentences(20));
    let missing = fixture.root_path.join("missing.txt");

    let segmenter = Arc::new(Segmenter::with_default_config().unwrap());
    let options = BatchOptions {
        concurrency: 2,
        ..Default::default()
    };
    let completed = std::sync::atomic::AtomicUsize::new(0);
    let outcomes = process_files_parallel(
        vec![second.clone(), missing.clone(), first.clone()],
        segmenter,
        &options,
        |_| {
            completed.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        },
    )
    .await
    .unwrap();

    assert_eq!(completed.into_inner(), 3);
    let paths: Vec<_> = outcomes.iter().map(|o| o.path.clone()).collect();
    assert_eq!(paths, vec![first, second, missing]);

    assert_eq!(outcomes[0].stats.status, "success");
    assert_eq!(outcomes[0].stats.sentences_detected, 20);
    assert!(outcomes[0].result.as_ref().unwrap().is_clean());
    assert_eq!(outcomes[2].stats.status, "failed");
    assert!(outcomes[2].result.is_none());
}

#[tokio::test]
async fn test_batch_fail_fast_stops_on_missing_file() {
    let fixture = TestFixture::new();
    let missing = fixture.root_path.join("missing.txt");
    let options = BatchOptions {
        fail_fast: true,
        ..Default::default()
    };

    let result = process_files_parallel(
        vec![missing],
        Arc::new(Segmenter::with_default_config().unwrap()),
        &options,
        |_| {},
    )
    .await;
    assert!(result.is_err());
}
