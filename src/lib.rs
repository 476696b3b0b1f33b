pub mod config;
pub mod count_normalizer;
pub mod diagnostics;
pub mod discovery;
pub mod incremental;
pub mod labels;
pub mod normalizer;
pub mod paragraph_detector;
pub mod parallel_processing;
pub mod reader;
pub mod segmentation;
pub mod sentence_detector;

// Re-export the segmentation API for convenient access
pub use config::SegmenterConfig;
pub use diagnostics::{Diagnostics, Warning, WarningKind};
pub use labels::{function_tag, FunctionTag, ParagraphSlot};
pub use normalizer::normalize_document;
pub use paragraph_detector::{ParagraphBoundaryDetector, ParagraphSource, ParagraphStrategy};
pub use segmentation::{segment, ParagraphBlock, SegmentationResult, Segmenter, Sentence};
pub use sentence_detector::SentenceSplitter;

// Re-export incremental processing utilities
pub use incremental::{aux_file_exists, generate_aux_file_path, read_aux_file, should_process_file, write_aux_file};

// Re-export batch processing types used by the CLI and benchmarks
pub use parallel_processing::{process_files_parallel, BatchOptions, FileOutcome, FileStats, OutputFormat, RunStats};
