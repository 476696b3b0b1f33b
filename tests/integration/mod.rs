// Integration test utilities and common code
// WHY: Centralized utilities avoid duplication across integration tests

#![allow(dead_code)]

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture helper for creating temporary directories with essay files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Create an essay file, creating parent directories as needed
    pub fn create_essay_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Aux path for a source, computed independently of the library
    pub fn aux_path<P: AsRef<Path>>(&self, source_path: P) -> PathBuf {
        let source_path = source_path.as_ref();
        let file_stem = source_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown");
        source_path.with_file_name(format!("{file_stem}_segmented.json"))
    }

    pub fn aux_file_exists<P: AsRef<Path>>(&self, source_path: P) -> bool {
        self.aux_path(source_path).exists()
    }

    pub fn read_aux_json<P: AsRef<Path>>(&self, source_path: P) -> serde_json::Value {
        let content = fs::read_to_string(self.aux_path(source_path)).expect("Failed to read aux file");
        serde_json::from_str(&content).expect("Aux file is not valid JSON")
    }
}

/// Path of the compiled CLI binary
pub fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_essay-seams"))
}

/// Sentence texts of every paragraph, in order
pub fn paragraph_texts(result: &essay_seams::SegmentationResult) -> Vec<Vec<String>> {
    result
        .paragraphs
        .iter()
        .map(|paragraph| paragraph.texts().map(str::to_string).collect())
        .collect()
}
